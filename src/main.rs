//! LinkVault — a personal bookmark manager with live list synchronization.
//!
//! Entry point: runs an interactive console demo walking through the auth
//! gate, the add-bookmark form, the live list synchronizer, and row deletes.

use std::time::Duration;

use linkvault::app::App;
use linkvault::auth::StaticSessionProvider;

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

/// Gives the synchronizer's driver task a moment to apply pending events.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              LinkVault v{} — Demo Mode                    ║", env!("CARGO_PKG_VERSION"));
    println!("║     Personal bookmarks with live list synchronization      ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    section("Auth Gate");
    let signed_out = App::in_memory(Box::new(StaticSessionProvider::signed_out()))
        .expect("failed to initialize app");
    match signed_out.open_bookmarks_view() {
        Ok(_) => println!("  Unexpected: view opened without a session"),
        Err(e) => println!("  No session: {} -> would redirect to sign-in", e),
    }

    let app = App::in_memory(Box::new(StaticSessionProvider::signed_in(
        "user-42",
        "demo@linkvault.dev",
    )))
    .expect("failed to initialize app");
    let mut view = app.open_bookmarks_view().expect("session should resolve");
    println!("  Signed in as {}", view.session.email);
    println!("  ✓ Auth gate OK");
    println!();

    section("Live Bookmark List");
    let mut snapshots = view.synchronizer.view();
    view.mount().expect("fresh view should mount");
    settle().await;
    println!("  Initial load: ready = {}", snapshots.borrow().ready);

    view.form.set_title("Rust Programming Language  ");
    view.form.set_url("https://www.rust-lang.org");
    view.form.submit().expect("valid bookmark should submit");
    view.form.set_title("Example");
    view.form.set_url("https://example.com/docs");
    view.form.submit().expect("valid bookmark should submit");
    settle().await;

    {
        let current = snapshots.borrow_and_update();
        println!("  After two submits, {} bookmarks (newest first):", current.items.len());
        for bookmark in &current.items {
            println!("    • {} — {}", bookmark.title, bookmark.url);
        }
    }

    view.form.set_title("Broken");
    view.form.set_url("not a url");
    if view.form.submit().is_err() {
        println!("  Rejected invalid URL: {}", view.form.error().unwrap_or_default());
    }
    println!("  ✓ Form validation OK");
    println!();

    section("Row Delete, Observed Through the Feed");
    let doomed = snapshots.borrow().items[0].clone();
    let mut row = view.row(doomed.clone());
    println!("  Deleting \"{}\" ({})", doomed.title, row.display_domain());
    row.delete().expect("delete should succeed");
    settle().await;
    println!("  List now has {} bookmark(s)", snapshots.borrow().items.len());
    let json = serde_json::to_string_pretty(&snapshots.borrow().items)
        .unwrap_or_else(|_| "[]".to_string());
    println!("  Remaining, as the store sees them:\n{}", json);
    println!("  ✓ Feed-driven removal OK");
    println!();

    view.unmount();
    app.auth.sign_out();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ Demo complete — signed out");
    println!("═══════════════════════════════════════════════════════════════");
}
