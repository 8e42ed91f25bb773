//! Unit tests for the LinkVault database layer (connection + migrations).

use linkvault::database::{migrations, Database};

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_bookmarks_table() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    for table in ["bookmarks", "schema_version"] {
        let exists: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )
            .unwrap_or(false);
        assert!(exists, "Table '{}' should exist after migrations", table);
    }
}

#[test]
fn test_migrations_create_owner_created_index() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    let exists: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='index' AND name='idx_bookmarks_owner_created'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);
    assert!(exists, "owner/created_at index should exist");
}

#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();
    assert_eq!(
        migrations::get_schema_version(&conn),
        migrations::CURRENT_SCHEMA_VERSION
    );
}

#[test]
fn test_reopen_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let path = dir.path().join("linkvault.db");

    {
        let db = Database::open(&path).expect("first open failed");
        db.connection()
            .execute(
                "INSERT INTO bookmarks (id, owner_id, title, url, created_at) VALUES ('b1', 'u1', 'T', 'https://example.com', 1)",
                [],
            )
            .expect("insert failed");
    }

    // Second open re-runs migrations; data must survive.
    let db = Database::open(&path).expect("second open failed");
    let count: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))
        .expect("count failed");
    assert_eq!(count, 1);
}
