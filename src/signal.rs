//! Local "bookmark added" signal.
//!
//! In-process, same-view notification channel between the add-bookmark form
//! and the list synchronizer, distinct from the remote change feed. Modeled
//! as an explicit typed channel handed to the form at construction rather
//! than a process-global event bus.

use tokio::sync::mpsc;

/// Creates a connected notifier/listener pair.
pub fn added_channel() -> (AddedNotifier, AddedListener) {
    let (tx, rx) = mpsc::unbounded_channel();
    (AddedNotifier { tx }, AddedListener { rx })
}

/// Sending half, held by the form. Cloneable; fire-and-forget.
#[derive(Clone)]
pub struct AddedNotifier {
    tx: mpsc::UnboundedSender<()>,
}

impl AddedNotifier {
    /// Fires the signal. No delivery guarantee: a torn-down listener is not
    /// an error.
    pub fn notify(&self) {
        let _ = self.tx.send(());
    }
}

/// Receiving half, consumed by the synchronizer's driver task.
pub struct AddedListener {
    rx: mpsc::UnboundedReceiver<()>,
}

impl AddedListener {
    /// Waits for the next signal. Returns `None` when every notifier is gone.
    pub async fn recv(&mut self) -> Option<()> {
        self.rx.recv().await
    }
}
