// LinkVault state managers
// Managers own stateful, long-lived pieces of the application.

pub mod list_synchronizer;
