//! LinkVault — a personal bookmark manager with live list synchronization.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod auth;
pub mod database;
pub mod managers;
pub mod signal;
pub mod store;
pub mod types;
pub mod views;
