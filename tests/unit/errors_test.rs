//! Unit tests for LinkVault error types: Display formatting and conversions.

use linkvault::types::errors::{
    AuthError, FormError, StoreError, SyncError, ValidationError,
};

#[test]
fn test_store_error_display() {
    assert_eq!(
        StoreError::NotFound("abc".to_string()).to_string(),
        "Bookmark not found: abc"
    );
    assert_eq!(
        StoreError::Database("disk I/O error".to_string()).to_string(),
        "Bookmark store error: disk I/O error"
    );
}

#[test]
fn test_auth_error_display() {
    assert_eq!(AuthError::NotSignedIn.to_string(), "Not signed in");
}

#[test]
fn test_validation_error_display() {
    assert_eq!(
        ValidationError::EmptyTitle.to_string(),
        "Please enter a title"
    );
    assert_eq!(
        ValidationError::InvalidUrl("nope".to_string()).to_string(),
        "Please enter a valid URL: nope"
    );
}

#[test]
fn test_form_error_wraps_sources() {
    let validation: FormError = ValidationError::EmptyTitle.into();
    assert_eq!(validation, FormError::Validation(ValidationError::EmptyTitle));
    assert_eq!(validation.to_string(), "Please enter a title");

    let store: FormError = StoreError::NotFound("x".to_string()).into();
    assert_eq!(store.to_string(), "Bookmark not found: x");
}

#[test]
fn test_sync_error_display() {
    assert_eq!(
        SyncError::AlreadyStarted.to_string(),
        "Synchronizer already started"
    );
    let wrapped: SyncError = StoreError::Database("boom".to_string()).into();
    assert_eq!(
        wrapped.to_string(),
        "Synchronizer store error: Bookmark store error: boom"
    );
}

#[test]
fn test_errors_implement_std_error() {
    fn assert_error<E: std::error::Error>(_e: &E) {}
    assert_error(&StoreError::NotFound("x".to_string()));
    assert_error(&AuthError::NotSignedIn);
    assert_error(&ValidationError::EmptyTitle);
    assert_error(&FormError::Validation(ValidationError::EmptyTitle));
    assert_error(&SyncError::AlreadyStarted);
}
