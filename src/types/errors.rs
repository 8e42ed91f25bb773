use std::fmt;

// === StoreError ===

/// Errors returned by bookmark store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No bookmark with the given ID is visible to the caller. Rows outside
    /// the caller's owner scope report this too; they are never revealed.
    NotFound(String),
    /// The underlying database operation failed.
    Database(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "Bookmark not found: {}", id),
            StoreError::Database(msg) => write!(f, "Bookmark store error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

// === AuthError ===

/// Errors from resolving the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No session is present; the caller should redirect to sign-in.
    NotSignedIn,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NotSignedIn => write!(f, "Not signed in"),
        }
    }
}

impl std::error::Error for AuthError {}

// === ValidationError ===

/// Errors from validating add-bookmark form input. Reported inline at the
/// form; never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The title is empty after trimming.
    EmptyTitle,
    /// The URL does not parse as a well-formed absolute URL.
    InvalidUrl(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "Please enter a title"),
            ValidationError::InvalidUrl(url) => write!(f, "Please enter a valid URL: {}", url),
        }
    }
}

impl std::error::Error for ValidationError {}

// === FormError ===

/// Errors from submitting the add-bookmark form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Input failed validation before any store call.
    Validation(ValidationError),
    /// The write-through to the store failed.
    Store(StoreError),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Validation(e) => write!(f, "{}", e),
            FormError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FormError {}

impl From<ValidationError> for FormError {
    fn from(e: ValidationError) -> Self {
        FormError::Validation(e)
    }
}

impl From<StoreError> for FormError {
    fn from(e: StoreError) -> Self {
        FormError::Store(e)
    }
}

// === SyncError ===

/// Errors from the bookmark list synchronizer lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// `start` was called while a subscription is already active.
    AlreadyStarted,
    /// A store operation failed during startup.
    Store(StoreError),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::AlreadyStarted => write!(f, "Synchronizer already started"),
            SyncError::Store(e) => write!(f, "Synchronizer store error: {}", e),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<StoreError> for SyncError {
    fn from(e: StoreError) -> Self {
        SyncError::Store(e)
    }
}
