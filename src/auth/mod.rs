//! Auth gate for LinkVault.
//!
//! Thin glue over an external identity provider: resolves the current
//! session before a protected view renders. An absent session maps to the
//! sign-in redirect in a front end; here it is `AuthError::NotSignedIn`.

use crate::types::errors::AuthError;

/// An authenticated user session resolved by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
}

/// Trait over the identity provider's session surface.
pub trait SessionProvider: Send + Sync {
    /// The current session, if any.
    fn current_session(&self) -> Option<Session>;
    /// Ends the current session.
    fn sign_out(&self);
}

/// Gate in front of protected views.
pub struct AuthGate {
    provider: Box<dyn SessionProvider>,
}

impl AuthGate {
    pub fn new(provider: Box<dyn SessionProvider>) -> Self {
        Self { provider }
    }

    /// Resolves the current session or reports that sign-in is required.
    pub fn resolve(&self) -> Result<Session, AuthError> {
        self.provider.current_session().ok_or(AuthError::NotSignedIn)
    }

    /// Signs the current user out.
    pub fn sign_out(&self) {
        self.provider.sign_out();
    }
}

/// Session provider holding a fixed, optionally cleared session.
///
/// Backs the demo binary and tests; a real deployment wires the identity
/// provider's client here.
pub struct StaticSessionProvider {
    session: std::sync::Mutex<Option<Session>>,
}

impl StaticSessionProvider {
    pub fn signed_in(user_id: &str, email: &str) -> Self {
        Self {
            session: std::sync::Mutex::new(Some(Session {
                user_id: user_id.to_string(),
                email: email.to_string(),
            })),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            session: std::sync::Mutex::new(None),
        }
    }
}

impl SessionProvider for StaticSessionProvider {
    fn current_session(&self) -> Option<Session> {
        self.session
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn sign_out(&self) {
        self.session
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
    }
}
