//! Credential check for the login operation.

use std::fmt;

use hospital_core::{Portal, Role, User};

/// The single administrator credential pair accepted on the admin portal.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub user_id: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
        }
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self::new("admin", "admin123")
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Checks a login attempt.
///
/// Only the admin portal has credentials; every doctor-portal attempt fails.
/// Comparison is exact and case-sensitive.
pub fn authenticate(
    credentials: &AdminCredentials,
    user_id: &str,
    password: &str,
    portal: Portal,
) -> Result<User, AuthError> {
    match portal {
        Portal::Admin if user_id == credentials.user_id && password == credentials.password => {
            Ok(User::new(user_id, Role::Admin))
        }
        _ => Err(AuthError::InvalidCredentials),
    }
}
