use thiserror::Error;

/// Errors raised while parsing core enums from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid resource kind: {0}")]
    InvalidResourceKind(String),

    #[error("Invalid login portal: {0}")]
    InvalidPortal(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),
}

impl CoreError {
    /// Create a new InvalidResourceKind error
    pub fn invalid_resource_kind(kind: impl Into<String>) -> Self {
        Self::InvalidResourceKind(kind.into())
    }

    /// Create a new InvalidPortal error
    pub fn invalid_portal(portal: impl Into<String>) -> Self {
        Self::InvalidPortal(portal.into())
    }

    /// Create a new InvalidRole error
    pub fn invalid_role(role: impl Into<String>) -> Self {
        Self::InvalidRole(role.into())
    }
}
