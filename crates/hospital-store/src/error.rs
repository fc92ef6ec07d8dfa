use hospital_core::ResourceKind;
use hospital_storage::StorageError;

/// Errors surfaced by store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to delete {kind} {id}: {source}")]
    Delete {
        kind: ResourceKind,
        id: String,
        #[source]
        source: StorageError,
    },

    #[error("Failed to save {kind} records: {source}")]
    Persist {
        kind: ResourceKind,
        #[source]
        source: StorageError,
    },
}

impl StoreError {
    pub fn kind(&self) -> ResourceKind {
        match self {
            StoreError::Delete { kind, .. } | StoreError::Persist { kind, .. } => *kind,
        }
    }

    /// The data access error behind this failure.
    pub fn storage_error(&self) -> &StorageError {
        match self {
            StoreError::Delete { source, .. } | StoreError::Persist { source, .. } => source,
        }
    }
}
