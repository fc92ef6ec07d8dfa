//! In-memory data access backend for hospital records.
//!
//! This crate provides an in-memory implementation of the `ResourceApi` trait
//! from `hospital-storage`, keeping each collection in an insertion-ordered
//! map behind a tokio `RwLock`.
//!
//! # Example
//!
//! ```ignore
//! use hospital_core::Patient;
//! use hospital_db_memory::InMemoryBackends;
//!
//! let backends = InMemoryBackends::new();
//! backends.patients.seed([Patient::new("P001")]).await;
//!
//! let api = backends.api();
//! let patients = api.resource::<Patient>().get_all().await?;
//! ```

pub mod storage;

// Re-export the trait for convenience
pub use hospital_storage::{HospitalApi, ResourceApi, StorageError};

pub use storage::{InMemoryBackends, InMemoryResourceApi};

/// Creates a `HospitalApi` over four empty in-memory collections.
pub fn create_hospital_api() -> HospitalApi {
    InMemoryBackends::new().api()
}
