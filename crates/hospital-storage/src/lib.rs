//! # hospital-storage
//!
//! Data access layer for hospital records.
//!
//! This crate defines the traits every backend implements. It contains no
//! backend itself; `hospital-db-memory` and `hospital-client` provide those.
//!
//! ## Overview
//!
//! [`ResourceApi`] is the per-resource contract (list, create, bulk create,
//! delete). [`HospitalApi`] bundles one `ResourceApi` per resource kind and is
//! what the state store is constructed with.
//!
//! ## Example
//!
//! ```ignore
//! use hospital_core::Patient;
//! use hospital_storage::{HospitalApi, StorageError};
//!
//! async fn patient_count(api: &HospitalApi) -> Result<usize, StorageError> {
//!     let patients = api.resource::<Patient>().get_all().await?;
//!     Ok(patients.len())
//! }
//! ```
//!
//! ## Backends
//!
//! ```ignore
//! use async_trait::async_trait;
//! use hospital_core::Patient;
//! use hospital_storage::{ResourceApi, StorageError};
//!
//! struct MyPatients;
//!
//! #[async_trait]
//! impl ResourceApi<Patient> for MyPatients {
//!     async fn get_all(&self) -> Result<Vec<Patient>, StorageError> {
//!         // Implementation
//!     }
//!     // ... other methods
//! }
//! ```

mod error;
mod traits;

pub use error::{ErrorCategory, StorageError};
pub use traits::{DynResourceApi, HospitalApi, HospitalRecord, ResourceApi};
