//! Data access traits.

use std::sync::Arc;

use async_trait::async_trait;
use hospital_core::{Doctor, Patient, Prescription, Record, ResourceKind, Visit};

use crate::error::StorageError;

/// Per-resource data access contract.
///
/// One implementation exists per resource kind and backend. Implementations
/// must be thread-safe (`Send + Sync`). Every call is attempted exactly once;
/// retrying is the caller's business.
#[async_trait]
pub trait ResourceApi<R: Record>: Send + Sync {
    /// Fetches the full collection.
    ///
    /// # Errors
    ///
    /// Returns an error for infrastructure issues or an undecodable response.
    async fn get_all(&self) -> Result<Vec<R>, StorageError>;

    /// Persists a single record and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if the backend enforces identity
    /// uniqueness and the id is taken.
    async fn create(&self, record: &R) -> Result<R, StorageError>;

    /// Persists many records in one call and returns them as stored.
    ///
    /// Backends that only acknowledge a bulk insert return the submitted
    /// records unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the bulk insert was rejected.
    async fn create_many(&self, records: &[R]) -> Result<Vec<R>, StorageError>;

    /// Removes the record with the given identity.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the backend knows the record is
    /// absent; any other failure must propagate as well.
    async fn delete(&self, id: &str) -> Result<(), StorageError>;

    /// Returns the name of this backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

/// Type alias for a shareable resource API.
pub type DynResourceApi<R> = Arc<dyn ResourceApi<R>>;

/// The four resource APIs, one per resource kind.
#[derive(Clone)]
pub struct HospitalApi {
    patients: DynResourceApi<Patient>,
    doctors: DynResourceApi<Doctor>,
    visits: DynResourceApi<Visit>,
    prescriptions: DynResourceApi<Prescription>,
}

impl HospitalApi {
    pub fn new(
        patients: DynResourceApi<Patient>,
        doctors: DynResourceApi<Doctor>,
        visits: DynResourceApi<Visit>,
        prescriptions: DynResourceApi<Prescription>,
    ) -> Self {
        Self {
            patients,
            doctors,
            visits,
            prescriptions,
        }
    }

    /// The API for records of type `R`.
    pub fn resource<R: HospitalRecord>(&self) -> &DynResourceApi<R> {
        R::select(self)
    }

    /// Deletes a record of any kind by identity.
    pub async fn delete(&self, kind: ResourceKind, id: &str) -> Result<(), StorageError> {
        match kind {
            ResourceKind::Patient => self.patients.delete(id).await,
            ResourceKind::Doctor => self.doctors.delete(id).await,
            ResourceKind::Visit => self.visits.delete(id).await,
            ResourceKind::Prescription => self.prescriptions.delete(id).await,
        }
    }

    /// Backend name shared by all four APIs, or `"mixed"` when they differ.
    pub fn backend_name(&self) -> &'static str {
        let name = self.patients.backend_name();
        let shared = [
            self.doctors.backend_name(),
            self.visits.backend_name(),
            self.prescriptions.backend_name(),
        ]
        .iter()
        .all(|other| *other == name);
        if shared { name } else { "mixed" }
    }
}

impl std::fmt::Debug for HospitalApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HospitalApi")
            .field("backend", &self.backend_name())
            .finish()
    }
}

/// A record type that has an API slot in [`HospitalApi`].
pub trait HospitalRecord: Record {
    fn select(api: &HospitalApi) -> &DynResourceApi<Self>;
}

impl HospitalRecord for Patient {
    fn select(api: &HospitalApi) -> &DynResourceApi<Self> {
        &api.patients
    }
}

impl HospitalRecord for Doctor {
    fn select(api: &HospitalApi) -> &DynResourceApi<Self> {
        &api.doctors
    }
}

impl HospitalRecord for Visit {
    fn select(api: &HospitalApi) -> &DynResourceApi<Self> {
        &api.visits
    }
}

impl HospitalRecord for Prescription {
    fn select(api: &HospitalApi) -> &DynResourceApi<Self> {
        &api.prescriptions
    }
}
