use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use hospital_core::{Doctor, Patient, Prescription, Record, Visit};
use hospital_storage::{HospitalApi, ResourceApi, StorageError};
use indexmap::IndexMap;
use tokio::sync::RwLock;

/// In-memory collection of one resource kind.
///
/// This backend provides:
/// - Insertion-ordered listing
/// - Identity uniqueness on create (`AlreadyExists` on a taken id)
/// - All-or-none bulk inserts
/// - An availability switch that makes every call fail with a connection
///   error, for exercising failure paths
#[derive(Debug)]
pub struct InMemoryResourceApi<R: Record> {
    data: RwLock<IndexMap<String, R>>,
    available: AtomicBool,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Record> InMemoryResourceApi<R> {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(IndexMap::new()),
            available: AtomicBool::new(true),
            _marker: PhantomData,
        }
    }

    /// Inserts records directly, bypassing availability and uniqueness checks.
    /// Later duplicates overwrite earlier ones.
    pub async fn seed(&self, records: impl IntoIterator<Item = R>) {
        let mut guard = self.data.write().await;
        for record in records {
            guard.insert(record.id().to_string(), record);
        }
    }

    /// Toggles the simulated outage.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.data.read().await.contains_key(id)
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StorageError::connection_error(format!(
                "in-memory {} store is unavailable",
                R::KIND
            )))
        }
    }
}

impl<R: Record> Default for InMemoryResourceApi<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> ResourceApi<R> for InMemoryResourceApi<R> {
    async fn get_all(&self) -> Result<Vec<R>, StorageError> {
        self.check_available()?;
        Ok(self.data.read().await.values().cloned().collect())
    }

    async fn create(&self, record: &R) -> Result<R, StorageError> {
        self.check_available()?;
        let mut guard = self.data.write().await;
        if guard.contains_key(record.id()) {
            return Err(StorageError::already_exists(R::KIND, record.id()));
        }
        guard.insert(record.id().to_string(), record.clone());
        tracing::trace!(kind = %R::KIND, id = record.id(), "Inserted record");
        Ok(record.clone())
    }

    async fn create_many(&self, records: &[R]) -> Result<Vec<R>, StorageError> {
        self.check_available()?;
        let mut guard = self.data.write().await;

        // Check every id (against stored data and within the batch) before
        // touching anything.
        let mut seen = std::collections::HashSet::new();
        for record in records {
            if guard.contains_key(record.id()) || !seen.insert(record.id()) {
                return Err(StorageError::already_exists(R::KIND, record.id()));
            }
        }

        for record in records {
            guard.insert(record.id().to_string(), record.clone());
        }
        tracing::trace!(kind = %R::KIND, count = records.len(), "Inserted records");
        Ok(records.to_vec())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.check_available()?;
        let mut guard = self.data.write().await;
        match guard.shift_remove(id) {
            Some(_) => Ok(()),
            None => Err(StorageError::not_found(R::KIND, id)),
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// One in-memory collection per resource kind.
///
/// Keeps typed handles so callers can seed data or simulate outages after
/// handing a [`HospitalApi`] to the store.
#[derive(Debug, Clone)]
pub struct InMemoryBackends {
    pub patients: Arc<InMemoryResourceApi<Patient>>,
    pub doctors: Arc<InMemoryResourceApi<Doctor>>,
    pub visits: Arc<InMemoryResourceApi<Visit>>,
    pub prescriptions: Arc<InMemoryResourceApi<Prescription>>,
}

impl InMemoryBackends {
    pub fn new() -> Self {
        Self {
            patients: Arc::new(InMemoryResourceApi::new()),
            doctors: Arc::new(InMemoryResourceApi::new()),
            visits: Arc::new(InMemoryResourceApi::new()),
            prescriptions: Arc::new(InMemoryResourceApi::new()),
        }
    }

    /// A `HospitalApi` sharing these collections.
    pub fn api(&self) -> HospitalApi {
        HospitalApi::new(
            self.patients.clone(),
            self.doctors.clone(),
            self.visits.clone(),
            self.prescriptions.clone(),
        )
    }
}

impl Default for InMemoryBackends {
    fn default() -> Self {
        Self::new()
    }
}
