//! Store state: four ordered collections, the auth slice and load tracking.

use hospital_core::{AuthState, Doctor, Patient, Prescription, Record, ResourceKind, Visit};
use hospital_storage::HospitalRecord;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Insertion-ordered collection keyed by identity field.
///
/// Identity is unique: inserting a record whose id is already present is a
/// no-op (first write wins).
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<R: Record> {
    records: IndexMap<String, R>,
}

impl<R: Record> Collection<R> {
    pub fn new() -> Self {
        Self {
            records: IndexMap::new(),
        }
    }

    /// Builds a collection from a sequence, keeping the first of any
    /// duplicated ids.
    pub fn from_records(records: impl IntoIterator<Item = R>) -> Self {
        let mut collection = Self::new();
        collection.append(records);
        collection
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<R> {
        self.records.values().cloned().collect()
    }

    /// Appends records whose ids are not yet present. Returns how many were
    /// actually appended.
    pub(crate) fn append(&mut self, records: impl IntoIterator<Item = R>) -> usize {
        let mut appended = 0;
        for record in records {
            if self.records.contains_key(record.id()) {
                tracing::warn!(
                    kind = %R::KIND,
                    id = record.id(),
                    "Ignoring record with duplicate id"
                );
                continue;
            }
            self.records.insert(record.id().to_string(), record);
            appended += 1;
        }
        appended
    }

    /// Removes the record with this id, keeping the order of the rest.
    pub(crate) fn remove(&mut self, id: &str) -> bool {
        self.records.shift_remove(id).is_some()
    }
}

impl<R: Record> Default for Collection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Serialize for Collection<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.records.values())
    }
}

/// Outcome of the initial fetch for one resource kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Pending,
    Ready,
    Failed(String),
}

impl LoadStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadStatus::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadStatus::Failed(_))
    }
}

/// Load status per resource kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadTracker {
    patients: LoadStatus,
    doctors: LoadStatus,
    visits: LoadStatus,
    prescriptions: LoadStatus,
}

impl LoadTracker {
    pub fn get(&self, kind: ResourceKind) -> &LoadStatus {
        match kind {
            ResourceKind::Patient => &self.patients,
            ResourceKind::Doctor => &self.doctors,
            ResourceKind::Visit => &self.visits,
            ResourceKind::Prescription => &self.prescriptions,
        }
    }

    pub(crate) fn set(&mut self, kind: ResourceKind, status: LoadStatus) {
        let slot = match kind {
            ResourceKind::Patient => &mut self.patients,
            ResourceKind::Doctor => &mut self.doctors,
            ResourceKind::Visit => &mut self.visits,
            ResourceKind::Prescription => &mut self.prescriptions,
        };
        *slot = status;
    }

    /// True once no kind is still pending, whether it loaded or failed.
    pub fn is_settled(&self) -> bool {
        ResourceKind::ALL.iter().all(|k| !self.get(*k).is_pending())
    }

    pub fn failed(&self) -> Vec<ResourceKind> {
        ResourceKind::ALL
            .into_iter()
            .filter(|k| self.get(*k).is_failed())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &LoadStatus)> {
        ResourceKind::ALL.into_iter().map(|k| (k, self.get(k)))
    }
}

/// The whole client-side snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HospitalState {
    pub patients: Collection<Patient>,
    pub doctors: Collection<Doctor>,
    pub visits: Collection<Visit>,
    pub prescriptions: Collection<Prescription>,
    pub auth: AuthState,
    pub load: LoadTracker,
}

impl HospitalState {
    pub fn collection<R: StoreRecord>(&self) -> &Collection<R> {
        R::collection(self)
    }

    /// Number of records held for a kind.
    pub fn count(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Patient => self.patients.len(),
            ResourceKind::Doctor => self.doctors.len(),
            ResourceKind::Visit => self.visits.len(),
            ResourceKind::Prescription => self.prescriptions.len(),
        }
    }

    /// Removes the record of `kind` with identity `id`. Returns whether one
    /// was present.
    pub(crate) fn remove(&mut self, kind: ResourceKind, id: &str) -> bool {
        match kind {
            ResourceKind::Patient => self.patients.remove(id),
            ResourceKind::Doctor => self.doctors.remove(id),
            ResourceKind::Visit => self.visits.remove(id),
            ResourceKind::Prescription => self.prescriptions.remove(id),
        }
    }
}

/// Records of a single kind travelling through an action.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceBatch {
    Patients(Vec<Patient>),
    Doctors(Vec<Doctor>),
    Visits(Vec<Visit>),
    Prescriptions(Vec<Prescription>),
}

impl ResourceBatch {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceBatch::Patients(_) => ResourceKind::Patient,
            ResourceBatch::Doctors(_) => ResourceKind::Doctor,
            ResourceBatch::Visits(_) => ResourceKind::Visit,
            ResourceBatch::Prescriptions(_) => ResourceKind::Prescription,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ResourceBatch::Patients(r) => r.len(),
            ResourceBatch::Doctors(r) => r.len(),
            ResourceBatch::Visits(r) => r.len(),
            ResourceBatch::Prescriptions(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A record type the store holds a collection for.
pub trait StoreRecord: HospitalRecord {
    fn collection(state: &HospitalState) -> &Collection<Self>;

    fn into_batch(records: Vec<Self>) -> ResourceBatch;
}

impl StoreRecord for Patient {
    fn collection(state: &HospitalState) -> &Collection<Self> {
        &state.patients
    }

    fn into_batch(records: Vec<Self>) -> ResourceBatch {
        ResourceBatch::Patients(records)
    }
}

impl StoreRecord for Doctor {
    fn collection(state: &HospitalState) -> &Collection<Self> {
        &state.doctors
    }

    fn into_batch(records: Vec<Self>) -> ResourceBatch {
        ResourceBatch::Doctors(records)
    }
}

impl StoreRecord for Visit {
    fn collection(state: &HospitalState) -> &Collection<Self> {
        &state.visits
    }

    fn into_batch(records: Vec<Self>) -> ResourceBatch {
        ResourceBatch::Visits(records)
    }
}

impl StoreRecord for Prescription {
    fn collection(state: &HospitalState) -> &Collection<Self> {
        &state.prescriptions
    }

    fn into_batch(records: Vec<Self>) -> ResourceBatch {
        ResourceBatch::Prescriptions(records)
    }
}
