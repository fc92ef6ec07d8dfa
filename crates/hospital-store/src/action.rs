//! State transitions.
//!
//! [`apply`] is the single place where [`HospitalState`] changes. It is a pure
//! function of the current state and the action: no I/O, no notifications.

use hospital_core::{AuthState, ResourceKind, User};

use crate::state::{Collection, HospitalState, LoadStatus, ResourceBatch};

/// A change to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum HospitalAction {
    /// Replace a whole collection and mark its kind as loaded.
    SetAll(ResourceBatch),
    /// Append records, skipping ids already present.
    Add(ResourceBatch),
    /// Remove the record with this identity, if held.
    Delete { kind: ResourceKind, id: String },
    /// Record that the initial fetch for a kind failed.
    LoadFailed { kind: ResourceKind, message: String },
    Login(User),
    Logout,
}

impl HospitalAction {
    pub fn name(&self) -> &'static str {
        match self {
            HospitalAction::SetAll(_) => "set_all",
            HospitalAction::Add(_) => "add",
            HospitalAction::Delete { .. } => "delete",
            HospitalAction::LoadFailed { .. } => "load_failed",
            HospitalAction::Login(_) => "login",
            HospitalAction::Logout => "logout",
        }
    }
}

/// Applies `action` to `state` in place.
///
/// Returns the number of records the action affected: the collection size
/// after `SetAll`, records appended for `Add`, 0 or 1 for `Delete`, and 0
/// for the auth and load-status actions.
pub fn apply(state: &mut HospitalState, action: &HospitalAction) -> usize {
    match action {
        HospitalAction::SetAll(batch) => {
            let kind = batch.kind();
            let count = match batch.clone() {
                ResourceBatch::Patients(r) => replace(&mut state.patients, r),
                ResourceBatch::Doctors(r) => replace(&mut state.doctors, r),
                ResourceBatch::Visits(r) => replace(&mut state.visits, r),
                ResourceBatch::Prescriptions(r) => replace(&mut state.prescriptions, r),
            };
            state.load.set(kind, LoadStatus::Ready);
            count
        }
        HospitalAction::Add(batch) => match batch.clone() {
            ResourceBatch::Patients(r) => state.patients.append(r),
            ResourceBatch::Doctors(r) => state.doctors.append(r),
            ResourceBatch::Visits(r) => state.visits.append(r),
            ResourceBatch::Prescriptions(r) => state.prescriptions.append(r),
        },
        HospitalAction::Delete { kind, id } => usize::from(state.remove(*kind, id)),
        HospitalAction::LoadFailed { kind, message } => {
            state.load.set(*kind, LoadStatus::Failed(message.clone()));
            0
        }
        HospitalAction::Login(user) => {
            state.auth = AuthState::logged_in(user.clone());
            0
        }
        HospitalAction::Logout => {
            state.auth = AuthState::logged_out();
            0
        }
    }
}

/// Returns the state that results from applying `action` to `state`.
pub fn reduce(state: &HospitalState, action: &HospitalAction) -> HospitalState {
    let mut next = state.clone();
    apply(&mut next, action);
    next
}

fn replace<R: hospital_core::Record>(slot: &mut Collection<R>, records: Vec<R>) -> usize {
    *slot = Collection::from_records(records);
    slot.len()
}
