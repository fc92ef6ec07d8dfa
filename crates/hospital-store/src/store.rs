use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use hospital_core::{
    AuthState, Doctor, Notification, NotificationBroadcaster, Patient, Portal, Prescription,
    ResourceKind, User, Visit,
};
use hospital_storage::{HospitalApi, StorageError};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::action::{HospitalAction, apply};
use crate::auth::{AdminCredentials, AuthError, authenticate};
use crate::error::StoreError;
use crate::state::{HospitalState, LoadTracker, StoreRecord};

/// The domain state store.
///
/// Holds the current [`HospitalState`] behind an [`ArcSwap`]: reads are
/// lock-free snapshots, and every mutation is one reducer step swapped in
/// atomically. Remote calls never hold any lock, so readers keep seeing the
/// pre-call state until the call settles.
pub struct HospitalStore {
    api: HospitalApi,
    state: ArcSwap<HospitalState>,
    notifications: Arc<NotificationBroadcaster>,
    credentials: AdminCredentials,
}

impl HospitalStore {
    pub fn builder(api: HospitalApi) -> HospitalStoreBuilder {
        HospitalStoreBuilder::new(api)
    }

    /// Current snapshot.
    pub fn state(&self) -> Arc<HospitalState> {
        self.state.load_full()
    }

    /// Records of type `R` in collection order.
    pub fn records<R: StoreRecord>(&self) -> Vec<R> {
        self.state.load().collection::<R>().to_vec()
    }

    pub fn auth(&self) -> AuthState {
        self.state.load().auth.clone()
    }

    pub fn load_status(&self) -> LoadTracker {
        self.state.load().load.clone()
    }

    /// True once every resource kind has either loaded or failed to load.
    pub fn is_ready(&self) -> bool {
        self.state.load().load.is_settled()
    }

    pub fn api(&self) -> &HospitalApi {
        &self.api
    }

    pub fn notifications(&self) -> &Arc<NotificationBroadcaster> {
        &self.notifications
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    /// Applies one action atomically and returns the number of records it
    /// affected.
    pub fn dispatch(&self, action: HospitalAction) -> usize {
        let mut affected = 0;
        self.state.rcu(|current| {
            let mut next = HospitalState::clone(current);
            affected = apply(&mut next, &action);
            next
        });
        debug!(action = action.name(), affected, "Applied action");
        affected
    }

    /// Fetches all four collections concurrently.
    ///
    /// Each kind settles independently: a success replaces its collection
    /// and marks it ready, a failure marks it failed and publishes an error
    /// notification. Nothing is retried.
    pub async fn load(&self) -> LoadTracker {
        info!(backend = self.api.backend_name(), "Loading hospital records");
        tokio::join!(
            self.load_resource::<Patient>(),
            self.load_resource::<Doctor>(),
            self.load_resource::<Visit>(),
            self.load_resource::<Prescription>(),
        );
        self.load_status()
    }

    async fn load_resource<R: StoreRecord>(&self) {
        match self.api.resource::<R>().get_all().await {
            Ok(records) => {
                let count = self.dispatch(HospitalAction::SetAll(R::into_batch(records)));
                info!(kind = %R::KIND, count, "Loaded records");
            }
            Err(e) => {
                warn!(
                    kind = %R::KIND,
                    category = %e.category(),
                    error = %e,
                    "Failed to load records"
                );
                self.dispatch(HospitalAction::LoadFailed {
                    kind: R::KIND,
                    message: e.to_string(),
                });
                self.notifications
                    .error(format!("Failed to load {}: {e}", R::KIND.plural()));
            }
        }
    }

    /// Replaces a collection wholesale. Local only.
    pub fn set_all<R: StoreRecord>(&self, records: Vec<R>) -> usize {
        self.dispatch(HospitalAction::SetAll(R::into_batch(records)))
    }

    /// Appends one record that is already persisted upstream. Local only.
    ///
    /// Returns false when a record with the same identity is already held.
    pub fn add_one<R: StoreRecord>(&self, record: R) -> bool {
        self.add_many(vec![record]) == 1
    }

    /// Appends records that are already persisted upstream. Local only.
    ///
    /// Returns how many were appended; records whose identity is already held
    /// are skipped.
    pub fn add_many<R: StoreRecord>(&self, records: Vec<R>) -> usize {
        self.dispatch(HospitalAction::Add(R::into_batch(records)))
    }

    /// Deletes a record remotely, then locally.
    ///
    /// The remote delete is attempted exactly once. On failure the error is
    /// returned, an error notification is published and local state is left
    /// as it was.
    pub async fn delete_one(&self, kind: ResourceKind, id: &str) -> Result<(), StoreError> {
        if let Err(source) = self.api.delete(kind, id).await {
            let category = source.category();
            let err = StoreError::Delete {
                kind,
                id: id.to_string(),
                source,
            };
            warn!(%kind, id, %category, error = %err, "Remote delete failed");
            self.notifications.error(err.to_string());
            return Err(err);
        }

        let removed = self.dispatch(HospitalAction::Delete {
            kind,
            id: id.to_string(),
        });
        if removed == 0 {
            debug!(%kind, id, "Deleted record was not held locally");
        }
        self.notifications
            .success(format!("{} deleted", kind.display_name()));
        Ok(())
    }

    /// Creates a record remotely, then appends what the server stored.
    pub async fn persist_one<R: StoreRecord>(&self, record: R) -> Result<R, StoreError> {
        let stored = match self.api.resource::<R>().create(&record).await {
            Ok(stored) => stored,
            Err(source) => return Err(self.persist_failed(R::KIND, source)),
        };

        self.dispatch(HospitalAction::Add(R::into_batch(vec![stored.clone()])));
        self.notifications
            .success(format!("{} saved", R::KIND.display_name()));
        Ok(stored)
    }

    /// Bulk-creates records remotely, then appends what the server stored.
    ///
    /// Returns how many records were appended locally. An empty input makes
    /// no remote call.
    pub async fn persist_many<R: StoreRecord>(&self, records: Vec<R>) -> Result<usize, StoreError> {
        if records.is_empty() {
            return Ok(0);
        }

        let stored = match self.api.resource::<R>().create_many(&records).await {
            Ok(stored) => stored,
            Err(source) => return Err(self.persist_failed(R::KIND, source)),
        };

        let saved = stored.len();
        let appended = self.dispatch(HospitalAction::Add(R::into_batch(stored)));
        info!(kind = %R::KIND, saved, appended, "Persisted records");
        self.notifications
            .success(format!("{saved} {} saved", R::KIND.plural()));
        Ok(appended)
    }

    fn persist_failed(&self, kind: ResourceKind, source: StorageError) -> StoreError {
        let category = source.category();
        let err = StoreError::Persist { kind, source };
        warn!(%kind, %category, error = %err, "Remote create failed");
        self.notifications.error(err.to_string());
        err
    }

    /// Checks credentials and, on success, logs the user in.
    ///
    /// On failure the auth slice is untouched.
    pub fn login(&self, user_id: &str, password: &str, portal: Portal) -> Result<User, AuthError> {
        match authenticate(&self.credentials, user_id, password, portal) {
            Ok(user) => {
                self.dispatch(HospitalAction::Login(user.clone()));
                info!(user_id, %portal, "Logged in");
                Ok(user)
            }
            Err(e) => {
                warn!(user_id, %portal, "Login rejected");
                Err(e)
            }
        }
    }

    /// Clears the auth slice. Idempotent.
    pub fn logout(&self) {
        self.dispatch(HospitalAction::Logout);
    }
}

impl fmt::Debug for HospitalStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.load();
        f.debug_struct("HospitalStore")
            .field("api", &self.api)
            .field("patients", &state.patients.len())
            .field("doctors", &state.doctors.len())
            .field("visits", &state.visits.len())
            .field("prescriptions", &state.prescriptions.len())
            .field("authenticated", &state.auth.is_authenticated)
            .finish()
    }
}

/// Builder for [`HospitalStore`].
#[derive(Debug)]
pub struct HospitalStoreBuilder {
    api: HospitalApi,
    credentials: AdminCredentials,
    notifications: Option<Arc<NotificationBroadcaster>>,
    initial: HospitalState,
}

impl HospitalStoreBuilder {
    pub fn new(api: HospitalApi) -> Self {
        Self {
            api,
            credentials: AdminCredentials::default(),
            notifications: None,
            initial: HospitalState::default(),
        }
    }

    pub fn credentials(mut self, credentials: AdminCredentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Publishes on an existing broadcaster instead of a fresh one.
    pub fn notifications(mut self, notifications: Arc<NotificationBroadcaster>) -> Self {
        self.notifications = Some(notifications);
        self
    }

    /// Starts from a given snapshot instead of empty collections.
    pub fn initial_state(mut self, state: HospitalState) -> Self {
        self.initial = state;
        self
    }

    pub fn build(self) -> HospitalStore {
        HospitalStore {
            api: self.api,
            state: ArcSwap::from_pointee(self.initial),
            notifications: self
                .notifications
                .unwrap_or_else(NotificationBroadcaster::new_shared),
            credentials: self.credentials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hospital_db_memory::InMemoryBackends;

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HospitalStore>();
    }

    #[test]
    fn test_add_one_reports_duplicates() {
        let store = HospitalStore::builder(InMemoryBackends::new().api()).build();

        assert!(store.add_one(Patient::new("P1")));
        assert!(!store.add_one(Patient::new("P1").with_name("again")));
        assert_eq!(store.records::<Patient>().len(), 1);
    }

    #[test]
    fn test_set_all_marks_only_that_kind_ready() {
        let store = HospitalStore::builder(InMemoryBackends::new().api()).build();

        store.set_all(vec![Doctor::new("D1")]);

        assert!(!store.is_ready());
        assert!(!store.load_status().get(ResourceKind::Doctor).is_pending());
    }

    #[test]
    fn test_snapshot_survives_later_mutation() {
        let store = HospitalStore::builder(InMemoryBackends::new().api()).build();
        store.add_many(vec![Visit::new("V1", "P1", "D1")]);

        let before = store.state();
        store.add_many(vec![Visit::new("V2", "P1", "D1")]);

        assert_eq!(before.visits.len(), 1);
        assert_eq!(store.state().visits.len(), 2);
    }
}
