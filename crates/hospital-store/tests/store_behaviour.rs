//! Store behaviour against the in-memory backend.

use std::sync::Arc;

use async_trait::async_trait;
use hospital_core::{
    AuthState, Doctor, Notification, NotificationLevel, Patient, Portal, Prescription,
    ResourceKind, Role, Visit,
};
use hospital_db_memory::InMemoryBackends;
use hospital_storage::{HospitalApi, ResourceApi, StorageError};
use hospital_store::{AdminCredentials, AuthError, HospitalStore, LoadStatus, StoreError};
use tokio::sync::{Notify, broadcast};

fn store_on(backends: &InMemoryBackends) -> HospitalStore {
    HospitalStore::builder(backends.api()).build()
}

fn patient_ids(store: &HospitalStore) -> Vec<String> {
    store
        .records::<Patient>()
        .into_iter()
        .map(|p| p.patient_id)
        .collect()
}

fn drain(rx: &mut broadcast::Receiver<Notification>) -> Vec<(NotificationLevel, String)> {
    let mut out = Vec::new();
    while let Ok(n) = rx.try_recv() {
        out.push((n.level, n.message));
    }
    out
}

#[tokio::test]
async fn load_populates_every_collection() {
    let backends = InMemoryBackends::new();
    backends.patients.seed([Patient::new("P1"), Patient::new("P2")]).await;
    backends.doctors.seed([Doctor::new("D1")]).await;
    backends.visits.seed([Visit::new("V1", "P1", "D1")]).await;

    let store = store_on(&backends);
    assert!(!store.is_ready());

    let status = store.load().await;

    assert!(store.is_ready());
    assert!(status.failed().is_empty());
    assert_eq!(patient_ids(&store), vec!["P1", "P2"]);
    assert_eq!(store.records::<Doctor>().len(), 1);
    assert_eq!(store.records::<Visit>().len(), 1);
    assert!(store.records::<Prescription>().is_empty());
}

#[tokio::test]
async fn partial_load_failure_marks_only_that_kind() {
    let backends = InMemoryBackends::new();
    backends.patients.seed([Patient::new("P1")]).await;
    backends.doctors.seed([Doctor::new("D1")]).await;
    backends.visits.set_available(false);

    let store = store_on(&backends);
    let mut rx = store.subscribe();
    let status = store.load().await;

    assert!(store.is_ready());
    assert_eq!(status.failed(), vec![ResourceKind::Visit]);
    assert!(matches!(status.get(ResourceKind::Visit), LoadStatus::Failed(_)));
    assert_eq!(status.get(ResourceKind::Patient), &LoadStatus::Ready);
    assert_eq!(patient_ids(&store), vec!["P1"]);
    assert_eq!(store.records::<Doctor>().len(), 1);
    assert!(store.records::<Visit>().is_empty());

    let notes = drain(&mut rx);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].0, NotificationLevel::Error);
    assert!(notes[0].1.starts_with("Failed to load visits"));
}

#[tokio::test]
async fn add_many_then_delete_leaves_remaining_record() {
    let backends = InMemoryBackends::new();
    backends.patients.seed([Patient::new("P1"), Patient::new("P2")]).await;
    let store = store_on(&backends);
    let mut rx = store.subscribe();

    assert_eq!(store.add_many(vec![Patient::new("P1"), Patient::new("P2")]), 2);
    store
        .delete_one(ResourceKind::Patient, "P1")
        .await
        .expect("delete P1");

    assert_eq!(patient_ids(&store), vec!["P2"]);
    assert!(!backends.patients.contains("P1").await);
    assert_eq!(
        drain(&mut rx),
        vec![(NotificationLevel::Success, "Patient deleted".to_string())]
    );
}

#[tokio::test]
async fn add_does_not_touch_the_backend() {
    let backends = InMemoryBackends::new();
    let store = store_on(&backends);

    assert!(store.add_one(Doctor::new("D1")));

    assert_eq!(store.records::<Doctor>().len(), 1);
    assert!(backends.doctors.is_empty().await);
}

#[tokio::test]
async fn add_appends_after_existing_records() {
    let store = store_on(&InMemoryBackends::new());
    store.add_many(vec![Patient::new("P1"), Patient::new("P2")]);

    let added = store.add_many(vec![Patient::new("P3"), Patient::new("P1"), Patient::new("P4")]);

    assert_eq!(added, 2);
    assert_eq!(patient_ids(&store), vec!["P1", "P2", "P3", "P4"]);
}

#[tokio::test]
async fn failed_remote_delete_leaves_state_unchanged() {
    let backends = InMemoryBackends::new();
    backends.visits.seed([Visit::new("V1", "P1", "D1")]).await;
    let store = store_on(&backends);
    store.load().await;
    backends.visits.set_available(false);

    let mut rx = store.subscribe();
    let before = store.state();
    let err = store
        .delete_one(ResourceKind::Visit, "V1")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::Delete { kind: ResourceKind::Visit, ref id, .. } if id == "V1"
    ));
    assert!(matches!(
        err.storage_error(),
        StorageError::ConnectionError { .. }
    ));
    assert_eq!(*store.state(), *before);

    let notes = drain(&mut rx);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].0, NotificationLevel::Error);
}

#[tokio::test]
async fn delete_of_id_not_held_locally() {
    let backends = InMemoryBackends::new();
    backends.doctors.seed([Doctor::new("D9")]).await;
    let store = store_on(&backends);
    store.add_many(vec![Doctor::new("D1")]);
    let before = store.state();

    // Remote succeeds, local collection has nothing to remove.
    store
        .delete_one(ResourceKind::Doctor, "D9")
        .await
        .expect("remote delete");
    assert_eq!(store.state().doctors, before.doctors);

    // Remote fails, local collection still unchanged.
    assert!(store.delete_one(ResourceKind::Doctor, "D404").await.is_err());
    assert_eq!(store.state().doctors, before.doctors);
}

#[tokio::test]
async fn concurrent_deletes_of_same_id() {
    let backends = InMemoryBackends::new();
    backends.prescriptions.seed([Prescription::new("RX1")]).await;
    let store = Arc::new(store_on(&backends));
    store.load().await;

    let (a, b) = tokio::join!(
        store.delete_one(ResourceKind::Prescription, "RX1"),
        store.delete_one(ResourceKind::Prescription, "RX1"),
    );

    assert_eq!(usize::from(a.is_ok()) + usize::from(b.is_ok()), 1);
    let failed = a.err().or(b.err()).expect("one delete fails");
    assert!(failed.storage_error().is_not_found());
    assert!(store.records::<Prescription>().is_empty());
}

#[tokio::test]
async fn persist_many_saves_remotely_then_locally() {
    let backends = InMemoryBackends::new();
    let store = store_on(&backends);
    let mut rx = store.subscribe();

    let appended = store
        .persist_many(vec![Visit::new("V1", "P1", "D1"), Visit::new("V2", "P2", "D1")])
        .await
        .expect("persist visits");

    assert_eq!(appended, 2);
    assert_eq!(backends.visits.len().await, 2);
    assert_eq!(store.records::<Visit>().len(), 2);
    assert_eq!(
        drain(&mut rx),
        vec![(NotificationLevel::Success, "2 visits saved".to_string())]
    );
}

#[tokio::test]
async fn persist_many_rejected_leaves_state_unchanged() {
    let backends = InMemoryBackends::new();
    backends.patients.seed([Patient::new("P2")]).await;
    let store = store_on(&backends);
    let before = store.state();

    let err = store
        .persist_many(vec![Patient::new("P1"), Patient::new("P2")])
        .await
        .unwrap_err();

    assert!(err.storage_error().is_already_exists());
    assert_eq!(*store.state(), *before);
    assert!(!backends.patients.contains("P1").await);
}

#[tokio::test]
async fn persist_one_appends_stored_record() {
    let backends = InMemoryBackends::new();
    let store = store_on(&backends);

    let stored = store
        .persist_one(Patient::new("P7").with_name("Asha Rao"))
        .await
        .expect("persist patient");

    assert_eq!(stored.full_name.as_deref(), Some("Asha Rao"));
    assert_eq!(patient_ids(&store), vec!["P7"]);
    assert!(backends.patients.contains("P7").await);
}

#[tokio::test]
async fn persist_one_rejected_leaves_state_unchanged() {
    let backends = InMemoryBackends::new();
    backends
        .patients
        .seed([Patient::new("P1").with_name("Meera Iyer")])
        .await;
    let store = store_on(&backends);
    store.load().await;
    let before = store.state();
    let mut rx = store.subscribe();

    let err = store
        .persist_one(Patient::new("P1").with_name("Someone Else"))
        .await
        .unwrap_err();

    assert!(err.storage_error().is_already_exists());
    assert_eq!(err.kind(), ResourceKind::Patient);
    assert_eq!(*store.state(), *before);
    assert_eq!(
        store.records::<Patient>()[0].full_name.as_deref(),
        Some("Meera Iyer")
    );

    let notes = drain(&mut rx);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].0, NotificationLevel::Error);
    assert!(notes[0].1.contains("P1"), "{}", notes[0].1);
}

#[tokio::test]
async fn login_and_logout() {
    let store = store_on(&InMemoryBackends::new());

    let user = store
        .login("admin", "admin123", Portal::Admin)
        .expect("admin login");
    assert_eq!(user.role, Role::Admin);
    assert!(store.auth().is_authenticated);
    assert_eq!(store.auth().role(), Some(Role::Admin));

    store.logout();
    assert_eq!(store.auth(), AuthState::logged_out());
    store.logout();
    assert_eq!(store.auth(), AuthState::logged_out());
}

#[tokio::test]
async fn rejected_logins_leave_auth_unchanged() {
    let store = store_on(&InMemoryBackends::new());

    let err = store
        .login("admin", "wrongpass", Portal::Admin)
        .unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(
        store.auth(),
        AuthState {
            user: None,
            is_authenticated: false
        }
    );

    assert!(store.login("nurse", "admin123", Portal::Admin).is_err());
    assert!(store.login("admin", "admin123", Portal::Doctor).is_err());
    assert!(!store.auth().is_authenticated);

    // A failed attempt does not log out an existing session.
    store.login("admin", "admin123", Portal::Admin).expect("login");
    assert!(store.login("admin", "nope", Portal::Admin).is_err());
    assert!(store.auth().is_authenticated);
}

#[tokio::test]
async fn configured_credentials_replace_default() {
    let store = HospitalStore::builder(InMemoryBackends::new().api())
        .credentials(AdminCredentials::new("ops", "s3cret"))
        .build();

    assert!(store.login("admin", "admin123", Portal::Admin).is_err());
    assert!(store.login("ops", "s3cret", Portal::Admin).is_ok());
}

/// Patient API whose delete blocks until released.
struct GatedPatients {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl ResourceApi<Patient> for GatedPatients {
    async fn get_all(&self) -> Result<Vec<Patient>, StorageError> {
        Ok(Vec::new())
    }

    async fn create(&self, record: &Patient) -> Result<Patient, StorageError> {
        Ok(record.clone())
    }

    async fn create_many(&self, records: &[Patient]) -> Result<Vec<Patient>, StorageError> {
        Ok(records.to_vec())
    }

    async fn delete(&self, _id: &str) -> Result<(), StorageError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "gated"
    }
}

#[tokio::test]
async fn readers_see_pre_delete_state_while_call_is_pending() {
    let backends = InMemoryBackends::new();
    let gated = Arc::new(GatedPatients {
        entered: Notify::new(),
        release: Notify::new(),
    });
    let api = HospitalApi::new(
        gated.clone(),
        backends.doctors.clone(),
        backends.visits.clone(),
        backends.prescriptions.clone(),
    );
    let store = Arc::new(HospitalStore::builder(api).build());
    store.add_many(vec![Patient::new("P1"), Patient::new("P2")]);

    let task = {
        let store = store.clone();
        tokio::spawn(async move { store.delete_one(ResourceKind::Patient, "P1").await })
    };

    gated.entered.notified().await;
    assert_eq!(patient_ids(&store), vec!["P1", "P2"]);

    gated.release.notify_one();
    task.await.expect("join").expect("delete");
    assert_eq!(patient_ids(&store), vec!["P2"]);
}
