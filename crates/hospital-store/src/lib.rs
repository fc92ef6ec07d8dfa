//! Client-side state store for hospital records.
//!
//! [`HospitalStore`] holds one normalized snapshot of the four record
//! collections plus the authentication slice. Every change goes through a
//! [`HospitalAction`] applied by the reducer in [`action`], so readers always
//! see a complete state and two updates never interleave.
//!
//! Initialization order is explicit:
//!
//! ```ignore
//! let store = Arc::new(HospitalStore::builder(api).build());   // construct
//! store.load().await;                                          // initial fetch
//! assert!(store.is_ready());                                   // ready
//! ```
//!
//! Persistence responsibility is spelled out per operation: `add_*` and
//! `set_all` only touch local state, `persist_*` and `delete_one` call the
//! data access layer first and update local state only on success.

pub mod action;
pub mod auth;
pub mod error;
pub mod state;
pub mod store;

pub use action::{HospitalAction, apply, reduce};
pub use auth::{AdminCredentials, AuthError, authenticate};
pub use error::StoreError;
pub use state::{Collection, HospitalState, LoadStatus, LoadTracker, ResourceBatch, StoreRecord};
pub use store::{HospitalStore, HospitalStoreBuilder};
