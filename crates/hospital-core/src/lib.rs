pub mod auth;
pub mod error;
pub mod events;
pub mod model;
pub mod resource;

pub use auth::{AuthState, Portal, Role, User};
pub use error::CoreError;
pub use events::{Notification, NotificationBroadcaster, NotificationLevel};
pub use model::{Doctor, Patient, Prescription, Visit, VisitType};
pub use resource::{Record, ResourceKind};
