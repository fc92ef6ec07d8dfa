//! Record types as they travel over the wire.
//!
//! Only the identity field is required; every other attribute is optional
//! because nothing upstream validates it. Unknown fields (the document
//! database's `_id`, `__v`, ...) are ignored on decode, `null` reads as an
//! absent value, and numbers are kept as `f64` since stored documents may
//! hold fractional or negative values anywhere.

mod doctor;
mod lenient;
mod patient;
mod prescription;
mod visit;

pub use doctor::Doctor;
pub use patient::Patient;
pub use prescription::Prescription;
pub use visit::{Visit, VisitType};
