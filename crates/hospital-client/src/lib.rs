//! HTTP data access backend.
//!
//! Talks to the hospital records REST API (`/api/patients`, `/api/doctors`,
//! `/api/visits`, `/api/prescriptions`) and exposes each collection as a
//! [`hospital_storage::ResourceApi`].

mod client;
mod response;

pub use client::{ClientConfig, ClientError, HospitalClient, HttpResourceApi};
