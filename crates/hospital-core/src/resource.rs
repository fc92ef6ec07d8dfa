use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The four record collections held by the hospital system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Patient,
    Doctor,
    Visit,
    Prescription,
}

impl ResourceKind {
    /// All resource kinds, in initial-load order.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Patient,
        ResourceKind::Doctor,
        ResourceKind::Visit,
        ResourceKind::Prescription,
    ];

    /// Lowercase singular name, also the key used in create responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Patient => "patient",
            ResourceKind::Doctor => "doctor",
            ResourceKind::Visit => "visit",
            ResourceKind::Prescription => "prescription",
        }
    }

    /// Lowercase plural name used as the REST path segment.
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Patient => "patients",
            ResourceKind::Doctor => "doctors",
            ResourceKind::Visit => "visits",
            ResourceKind::Prescription => "prescriptions",
        }
    }

    /// Capitalized name for user-facing messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceKind::Patient => "Patient",
            ResourceKind::Doctor => "Doctor",
            ResourceKind::Visit => "Visit",
            ResourceKind::Prescription => "Prescription",
        }
    }

    /// Name of the identity field for records of this kind.
    pub fn id_field(&self) -> &'static str {
        match self {
            ResourceKind::Patient => "patient_id",
            ResourceKind::Doctor => "doctor_id",
            ResourceKind::Visit => "visit_id",
            ResourceKind::Prescription => "prescription_id",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "patient" | "patients" => Ok(ResourceKind::Patient),
            "doctor" | "doctors" => Ok(ResourceKind::Doctor),
            "visit" | "visits" => Ok(ResourceKind::Visit),
            "prescription" | "prescriptions" => Ok(ResourceKind::Prescription),
            _ => Err(CoreError::invalid_resource_kind(s)),
        }
    }
}

/// A flat hospital record identified by a string identity field.
///
/// Identity is assigned externally (by whoever creates the record), never by
/// the storage layer.
pub trait Record:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Which collection records of this type belong to.
    const KIND: ResourceKind;

    /// The value of the identity field (`patient_id`, `visit_id`, ...).
    fn id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_parse() {
        assert_eq!(
            "patients".parse::<ResourceKind>().unwrap(),
            ResourceKind::Patient
        );
        assert_eq!(
            "Prescription".parse::<ResourceKind>().unwrap(),
            ResourceKind::Prescription
        );
        assert!("ward".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_resource_kind_names() {
        for kind in ResourceKind::ALL {
            assert!(kind.plural().starts_with(kind.as_str()));
            assert!(kind.id_field().starts_with(kind.as_str()));
            assert_eq!(kind.display_name().to_ascii_lowercase(), kind.as_str());
        }
    }

    #[test]
    fn test_resource_kind_serde() {
        let json = serde_json::to_string(&ResourceKind::Visit).unwrap();
        assert_eq!(json, "\"visit\"");
    }
}
