use serde::{Deserialize, Serialize};

use super::lenient::null_as_default;
use crate::resource::{Record, ResourceKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub patient_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoker_status: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alcohol_use: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chronic_conditions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_type: Option<String>,
}

impl Patient {
    /// A patient with only the identity field set.
    pub fn new(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            full_name: None,
            age: None,
            gender: None,
            blood_group: None,
            phone_number: None,
            email: None,
            emergency_contact: None,
            hospital_location: None,
            bmi: None,
            smoker_status: None,
            alcohol_use: None,
            chronic_conditions: Vec::new(),
            registration_date: None,
            insurance_type: None,
        }
    }

    pub fn with_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }
}

impl Record for Patient {
    const KIND: ResourceKind = ResourceKind::Patient;

    fn id(&self) -> &str {
        &self.patient_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_document_with_extra_fields() {
        let patient: Patient = serde_json::from_value(json!({
            "_id": "665f1c2e9b1e8a0012345678",
            "__v": 0,
            "patient_id": "P001",
            "full_name": "Asha Rao",
            "age": 54,
            "bmi": 27.4,
            "smoker_status": false,
            "chronic_conditions": ["Diabetes", "Hypertension"]
        }))
        .unwrap();

        assert_eq!(patient.id(), "P001");
        assert_eq!(patient.age, Some(54.0));
        assert_eq!(patient.chronic_conditions.len(), 2);
        assert!(patient.insurance_type.is_none());
    }

    #[test]
    fn test_decode_null_and_fractional_values() {
        let patient: Patient = serde_json::from_value(json!({
            "patient_id": "P002",
            "age": 42.5,
            "bmi": null,
            "smoker_status": null,
            "chronic_conditions": null
        }))
        .unwrap();

        assert_eq!(patient.age, Some(42.5));
        assert!(patient.bmi.is_none());
        assert!(patient.smoker_status.is_none());
        assert!(patient.chronic_conditions.is_empty());
    }

    #[test]
    fn test_missing_identity_is_rejected() {
        let result = serde_json::from_value::<Patient>(json!({ "full_name": "Nobody" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_skips_unset_fields() {
        let value = serde_json::to_value(Patient::new("P9").with_name("Lee")).unwrap();
        assert_eq!(
            value,
            json!({ "patient_id": "P9", "full_name": "Lee", "chronic_conditions": [] })
        );
    }
}
