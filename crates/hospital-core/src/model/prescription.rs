use serde::{Deserialize, Serialize};

use crate::resource::{Record, ResourceKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub prescription_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medication_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<f64>,
}

impl Prescription {
    pub fn new(prescription_id: impl Into<String>) -> Self {
        Self {
            prescription_id: prescription_id.into(),
            visit_id: None,
            patient_id: None,
            doctor_id: None,
            medication_name: None,
            dosage: None,
            frequency: None,
            duration_days: None,
        }
    }
}

impl Record for Prescription {
    const KIND: ResourceKind = ResourceKind::Prescription;

    fn id(&self) -> &str {
        &self.prescription_id
    }
}
