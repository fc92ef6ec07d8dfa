use serde::{Deserialize, Serialize};

use crate::resource::{Record, ResourceKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub doctor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital_location: Option<String>,
}

impl Doctor {
    pub fn new(doctor_id: impl Into<String>) -> Self {
        Self {
            doctor_id: doctor_id.into(),
            full_name: None,
            specialization: None,
            department: None,
            phone_number: None,
            email: None,
            years_of_experience: None,
            hospital_location: None,
        }
    }
}

impl Record for Doctor {
    const KIND: ResourceKind = ResourceKind::Doctor;

    fn id(&self) -> &str {
        &self.doctor_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fractional_experience() {
        let doctor: Doctor = serde_json::from_value(json!({
            "doctor_id": "D7",
            "years_of_experience": 7.5,
            "department": null
        }))
        .unwrap();

        assert_eq!(doctor.years_of_experience, Some(7.5));
        assert!(doctor.department.is_none());
    }
}
