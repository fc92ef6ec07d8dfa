use serde::{Deserialize, Serialize};
use std::fmt;

use super::lenient::null_as_default;
use crate::resource::{Record, ResourceKind};

/// Outpatient or inpatient visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitType {
    #[default]
    #[serde(rename = "OP")]
    Outpatient,
    #[serde(rename = "IP")]
    Inpatient,
}

impl fmt::Display for VisitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisitType::Outpatient => write!(f, "OP"),
            VisitType::Inpatient => write!(f, "IP"),
        }
    }
}

/// A single patient visit.
///
/// `patient_id` and `doctor_id` are soft references; nothing checks that the
/// referenced records exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub visit_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub patient_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub doctor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<String>,
    /// Nominally 0 to 5, not checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub visit_type: VisitType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub length_of_stay: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_result_glucose: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_result_bp: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub previous_visit_gap_days: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub readmitted_within_30_days: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_cost: Option<f64>,
}

impl Visit {
    pub fn new(
        visit_id: impl Into<String>,
        patient_id: impl Into<String>,
        doctor_id: impl Into<String>,
    ) -> Self {
        Self {
            visit_id: visit_id.into(),
            patient_id: patient_id.into(),
            doctor_id: doctor_id.into(),
            visit_date: None,
            severity_score: None,
            visit_type: VisitType::default(),
            length_of_stay: 0.0,
            lab_result_glucose: None,
            lab_result_bp: None,
            previous_visit_gap_days: 0.0,
            readmitted_within_30_days: false,
            visit_cost: None,
        }
    }
}

impl Record for Visit {
    const KIND: ResourceKind = ResourceKind::Visit;

    fn id(&self) -> &str {
        &self.visit_id
    }
}
