// models/src/donation/request.rs

use serde::{Deserialize, Serialize};

use crate::blood_type::BloodType;
use crate::classification::{RequestStatus, UrgencyLevel, UrgentPriority};

/// A posted request for blood, as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodRequest {
    pub id: String,
    pub blood_type: BloodType,
    pub patient_name: String,
    pub hospital: String,
    pub location: String,
    pub posted_date: String,
    pub required_by: String,
    pub urgency_level: UrgencyLevel,
    pub distance: String,
    pub required_units: u32,
    pub status: RequestStatus,
}

impl BloodRequest {
    pub fn units_label(&self) -> String {
        units_required(self.required_units)
    }

    pub fn is_active(&self) -> bool {
        self.status == RequestStatus::Active
    }
}

/// An entry of the urgent list; carries the patient's condition instead of
/// the patient's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgentRequest {
    pub id: String,
    pub blood_type: BloodType,
    pub location: String,
    pub hospital: String,
    pub time_posted: String,
    pub urgency_level: UrgentPriority,
    pub distance: String,
    pub patient_condition: String,
    pub required_units: u32,
}

impl UrgentRequest {
    pub fn units_summary(&self) -> String {
        format!("{} units of {} blood", self.required_units, self.blood_type)
    }
}

fn units_required(units: u32) -> String {
    if units == 1 {
        "1 unit required".to_string()
    } else {
        format!("{} units required", units)
    }
}
