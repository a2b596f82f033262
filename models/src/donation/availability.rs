// models/src/donation/availability.rs

use serde::{Deserialize, Serialize};

use crate::blood_type::BloodType;
use crate::classification::AvailabilityLevel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodTypeAvailability {
    #[serde(rename = "type")]
    pub blood_type: BloodType,
    pub availability: AvailabilityLevel,
    pub last_updated: String, // Display string, e.g. "10 minutes ago"
    pub donors_nearby: u32,
    pub compatible_with: Vec<BloodType>,
    pub color: String, // Accent color of the card badge, e.g. "#E53E3E"
}

impl BloodTypeAvailability {
    pub fn shows_urgent_need(&self) -> bool {
        self.availability.is_urgent_need()
    }

    pub fn donors_nearby_sentence(&self) -> String {
        format!(
            "There are currently {} potential donors nearby who match this blood type.",
            self.donors_nearby
        )
    }

    /// Badge background: the accent color at 0x20 alpha.
    pub fn badge_background(&self) -> String {
        format!("{}20", self.color)
    }
}
