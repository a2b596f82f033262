// models/src/donation/donor.rs

use serde::{Deserialize, Serialize};

use crate::blood_type::BloodType;
use crate::classification::DonorAvailability;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingDonor {
    pub id: String,
    pub name: String,
    pub blood_type: BloodType,
    pub location: String,
    pub distance: String,
    pub last_donation: String,
    pub contact_number: String,
    /// Precomputed score; nothing in this workspace derives it.
    pub match_percentage: u8,
    pub availability: DonorAvailability,
}

impl MatchingDonor {
    /// Width of the match progress bar, in percent.
    pub fn match_bar_width(&self) -> u8 {
        self.match_percentage.min(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_clamp_match_bar_to_full_width() {
        let mut donor = MatchingDonor {
            id: "donor-001".to_string(),
            name: "Michael Chen".to_string(),
            blood_type: BloodType::OPositive,
            location: "Downtown, Springfield".to_string(),
            distance: "1.2 miles".to_string(),
            last_donation: "3 months ago".to_string(),
            contact_number: "(555) 123-4567".to_string(),
            match_percentage: 98,
            availability: DonorAvailability::Available,
        };
        assert_eq!(donor.match_bar_width(), 98);
        donor.match_percentage = 140;
        assert_eq!(donor.match_bar_width(), 100);
    }
}
