// models/src/donation/location.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::blood_type::BloodType;
use crate::classification::{Classification, LocationType, Presentation, StockLevel};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Screen position of a map pin, in percent of the map container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PinPosition {
    pub top: u32,
    pub left: u32,
}

/// Units of one blood type held at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockEntry {
    pub blood_type: BloodType,
    pub units: u32,
    pub level: StockLevel,
    pub presentation: Presentation,
    pub bar_width: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    /// Kept for a future map widget; pins are not projected from it.
    pub coordinates: Coordinates,
    pub blood_types: Vec<BloodType>,
    pub distance: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_units: Option<BTreeMap<BloodType, u32>>,
}

impl Location {
    /// Placeholder layout: each pin steps down and right by its list index.
    pub fn pin_position(index: usize) -> PinPosition {
        let index = index as u32;
        PinPosition {
            top: 30 + index * 15,
            left: 25 + index * 12,
        }
    }

    pub fn subtitle(&self) -> String {
        format!("{} \u{b7} {}", self.location_type.label(), self.distance)
    }

    /// Per-type stock in `BloodType::ALL` order; empty without unit counts.
    pub fn stock(&self) -> Vec<StockEntry> {
        let Some(units) = &self.blood_units else {
            return Vec::new();
        };
        BloodType::ALL
            .iter()
            .filter_map(|blood_type| units.get(blood_type).map(|count| (*blood_type, *count)))
            .map(|(blood_type, count)| {
                let level = StockLevel::from_units(count);
                StockEntry {
                    blood_type,
                    units: count,
                    level,
                    presentation: level.presentation(),
                    bar_width: StockLevel::bar_width(count),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blood_bank(units: Option<BTreeMap<BloodType, u32>>) -> Location {
        Location {
            id: "loc123".to_string(),
            name: "Central Blood Bank".to_string(),
            location_type: LocationType::BloodBank,
            coordinates: Coordinates { lat: 34.052, lng: -118.243 },
            blood_types: vec![BloodType::APositive],
            distance: "1.2 miles".to_string(),
            address: "123 Medical Center Blvd, Springfield".to_string(),
            phone: None,
            hours: None,
            blood_units: units,
        }
    }

    #[test]
    fn should_step_pins_by_index() {
        assert_eq!(Location::pin_position(0), PinPosition { top: 30, left: 25 });
        assert_eq!(Location::pin_position(4), PinPosition { top: 90, left: 73 });
    }

    #[test]
    fn should_list_stock_in_canonical_order() {
        let mut units = BTreeMap::new();
        units.insert(BloodType::ONegative, 10);
        units.insert(BloodType::APositive, 15);
        units.insert(BloodType::AbNegative, 2);
        let stock = blood_bank(Some(units)).stock();

        let order: Vec<_> = stock.iter().map(|entry| entry.blood_type).collect();
        assert_eq!(order, vec![BloodType::APositive, BloodType::AbNegative, BloodType::ONegative]);
        assert_eq!(stock[1].level, StockLevel::Low);
        assert_eq!(stock[0].bar_width, 100);
    }

    #[test]
    fn should_have_no_stock_without_unit_counts() {
        assert!(blood_bank(None).stock().is_empty());
    }

    #[test]
    fn should_describe_type_and_distance() {
        assert_eq!(blood_bank(None).subtitle(), "Blood Bank \u{b7} 1.2 miles");
    }
}
