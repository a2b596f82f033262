// lib/src/catalog/mod.rs

pub mod mock_data;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use models::{
    BloodRequest, BloodType, BloodTypeAvailability, Location, MatchingDonor, UrgentRequest,
};

use crate::errors::{LifeFlowError, Result};

/// Supply figures for one blood type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplySnapshot {
    pub percentage: u8,
    pub next_drive: String,
    pub location: String,
}

/// Where the dashboard reads its records from.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn blood_availability(&self) -> Result<Vec<BloodTypeAvailability>>;
    async fn blood_requests(&self) -> Result<Vec<BloodRequest>>;
    async fn urgent_requests(&self) -> Result<Vec<UrgentRequest>>;
    async fn matching_donors(&self) -> Result<Vec<MatchingDonor>>;
    async fn locations(&self) -> Result<Vec<Location>>;
    async fn location(&self, id: &str) -> Result<Location>;
    async fn supply(&self, blood_type: BloodType) -> Result<SupplySnapshot>;

    async fn blood_type(&self, blood_type: BloodType) -> Result<BloodTypeAvailability> {
        self.blood_availability()
            .await?
            .into_iter()
            .find(|entry| entry.blood_type == blood_type)
            .ok_or_else(|| LifeFlowError::NotFound(format!("blood type {}", blood_type)))
    }

    async fn urgent_request(&self, id: &str) -> Result<UrgentRequest> {
        self.urgent_requests()
            .await?
            .into_iter()
            .find(|request| request.id == id)
            .ok_or_else(|| LifeFlowError::NotFound(format!("urgent request {}", id)))
    }
}

/// In-memory catalog over the static dashboard records. Every call hands
/// out clones, so callers can never change what later calls see.
#[derive(Debug, Clone)]
pub struct MockCatalog {
    availability: Vec<BloodTypeAvailability>,
    requests: Vec<BloodRequest>,
    urgent: Vec<UrgentRequest>,
    donors: Vec<MatchingDonor>,
    map_locations: Vec<Location>,
    detailed_locations: Vec<Location>,
    supply: SupplySnapshot,
}

impl MockCatalog {
    pub fn new() -> Self {
        MockCatalog {
            availability: mock_data::blood_availability(),
            requests: mock_data::blood_requests(),
            urgent: mock_data::urgent_requests(),
            donors: mock_data::matching_donors(),
            map_locations: mock_data::map_locations(),
            detailed_locations: mock_data::detailed_locations(),
            supply: mock_data::supply_snapshot(),
        }
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DashboardSource for MockCatalog {
    async fn blood_availability(&self) -> Result<Vec<BloodTypeAvailability>> {
        Ok(self.availability.clone())
    }

    async fn blood_requests(&self) -> Result<Vec<BloodRequest>> {
        Ok(self.requests.clone())
    }

    async fn urgent_requests(&self) -> Result<Vec<UrgentRequest>> {
        Ok(self.urgent.clone())
    }

    async fn matching_donors(&self) -> Result<Vec<MatchingDonor>> {
        Ok(self.donors.clone())
    }

    async fn locations(&self) -> Result<Vec<Location>> {
        Ok(self.map_locations.clone())
    }

    async fn location(&self, id: &str) -> Result<Location> {
        debug!(id, "Looking up location");
        self.detailed_locations
            .iter()
            .chain(self.map_locations.iter())
            .find(|location| location.id == id)
            .cloned()
            .ok_or_else(|| LifeFlowError::NotFound(format!("location {}", id)))
    }

    async fn supply(&self, blood_type: BloodType) -> Result<SupplySnapshot> {
        if !self.availability.iter().any(|entry| entry.blood_type == blood_type) {
            return Err(LifeFlowError::NotFound(format!("blood type {}", blood_type)));
        }
        Ok(self.supply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{AvailabilityLevel, DonorAvailability, LocationType, UrgentPriority};

    #[tokio::test]
    async fn should_serve_the_dashboard_defaults() {
        let catalog = MockCatalog::new();
        assert_eq!(catalog.blood_availability().await.unwrap().len(), 6);
        assert_eq!(catalog.blood_requests().await.unwrap().len(), 5);
        assert_eq!(catalog.urgent_requests().await.unwrap().len(), 3);
        assert_eq!(catalog.matching_donors().await.unwrap().len(), 4);
        assert_eq!(catalog.locations().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn should_mark_ab_positive_as_critical() {
        let catalog = MockCatalog::new();
        let entry = catalog.blood_type(BloodType::AbPositive).await.unwrap();
        assert_eq!(entry.availability, AvailabilityLevel::Critical);
        assert_eq!(entry.donors_nearby, 3);
        assert!(entry.shows_urgent_need());
        assert!(matches!(
            catalog.blood_type(BloodType::AbNegative).await,
            Err(LifeFlowError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn should_find_urgent_requests_and_locations_by_id() {
        let catalog = MockCatalog::new();
        let urgent = catalog.urgent_request("2").await.unwrap();
        assert_eq!(urgent.urgency_level, UrgentPriority::High);
        assert_eq!(urgent.patient_condition, "Scheduled organ transplant");

        let detailed = catalog.location("loc123").await.unwrap();
        assert_eq!(detailed.hours.as_deref(), Some("Mon-Fri: 8am-6pm, Sat: 9am-2pm"));
        assert_eq!(detailed.stock().len(), 8);

        let pin = catalog.location("loc3").await.unwrap();
        assert_eq!(pin.location_type, LocationType::DonorCenter);
        assert!(pin.stock().is_empty());

        assert!(catalog.location("loc9").await.is_err());
        assert!(catalog.urgent_request("REQ-001").await.is_err());
    }

    #[tokio::test]
    async fn should_hand_out_independent_copies() {
        let catalog = MockCatalog::new();
        let mut donors = catalog.matching_donors().await.unwrap();
        donors[0].availability = DonorAvailability::Busy;
        donors.clear();
        let fresh = catalog.matching_donors().await.unwrap();
        assert_eq!(fresh.len(), 4);
        assert_eq!(fresh[0].availability, DonorAvailability::Available);
    }

    #[test]
    fn should_keep_compatibility_lists_in_sync_with_the_table() {
        for entry in mock_data::blood_availability() {
            assert_eq!(entry.compatible_with, entry.blood_type.compatible_recipients());
        }
    }
}
