// lib/src/dashboard.rs

//! Serializable views of the dashboard sections and detail dialogs.
//!
//! Every view carries the label and style token of its classifications, so
//! a renderer never has to map codes itself.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use models::{
    AvailabilityLevel, BloodRequest, BloodType, BloodTypeAvailability, Classification,
    DonorAvailability, Location, LocationType, MatchingDonor, PinPosition, Presentation,
    RequestStatus, StockEntry, SupplyStatus, UrgencyLevel, UrgentPriority, UrgentRequest,
};

use crate::catalog::{DashboardSource, SupplySnapshot};
use crate::errors::Result;
use crate::filters::{filter_by, MapViewport, Selection};

pub const NO_MATCHING_REQUESTS: &str = "No blood requests match the selected filter.";
pub const NO_MATCHING_DONORS: &str = "No matching donors found for the selected filter.";
pub const URGENT_REQUEST_NOTICE: &str = "This is an urgent request. Your quick response could save a life. If you're eligible to donate, please respond as soon as possible.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityCard {
    pub blood_type: BloodType,
    pub availability: AvailabilityLevel,
    pub presentation: Presentation,
    pub donors_nearby: u32,
    pub last_updated: String,
    pub compatible_with: Vec<BloodType>,
    pub color: String,
    pub badge_background: String,
    pub urgent_need: bool,
}

impl From<&BloodTypeAvailability> for AvailabilityCard {
    fn from(entry: &BloodTypeAvailability) -> Self {
        AvailabilityCard {
            blood_type: entry.blood_type,
            availability: entry.availability,
            presentation: entry.availability.presentation(),
            donors_nearby: entry.donors_nearby,
            last_updated: entry.last_updated.clone(),
            compatible_with: entry.compatible_with.clone(),
            color: entry.color.clone(),
            badge_background: entry.badge_background(),
            urgent_need: entry.shows_urgent_need(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCard {
    pub id: String,
    pub blood_type: BloodType,
    pub patient_name: String,
    pub hospital: String,
    pub location: String,
    pub posted_date: String,
    pub required_by: String,
    pub urgency_level: UrgencyLevel,
    pub urgency: Presentation,
    pub distance: String,
    pub units_label: String,
    pub status: RequestStatus,
    pub status_presentation: Presentation,
}

impl From<&BloodRequest> for RequestCard {
    fn from(request: &BloodRequest) -> Self {
        RequestCard {
            id: request.id.clone(),
            blood_type: request.blood_type,
            patient_name: request.patient_name.clone(),
            hospital: request.hospital.clone(),
            location: request.location.clone(),
            posted_date: request.posted_date.clone(),
            required_by: request.required_by.clone(),
            urgency_level: request.urgency_level,
            urgency: request.urgency_level.presentation(),
            distance: request.distance.clone(),
            units_label: request.units_label(),
            status: request.status,
            status_presentation: request.status.presentation(),
        }
    }
}

/// A filtered list plus the filter that produced it. `empty_message` is set
/// only when the filter left nothing to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredList<T, C: Classification> {
    pub filter: Selection<C>,
    pub items: Vec<T>,
    pub empty_message: Option<&'static str>,
}

impl<T, C: Classification> FilteredList<T, C> {
    fn new(filter: Selection<C>, items: Vec<T>, empty_message: &'static str) -> Self {
        let empty_message = items.is_empty().then_some(empty_message);
        FilteredList {
            filter,
            items,
            empty_message,
        }
    }
}

pub type RequestList = FilteredList<RequestCard, UrgencyLevel>;
pub type DonorList = FilteredList<DonorCard, DonorAvailability>;

pub fn request_list(requests: &[BloodRequest], filter: Selection<UrgencyLevel>) -> RequestList {
    let cards = filter_by(requests, filter, |request| request.urgency_level)
        .into_iter()
        .map(RequestCard::from)
        .collect();
    FilteredList::new(filter, cards, NO_MATCHING_REQUESTS)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgentCard {
    pub id: String,
    pub blood_type: BloodType,
    pub hospital: String,
    pub location: String,
    pub time_posted: String,
    pub urgency_level: UrgentPriority,
    pub urgency: Presentation,
    pub distance: String,
    pub patient_condition: String,
    pub units_summary: String,
}

impl From<&UrgentRequest> for UrgentCard {
    fn from(request: &UrgentRequest) -> Self {
        UrgentCard {
            id: request.id.clone(),
            blood_type: request.blood_type,
            hospital: request.hospital.clone(),
            location: request.location.clone(),
            time_posted: request.time_posted.clone(),
            urgency_level: request.urgency_level,
            urgency: request.urgency_level.presentation(),
            distance: request.distance.clone(),
            patient_condition: request.patient_condition.clone(),
            units_summary: request.units_summary(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorCard {
    pub id: String,
    pub name: String,
    pub blood_type: BloodType,
    pub location: String,
    pub distance: String,
    pub last_donation: String,
    pub contact_number: String,
    pub match_percentage: u8,
    pub match_bar_width: u8,
    pub availability: DonorAvailability,
    pub availability_presentation: Presentation,
}

impl From<&MatchingDonor> for DonorCard {
    fn from(donor: &MatchingDonor) -> Self {
        DonorCard {
            id: donor.id.clone(),
            name: donor.name.clone(),
            blood_type: donor.blood_type,
            location: donor.location.clone(),
            distance: donor.distance.clone(),
            last_donation: donor.last_donation.clone(),
            contact_number: donor.contact_number.clone(),
            match_percentage: donor.match_percentage,
            match_bar_width: donor.match_bar_width(),
            availability: donor.availability,
            availability_presentation: donor.availability.presentation(),
        }
    }
}

pub fn donor_list(donors: &[MatchingDonor], filter: Selection<DonorAvailability>) -> DonorList {
    let cards = filter_by(donors, filter, |donor| donor.availability)
        .into_iter()
        .map(DonorCard::from)
        .collect();
    FilteredList::new(filter, cards, NO_MATCHING_DONORS)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPin {
    pub id: String,
    pub name: String,
    pub location_type: LocationType,
    pub pin_style: &'static str,
    pub position: PinPosition,
    pub subtitle: String,
    pub address: String,
    pub blood_types: Vec<BloodType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub style: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub zoom: u8,
    pub pins: Vec<MapPin>,
    pub legend: Vec<LegendEntry>,
}

pub fn map_view(locations: &[Location], viewport: MapViewport) -> MapView {
    let pins = locations
        .iter()
        .enumerate()
        .map(|(index, location)| MapPin {
            id: location.id.clone(),
            name: location.name.clone(),
            location_type: location.location_type,
            pin_style: location.location_type.style(),
            position: Location::pin_position(index),
            subtitle: location.subtitle(),
            address: location.address.clone(),
            blood_types: location.blood_types.clone(),
        })
        .collect();
    let legend = LocationType::ALL
        .iter()
        .map(|location_type| LegendEntry {
            label: location_type.legend_label(),
            style: location_type.style(),
        })
        .collect();
    MapView {
        zoom: viewport.zoom,
        pins,
        legend,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyView {
    pub percentage: u8,
    pub status: SupplyStatus,
    pub presentation: Presentation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodTypeDetail {
    pub card: AvailabilityCard,
    pub rh_negative: bool,
    pub donors_nearby_sentence: String,
    pub supply: SupplyView,
    pub next_drive: String,
    pub location: String,
}

pub fn blood_type_detail(entry: &BloodTypeAvailability, supply: SupplySnapshot) -> BloodTypeDetail {
    let percentage = supply.percentage.min(100);
    let status = SupplyStatus::from_percentage(percentage);
    BloodTypeDetail {
        card: AvailabilityCard::from(entry),
        rh_negative: entry.blood_type.is_rh_negative(),
        donors_nearby_sentence: entry.donors_nearby_sentence(),
        supply: SupplyView {
            percentage,
            status,
            presentation: status.presentation(),
        },
        next_drive: supply.next_drive,
        location: supply.location,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgentRequestDetail {
    pub card: UrgentCard,
    pub notice: &'static str,
}

pub fn urgent_request_detail(request: &UrgentRequest) -> UrgentRequestDetail {
    UrgentRequestDetail {
        card: UrgentCard::from(request),
        notice: URGENT_REQUEST_NOTICE,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetail {
    pub id: String,
    pub name: String,
    pub location_type: LocationType,
    pub type_presentation: Presentation,
    pub address: String,
    pub distance: String,
    pub phone: Option<String>,
    pub hours: Option<String>,
    pub stock: Vec<StockEntry>,
    pub can_schedule_donation: bool,
}

pub fn location_detail(location: &Location) -> LocationDetail {
    LocationDetail {
        id: location.id.clone(),
        name: location.name.clone(),
        location_type: location.location_type,
        type_presentation: location.location_type.presentation(),
        address: location.address.clone(),
        distance: location.distance.clone(),
        phone: location.phone.clone(),
        hours: location.hours.clone(),
        stock: location.stock(),
        can_schedule_donation: location.location_type.accepts_donations(),
    }
}

/// The list filters of one dashboard render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardQuery {
    pub requests: Selection<UrgencyLevel>,
    pub donors: Selection<DonorAvailability>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub availability: Vec<AvailabilityCard>,
    pub urgent_requests: Vec<UrgentCard>,
    pub requests: RequestList,
    pub donors: DonorList,
    pub map: MapView,
}

/// Builds views from whatever `DashboardSource` backs the dashboard.
#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn DashboardSource>,
}

impl DashboardService {
    pub fn new(source: Arc<dyn DashboardSource>) -> Self {
        DashboardService { source }
    }

    pub async fn overview(&self, query: DashboardQuery) -> Result<DashboardView> {
        debug!(
            requests = query.requests.code(),
            donors = query.donors.code(),
            "Assembling dashboard"
        );
        Ok(DashboardView {
            availability: self.availability().await?,
            urgent_requests: self.urgent_requests().await?,
            requests: self.requests(query.requests).await?,
            donors: self.donors(query.donors).await?,
            map: self.map(MapViewport::default()).await?,
        })
    }

    pub async fn availability(&self) -> Result<Vec<AvailabilityCard>> {
        let entries = self.source.blood_availability().await?;
        Ok(entries.iter().map(AvailabilityCard::from).collect())
    }

    pub async fn requests(&self, filter: Selection<UrgencyLevel>) -> Result<RequestList> {
        let requests = self.source.blood_requests().await?;
        Ok(request_list(&requests, filter))
    }

    pub async fn urgent_requests(&self) -> Result<Vec<UrgentCard>> {
        let requests = self.source.urgent_requests().await?;
        Ok(requests.iter().map(UrgentCard::from).collect())
    }

    pub async fn donors(&self, filter: Selection<DonorAvailability>) -> Result<DonorList> {
        let donors = self.source.matching_donors().await?;
        Ok(donor_list(&donors, filter))
    }

    pub async fn map(&self, viewport: MapViewport) -> Result<MapView> {
        let locations = self.source.locations().await?;
        Ok(map_view(&locations, viewport))
    }

    pub async fn blood_type_detail(&self, blood_type: BloodType) -> Result<BloodTypeDetail> {
        let entry = self.source.blood_type(blood_type).await?;
        let supply = self.source.supply(blood_type).await?;
        Ok(blood_type_detail(&entry, supply))
    }

    pub async fn urgent_request_detail(&self, id: &str) -> Result<UrgentRequestDetail> {
        let request = self.source.urgent_request(id).await?;
        Ok(urgent_request_detail(&request))
    }

    pub async fn location_detail(&self, id: &str) -> Result<LocationDetail> {
        let location = self.source.location(id).await?;
        Ok(location_detail(&location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{mock_data, MockCatalog};
    use crate::errors::LifeFlowError;

    fn service() -> DashboardService {
        DashboardService::new(Arc::new(MockCatalog::new()))
    }

    #[test]
    fn should_filter_requests_by_urgency() {
        let requests = mock_data::blood_requests();
        let medium = request_list(&requests, Selection::Only(UrgencyLevel::Medium));
        let ids: Vec<_> = medium.items.iter().map(|card| card.id.as_str()).collect();
        assert_eq!(ids, vec!["REQ-003", "REQ-005"]);
        assert_eq!(medium.empty_message, None);
        assert_eq!(medium.items[0].units_label, "1 unit required");
        assert_eq!(medium.items[1].units_label, "2 units required");

        let all = request_list(&requests, Selection::All);
        assert_eq!(all.items.len(), 5);
    }

    #[test]
    fn should_report_empty_state_when_filter_matches_nothing() {
        let requests: Vec<BloodRequest> = mock_data::blood_requests()
            .into_iter()
            .filter(|request| request.urgency_level != UrgencyLevel::Low)
            .collect();
        let low = request_list(&requests, Selection::Only(UrgencyLevel::Low));
        assert!(low.items.is_empty());
        assert_eq!(low.empty_message, Some(NO_MATCHING_REQUESTS));
    }

    #[test]
    fn should_show_busy_donors_as_unavailable() {
        let busy = donor_list(&mock_data::matching_donors(), Selection::Only(DonorAvailability::Busy));
        assert_eq!(busy.items.len(), 1);
        assert_eq!(busy.items[0].name, "David Rodriguez");
        assert_eq!(busy.items[0].availability_presentation.label, "Unavailable");
        assert_eq!(busy.items[0].match_bar_width, 92);

        let empty = donor_list(&[], Selection::All);
        assert_eq!(empty.empty_message, Some(NO_MATCHING_DONORS));
    }

    #[test]
    fn should_flag_urgent_need_for_critical_stock_only() {
        let cards: Vec<_> = mock_data::blood_availability()
            .iter()
            .map(AvailabilityCard::from)
            .collect();
        let ab_positive = cards.iter().find(|card| card.blood_type == BloodType::AbPositive).unwrap();
        let o_positive = cards.iter().find(|card| card.blood_type == BloodType::OPositive).unwrap();
        assert!(ab_positive.urgent_need);
        assert_eq!(ab_positive.presentation.style, "bg-red-100 text-red-800");
        assert!(!o_positive.urgent_need);
        assert_ne!(ab_positive.presentation, o_positive.presentation);
        assert_eq!(o_positive.badge_background, "#E53E3E20");
    }

    #[test]
    fn should_step_pins_and_list_legend() {
        let map = map_view(&mock_data::map_locations(), MapViewport::default());
        assert_eq!(map.zoom, 13);
        assert_eq!(map.pins[0].position, PinPosition { top: 30, left: 25 });
        assert_eq!(map.pins[2].position, PinPosition { top: 60, left: 49 });
        assert_eq!(map.pins[1].subtitle, "Hospital \u{b7} 1.2 miles");
        assert_eq!(map.pins[0].pin_style, "bg-red-500");
        let labels: Vec<_> = map.legend.iter().map(|entry| entry.label).collect();
        assert_eq!(labels, vec!["Hospitals", "Blood Banks", "Donor Centers"]);
    }

    #[tokio::test]
    async fn should_assemble_overview_with_filters() {
        let view = service()
            .overview(DashboardQuery {
                requests: Selection::Only(UrgencyLevel::Critical),
                donors: Selection::Only(DonorAvailability::Pending),
            })
            .await
            .unwrap();
        assert_eq!(view.availability.len(), 6);
        assert_eq!(view.urgent_requests.len(), 3);
        assert_eq!(view.requests.items.len(), 1);
        assert_eq!(view.requests.items[0].patient_name, "Sarah Johnson");
        assert_eq!(view.donors.items.len(), 1);
        assert_eq!(view.map.pins.len(), 5);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["requests"]["filter"], "critical");
        assert_eq!(json["donors"]["items"][0]["availability"], "pending");
    }

    #[tokio::test]
    async fn should_build_blood_type_detail() {
        let detail = service().blood_type_detail(BloodType::ONegative).await.unwrap();
        assert!(detail.rh_negative);
        assert_eq!(detail.card.compatible_with.len(), 8);
        assert_eq!(detail.supply.status, SupplyStatus::Moderate);
        assert_eq!(detail.supply.presentation.label, "Moderate");
        assert_eq!(
            detail.donors_nearby_sentence,
            "There are currently 12 potential donors nearby who match this blood type."
        );
        assert!(matches!(
            service().blood_type_detail(BloodType::BNegative).await,
            Err(LifeFlowError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn should_build_location_detail_with_stock() {
        let detail = service().location_detail("loc123").await.unwrap();
        assert!(detail.can_schedule_donation);
        assert_eq!(detail.type_presentation.label, "Blood Bank");
        let ab_negative = detail
            .stock
            .iter()
            .find(|entry| entry.blood_type == BloodType::AbNegative)
            .unwrap();
        assert_eq!(ab_negative.presentation.style, "bg-red-500");
        assert_eq!(ab_negative.bar_width, 20);

        let hospital = service().location_detail("loc2").await.unwrap();
        assert!(!hospital.can_schedule_donation);
        assert!(hospital.stock.is_empty());
    }

    #[tokio::test]
    async fn should_build_urgent_request_detail() {
        let detail = service().urgent_request_detail("1").await.unwrap();
        assert_eq!(detail.card.urgency.label, "CRITICAL");
        assert_eq!(detail.card.units_summary, "3 units of O- blood");
        assert_eq!(detail.notice, URGENT_REQUEST_NOTICE);
    }
}
