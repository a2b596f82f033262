// lib/src/catalog/mock_data.rs

//! Static records the dashboard shows before any backend exists.

use std::collections::BTreeMap;

use models::{
    AvailabilityLevel, BloodRequest, BloodType, BloodTypeAvailability, Coordinates,
    DonorAvailability, Location, LocationType, MatchingDonor, RequestStatus, UrgencyLevel,
    UrgentPriority, UrgentRequest,
};

use super::SupplySnapshot;
use BloodType::*;

fn availability(
    blood_type: BloodType,
    level: AvailabilityLevel,
    last_updated: &str,
    donors_nearby: u32,
    color: &str,
) -> BloodTypeAvailability {
    BloodTypeAvailability {
        blood_type,
        availability: level,
        last_updated: last_updated.to_string(),
        donors_nearby,
        compatible_with: blood_type.compatible_recipients().to_vec(),
        color: color.to_string(),
    }
}

pub fn blood_availability() -> Vec<BloodTypeAvailability> {
    vec![
        availability(OPositive, AvailabilityLevel::High, "10 minutes ago", 24, "#E53E3E"),
        availability(APositive, AvailabilityLevel::Medium, "15 minutes ago", 18, "#3182CE"),
        availability(BPositive, AvailabilityLevel::Low, "5 minutes ago", 9, "#38A169"),
        availability(AbPositive, AvailabilityLevel::Critical, "2 minutes ago", 3, "#805AD5"),
        availability(ONegative, AvailabilityLevel::Medium, "20 minutes ago", 12, "#DD6B20"),
        availability(ANegative, AvailabilityLevel::Low, "30 minutes ago", 7, "#D69E2E"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn request(
    id: &str,
    blood_type: BloodType,
    patient_name: &str,
    hospital: &str,
    location: &str,
    posted_date: &str,
    required_by: &str,
    urgency_level: UrgencyLevel,
    distance: &str,
    required_units: u32,
) -> BloodRequest {
    BloodRequest {
        id: id.to_string(),
        blood_type,
        patient_name: patient_name.to_string(),
        hospital: hospital.to_string(),
        location: location.to_string(),
        posted_date: posted_date.to_string(),
        required_by: required_by.to_string(),
        urgency_level,
        distance: distance.to_string(),
        required_units,
        status: RequestStatus::Active,
    }
}

pub fn blood_requests() -> Vec<BloodRequest> {
    vec![
        request(
            "REQ-001",
            ONegative,
            "Sarah Johnson",
            "Memorial Hospital",
            "Downtown, Springfield",
            "2 hours ago",
            "Today, 8:00 PM",
            UrgencyLevel::Critical,
            "2.5 miles",
            3,
        ),
        request(
            "REQ-002",
            AbPositive,
            "Michael Chen",
            "City Medical Center",
            "Westside, Springfield",
            "5 hours ago",
            "Tomorrow, 10:00 AM",
            UrgencyLevel::High,
            "4.2 miles",
            2,
        ),
        request(
            "REQ-003",
            APositive,
            "Emma Rodriguez",
            "Children's Hospital",
            "Northside, Springfield",
            "Yesterday",
            "Tomorrow, 6:00 PM",
            UrgencyLevel::Medium,
            "6.8 miles",
            1,
        ),
        request(
            "REQ-004",
            BNegative,
            "David Wilson",
            "General Hospital",
            "Eastside, Springfield",
            "Yesterday",
            "In 2 days",
            UrgencyLevel::Low,
            "3.5 miles",
            2,
        ),
        request(
            "REQ-005",
            OPositive,
            "Sophia Martinez",
            "University Medical Center",
            "Southside, Springfield",
            "2 days ago",
            "In 3 days",
            UrgencyLevel::Medium,
            "5.1 miles",
            2,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn urgent(
    id: &str,
    blood_type: BloodType,
    hospital: &str,
    time_posted: &str,
    urgency_level: UrgentPriority,
    distance: &str,
    patient_condition: &str,
    required_units: u32,
) -> UrgentRequest {
    UrgentRequest {
        id: id.to_string(),
        blood_type,
        location: hospital.to_string(),
        hospital: hospital.to_string(),
        time_posted: time_posted.to_string(),
        urgency_level,
        distance: distance.to_string(),
        patient_condition: patient_condition.to_string(),
        required_units,
    }
}

pub fn urgent_requests() -> Vec<UrgentRequest> {
    vec![
        urgent(
            "1",
            ONegative,
            "Memorial Hospital",
            "15 minutes ago",
            UrgentPriority::Critical,
            "2.5 miles",
            "Trauma patient in emergency surgery",
            3,
        ),
        urgent(
            "2",
            AbPositive,
            "City Medical Center",
            "45 minutes ago",
            UrgentPriority::High,
            "4.2 miles",
            "Scheduled organ transplant",
            2,
        ),
        urgent(
            "3",
            APositive,
            "Children's Hospital",
            "1 hour ago",
            UrgentPriority::Medium,
            "6.8 miles",
            "Pediatric cancer patient",
            1,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn donor(
    id: &str,
    name: &str,
    blood_type: BloodType,
    location: &str,
    distance: &str,
    last_donation: &str,
    contact_number: &str,
    match_percentage: u8,
    availability: DonorAvailability,
) -> MatchingDonor {
    MatchingDonor {
        id: id.to_string(),
        name: name.to_string(),
        blood_type,
        location: location.to_string(),
        distance: distance.to_string(),
        last_donation: last_donation.to_string(),
        contact_number: contact_number.to_string(),
        match_percentage,
        availability,
    }
}

pub fn matching_donors() -> Vec<MatchingDonor> {
    vec![
        donor(
            "donor-001",
            "Michael Chen",
            OPositive,
            "Downtown, Springfield",
            "1.2 miles",
            "3 months ago",
            "(555) 123-4567",
            98,
            DonorAvailability::Available,
        ),
        donor(
            "donor-002",
            "Sarah Johnson",
            ANegative,
            "Westside, Springfield",
            "2.5 miles",
            "5 months ago",
            "(555) 234-5678",
            95,
            DonorAvailability::Available,
        ),
        donor(
            "donor-003",
            "David Rodriguez",
            BPositive,
            "Northside, Springfield",
            "3.7 miles",
            "2 months ago",
            "(555) 345-6789",
            92,
            DonorAvailability::Busy,
        ),
        donor(
            "donor-004",
            "Emily Wilson",
            AbPositive,
            "Eastside, Springfield",
            "4.1 miles",
            "6 months ago",
            "(555) 456-7890",
            88,
            DonorAvailability::Pending,
        ),
    ]
}

fn map_location(
    id: &str,
    name: &str,
    location_type: LocationType,
    (lat, lng): (f64, f64),
    blood_types: &[BloodType],
    distance: &str,
    address: &str,
) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        location_type,
        coordinates: Coordinates { lat, lng },
        blood_types: blood_types.to_vec(),
        distance: distance.to_string(),
        address: address.to_string(),
        phone: None,
        hours: None,
        blood_units: None,
    }
}

pub fn map_locations() -> Vec<Location> {
    vec![
        map_location(
            "loc1",
            "Central Blood Bank",
            LocationType::BloodBank,
            (34.052, -118.243),
            &[APositive, OPositive, BNegative],
            "0.8 miles",
            "123 Main St, Los Angeles, CA",
        ),
        map_location(
            "loc2",
            "Memorial Hospital",
            LocationType::Hospital,
            (34.048, -118.259),
            &[AbPositive, ONegative, ANegative],
            "1.2 miles",
            "456 Medical Center Blvd, Los Angeles, CA",
        ),
        map_location(
            "loc3",
            "Community Donor Center",
            LocationType::DonorCenter,
            (34.061, -118.235),
            &[OPositive, BPositive],
            "1.5 miles",
            "789 Donation Ave, Los Angeles, CA",
        ),
        map_location(
            "loc4",
            "City Medical Center",
            LocationType::Hospital,
            (34.055, -118.278),
            &[APositive, AbNegative, OPositive],
            "2.3 miles",
            "101 Healthcare Dr, Los Angeles, CA",
        ),
        map_location(
            "loc5",
            "Regional Blood Services",
            LocationType::BloodBank,
            (34.037, -118.227),
            &[BPositive, ONegative, AbPositive],
            "3.1 miles",
            "202 Donation Blvd, Los Angeles, CA",
        ),
    ]
}

/// Locations known in full detail, with opening hours and unit counts.
pub fn detailed_locations() -> Vec<Location> {
    let units: BTreeMap<BloodType, u32> = [
        (APositive, 15),
        (ANegative, 8),
        (BPositive, 12),
        (BNegative, 5),
        (AbPositive, 3),
        (AbNegative, 2),
        (OPositive, 20),
        (ONegative, 10),
    ]
    .into_iter()
    .collect();

    vec![Location {
        id: "loc123".to_string(),
        name: "Central Blood Bank".to_string(),
        location_type: LocationType::BloodBank,
        coordinates: Coordinates {
            lat: 34.052,
            lng: -118.243,
        },
        blood_types: units.keys().copied().collect(),
        distance: "1.2 miles".to_string(),
        address: "123 Medical Center Blvd, Springfield".to_string(),
        phone: Some("(555) 123-4567".to_string()),
        hours: Some("Mon-Fri: 8am-6pm, Sat: 9am-2pm".to_string()),
        blood_units: Some(units),
    }]
}

/// Supply figures shown by the blood type detail view.
pub fn supply_snapshot() -> SupplySnapshot {
    SupplySnapshot {
        percentage: 65,
        next_drive: "Tomorrow, 9:00 AM".to_string(),
        location: "Central Blood Bank".to_string(),
    }
}
