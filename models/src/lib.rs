// models/src/lib.rs

//! Domain types of the LifeFlow blood donation dashboard.

pub mod blood_type;
pub mod classification;
pub mod donation;
pub mod errors;

pub use blood_type::{BloodType, DeclaredBloodType};
pub use classification::{
    AvailabilityLevel, Classification, DistanceRange, DonorAvailability, LocationType, Presentation,
    RequestStatus, SearchUrgency, StockLevel, SupplyStatus, TimeSlot, UrgencyLevel, UrgentPriority,
};
pub use donation::{
    BloodRequest, BloodTypeAvailability, Coordinates, Location, MatchingDonor, PinPosition,
    StockEntry, UrgentRequest,
};
pub use errors::{ModelError, ModelResult};
