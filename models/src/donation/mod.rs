pub mod availability;
pub mod donor;
pub mod location;
pub mod request;

pub use availability::BloodTypeAvailability;
pub use donor::MatchingDonor;
pub use location::{Coordinates, Location, PinPosition, StockEntry};
pub use request::{BloodRequest, UrgentRequest};
