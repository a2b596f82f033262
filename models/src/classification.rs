// models/src/classification.rs

//! Classification vocabularies and their presentation tables.
//!
//! Every vocabulary is its own enum. The `classification!` macro generates the
//! enum together with a table indexed by the variant discriminant, so a new
//! variant cannot be added without also giving it a code, a label and a style.
//! Raw strings that match no variant render with the vocabulary's fallback.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{ModelError, ModelResult};

/// Display label plus the style token (utility classes) a renderer applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Presentation {
    pub label: &'static str,
    pub style: &'static str,
}

impl Presentation {
    pub const fn new(label: &'static str, style: &'static str) -> Self {
        Self { label, style }
    }
}

pub trait Classification: Copy + Eq + Sized + 'static {
    /// Vocabulary name used in error messages.
    const KIND: &'static str;
    const FALLBACK: Presentation;

    fn all() -> &'static [Self];
    fn code(self) -> &'static str;
    fn presentation(self) -> Presentation;

    fn label(self) -> &'static str {
        self.presentation().label
    }

    fn style(self) -> &'static str {
        self.presentation().style
    }

    /// Exact code match. Callers trim user input themselves.
    fn parse_code(raw: &str) -> Option<Self> {
        Self::all().iter().copied().find(|value| value.code() == raw)
    }

    /// Total mapping from an arbitrary string to a presentation.
    fn present_raw(raw: &str) -> Presentation {
        Self::parse_code(raw)
            .map(Self::presentation)
            .unwrap_or(Self::FALLBACK)
    }
}

macro_rules! classification {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($kind:literal) {
            $( $variant:ident => $code:literal, $label:literal, $style:literal; )+
        }
        fallback => $fallback_label:literal, $fallback_style:literal;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            const TABLE: &'static [(&'static str, Presentation)] = &[
                $( ($code, Presentation::new($label, $style)), )+
            ];
        }

        impl Classification for $name {
            const KIND: &'static str = $kind;
            const FALLBACK: Presentation = Presentation::new($fallback_label, $fallback_style);

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn code(self) -> &'static str {
                Self::TABLE[self as usize].0
            }

            fn presentation(self) -> Presentation {
                Self::TABLE[self as usize].1
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> ModelResult<Self> {
                <$name as Classification>::parse_code(s).ok_or_else(|| ModelError::unknown($kind, s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.code())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

classification! {
    /// Coarse stock indicator for a blood type.
    pub enum AvailabilityLevel ("availability level") {
        High => "high", "High", "bg-green-100 text-green-800";
        Medium => "medium", "Medium", "bg-blue-100 text-blue-800";
        Low => "low", "Low", "bg-yellow-100 text-yellow-800";
        Critical => "critical", "Critical", "bg-red-100 text-red-800";
    }
    fallback => "Unknown", "bg-gray-100 text-gray-800";
}

impl AvailabilityLevel {
    /// Only critical stock raises the "urgent need" indicator.
    pub fn is_urgent_need(self) -> bool {
        self == AvailabilityLevel::Critical
    }
}

classification! {
    /// Priority of a posted blood request.
    pub enum UrgencyLevel ("urgency level") {
        Critical => "critical", "CRITICAL", "bg-red-600 text-white";
        High => "high", "HIGH", "bg-orange-500 text-white";
        Medium => "medium", "MEDIUM", "bg-yellow-500 text-black";
        Low => "low", "LOW", "bg-blue-500 text-white";
    }
    fallback => "Unknown", "bg-gray-500 text-white";
}

const URGENCY_OPTION_LABELS: [&str; 4] = [
    "Critical - Immediate",
    "High - Within 24 hours",
    "Medium - Within 48 hours",
    "Low - Within a week",
];

impl UrgencyLevel {
    /// Wording used by the request form's urgency select.
    pub fn option_label(self) -> &'static str {
        URGENCY_OPTION_LABELS[self as usize]
    }
}

classification! {
    /// Priority vocabulary of the urgent list, which has no "low".
    pub enum UrgentPriority ("urgent priority") {
        Critical => "critical", "CRITICAL", "bg-red-600 text-white";
        High => "high", "HIGH", "bg-orange-500 text-white";
        Medium => "medium", "MEDIUM", "bg-yellow-500 text-black";
    }
    fallback => "Unknown", "bg-gray-500 text-white";
}

impl From<UrgentPriority> for UrgencyLevel {
    fn from(priority: UrgentPriority) -> Self {
        match priority {
            UrgentPriority::Critical => UrgencyLevel::Critical,
            UrgentPriority::High => UrgencyLevel::High,
            UrgentPriority::Medium => UrgencyLevel::Medium,
        }
    }
}

classification! {
    pub enum DonorAvailability ("donor availability") {
        Available => "available", "Available", "bg-green-100 text-green-800";
        Busy => "busy", "Unavailable", "bg-red-100 text-red-800";
        Pending => "pending", "Pending", "bg-yellow-100 text-yellow-800";
    }
    fallback => "Unknown", "bg-gray-100 text-gray-800";
}

classification! {
    /// Kind of map location; the style is the pin color.
    pub enum LocationType ("location type") {
        Hospital => "hospital", "Hospital", "bg-blue-500";
        BloodBank => "blood_bank", "Blood Bank", "bg-red-500";
        DonorCenter => "donor_center", "Donor Center", "bg-green-500";
    }
    fallback => "Unknown", "bg-gray-500";
}

impl LocationType {
    pub fn accepts_donations(self) -> bool {
        matches!(self, LocationType::BloodBank | LocationType::DonorCenter)
    }

    /// Plural heading used by the map legend.
    pub fn legend_label(self) -> &'static str {
        match self {
            LocationType::Hospital => "Hospitals",
            LocationType::BloodBank => "Blood Banks",
            LocationType::DonorCenter => "Donor Centers",
        }
    }
}

classification! {
    pub enum RequestStatus ("request status") {
        Active => "active", "Active", "bg-green-100 text-green-800";
        Fulfilled => "fulfilled", "Fulfilled", "bg-blue-100 text-blue-800";
        Expired => "expired", "Expired", "bg-gray-200 text-gray-600";
    }
    fallback => "Unknown", "bg-gray-100 text-gray-800";
}

classification! {
    /// Urgency vocabulary offered by the search bar's multi-select.
    pub enum SearchUrgency ("search urgency") {
        Critical => "critical", "Critical", "text-red-600";
        Urgent => "urgent", "Urgent", "text-orange-600";
        Standard => "standard", "Standard", "text-blue-600";
    }
    fallback => "Unknown", "text-gray-600";
}

classification! {
    /// Radius choices offered by the search bar's location select.
    pub enum DistanceRange ("distance range") {
        Nearby => "nearby", "Nearby", "";
        Within5Miles => "5miles", "Within 5 miles", "";
        Within10Miles => "10miles", "Within 10 miles", "";
        Within25Miles => "25miles", "Within 25 miles", "";
        Within50Miles => "50miles", "Within 50 miles", "";
    }
    fallback => "Unknown", "";
}

classification! {
    /// Donation appointment slots.
    pub enum TimeSlot ("time slot") {
        Morning => "morning", "Morning (8AM - 12PM)", "";
        Afternoon => "afternoon", "Afternoon (12PM - 4PM)", "";
        Evening => "evening", "Evening (4PM - 8PM)", "";
    }
    fallback => "Unknown", "";
}

classification! {
    /// Stock of one blood type at one location, bucketed by unit count.
    pub enum StockLevel ("stock level") {
        Low => "low", "Low", "bg-red-500";
        Limited => "limited", "Limited", "bg-yellow-500";
        Healthy => "healthy", "Healthy", "bg-green-500";
    }
    fallback => "Unknown", "bg-gray-500";
}

impl StockLevel {
    pub fn from_units(units: u32) -> Self {
        match units {
            0..=3 => StockLevel::Low,
            4..=8 => StockLevel::Limited,
            _ => StockLevel::Healthy,
        }
    }

    /// Ten percent of bar per unit, full at ten units.
    pub fn bar_width(units: u32) -> u8 {
        units.saturating_mul(10).min(100) as u8
    }
}

classification! {
    /// Overall supply of a blood type, bucketed by availability percentage.
    pub enum SupplyStatus ("supply status") {
        Good => "good", "Good", "bg-green-500";
        Moderate => "moderate", "Moderate", "bg-yellow-500";
        Critical => "critical", "Critical", "bg-red-500";
    }
    fallback => "Unknown", "bg-gray-500";
}

impl SupplyStatus {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            70..=u8::MAX => SupplyStatus::Good,
            40..=69 => SupplyStatus::Moderate,
            _ => SupplyStatus::Critical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn assert_distinct<T: Classification + fmt::Debug>(check_styles: bool) {
        let labels: HashSet<_> = T::all().iter().map(|v| v.label()).collect();
        assert_eq!(labels.len(), T::all().len(), "{} labels collide", T::KIND);
        assert!(!labels.contains(T::FALLBACK.label), "{} shadows its fallback", T::KIND);
        if check_styles {
            let styles: HashSet<_> = T::all().iter().map(|v| v.style()).collect();
            assert_eq!(styles.len(), T::all().len(), "{} styles collide", T::KIND);
            assert!(!styles.contains(T::FALLBACK.style), "{} shadows its fallback", T::KIND);
        }
    }

    fn assert_codes_round_trip<T: Classification + FromStr + fmt::Debug>()
    where
        <T as FromStr>::Err: fmt::Debug,
    {
        for value in T::all() {
            let parsed = value.code().parse::<T>().unwrap();
            assert_eq!(parsed, *value);
            assert_eq!(T::present_raw(value.code()), value.presentation());
        }
    }

    #[test]
    fn should_map_every_styled_value_to_a_distinct_presentation() {
        assert_distinct::<AvailabilityLevel>(true);
        assert_distinct::<UrgencyLevel>(true);
        assert_distinct::<UrgentPriority>(true);
        assert_distinct::<DonorAvailability>(true);
        assert_distinct::<LocationType>(true);
        assert_distinct::<RequestStatus>(true);
        assert_distinct::<SearchUrgency>(true);
        assert_distinct::<StockLevel>(true);
        assert_distinct::<SupplyStatus>(true);
        assert_distinct::<DistanceRange>(false);
        assert_distinct::<TimeSlot>(false);
    }

    #[test]
    fn should_resolve_codes_through_the_table() {
        assert_codes_round_trip::<AvailabilityLevel>();
        assert_codes_round_trip::<UrgencyLevel>();
        assert_codes_round_trip::<UrgentPriority>();
        assert_codes_round_trip::<DonorAvailability>();
        assert_codes_round_trip::<LocationType>();
        assert_codes_round_trip::<RequestStatus>();
        assert_codes_round_trip::<SearchUrgency>();
        assert_codes_round_trip::<DistanceRange>();
        assert_codes_round_trip::<TimeSlot>();
    }

    #[test]
    fn should_fall_back_for_unrecognized_values() {
        assert_eq!(
            AvailabilityLevel::present_raw("plentiful"),
            Presentation::new("Unknown", "bg-gray-100 text-gray-800")
        );
        assert_eq!(UrgencyLevel::present_raw("HIGH").label, "Unknown");
        assert_eq!(UrgentPriority::present_raw("low").label, "Unknown");
        assert_eq!(DonorAvailability::present_raw("").style, "bg-gray-100 text-gray-800");
        assert_eq!(LocationType::present_raw("pharmacy").style, "bg-gray-500");
    }

    #[test]
    fn should_not_match_codes_with_surrounding_whitespace() {
        assert_eq!(UrgencyLevel::present_raw(" critical "), UrgencyLevel::FALLBACK);
        assert_eq!(AvailabilityLevel::parse_code("high\n"), None);
        assert!(" medium".parse::<UrgencyLevel>().is_err());
    }

    #[test]
    fn should_reject_unknown_codes_when_parsing() {
        let err = "urgent".parse::<UrgencyLevel>().unwrap_err();
        assert_eq!(err, ModelError::unknown("urgency level", "urgent"));
        assert_eq!(err.to_string(), "unknown urgency level value: 'urgent'");
    }

    #[test]
    fn should_flag_urgent_need_only_for_critical_stock() {
        assert!(AvailabilityLevel::Critical.is_urgent_need());
        for level in [AvailabilityLevel::High, AvailabilityLevel::Medium, AvailabilityLevel::Low] {
            assert!(!level.is_urgent_need());
        }
    }

    #[test]
    fn should_style_urgent_priority_like_matching_urgency() {
        for priority in UrgentPriority::ALL {
            let level = UrgencyLevel::from(*priority);
            assert_eq!(priority.presentation(), level.presentation());
        }
    }

    #[test]
    fn should_describe_urgency_options() {
        assert_eq!(UrgencyLevel::Critical.option_label(), "Critical - Immediate");
        assert_eq!(UrgencyLevel::Low.option_label(), "Low - Within a week");
    }

    #[test]
    fn should_only_schedule_donations_at_banks_and_centers() {
        assert!(!LocationType::Hospital.accepts_donations());
        assert!(LocationType::BloodBank.accepts_donations());
        assert!(LocationType::DonorCenter.accepts_donations());
    }

    #[test]
    fn should_bucket_stock_by_units() {
        assert_eq!(StockLevel::from_units(0), StockLevel::Low);
        assert_eq!(StockLevel::from_units(3), StockLevel::Low);
        assert_eq!(StockLevel::from_units(4), StockLevel::Limited);
        assert_eq!(StockLevel::from_units(8), StockLevel::Limited);
        assert_eq!(StockLevel::from_units(9), StockLevel::Healthy);
        assert_eq!(StockLevel::bar_width(5), 50);
        assert_eq!(StockLevel::bar_width(20), 100);
        assert_eq!(StockLevel::bar_width(u32::MAX), 100);
    }

    #[test]
    fn should_bucket_supply_by_percentage() {
        assert_eq!(SupplyStatus::from_percentage(100), SupplyStatus::Good);
        assert_eq!(SupplyStatus::from_percentage(70), SupplyStatus::Good);
        assert_eq!(SupplyStatus::from_percentage(69), SupplyStatus::Moderate);
        assert_eq!(SupplyStatus::from_percentage(40), SupplyStatus::Moderate);
        assert_eq!(SupplyStatus::from_percentage(39), SupplyStatus::Critical);
    }

    #[test]
    fn should_serialize_as_code() {
        assert_eq!(serde_json::to_string(&LocationType::BloodBank).unwrap(), "\"blood_bank\"");
        let level: UrgencyLevel = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(level, UrgencyLevel::Medium);
        assert!(serde_json::from_str::<UrgencyLevel>("\"severe\"").is_err());
    }

    proptest! {
        #[test]
        fn should_present_any_input_without_failing(raw in ".{0,12}") {
            let presentation = AvailabilityLevel::present_raw(&raw);
            match AvailabilityLevel::parse_code(&raw) {
                Some(level) => prop_assert_eq!(presentation, level.presentation()),
                None => prop_assert_eq!(presentation, AvailabilityLevel::FALLBACK),
            }
        }
    }
}
