// models/src/blood_type.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{ModelError, ModelResult};

/// One of the eight ABO/Rh combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BloodType {
    APositive,
    ANegative,
    BPositive,
    BNegative,
    AbPositive,
    AbNegative,
    OPositive,
    ONegative,
}

use BloodType::*;

// Indexed by discriminant, so the order must follow the enum declaration.
const CODES: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

// Red-cell donation: who can receive from each donor type.
const RECIPIENTS: [&[BloodType]; 8] = [
    &[APositive, AbPositive],
    &[APositive, ANegative, AbPositive, AbNegative],
    &[BPositive, AbPositive],
    &[BPositive, BNegative, AbPositive, AbNegative],
    &[AbPositive],
    &[AbPositive, AbNegative],
    &[OPositive, APositive, BPositive, AbPositive],
    &[
        OPositive, ONegative, APositive, ANegative, BPositive, BNegative, AbPositive, AbNegative,
    ],
];

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        APositive, ANegative, BPositive, BNegative, AbPositive, AbNegative, OPositive, ONegative,
    ];

    pub fn code(self) -> &'static str {
        CODES[self as usize]
    }

    /// Fixed lookup of the types this type can donate red cells to.
    pub fn compatible_recipients(self) -> &'static [BloodType] {
        RECIPIENTS[self as usize]
    }

    pub fn can_donate_to(self, recipient: BloodType) -> bool {
        self.compatible_recipients().contains(&recipient)
    }

    pub fn is_rh_negative(self) -> bool {
        self.code().ends_with('-')
    }
}

impl FromStr for BloodType {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        // Accept the typographic minus some sources use.
        let normalized = s.trim().replace('\u{2212}', "-").to_ascii_uppercase();
        CODES
            .iter()
            .position(|code| *code == normalized)
            .map(|idx| Self::ALL[idx])
            .ok_or_else(|| ModelError::UnknownBloodType(s.to_string()))
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for BloodType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for BloodType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Blood type as declared by a donor, who may not know it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredBloodType {
    Known(BloodType),
    Unknown,
}

impl DeclaredBloodType {
    pub fn label(self) -> &'static str {
        match self {
            DeclaredBloodType::Known(blood_type) => blood_type.code(),
            DeclaredBloodType::Unknown => "I don't know",
        }
    }
}

impl FromStr for DeclaredBloodType {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        if s.trim().eq_ignore_ascii_case("unknown") {
            return Ok(DeclaredBloodType::Unknown);
        }
        s.parse().map(DeclaredBloodType::Known)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_every_code_back_to_its_type() {
        for blood_type in BloodType::ALL {
            assert_eq!(blood_type.code().parse::<BloodType>(), Ok(blood_type));
        }
    }

    #[test]
    fn should_accept_typographic_minus_and_lowercase() {
        assert_eq!("A\u{2212}".parse::<BloodType>(), Ok(ANegative));
        assert_eq!("ab+".parse::<BloodType>(), Ok(AbPositive));
    }

    #[test]
    fn should_reject_unknown_codes() {
        assert_eq!(
            "C+".parse::<BloodType>(),
            Err(ModelError::UnknownBloodType("C+".to_string()))
        );
    }

    #[test]
    fn should_treat_o_negative_as_universal_donor() {
        assert_eq!(ONegative.compatible_recipients().len(), 8);
        for recipient in BloodType::ALL {
            assert!(ONegative.can_donate_to(recipient));
        }
    }

    #[test]
    fn should_only_let_ab_positive_donate_to_itself() {
        assert_eq!(AbPositive.compatible_recipients(), &[AbPositive]);
        assert!(!AbPositive.can_donate_to(OPositive));
    }

    #[test]
    fn should_serialize_as_code() {
        let json = serde_json::to_string(&BNegative).unwrap();
        assert_eq!(json, "\"B-\"");
        let back: BloodType = serde_json::from_str("\"O+\"").unwrap();
        assert_eq!(back, OPositive);
    }

    #[test]
    fn should_parse_unknown_declaration() {
        assert_eq!("unknown".parse::<DeclaredBloodType>(), Ok(DeclaredBloodType::Unknown));
        assert_eq!(
            "O-".parse::<DeclaredBloodType>(),
            Ok(DeclaredBloodType::Known(ONegative))
        );
        assert_eq!(DeclaredBloodType::Unknown.label(), "I don't know");
    }
}
