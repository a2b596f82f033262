// lib/src/validation/forms.rs

use serde::{Deserialize, Serialize};

use models::{BloodType, Classification, TimeSlot, UrgencyLevel};

use super::{FieldSpec, FieldValue, FormSchema, Rule};
use crate::submission::FormKind;

/// One choice of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOptions {
    pub field: &'static str,
    pub options: Vec<SelectOption>,
}

pub fn blood_type_options(allow_unknown: bool) -> Vec<SelectOption> {
    let mut options: Vec<SelectOption> = BloodType::ALL
        .iter()
        .map(|blood_type| SelectOption {
            value: blood_type.code(),
            label: blood_type.code(),
        })
        .collect();
    if allow_unknown {
        options.push(SelectOption {
            value: "unknown",
            label: "I don't know",
        });
    }
    options
}

/// Request form urgency choices, lowest first as the select lists them.
pub fn urgency_options() -> Vec<SelectOption> {
    UrgencyLevel::ALL
        .iter()
        .rev()
        .map(|level| SelectOption {
            value: level.code(),
            label: level.option_label(),
        })
        .collect()
}

pub fn time_slot_options() -> Vec<SelectOption> {
    TimeSlot::ALL
        .iter()
        .map(|slot| SelectOption {
            value: slot.code(),
            label: slot.label(),
        })
        .collect()
}

fn text<'a>(value: &'a str) -> FieldValue<'a> {
    FieldValue::Text(value)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub blood_type: String,
    pub date_of_birth: String,
    pub medical_conditions: String,
    pub last_donation: String,
    pub can_donate: bool,
}

impl Default for ProfileForm {
    // Pre-filled with the demo member's saved profile.
    fn default() -> Self {
        ProfileForm {
            full_name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            address: "123 Main St, Springfield".to_string(),
            blood_type: "O+".to_string(),
            date_of_birth: "1990-01-01".to_string(),
            medical_conditions: String::new(),
            last_donation: "2023-05-15".to_string(),
            can_donate: true,
        }
    }
}

impl FormSchema for ProfileForm {
    const KIND: FormKind = FormKind::Profile;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("fullName", &[Rule::MinChars(2, "Name must be at least 2 characters")]),
        FieldSpec::required("email", &[Rule::Email("Please enter a valid email address")]),
        FieldSpec::required("phone", &[Rule::MinChars(10, "Please enter a valid phone number")]),
        FieldSpec::required(
            "address",
            &[Rule::MinChars(5, "Address must be at least 5 characters")],
        ),
        FieldSpec::required("bloodType", &[Rule::MinChars(1, "Please select your blood type")]),
        FieldSpec::optional("dateOfBirth"),
        FieldSpec::optional("medicalConditions"),
        FieldSpec::optional("lastDonation"),
        FieldSpec::optional("canDonate"),
    ];

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "fullName" => text(&self.full_name),
            "email" => text(&self.email),
            "phone" => text(&self.phone),
            "address" => text(&self.address),
            "bloodType" => text(&self.blood_type),
            "dateOfBirth" => text(&self.date_of_birth),
            "medicalConditions" => text(&self.medical_conditions),
            "lastDonation" => text(&self.last_donation),
            "canDonate" => FieldValue::Flag(self.can_donate),
            _ => text(""),
        }
    }

    fn select_options() -> Vec<FieldOptions> {
        vec![FieldOptions {
            field: "bloodType",
            options: blood_type_options(false),
        }]
    }
}

/// Fields are kept as entered; `units` and `requiredBy` are not parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BloodRequestForm {
    pub patient_name: String,
    pub blood_type: String,
    pub units: String,
    pub hospital: String,
    pub location: String,
    pub contact_phone: String,
    pub required_by: String,
    pub urgency_level: String,
    pub medical_reason: String,
    pub additional_info: String,
}

impl Default for BloodRequestForm {
    fn default() -> Self {
        BloodRequestForm {
            patient_name: String::new(),
            blood_type: String::new(),
            units: "1".to_string(),
            hospital: String::new(),
            location: String::new(),
            contact_phone: String::new(),
            required_by: String::new(),
            urgency_level: UrgencyLevel::Medium.code().to_string(),
            medical_reason: String::new(),
            additional_info: String::new(),
        }
    }
}

impl FormSchema for BloodRequestForm {
    const KIND: FormKind = FormKind::BloodRequest;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required(
            "patientName",
            &[Rule::MinChars(2, "Name must be at least 2 characters")],
        ),
        FieldSpec::required("bloodType", &[Rule::MinChars(1, "Please select a blood type")]),
        FieldSpec::required(
            "units",
            &[Rule::MinChars(1, "Please enter the number of units needed")],
        ),
        FieldSpec::required("hospital", &[Rule::MinChars(2, "Hospital name is required")]),
        FieldSpec::required("location", &[Rule::MinChars(5, "Location details are required")]),
        FieldSpec::required(
            "contactPhone",
            &[Rule::MinChars(10, "Please enter a valid phone number")],
        ),
        FieldSpec::required("requiredBy", &[Rule::MinChars(1, "Required by date is needed")]),
        FieldSpec::required("urgencyLevel", &[Rule::MinChars(1, "Please select urgency level")]),
        FieldSpec::required(
            "medicalReason",
            &[Rule::MinChars(10, "Please provide more details about the medical reason")],
        ),
        FieldSpec::optional("additionalInfo"),
    ];

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "patientName" => text(&self.patient_name),
            "bloodType" => text(&self.blood_type),
            "units" => text(&self.units),
            "hospital" => text(&self.hospital),
            "location" => text(&self.location),
            "contactPhone" => text(&self.contact_phone),
            "requiredBy" => text(&self.required_by),
            "urgencyLevel" => text(&self.urgency_level),
            "medicalReason" => text(&self.medical_reason),
            "additionalInfo" => text(&self.additional_info),
            _ => text(""),
        }
    }

    fn select_options() -> Vec<FieldOptions> {
        vec![
            FieldOptions {
                field: "bloodType",
                options: blood_type_options(false),
            },
            FieldOptions {
                field: "urgencyLevel",
                options: urgency_options(),
            },
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DonationForm {
    pub blood_type: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub preferred_location: String,
    pub last_donation: String,
    pub medical_conditions: String,
    pub medications: String,
    pub additional_info: String,
    pub consent: bool,
}

impl FormSchema for DonationForm {
    const KIND: FormKind = FormKind::Donation;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("bloodType", &[Rule::MinChars(1, "Please select your blood type")]),
        FieldSpec::required(
            "preferredDate",
            &[Rule::MinChars(1, "Please select a preferred date")],
        ),
        FieldSpec::required(
            "preferredTime",
            &[Rule::MinChars(1, "Please select a preferred time")],
        ),
        FieldSpec::required(
            "preferredLocation",
            &[Rule::MinChars(2, "Please enter a preferred location")],
        ),
        FieldSpec::optional("lastDonation"),
        FieldSpec::optional("medicalConditions"),
        FieldSpec::optional("medications"),
        FieldSpec::optional("additionalInfo"),
        FieldSpec::required(
            "consent",
            &[Rule::MustBeTrue("You must agree to the terms and conditions")],
        ),
    ];

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "bloodType" => text(&self.blood_type),
            "preferredDate" => text(&self.preferred_date),
            "preferredTime" => text(&self.preferred_time),
            "preferredLocation" => text(&self.preferred_location),
            "lastDonation" => text(&self.last_donation),
            "medicalConditions" => text(&self.medical_conditions),
            "medications" => text(&self.medications),
            "additionalInfo" => text(&self.additional_info),
            "consent" => FieldValue::Flag(self.consent),
            _ => text(""),
        }
    }

    fn select_options() -> Vec<FieldOptions> {
        vec![
            FieldOptions {
                field: "bloodType",
                options: blood_type_options(true),
            },
            FieldOptions {
                field: "preferredTime",
                options: time_slot_options(),
            },
        ]
    }
}
