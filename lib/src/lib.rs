// lib/src/lib.rs

//! Client-side rules of the LifeFlow dashboard: the record catalog, list
//! filters, form validation, the submission flow and navigation.

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod filters;
pub mod navigation;
pub mod submission;
pub mod validation;

pub use crate::catalog::{DashboardSource, MockCatalog, SupplySnapshot};
pub use crate::config::{load_app_config, AppConfig};
pub use crate::dashboard::{DashboardQuery, DashboardService, DashboardView};
pub use crate::errors::{LifeFlowError, Result};
pub use crate::filters::{filter_by, FilterChange, MapViewport, SearchFilters, Selection, ToggleSet};
pub use crate::navigation::{Navigator, Screen};
pub use crate::submission::{
    FormKind, SimulatedBackend, SubmissionBackend, SubmissionError, SubmissionFlow,
    SubmissionReceipt, SubmitControls,
};
pub use crate::validation::{
    BloodRequestForm, DonationForm, FieldError, FormSchema, ProfileForm, ValidationErrors,
};
