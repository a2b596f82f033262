// lib/src/submission.rs

//! Submission of the dashboard forms.
//!
//! A submit validates the form, disables the submit control of the client's
//! form, hands a JSON envelope to a `SubmissionBackend` and, once the backend
//! answers, navigates to the form's destination. Every client has its own
//! controls, so one client's pending submit never blocks another's. The
//! control is re-enabled on every exit path by `SubmitGuard`. Backend
//! failures are logged and returned.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::SubmissionConfig;
use crate::errors::LifeFlowError;
use crate::navigation::{Navigator, Screen};
use crate::validation::{FormSchema, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Profile,
    #[serde(rename = "request")]
    BloodRequest,
    Donation,
}

struct FormText {
    code: &'static str,
    submit_label: &'static str,
    busy_label: &'static str,
    acknowledgement: &'static str,
}

const FORM_TEXT: [FormText; 3] = [
    FormText {
        code: "profile",
        submit_label: "Save Profile",
        busy_label: "Saving...",
        acknowledgement: "Profile updated successfully!",
    },
    FormText {
        code: "request",
        submit_label: "Submit Request",
        busy_label: "Submitting...",
        acknowledgement: "Blood request submitted successfully!",
    },
    FormText {
        code: "donation",
        submit_label: "Schedule Donation",
        busy_label: "Submitting...",
        acknowledgement: "Donation request submitted successfully!",
    },
];

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Profile, FormKind::BloodRequest, FormKind::Donation];

    fn text(self) -> &'static FormText {
        &FORM_TEXT[self as usize]
    }

    pub fn code(self) -> &'static str {
        self.text().code
    }

    pub fn submit_label(self) -> &'static str {
        self.text().submit_label
    }

    pub fn busy_label(self) -> &'static str {
        self.text().busy_label
    }

    pub fn acknowledgement(self) -> &'static str {
        self.text().acknowledgement
    }

    /// Screen the form lives on.
    pub fn screen(self) -> Screen {
        match self {
            FormKind::Profile => Screen::Profile,
            FormKind::BloodRequest => Screen::RequestBlood,
            FormKind::Donation => Screen::DonateBlood,
        }
    }

    /// Screen shown after a successful submit. The profile stays put.
    pub fn destination(self) -> Screen {
        match self {
            FormKind::Profile => Screen::Profile,
            FormKind::BloodRequest | FormKind::Donation => Screen::Dashboard,
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FormKind {
    type Err = LifeFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.code() == s)
            .ok_or_else(|| LifeFlowError::NotFound(format!("form {}", s)))
    }
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("A {0} submission is already in progress")]
    InFlight(FormKind),

    #[error("Submission failed: {0}")]
    Pipeline(String),
}

/// The submit button of one form. Disabled while a submission is pending.
#[derive(Debug)]
pub struct SubmitControl {
    kind: FormKind,
    disabled: AtomicBool,
}

impl SubmitControl {
    pub fn new(kind: FormKind) -> Self {
        SubmitControl {
            kind,
            disabled: AtomicBool::new(false),
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Acquire)
    }

    /// Idle or busy label, whichever the control currently shows.
    pub fn label(&self) -> &'static str {
        if self.is_disabled() {
            self.kind.busy_label()
        } else {
            self.kind.submit_label()
        }
    }

    pub fn try_begin(&self) -> Result<SubmitGuard<'_>, SubmissionError> {
        self.disabled
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SubmissionError::InFlight(self.kind))?;
        debug!(kind = %self.kind, "Submit control disabled");
        Ok(SubmitGuard { control: self })
    }
}

/// Re-enables its control when dropped.
#[must_use = "the control is re-enabled as soon as the guard is dropped"]
pub struct SubmitGuard<'a> {
    control: &'a SubmitControl,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.control.disabled.store(false, Ordering::Release);
        debug!(kind = %self.control.kind, "Submit control re-enabled");
    }
}

/// Submit controls of every client's forms, keyed by client and form kind.
///
/// Entries are created on first use and dropped again once the control is
/// idle and nobody else holds it.
#[derive(Debug, Default)]
pub struct SubmitControls {
    controls: Mutex<HashMap<(String, FormKind), Arc<SubmitControl>>>,
}

impl SubmitControls {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<(String, FormKind), Arc<SubmitControl>>> {
        // A panic while holding the lock leaves the map itself consistent.
        self.controls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn control(&self, client: &str, kind: FormKind) -> Arc<SubmitControl> {
        let mut entries = self.entries();
        Arc::clone(
            entries
                .entry((client.to_string(), kind))
                .or_insert_with(|| Arc::new(SubmitControl::new(kind))),
        )
    }

    /// Drops the entry when it is idle and only the registry holds it.
    pub fn release(&self, client: &str, kind: FormKind) {
        let mut entries = self.entries();
        let key = (client.to_string(), kind);
        let idle = entries
            .get(&key)
            .is_some_and(|control| !control.is_disabled() && Arc::strong_count(control) == 1);
        if idle {
            entries.remove(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Forgets an idle control once a submit finishes or is cancelled.
struct ControlLease<'a> {
    controls: &'a SubmitControls,
    client: &'a str,
    kind: FormKind,
}

impl Drop for ControlLease<'_> {
    fn drop(&mut self) {
        self.controls.release(self.client, self.kind);
    }
}

/// What a backend receives for one submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionEnvelope {
    /// Fresh per submit; lets a real backend drop duplicates.
    pub id: Uuid,
    pub kind: FormKind,
    pub payload: Value,
}

impl SubmissionEnvelope {
    pub fn new(kind: FormKind, payload: Value) -> Self {
        SubmissionEnvelope {
            id: Uuid::new_v4(),
            kind,
            payload,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionBackend: Send + Sync {
    async fn submit(&self, envelope: &SubmissionEnvelope) -> Result<(), SubmissionError>;
}

/// Stand-in for a network round trip: logs the envelope, waits, succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    delay: Duration,
}

impl SimulatedBackend {
    pub fn new(delay: Duration) -> Self {
        SimulatedBackend { delay }
    }

    pub fn from_config(config: &SubmissionConfig) -> Self {
        SimulatedBackend::new(config.delay())
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        SimulatedBackend::from_config(&SubmissionConfig::default())
    }
}

#[async_trait]
impl SubmissionBackend for SimulatedBackend {
    async fn submit(&self, envelope: &SubmissionEnvelope) -> Result<(), SubmissionError> {
        info!(
            id = %envelope.id,
            kind = %envelope.kind,
            payload = %envelope.payload,
            "Received form submission"
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub kind: FormKind,
    pub acknowledgement: &'static str,
    pub redirect: Screen,
}

pub struct SubmissionFlow {
    backend: Arc<dyn SubmissionBackend>,
    controls: SubmitControls,
}

impl SubmissionFlow {
    pub fn new(backend: Arc<dyn SubmissionBackend>) -> Self {
        SubmissionFlow {
            backend,
            controls: SubmitControls::new(),
        }
    }

    pub fn control(&self, client: &str, kind: FormKind) -> Arc<SubmitControl> {
        self.controls.control(client, kind)
    }

    pub fn controls(&self) -> &SubmitControls {
        &self.controls
    }

    /// Validates and submits `client`'s `form`, then navigates to the form's
    /// destination.
    ///
    /// Validation failures return before the control is touched. A second
    /// submit of the same form by the same client while one is pending is
    /// rejected. Other clients are unaffected.
    pub async fn submit<F: FormSchema>(
        &self,
        client: &str,
        form: &F,
        navigator: &dyn Navigator,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let kind = F::KIND;
        if let Err(errors) = form.validate() {
            debug!(%kind, client, count = errors.len(), "Form failed validation");
            return Err(errors.into());
        }

        let _lease = ControlLease {
            controls: &self.controls,
            client,
            kind,
        };
        self.run(client, form, navigator).await
    }

    async fn run<F: FormSchema>(
        &self,
        client: &str,
        form: &F,
        navigator: &dyn Navigator,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let kind = F::KIND;
        let control = self.control(client, kind);
        let _guard = control.try_begin().map_err(|err| {
            warn!(%kind, client, "Rejected submit while another is pending");
            err
        })?;

        let payload =
            serde_json::to_value(form).map_err(|e| SubmissionError::Pipeline(e.to_string()))?;
        let envelope = SubmissionEnvelope::new(kind, payload);

        if let Err(err) = self.backend.submit(&envelope).await {
            error!(id = %envelope.id, %kind, error = %err, "Form submission failed");
            return Err(err);
        }

        let redirect = kind.destination();
        navigator.navigate(redirect);
        info!(id = %envelope.id, %kind, %redirect, "Form submitted");
        Ok(SubmissionReceipt {
            id: envelope.id,
            kind,
            acknowledgement: kind.acknowledgement(),
            redirect,
        })
    }
}
