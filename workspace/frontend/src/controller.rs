//! Form controller operations, independent of the DOM.
//!
//! Each operation returns a plain value describing what the page should show.
//! The form component turns those values into option lists, the result box
//! and blocking alerts.

use async_trait::async_trait;
use common::{DateInput, PredictRequest, PredictResponse};

use crate::api_client::ApiError;

pub const FACILITY_PLACEHOLDER: &str = "select a facility";
pub const FACILITY_LOADING: &str = "loading facilities...";
pub const FACILITY_LOAD_ERROR: &str = "error loading facilities";
pub const MISSING_INPUT_ALERT: &str = "fill in all dates and select the facility!";
pub const BACKEND_FAILURE_ALERT: &str = "error communicating with backend";

/// The two endpoints the form talks to
#[async_trait(?Send)]
pub trait PredictionBackend {
    async fn facilities(&self) -> Result<Vec<String>, ApiError>;
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, ApiError>;
}

/// One `<option>` of the facility dropdown
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    /// An option with an empty value, never a valid selection
    pub fn placeholder(label: &str) -> Self {
        Self {
            value: String::new(),
            label: label.to_string(),
        }
    }

    pub fn facility(name: String) -> Self {
        Self {
            label: name.clone(),
            value: name,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// Dropdown contents while the facility list is in flight
pub fn loading_options() -> Vec<SelectOption> {
    vec![SelectOption::placeholder(FACILITY_LOADING)]
}

/// Fetch the facility list and build the dropdown contents from it.
///
/// Order is kept as returned. Any failure collapses to a single error
/// placeholder; there is no retry.
pub async fn load_facility_options<B>(backend: &B) -> Vec<SelectOption>
where
    B: PredictionBackend + ?Sized,
{
    match backend.facilities().await {
        Ok(names) => {
            log::debug!("Rendering {} facility options", names.len());
            std::iter::once(SelectOption::placeholder(FACILITY_PLACEHOLDER))
                .chain(names.into_iter().map(SelectOption::facility))
                .collect()
        }
        Err(e) => {
            log::error!("Could not load facilities: {}", e);
            vec![SelectOption::placeholder(FACILITY_LOAD_ERROR)]
        }
    }
}

/// Raw values of the four form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInputs {
    pub symptom_date: String,
    pub notification_date: String,
    pub investigation_date: String,
    pub facility: String,
}

impl FormInputs {
    /// Build the request body, or `None` when a field was left empty.
    ///
    /// Only emptiness is checked. A date field holding text that is not a
    /// date passes and yields a `NaN` delta.
    pub fn to_request(&self) -> Option<PredictRequest> {
        let symptom = DateInput::parse(&self.symptom_date);
        let notification = DateInput::parse(&self.notification_date);
        let investigation = DateInput::parse(&self.investigation_date);

        let filled = symptom.is_present()
            && notification.is_present()
            && investigation.is_present()
            && !self.facility.is_empty();
        if !filled {
            return None;
        }

        Some(PredictRequest::from_dates(
            &symptom,
            &notification,
            &investigation,
            self.facility.clone(),
        ))
    }
}

/// What a submit ended in
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A field was empty, nothing was sent
    Invalid,
    /// The backend answered with a prediction
    Predicted(f64),
    /// The backend refused the request with this detail
    Rejected(String),
    /// Transport or decoding failure
    Failed,
}

impl SubmitOutcome {
    /// Message for the blocking alert, if this outcome needs one
    pub fn alert_message(&self) -> Option<String> {
        match self {
            Self::Invalid => Some(MISSING_INPUT_ALERT.to_string()),
            Self::Predicted(_) => None,
            Self::Rejected(detail) => Some(format!("Error: {}", detail)),
            Self::Failed => Some(BACKEND_FAILURE_ALERT.to_string()),
        }
    }
}

/// Text shown in the result box for a prediction
pub fn result_text(days: f64) -> String {
    format!("predicted days until closure: {:.1}", days)
}

/// Validate the form, send it, and classify the answer.
pub async fn submit_prediction<B>(backend: &B, inputs: &FormInputs) -> SubmitOutcome
where
    B: PredictionBackend + ?Sized,
{
    let Some(request) = inputs.to_request() else {
        log::debug!("Submit blocked, form incomplete");
        return SubmitOutcome::Invalid;
    };

    if !request.has_finite_deltas() {
        log::warn!(
            "Sending non-numeric day delta for facility '{}' ({} / {})",
            request.facility,
            request.days_symptom_to_notification,
            request.days_notification_to_closure
        );
    }

    match backend.predict(&request).await {
        Ok(response) => SubmitOutcome::Predicted(response.previsao),
        Err(ApiError::Rejected { detail, .. }) => SubmitOutcome::Rejected(detail),
        Err(e) => {
            log::error!("Prediction request failed: {}", e);
            SubmitOutcome::Failed
        }
    }
}
