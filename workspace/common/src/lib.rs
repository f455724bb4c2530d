//! Common transport-layer types shared between the prediction backend and the frontend.
//! These structs mirror the backend's request/response payloads so the frontend
//! can build requests and read responses without duplicating shapes.

mod dates;

pub use dates::{DateInput, MILLIS_PER_DAY, day_delta};

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ===================== Prediction =====================

/// Request body for `POST /predict` (mirrors backend PredictRequest).
///
/// Non-finite deltas are written as JSON `null`, the same thing a browser
/// produces for `NaN`. The backend is expected to reject those.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictRequest {
    /// Days between first symptoms and notification.
    #[serde(rename = "tempo_sin_pri_notific")]
    pub days_symptom_to_notification: f64,
    /// Days between notification and the investigation/closure date.
    #[serde(rename = "tempo_invest_encerrar")]
    pub days_notification_to_closure: f64,
    /// Selected facility name.
    #[serde(rename = "unidade")]
    pub facility: String,
}

impl PredictRequest {
    /// Builds a request from the three user-supplied dates.
    pub fn from_dates(
        symptom: &DateInput,
        notification: &DateInput,
        investigation: &DateInput,
        facility: impl Into<String>,
    ) -> Self {
        Self {
            days_symptom_to_notification: day_delta(symptom, notification),
            days_notification_to_closure: day_delta(notification, investigation),
            facility: facility.into(),
        }
    }

    /// False when either delta is `NaN` or infinite.
    pub fn has_finite_deltas(&self) -> bool {
        self.days_symptom_to_notification.is_finite()
            && self.days_notification_to_closure.is_finite()
    }
}

/// Successful response of `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    /// Predicted number of days until the case is closed.
    pub previsao: f64,
}

/// Error body returned by the backend on any non-2xx response.
///
/// `detail` is usually a string, but request validation failures carry a
/// list of objects instead, so it is kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorDetail {
    pub detail: Value,
}

impl ErrorDetail {
    /// Human readable form of the detail.
    pub fn message(&self) -> String {
        match &self.detail {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}
