use async_trait::async_trait;
use common::{PredictRequest, PredictResponse};

use crate::api_client::{self, ApiError};
use crate::controller::PredictionBackend;

/// Get all facility names known to the model
pub async fn get_facilities() -> Result<Vec<String>, ApiError> {
    log::trace!("Fetching all facilities");
    let result = api_client::get::<Vec<String>>("/unidades").await;
    match &result {
        Ok(facilities) => log::info!("Fetched {} facilities", facilities.len()),
        Err(e) => log::error!("Failed to fetch facilities: {}", e),
    }
    result
}

/// Ask the model for the expected number of days until closure
pub async fn predict(request: &PredictRequest) -> Result<PredictResponse, ApiError> {
    log::debug!(
        "Requesting prediction for facility '{}' ({} / {} days)",
        request.facility,
        request.days_symptom_to_notification,
        request.days_notification_to_closure
    );
    let result = api_client::post::<PredictResponse, _>("/predict", request).await;
    match &result {
        Ok(response) => log::info!("Predicted {} days for '{}'", response.previsao, request.facility),
        Err(e) => log::error!("Failed to predict for '{}': {}", request.facility, e),
    }
    result
}

/// Backend reached over HTTP through the configured API base
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HttpBackend;

#[async_trait(?Send)]
impl PredictionBackend for HttpBackend {
    async fn facilities(&self) -> Result<Vec<String>, ApiError> {
        get_facilities().await
    }

    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, ApiError> {
        predict(request).await
    }
}
