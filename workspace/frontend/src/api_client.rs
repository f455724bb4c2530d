pub mod prediction;

use common::ErrorDetail;
use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings;

fn api_url(endpoint: &str) -> String {
    settings::get_settings().api_url(endpoint)
}

/// Failure of a single backend call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Request(String),

    /// The request body could not be encoded
    #[error("Failed to serialize request: {0}")]
    Serialize(String),

    /// A successful response carried an unexpected body
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The backend answered non-2xx and explained why
    #[error("Error: {detail}")]
    Rejected { status: u16, detail: String },

    /// The backend answered non-2xx without a readable detail
    #[error("HTTP error: {0}")]
    Status(u16),
}

/// Common GET request handler
pub async fn get<T>(endpoint: &str) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
{
    let url = api_url(endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url).send().await.map_err(|e| {
        let error = ApiError::Request(e.to_string());
        log::error!("GET {} - {}", endpoint, error);
        error
    })?;

    read_response(endpoint, "GET", response).await
}

/// Common POST request handler
pub async fn post<T, B>(endpoint: &str, body: &B) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
    B: Serialize,
{
    let url = api_url(endpoint);
    log::debug!("POST request to: {}", url);

    let response = Request::post(&url)
        .json(body)
        .map_err(|e| {
            let error = ApiError::Serialize(e.to_string());
            log::error!("POST {} - {}", endpoint, error);
            error
        })?
        .send()
        .await
        .map_err(|e| {
            let error = ApiError::Request(e.to_string());
            log::error!("POST {} - {}", endpoint, error);
            error
        })?;

    read_response(endpoint, "POST", response).await
}

/// Turn a non-2xx response into an error.
///
/// Only a JSON body with a `detail` key counts as a rejection the user
/// should read; anything else is reported by status alone.
fn classify_failure(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorDetail>(body) {
        Ok(error) => ApiError::Rejected {
            status,
            detail: error.message(),
        },
        Err(e) => {
            log::debug!("Error body without a readable detail: {}", e);
            ApiError::Status(status)
        }
    }
}

async fn read_response<T>(endpoint: &str, method: &str, response: Response) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
{
    if !response.ok() {
        let status = response.status();
        log::warn!("{} {} - Non-OK response: {}", method, endpoint, status);
        let body = response.text().await.unwrap_or_default();
        let error = classify_failure(status, &body);
        log::error!("{} {} - {}", method, endpoint, error);
        return Err(error);
    }

    log::trace!("{} {} - Response received, parsing JSON", method, endpoint);
    let data = response.json::<T>().await.map_err(|e| {
        let error = ApiError::Decode(e.to_string());
        log::error!("{} {} - {}", method, endpoint, error);
        error
    })?;

    log::info!("{} {} - Success", method, endpoint);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_error_carries_detail() {
        let error = ApiError::Rejected {
            status: 400,
            detail: "bad unit".to_string(),
        };
        assert_eq!(error.to_string(), "Error: bad unit");
    }

    #[test]
    fn test_transport_error_message() {
        let error = ApiError::Request("network down".to_string());
        assert_eq!(error.to_string(), "Request failed: network down");
        assert_eq!(ApiError::Status(502).to_string(), "HTTP error: 502");
    }

    #[test]
    fn test_failure_with_string_detail_is_rejected() {
        let error = classify_failure(400, r#"{"detail": "bad unit"}"#);
        assert_eq!(
            error,
            ApiError::Rejected {
                status: 400,
                detail: "bad unit".to_string(),
            }
        );
    }

    #[test]
    fn test_failure_with_validation_list_is_rejected_as_json() {
        let error = classify_failure(
            422,
            r#"{"detail": [{"loc": ["body", "unidade"], "msg": "field required"}]}"#,
        );
        match error {
            ApiError::Rejected { status, detail } => {
                assert_eq!(status, 422);
                assert_eq!(detail, r#"[{"loc":["body","unidade"],"msg":"field required"}]"#);
            }
            other => panic!("expected a rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_without_detail_is_plain_status() {
        assert_eq!(
            classify_failure(502, "<html>Bad Gateway</html>"),
            ApiError::Status(502)
        );
        assert_eq!(classify_failure(500, ""), ApiError::Status(500));
        assert_eq!(
            classify_failure(500, r#"{"message": "boom"}"#),
            ApiError::Status(500)
        );
    }
}
