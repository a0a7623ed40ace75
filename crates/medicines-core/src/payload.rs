//! Wire payloads of the inventory API and the fetch error taxonomy.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Why a request to the inventory API failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server could not be reached
    #[error("Failed to fetch: {0}")]
    Network(String),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("Response is not valid JSON")]
    NotJson,

    /// JSON arrived but does not have the expected structure
    #[error("Invalid response format: {0}")]
    InvalidPayload(String),

    /// The server answered with an `{error}` body
    #[error("{0}")]
    Server(String),
}

pub type FetchResult<T> = Result<T, FetchError>;

impl FetchError {
    /// Message shown in the list container when fetching the list fails.
    pub fn list_message(&self) -> String {
        match self {
            FetchError::Network(_) => {
                "Cannot connect to server. Please check if the backend is running.".to_string()
            }
            FetchError::HttpStatus(_) => {
                format!("Server error ({}). Please try again later.", self)
            }
            FetchError::NotJson | FetchError::InvalidPayload(_) => {
                "Server returned invalid data format.".to_string()
            }
            FetchError::Server(_) => "Failed to load medicines.".to_string(),
        }
    }

    /// Whether the list container offers a retry action for this failure.
    pub fn offers_retry(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::HttpStatus(_))
    }

    /// Message for a failed mutation: the server's own text when it sent
    /// one, `fallback` otherwise.
    pub fn mutation_message(&self, fallback: &str) -> String {
        match self {
            FetchError::Server(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Check a response's content type before decoding it as JSON.
pub fn require_json_content_type(content_type: Option<&str>) -> FetchResult<()> {
    match content_type {
        Some(ct) if ct.contains("application/json") => Ok(()),
        _ => Err(FetchError::NotJson),
    }
}

/// Extract the raw entries from a `GET /medicines` body.
///
/// A missing or null `medicines` field reads as an empty list. Anything
/// other than an object body, or a non-array `medicines`, is invalid.
pub fn parse_list_payload(body: &Value) -> FetchResult<Vec<Value>> {
    let object = body
        .as_object()
        .ok_or_else(|| FetchError::InvalidPayload("response is not an object".into()))?;

    match object.get("medicines") {
        None | Some(Value::Null) => {
            warn!("no medicines array in response");
            Ok(Vec::new())
        }
        Some(Value::Array(entries)) => Ok(entries.clone()),
        Some(_) => Err(FetchError::InvalidPayload(
            "medicines data is not an array".into(),
        )),
    }
}

/// Body of `POST /create`, `POST /update` and `DELETE /delete`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MutationResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl MutationResponse {
    /// Success message, or the server's business error.
    pub fn into_result(self) -> FetchResult<Option<String>> {
        match self.error {
            Some(error) => Err(FetchError::Server(error)),
            None => Ok(self.message),
        }
    }
}

/// Body of `GET /average-price`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AveragePriceResponse {
    #[serde(default)]
    pub average_price: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Shown when the average price cannot be fetched at all.
pub const AVERAGE_PRICE_FAILED: &str = "Failed to calculate average price. Please try again.";

impl AveragePriceResponse {
    /// Text for the average-price display element.
    pub fn display_text(&self) -> String {
        if let Some(error) = &self.error {
            return format!("Error: {}", error);
        }
        let value = match &self.average_price {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "undefined".to_string(),
            // Whole numbers print without a fraction
            Some(Value::Number(n)) => n
                .as_f64()
                .map_or_else(|| n.to_string(), |f| f.to_string()),
            Some(other) => other.to_string(),
        };
        format!("Price Average: ${}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_messages() {
        let network = FetchError::Network("connection refused".into());
        assert_eq!(
            network.list_message(),
            "Cannot connect to server. Please check if the backend is running."
        );
        assert!(network.offers_retry());

        let status = FetchError::HttpStatus(500);
        assert_eq!(
            status.list_message(),
            "Server error (HTTP error! status: 500). Please try again later."
        );
        assert!(status.offers_retry());

        assert_eq!(
            FetchError::NotJson.list_message(),
            "Server returned invalid data format."
        );
        assert!(!FetchError::NotJson.offers_retry());
        assert!(!FetchError::InvalidPayload("x".into()).offers_retry());
    }

    #[test]
    fn test_content_type_check() {
        assert!(require_json_content_type(Some("application/json; charset=utf-8")).is_ok());
        assert_eq!(
            require_json_content_type(Some("text/html")),
            Err(FetchError::NotJson)
        );
        assert_eq!(require_json_content_type(None), Err(FetchError::NotJson));
    }

    #[test]
    fn test_parse_list_payload() {
        let entries = parse_list_payload(&json!({"medicines": [{"name": "A"}, 3]})).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_missing_medicines_is_empty() {
        assert!(parse_list_payload(&json!({})).unwrap().is_empty());
        assert!(parse_list_payload(&json!({"medicines": null}))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_invalid_list_payloads() {
        assert!(matches!(
            parse_list_payload(&json!({"medicines": "lots"})),
            Err(FetchError::InvalidPayload(_))
        ));
        assert!(matches!(
            parse_list_payload(&json!([1, 2])),
            Err(FetchError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_mutation_response() {
        let ok: MutationResponse = serde_json::from_value(json!({"message": "Created"})).unwrap();
        assert_eq!(ok.into_result(), Ok(Some("Created".to_string())));

        let empty: MutationResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.into_result(), Ok(None));

        let err: MutationResponse =
            serde_json::from_value(json!({"error": "Medicine exists"})).unwrap();
        assert_eq!(
            err.into_result(),
            Err(FetchError::Server("Medicine exists".into()))
        );
    }

    #[test]
    fn test_average_price_display() {
        let avg: AveragePriceResponse =
            serde_json::from_value(json!({"average_price": 12.5})).unwrap();
        assert_eq!(avg.display_text(), "Price Average: $12.5");

        let err: AveragePriceResponse =
            serde_json::from_value(json!({"error": "No medicines"})).unwrap();
        assert_eq!(err.display_text(), "Error: No medicines");
    }

    #[test]
    fn test_average_price_whole_number() {
        let avg: AveragePriceResponse =
            serde_json::from_value(json!({"average_price": 12.0})).unwrap();
        assert_eq!(avg.display_text(), "Price Average: $12");

        let avg: AveragePriceResponse =
            serde_json::from_value(json!({"average_price": 7})).unwrap();
        assert_eq!(avg.display_text(), "Price Average: $7");
    }

    #[test]
    fn test_mutation_message_fallback() {
        assert_eq!(
            FetchError::Server("Duplicate".into()).mutation_message("Failed"),
            "Duplicate"
        );
        assert_eq!(FetchError::NotJson.mutation_message("Failed"), "Failed");
    }
}
