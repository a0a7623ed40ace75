//! HTTP transport for the inventory API.
//!
//! [`MedicineApi`] is the seam between the page session and the network.
//! [`HttpApi`] implements it with a blocking `reqwest` client; tests use an
//! in-memory implementation instead.

use std::time::Duration;

use medicines_core::payload::{require_json_content_type, FetchResult};
use medicines_core::{parse_list_payload, AveragePriceResponse, FetchError, MutationResponse};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("medicines-client/", env!("CARGO_PKG_VERSION"));

/// Operations offered by the inventory API.
pub trait MedicineApi {
    /// `GET /medicines`: raw entries, unvalidated.
    fn list_medicines(&self) -> FetchResult<Vec<Value>>;

    /// `POST /create`: the server's success message, if any.
    fn create_medicine(&self, name: &str, price: f64) -> FetchResult<Option<String>>;

    /// `POST /update`, addressing the record by its current name.
    fn update_medicine(
        &self,
        original_name: &str,
        name: &str,
        price: f64,
    ) -> FetchResult<Option<String>>;

    /// `DELETE /delete`
    fn delete_medicine(&self, name: &str) -> FetchResult<Option<String>>;

    /// `GET /average-price`
    fn average_price(&self) -> FetchResult<AveragePriceResponse>;
}

/// Inventory API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    config: ClientConfig,
}

impl HttpApi {
    /// Build a client for the configured base URL.
    ///
    /// Requests have no timeout; a hung request only blocks the action that
    /// started it.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self { client, config })
    }

    /// Send a request and return status, content type and body text.
    fn execute(&self, request: RequestBuilder) -> FetchResult<RawResponse> {
        let response = request.send().map_err(transport_error)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().map_err(transport_error)?;

        debug!(status, content_type = ?content_type, "response received");
        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }

    fn mutation(&self, request: RequestBuilder) -> FetchResult<Option<String>> {
        let raw = self.execute(request)?;
        mutation_outcome(&raw)
    }
}

impl MedicineApi for HttpApi {
    fn list_medicines(&self) -> FetchResult<Vec<Value>> {
        let url = self.config.endpoint("/medicines");
        debug!(%url, "fetching medicines");
        let raw = self.execute(self.client.get(&url))?;
        list_outcome(&raw)
    }

    fn create_medicine(&self, name: &str, price: f64) -> FetchResult<Option<String>> {
        let url = self.config.endpoint("/create");
        debug!(%url, name, price, "creating medicine");
        let price = price.to_string();
        self.mutation(self.client.post(&url).form(&[("name", name), ("price", price.as_str())]))
    }

    fn update_medicine(
        &self,
        original_name: &str,
        name: &str,
        price: f64,
    ) -> FetchResult<Option<String>> {
        let url = self.config.endpoint("/update");
        debug!(%url, original_name, name, price, "updating medicine");
        let price = price.to_string();
        self.mutation(self.client.post(&url).form(&[
            ("original_name", original_name),
            ("name", name),
            ("price", price.as_str()),
        ]))
    }

    fn delete_medicine(&self, name: &str) -> FetchResult<Option<String>> {
        let url = self.config.endpoint("/delete");
        debug!(%url, name, "deleting medicine");
        self.mutation(self.client.delete(&url).form(&[("name", name)]))
    }

    fn average_price(&self) -> FetchResult<AveragePriceResponse> {
        let url = self.config.endpoint("/average-price");
        debug!(%url, "fetching average price");
        let raw = self.execute(self.client.get(&url))?;
        average_outcome(&raw)
    }
}

/// Status, content type and body of one HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn transport_error(error: reqwest::Error) -> FetchError {
    if error.is_decode() {
        FetchError::NotJson
    } else {
        FetchError::Network(error.to_string())
    }
}

/// Interpret a `GET /medicines` response.
///
/// Status is checked first, then content type, then JSON structure.
pub fn list_outcome(raw: &RawResponse) -> FetchResult<Vec<Value>> {
    if !raw.is_success() {
        return Err(FetchError::HttpStatus(raw.status));
    }
    require_json_content_type(raw.content_type.as_deref())?;
    let body: Value = serde_json::from_str(&raw.body).map_err(|_| FetchError::NotJson)?;
    parse_list_payload(&body)
}

/// Interpret a create/update/delete response.
///
/// The body is read even on error statuses so a server `{error}` message
/// reaches the user.
pub fn mutation_outcome(raw: &RawResponse) -> FetchResult<Option<String>> {
    let parsed = if raw.body.trim().is_empty() {
        Ok(MutationResponse::default())
    } else {
        serde_json::from_str::<MutationResponse>(&raw.body)
    };

    match parsed {
        Ok(response) if response.error.is_some() || raw.is_success() => response.into_result(),
        Ok(_) => Err(FetchError::HttpStatus(raw.status)),
        Err(_) if !raw.is_success() => Err(FetchError::HttpStatus(raw.status)),
        Err(_) => Err(FetchError::NotJson),
    }
}

/// Interpret a `GET /average-price` response.
pub fn average_outcome(raw: &RawResponse) -> FetchResult<AveragePriceResponse> {
    if !raw.is_success() {
        return Err(FetchError::HttpStatus(raw.status));
    }
    serde_json::from_str(&raw.body).map_err(|_| FetchError::NotJson)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            content_type: Some("application/json".into()),
            body: body.into(),
        }
    }

    #[test]
    fn test_list_ok() {
        let raw = json_response(200, r#"{"medicines":[{"name":"Aspirin","price":5}]}"#);
        assert_eq!(list_outcome(&raw).unwrap().len(), 1);
    }

    #[test]
    fn test_list_http_error() {
        let raw = json_response(503, "{}");
        assert_eq!(list_outcome(&raw), Err(FetchError::HttpStatus(503)));
    }

    #[test]
    fn test_list_wrong_content_type() {
        let raw = RawResponse {
            status: 200,
            content_type: Some("text/html".into()),
            body: "<html></html>".into(),
        };
        assert_eq!(list_outcome(&raw), Err(FetchError::NotJson));
    }

    #[test]
    fn test_list_malformed_json() {
        let raw = json_response(200, "{not json");
        assert_eq!(list_outcome(&raw), Err(FetchError::NotJson));
    }

    #[test]
    fn test_list_non_array() {
        let raw = json_response(200, r#"{"medicines":{"name":"Aspirin"}}"#);
        assert!(matches!(
            list_outcome(&raw),
            Err(FetchError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_mutation_success_message() {
        let raw = json_response(200, r#"{"message":"Medicine created successfully"}"#);
        assert_eq!(
            mutation_outcome(&raw),
            Ok(Some("Medicine created successfully".into()))
        );
    }

    #[test]
    fn test_mutation_empty_body() {
        assert_eq!(mutation_outcome(&json_response(200, "")), Ok(None));
        assert_eq!(mutation_outcome(&json_response(200, "{}")), Ok(None));
    }

    #[test]
    fn test_mutation_business_error_on_any_status() {
        for status in [200, 400, 404] {
            let raw = json_response(status, r#"{"error":"Medicine not found"}"#);
            assert_eq!(
                mutation_outcome(&raw),
                Err(FetchError::Server("Medicine not found".into()))
            );
        }
    }

    #[test]
    fn test_mutation_error_status_without_message() {
        assert_eq!(
            mutation_outcome(&json_response(500, "Internal Server Error")),
            Err(FetchError::HttpStatus(500))
        );
        assert_eq!(
            mutation_outcome(&json_response(500, "{}")),
            Err(FetchError::HttpStatus(500))
        );
    }

    #[test]
    fn test_mutation_garbage_body() {
        assert_eq!(
            mutation_outcome(&json_response(200, "<html>")),
            Err(FetchError::NotJson)
        );
    }

    #[test]
    fn test_average_outcome() {
        let avg = average_outcome(&json_response(200, r#"{"average_price": 7.5}"#)).unwrap();
        assert_eq!(avg.display_text(), "Price Average: $7.5");

        assert_eq!(
            average_outcome(&json_response(404, "")),
            Err(FetchError::HttpStatus(404))
        );
    }
}
