//! Tables API client implementation.
//!
//! This module provides the client for the tables REST API. It handles
//! request/response processing and maps every failure onto [`ApiError`].
//! Requests are never retried.

use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::error::{ApiError, Result};
use super::types::{CreateTableRequest, CreateTagRequest, Envelope, Table, Tag};
use crate::config::ApiConfig;

/// The tables API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TablesClient {
    /// The HTTP client.
    client: Client,
    /// The API origin, without trailing slash.
    base_url: String,
}

impl TablesClient {
    /// Create a new client from resolved API settings.
    ///
    /// Does not contact the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url);
        reqwest::Url::parse(&base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Network)?;

        debug!(base_url = %base_url, "Created tables client");

        Ok(Self { client, base_url })
    }

    /// Fetch every table.
    ///
    /// Issues exactly one `GET {base_url}/tables` and extracts the `data`
    /// field of the response envelope.
    #[instrument(skip(self))]
    pub async fn fetch_tables(&self) -> Result<Vec<Table>> {
        let url = format!("{}/tables", self.base_url);
        let envelope: Envelope<Vec<Table>> = self.get(&url).await?;
        info!(count = envelope.data.len(), "Fetched tables");
        Ok(envelope.data)
    }

    /// Create a new, empty table.
    ///
    /// Calls `POST {base_url}/tables`.
    #[instrument(skip(self))]
    pub async fn create_table(&self, title: &str) -> Result<Table> {
        let url = format!("{}/tables", self.base_url);
        let envelope: Envelope<Table> = self.post(&url, &CreateTableRequest { title }).await?;
        info!(table_id = envelope.data.id, "Created table");
        Ok(envelope.data)
    }

    /// Create a new tag.
    ///
    /// Calls `POST {base_url}/tags`.
    #[instrument(skip(self, description))]
    pub async fn create_tag(&self, title: &str, description: &str) -> Result<Tag> {
        let url = format!("{}/tags", self.base_url);
        let body = CreateTagRequest { title, description };
        let envelope: Envelope<Tag> = self.post(&url, &body).await?;
        info!(tag_id = envelope.data.id, "Created tag");
        Ok(envelope.data)
    }

    /// Perform a GET request.
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Perform a POST request with a JSON body.
    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<T> {
        debug!(url = %url, "POST");
        let response = self
            .client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            let body = response.bytes().await?;
            serde_json::from_slice::<T>(&body).map_err(|e| {
                warn!(url = %url, error = %e, "Failed to decode response");
                ApiError::Decode(e.to_string())
            })
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);

            Err(Self::error_from_response(status, &url, &error_body))
        }
    }

    /// Create an appropriate error from an HTTP response.
    ///
    /// The server wraps failures as `{ "error": "..." }`; that message is
    /// preferred over the URL when present.
    fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| json.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| url.to_string());

        warn!(status = status.as_u16(), message = %message, "Request failed");
        ApiError::from_status(status, &message)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::CellValue;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> TablesClient {
        TablesClient::new(&ApiConfig::new(server.uri())).unwrap()
    }

    #[test]
    fn test_normalize_base_url_removes_trailing_slash() {
        assert_eq!(
            normalize_base_url("http://localhost:8080/api/"),
            "http://localhost:8080/api"
        );
    }

    #[test]
    fn test_normalize_base_url_handles_multiple_slashes() {
        assert_eq!(normalize_base_url("http://localhost:8080///"), "http://localhost:8080");
    }

    #[test]
    fn test_error_from_response_uses_error_envelope() {
        let err = TablesClient::error_from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "http://x/tables",
            r#"{"error": "something went wrong"}"#,
        );
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "something went wrong");
            }
            _ => panic!("Expected Http error"),
        }
    }

    #[test]
    fn test_error_from_response_falls_back_to_url() {
        let err = TablesClient::error_from_response(
            StatusCode::BAD_GATEWAY,
            "http://x/tables",
            "<html>bad gateway</html>",
        );
        match err {
            ApiError::Http { message, .. } => assert_eq!(message, "http://x/tables"),
            _ => panic!("Expected Http error"),
        }
    }

    #[test]
    fn test_new_rejects_unparseable_url() {
        let err = TablesClient::new(&ApiConfig::new("http://")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_fetch_tables_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tables"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "id": 1,
                    "title": "T",
                    "items": [
                        {"id": 1, "title": "b", "tags": null},
                        {"id": 2, "title": "a", "tags": [{"id": 9, "title": "x", "description": "y"}]}
                    ]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tables = client_for(&server).await.fetch_tables().await.unwrap();

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].title, "T");
        assert_eq!(tables[0].items.len(), 2);
        assert_eq!(
            tables[0].items[1].get("title"),
            Some(&CellValue::Text("a".to_string()))
        );
        assert_eq!(tables[0].items[1].tags().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_tables_accepts_any_2xx() {
        // The reference server answers GET /tables with 201.
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tables"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let tables = client_for(&server).await.fetch_tables().await.unwrap();
        assert!(tables.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_tables_http_500() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tables"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "something went wrong"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch_tables().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("something went wrong"));
    }

    #[tokio::test]
    async fn test_fetch_tables_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tables"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch_tables().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_tables_missing_data_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tables"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tables": []})))
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch_tables().await.unwrap_err();
        match err {
            ApiError::Decode(msg) => assert!(msg.contains("data")),
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_tables_network_failure() {
        // Bind then drop a server so the port refuses connections.
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = TablesClient::new(&ApiConfig::new(uri)).unwrap();
        let err = client.fetch_tables().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_fetch_tables_trailing_slash_base_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tables"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = TablesClient::new(&ApiConfig::new(format!("{}/", server.uri()))).unwrap();
        assert!(client.fetch_tables().await.is_ok());
    }

    #[tokio::test]
    async fn test_create_table() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tables"))
            .and(body_json(json!({"title": "Inventory"})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"data": {"id": 5, "title": "Inventory", "items": null}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let table = client_for(&server).await.create_table("Inventory").await.unwrap();
        assert_eq!(table.id, 5);
        assert!(table.items.is_empty());
    }

    #[tokio::test]
    async fn test_create_tag_bad_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tags"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "bad request"})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .create_tag("urgent", "")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_create_tag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tags"))
            .and(body_json(json!({"title": "urgent", "description": "now"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(
                json!({"data": {"id": 3, "title": "urgent", "description": "now"}}),
            ))
            .mount(&server)
            .await;

        let tag = client_for(&server)
            .await
            .create_tag("urgent", "now")
            .await
            .unwrap();
        assert_eq!(tag.id, 3);
        assert_eq!(tag.description, "now");
    }
}
