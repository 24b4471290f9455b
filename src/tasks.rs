//! Async task management for non-blocking API operations.
//!
//! Fetches run in background tasks while the UI keeps rendering. Results come
//! back to the main event loop over a tokio channel:
//!
//! 1. The app records a pending fetch (see `App::take_pending_fetch`)
//! 2. The main loop spawns it via `TaskSpawner`, tagged with a request id
//! 3. The task sends an `ApiMessage` when it completes
//! 4. The main loop polls the channel with `try_recv()` and hands the message
//!    to the app, which drops results for ids it is no longer waiting on
//!
//! If the receiving side is gone (the app shut down first) the send fails and
//! the result is discarded.

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{ApiError, Table, TablesClient};

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// Result of `GET /tables`.
    TablesFetched {
        /// Id of the request this answers.
        request_id: u64,
        result: Result<Vec<Table>, ApiError>,
    },
}

/// Spawns background tasks for async operations.
#[derive(Debug, Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a task that fetches all tables once.
    pub fn spawn_fetch_tables(&self, client: &TablesClient, request_id: u64) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = client.fetch_tables().await;
            if tx
                .send(ApiMessage::TablesFetched { request_id, result })
                .is_err()
            {
                debug!(request_id, "Receiver gone, discarding fetch result");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_spawn_fetch_tables_sends_result_with_request_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tables"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": 1, "title": "T", "items": []}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TablesClient::new(&ApiConfig::new(server.uri())).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        TaskSpawner::new(tx).spawn_fetch_tables(&client, 7);

        match rx.recv().await {
            Some(ApiMessage::TablesFetched { request_id, result }) => {
                assert_eq!(request_id, 7);
                assert_eq!(result.unwrap().len(), 1);
            }
            None => panic!("Expected a fetch result"),
        }
    }

    #[tokio::test]
    async fn test_spawn_fetch_tables_reports_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tables"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = TablesClient::new(&ApiConfig::new(server.uri())).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        TaskSpawner::new(tx).spawn_fetch_tables(&client, 1);

        match rx.recv().await {
            Some(ApiMessage::TablesFetched { result, .. }) => {
                assert_eq!(result.unwrap_err().status(), Some(500));
            }
            None => panic!("Expected a fetch result"),
        }
    }

    #[tokio::test]
    async fn test_dropped_receiver_does_not_panic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tables"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let client = TablesClient::new(&ApiConfig::new(server.uri())).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        let spawner = TaskSpawner::new(tx);
        spawner.spawn_fetch_tables(&client, 1);
        // Give the task time to finish; the send failure must be swallowed.
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    }
}
