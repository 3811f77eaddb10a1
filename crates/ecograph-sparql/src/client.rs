//! SPARQL store connection and the executor seam.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

use ecograph_core::{EcoGraphError, Row, StoreConfig};

use crate::queries::parse_results;

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Malformed query results: {0}")]
    Results(String),
}

impl From<StoreError> for EcoGraphError {
    fn from(e: StoreError) -> Self {
        EcoGraphError::ExecutionFailure(e.to_string())
    }
}

/// Anything that can run SPARQL text against a store.
///
/// Writes are atomic-or-failed from the caller's point of view.
#[async_trait]
pub trait SparqlExecutor: Send + Sync {
    /// Run an update statement (INSERT DATA).
    async fn execute_update(&self, update: &str) -> Result<(), StoreError>;

    /// Run a SELECT query and collect all rows.
    async fn execute_query(&self, query: &str) -> Result<Vec<Row>, StoreError>;
}

/// HTTP client for a SPARQL 1.1 protocol endpoint pair.
///
/// Clone is cheap (inner Arc).
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: Client,
    query_endpoint: String,
    update_endpoint: String,
}

impl StoreClient {
    /// Build a client for the configured endpoints. No request is sent.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let update_endpoint = config.resolved_update_endpoint();
        tracing::info!(
            query_endpoint = %config.query_endpoint,
            update_endpoint = %update_endpoint,
            "Store client ready"
        );

        Ok(Self {
            http,
            query_endpoint: config.query_endpoint.clone(),
            update_endpoint,
        })
    }

    pub fn query_endpoint(&self) -> &str {
        &self.query_endpoint
    }

    pub fn update_endpoint(&self) -> &str {
        &self.update_endpoint
    }

    async fn checked(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl SparqlExecutor for StoreClient {
    async fn execute_update(&self, update: &str) -> Result<(), StoreError> {
        let response = self
            .http
            .post(&self.update_endpoint)
            .header(CONTENT_TYPE, "application/sparql-update")
            .body(update.to_owned())
            .send()
            .await?;
        Self::checked(response).await?;
        Ok(())
    }

    async fn execute_query(&self, query: &str) -> Result<Vec<Row>, StoreError> {
        let response = self
            .http
            .post(&self.query_endpoint)
            .header(CONTENT_TYPE, "application/sparql-query")
            .header(ACCEPT, "application/sparql-results+json")
            .body(query.to_owned())
            .send()
            .await?;
        let body = Self::checked(response).await?.text().await?;
        parse_results(&body)
    }
}
