//! Minimal GraphQL-over-HTTP client.

use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::GraphQlError;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Serialize)]
struct GraphQlRequest<'a, V> {
    query: &'a str,
    variables: V,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

/// Standard `{ data, errors }` response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

impl<T> GraphQlResponse<T> {
    /// Any reported error wins over partial data.
    pub(crate) fn into_result(self) -> Result<T, GraphQlError> {
        if !self.errors.is_empty() {
            let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(GraphQlError::Response(messages.join("; ")));
        }
        self.data.ok_or(GraphQlError::MissingData)
    }
}

/// GraphQL client for the platform backend.
#[derive(Clone)]
pub struct GraphQlClient {
    client: Client,
    endpoint: String,
}

impl GraphQlClient {
    /// Create a client for `endpoint` with the default request timeout.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, GraphQlError> {
        Self::with_options(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS), None)
    }

    /// Create a client with an explicit timeout and optional bearer token.
    pub fn with_options(
        endpoint: impl Into<String>,
        timeout: Duration,
        token: Option<&str>,
    ) -> Result<Self, GraphQlError> {
        let endpoint = endpoint.into();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(GraphQlError::Config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                endpoint
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| GraphQlError::Config(format!("invalid token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST a query with its variables and decode the `data` field as `T`.
    pub async fn execute<V, T>(&self, query: &str, variables: V) -> Result<T, GraphQlError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let payload = GraphQlRequest { query, variables };
        let response = self.client.post(&self.endpoint).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphQlError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let envelope: GraphQlResponse<T> = serde_json::from_slice(&bytes)?;
        debug!("GraphQL request to {} completed", self.endpoint);
        envelope.into_result()
    }
}
