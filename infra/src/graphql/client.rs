//! GraphQL HTTP client
//!
//! Sends `{ operationName, query, variables }` as a JSON POST and unwraps
//! the `{ data, errors }` envelope. No retries; a timeout applies only when
//! one is configured.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use cw_shared::config::BackendConfig;

use crate::InfrastructureError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlRequest<'a, V> {
    operation_name: &'a str,
    query: &'a str,
    variables: V,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlErrorItem>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorItem {
    message: String,
}

/// Thin client for one GraphQL endpoint
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(config: &BackendConfig) -> Result<Self, InfrastructureError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: config.graphql_url.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one operation and decode its `data`
    pub async fn execute<V, T>(
        &self,
        operation_name: &str,
        query: &str,
        variables: V,
    ) -> Result<T, InfrastructureError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        debug!(operation = operation_name, "Sending GraphQL request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&GraphqlRequest {
                operation_name,
                query,
                variables,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(operation = operation_name, status = status.as_u16(), "GraphQL request failed");
            return Err(InfrastructureError::Status(status.as_u16()));
        }

        let envelope: GraphqlResponse<T> = response
            .json()
            .await
            .map_err(|e| InfrastructureError::Malformed(e.to_string()))?;

        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(InfrastructureError::Graphql(messages.join("; ")));
        }

        envelope.data.ok_or_else(|| {
            InfrastructureError::Malformed(format!("{} returned no data", operation_name))
        })
    }
}
