//! HTTP client for calls between LearnSmart services
//!
//! A thin wrapper over `reqwest` that joins paths onto a collaborator's base
//! URL, applies the configured timeout and maps failures onto
//! [`ClientError`]. No retries are performed.

use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::config::Service;

const USER_AGENT: &str = concat!("LearnSmart/", env!("CARGO_PKG_VERSION"));

/// Collaborator call errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{service}: network error: {message}")]
    Network { service: &'static str, message: String },

    #[error("{service}: not found: {path}")]
    NotFound { service: &'static str, path: String },

    #[error("{service}: API error {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service}: parse error: {message}")]
    Parse { service: &'static str, message: String },
}

/// JSON-over-HTTP client bound to one collaborator
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: String,
    service: &'static str,
}

impl ServiceClient {
    pub fn new(service: Service, base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network {
                service: service.name(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            service: service.name(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with query parameters and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(service = self.service, url = %url, "Calling collaborator");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ClientError::Network {
                service: self.service,
                message: e.to_string(),
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                service: self.service,
                path: path.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                service: self.service,
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| ClientError::Parse {
            service: self.service,
            message: e.to_string(),
        })
    }
}
