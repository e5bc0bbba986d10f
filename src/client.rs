//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! HTTP client for the Service Registry
//!
//! This module provides a typed client for interacting with a running
//! service registry instance.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{RegistryError, RegistryResult};
use crate::service::{ServiceRecord, ServiceRegistration, ServiceStatus};

/// Client for the service registry HTTP API
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// Underlying HTTP client
    http: reqwest::Client,

    /// Registry endpoint, e.g. `http://localhost:8080`
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl RegistryClient {
    /// Create a new client for the given registry endpoint
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Register a service instance
    pub async fn register(
        &self,
        registration: &ServiceRegistration,
    ) -> RegistryResult<ServiceRecord> {
        let response = self
            .http
            .post(format!("{}/v1/services", self.base_url))
            .json(registration)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Look up a service record by id
    pub async fn find(&self, id: &str) -> RegistryResult<ServiceRecord> {
        let response = self
            .http
            .get(format!("{}/v1/services/{}", self.base_url, id))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Look up all services for an application
    pub async fn find_by_application(
        &self,
        application: &str,
        only_healthy: bool,
    ) -> RegistryResult<Vec<ServiceRecord>> {
        let response = self
            .http
            .get(format!("{}/v1/services", self.base_url))
            .query(&[
                ("application", application),
                ("only-healthy", &only_healthy.to_string()),
            ])
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Record the status of a registered service
    pub async fn set_status(&self, id: &str, status: ServiceStatus) -> RegistryResult<()> {
        let response = self
            .http
            .put(format!(
                "{}/v1/services/{}/status/{}",
                self.base_url, id, status
            ))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(())
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> RegistryResult<T> {
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| RegistryError::serialization(&format!("failed to decode response: {}", e)))
    }

    async fn error_from_response(response: reqwest::Response) -> RegistryError {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status.to_string(),
        };

        match status.as_u16() {
            400 => RegistryError::validation(&message),
            404 => RegistryError::ServiceNotFound(message),
            408 => RegistryError::timeout(&message),
            428 => RegistryError::precondition_failed(&message),
            503 => RegistryError::service_unavailable(&message),
            502 => RegistryError::network(&message),
            _ => RegistryError::internal(&message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trimming() {
        let client = RegistryClient::new("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
