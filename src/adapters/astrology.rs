use crate::config::AstrologyConfig;
use crate::core::{BirthDetailsRequest, HoroscopeSource};
use crate::utils::error::{HoroscopeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Client for the astrologyapi.com JSON endpoints.
///
/// Credentials are attached to each request as HTTP Basic auth; the shared
/// `Client` carries no default headers.
#[derive(Debug, Clone)]
pub struct AstrologyApiService {
    client: Client,
    base_url: String,
    user_id: String,
    api_key: String,
    timeout: Option<Duration>,
}

impl AstrologyApiService {
    pub fn new(config: &AstrologyConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &AstrologyConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_id: config.user_id.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout_seconds.map(Duration::from_secs),
        }
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl HoroscopeSource for AstrologyApiService {
    async fn fetch(&self, details: &BirthDetailsRequest, endpoint: &str) -> Result<String> {
        let url = self.endpoint_url(endpoint);

        let mut request = self
            .client
            .post(&url)
            .basic_auth(&self.user_id, Some(&self.api_key))
            .json(details);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("📡 POST {}", url);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 {} responded with {}", endpoint, status);

        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(%status, %body, "Astrology API rejected {}", endpoint);
            return Err(HoroscopeError::ApiRejected {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
