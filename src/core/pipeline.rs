use crate::core::{BirthDetailsRequest, HoroscopeSource};
use crate::utils::error::Result;
use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};

/// How the sub-endpoint requests are issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    #[default]
    Sequential,
    Concurrent,
}

/// How the raw responses are joined into the interpretation prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CombineMode {
    /// Plain concatenation, no separator. The result is not valid JSON.
    #[default]
    Raw,
    /// One JSON object keyed by endpoint name.
    Labeled,
}

pub struct HoroscopePipeline<S: HoroscopeSource> {
    source: S,
    endpoints: Vec<String>,
    fetch_mode: FetchMode,
    combine_mode: CombineMode,
}

impl<S: HoroscopeSource> HoroscopePipeline<S> {
    pub fn new(source: S, endpoints: Vec<String>) -> Self {
        Self {
            source,
            endpoints,
            fetch_mode: FetchMode::default(),
            combine_mode: CombineMode::default(),
        }
    }

    pub fn with_fetch_mode(mut self, fetch_mode: FetchMode) -> Self {
        self.fetch_mode = fetch_mode;
        self
    }

    pub fn with_combine_mode(mut self, combine_mode: CombineMode) -> Self {
        self.combine_mode = combine_mode;
        self
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Fetches every endpoint and returns the combined text. The first failed
    /// fetch aborts the whole gather.
    pub async fn gather(&self, details: &BirthDetailsRequest) -> Result<String> {
        let responses = match self.fetch_mode {
            FetchMode::Sequential => {
                let mut responses = Vec::with_capacity(self.endpoints.len());
                for endpoint in &self.endpoints {
                    tracing::debug!("🔭 Fetching {}", endpoint);
                    let body = self.source.fetch(details, endpoint).await?;
                    tracing::debug!("🔭 {} returned {} bytes", endpoint, body.len());
                    responses.push(body);
                }
                responses
            }
            FetchMode::Concurrent => {
                tracing::debug!("🔭 Fetching {} endpoints concurrently", self.endpoints.len());
                // try_join_all keeps input order regardless of completion order
                try_join_all(
                    self.endpoints
                        .iter()
                        .map(|endpoint| self.source.fetch(details, endpoint)),
                )
                .await?
            }
        };

        combine_responses(self.combine_mode, &self.endpoints, responses)
    }
}

pub fn combine_responses(
    mode: CombineMode,
    endpoints: &[String],
    responses: Vec<String>,
) -> Result<String> {
    match mode {
        CombineMode::Raw => Ok(responses.concat()),
        CombineMode::Labeled => {
            let mut combined = serde_json::Map::new();
            for (endpoint, body) in endpoints.iter().zip(responses) {
                let value = match serde_json::from_str::<serde_json::Value>(&body) {
                    Ok(value) => value,
                    Err(_) => {
                        tracing::warn!("{} response is not JSON, embedding it as a string", endpoint);
                        serde_json::Value::String(body)
                    }
                };
                combined.insert(endpoint.clone(), value);
            }
            Ok(serde_json::to_string(&serde_json::Value::Object(combined))?)
        }
    }
}
