use crate::domain::model::BirthDetailsRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Fetches one facet of a horoscope as raw response text.
#[async_trait]
pub trait HoroscopeSource: Send + Sync {
    async fn fetch(&self, details: &BirthDetailsRequest, endpoint: &str) -> Result<String>;
}

/// Turns combined chart data into prose. Infallible: failures come back as
/// displayable text.
#[async_trait]
pub trait Interpreter: Send + Sync {
    async fn interpret(&self, prompt_text: &str) -> String;
}
