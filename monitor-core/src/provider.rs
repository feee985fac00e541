use crate::{Config, Reading, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Errors from fetching current weather for one city.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request never produced a response (DNS, connect, timeout).
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The API answered 200 but the body did not decode.
    #[error("failed to parse API response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// Status recorded against a failed city in cycle reports.
    /// Transport and decode failures are reported as 500.
    pub fn status_code(&self) -> u16 {
        match self {
            FetchError::Api { status, .. } => *status,
            FetchError::Network(_) | FetchError::Parse(_) => 500,
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, city: &str) -> Result<Reading, FetchError>;
}

/// Construct the OpenWeatherMap provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    if config.api_key.trim().is_empty() {
        return Err(anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `weather-monitor configure` and enter your OpenWeatherMap API key."
        ));
    }

    Ok(Box::new(OpenWeatherProvider::new(config.api_key.clone())))
}
