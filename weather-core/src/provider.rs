use crate::{Config, ForecastResult, WeatherError, provider::weatherapi::WeatherApiProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

/// Number of forecast days requested when the caller doesn't say.
pub const DEFAULT_DAYS: u8 = 5;

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Fetch the forecast for a place name or a `"lat,lon"` pair.
    async fn fetch(&self, location: &str, days: u8) -> Result<ForecastResult, WeatherError>;
}

/// Construct the WeatherAPI.com provider from config.
///
/// A missing API key is not an error here; it surfaces as
/// [`WeatherError::Configuration`] on the first fetch.
pub fn provider_from_config(config: &Config) -> Box<dyn ForecastProvider> {
    Box::new(WeatherApiProvider::new(
        config.api_key().unwrap_or_default(),
        config.base_url.clone(),
    ))
}
