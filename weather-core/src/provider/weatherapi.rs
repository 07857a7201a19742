use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{ForecastResult, WeatherError};

use super::ForecastProvider;

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast.json", self.base_url)
    }
}

#[async_trait]
impl ForecastProvider for WeatherApiProvider {
    async fn fetch(&self, location: &str, days: u8) -> Result<ForecastResult, WeatherError> {
        if self.api_key.is_empty() {
            return Err(WeatherError::Configuration);
        }

        debug!(location, days, "requesting forecast");

        let res = self
            .http
            .get(self.forecast_url())
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", location),
                ("days", &days.to_string()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                reason = status.canonical_reason().unwrap_or(""),
                location,
                "forecast request rejected"
            );
            return Err(WeatherError::NotFound {
                query: location.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(res.json::<ForecastResult>().await?)
    }
}
