//! View state shared by the current, hourly and daily views.
//!
//! All mutation goes through [`ViewController`]: initial resolution,
//! search and the unit toggle. The state lock is never held across an
//! await, so overlapping searches are not ordered: whichever response
//! arrives last is what the views show.

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::{
    ForecastResult, WeatherError,
    geolocation::Geolocator,
    model::Unit,
    provider::{DEFAULT_DAYS, ForecastProvider},
    views::{CurrentView, DayView, HourView},
};

/// Unit preference, last successful forecast and last error.
///
/// `forecast` and `error` may both be set: a failed search keeps the
/// previous forecast on screen next to the new message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub unit: Unit,
    pub forecast: Option<ForecastResult>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub default_city: String,
    pub days: u8,
    pub unit: Unit,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            default_city: crate::config::DEFAULT_CITY.to_string(),
            days: DEFAULT_DAYS,
            unit: Unit::default(),
        }
    }
}

impl From<&crate::Config> for ControllerSettings {
    fn from(config: &crate::Config) -> Self {
        Self {
            default_city: config.default_city.clone(),
            days: config.days,
            unit: config.unit,
        }
    }
}

#[derive(Debug)]
pub struct ViewController {
    provider: Box<dyn ForecastProvider>,
    default_city: String,
    days: u8,
    state: Mutex<ViewState>,
}

impl ViewController {
    pub fn new(provider: Box<dyn ForecastProvider>, settings: ControllerSettings) -> Self {
        Self {
            provider,
            default_city: settings.default_city,
            days: settings.days,
            state: Mutex::new(ViewState { unit: settings.unit, ..ViewState::default() }),
        }
    }

    /// Fetch the first forecast: the device position if one can be
    /// obtained, otherwise the default city. No retries.
    pub async fn resolve_initial(&self, geo: &dyn Geolocator) -> Result<(), WeatherError> {
        let query = if geo.is_available() {
            match geo.current_position().await {
                Ok(coords) => {
                    info!(%coords, "using device position");
                    coords.to_query()
                }
                Err(reason) => {
                    info!(%reason, city = %self.default_city, "position denied, using default city");
                    self.default_city.clone()
                }
            }
        } else {
            info!(city = %self.default_city, "no geolocation, using default city");
            self.default_city.clone()
        };

        self.update(&query).await
    }

    /// Fetch and publish the forecast for a user-entered query.
    ///
    /// On failure the error message is recorded for the views *and* the
    /// error is returned, so the caller can reset its own transient UI.
    pub async fn search(&self, query: &str) -> Result<(), WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return self.record_failure(WeatherError::EmptyQuery);
        }
        self.update(query).await
    }

    /// Flip between Celsius and Fahrenheit. Returns the new unit.
    pub fn toggle_unit(&self) -> Unit {
        let mut state = self.state.lock();
        state.unit = state.unit.toggle();
        state.unit
    }

    async fn update(&self, query: &str) -> Result<(), WeatherError> {
        match self.provider.fetch(query, self.days).await {
            Ok(forecast) => {
                let mut state = self.state.lock();
                state.forecast = Some(forecast);
                state.error = None;
                Ok(())
            }
            Err(err) => self.record_failure(err),
        }
    }

    fn record_failure(&self, err: WeatherError) -> Result<(), WeatherError> {
        warn!(error = %err, "forecast update failed");
        self.state.lock().error = Some(err.to_string());
        Err(err)
    }

    pub fn unit(&self) -> Unit {
        self.state.lock().unit
    }

    /// Copy of the whole state.
    pub fn state(&self) -> ViewState {
        self.state.lock().clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// Nothing fetched and nothing failed yet.
    pub fn is_loading(&self) -> bool {
        let state = self.state.lock();
        state.forecast.is_none() && state.error.is_none()
    }

    pub fn current(&self) -> Option<CurrentView> {
        let state = self.state.lock();
        state
            .forecast
            .as_ref()
            .map(|f| CurrentView::from_forecast(f, state.unit))
    }

    /// Hours of the first forecast day.
    pub fn hourly(&self) -> Vec<HourView> {
        let state = self.state.lock();
        state
            .forecast
            .as_ref()
            .map(|f| {
                f.first_day_hours()
                    .iter()
                    .map(|h| HourView::from_entry(h, state.unit))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn daily(&self) -> Vec<DayView> {
        let state = self.state.lock();
        state
            .forecast
            .as_ref()
            .map(|f| f.days().iter().map(|d| DayView::from_day(d, state.unit)).collect())
            .unwrap_or_default()
    }
}
