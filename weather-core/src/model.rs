use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Members of a payload object that have no typed field of their own.
pub type Extra = Map<String, Value>;

/// Forecast payload as returned by `forecast.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub location: Location,
    pub current: Current,
    pub forecast: Forecast,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ForecastResult {
    /// All forecast days, in the order the service returned them.
    pub fn days(&self) -> &[ForecastDay] {
        &self.forecast.forecastday
    }

    /// Hours of the first forecast day. Empty when the payload has no days.
    pub fn first_day_hours(&self) -> &[HourEntry] {
        self.days().first().map(|d| d.hour.as_slice()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Current {
    pub temp_c: f64,
    pub temp_f: f64,
    pub condition: Condition,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    /// Icon reference, usually a protocol-relative URL.
    pub icon: String,
    pub code: i64,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// `YYYY-MM-DD` in the location's local time.
    pub date: String,
    pub day: DaySummary,
    pub hour: Vec<HourEntry>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    pub condition: Condition,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourEntry {
    /// `YYYY-MM-DD HH:MM` in the location's local time.
    pub time: String,
    pub temp_c: f64,
    pub temp_f: f64,
    pub condition: Condition,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Display unit for temperatures. Both values are always fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "c", alias = "celsius")]
    Celsius,
    #[serde(rename = "f", alias = "fahrenheit")]
    Fahrenheit,
}

impl Unit {
    pub fn toggle(self) -> Self {
        match self {
            Unit::Celsius => Unit::Fahrenheit,
            Unit::Fahrenheit => Unit::Celsius,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Celsius => "C",
            Unit::Fahrenheit => "F",
        }
    }

    /// Pick the pre-supplied value matching this unit.
    pub fn pick(self, celsius: f64, fahrenheit: f64) -> f64 {
        match self {
            Unit::Celsius => celsius,
            Unit::Fahrenheit => fahrenheit,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "°{}", self.symbol())
    }
}

impl FromStr for Unit {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "c" | "celsius" => Ok(Unit::Celsius),
            "f" | "fahrenheit" => Ok(Unit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown unit '{value}'. Supported units: c, f."
            )),
        }
    }
}

/// A resolved device position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// The `"<lat>,<lon>"` form accepted as a location query.
    pub fn to_query(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
