//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The forecast client for WeatherAPI.com
//! - Device position capability
//! - The view state shared by current, hourly and daily views
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod controller;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod provider;
pub mod views;

pub use config::Config;
pub use controller::{ControllerSettings, ViewController, ViewState};
pub use error::WeatherError;
pub use geolocation::{DenialReason, FixedPosition, Geolocator, NoGeolocation};
pub use model::{Coordinates, ForecastResult, Unit};
pub use provider::{ForecastProvider, weatherapi::WeatherApiProvider};
pub use views::{CurrentView, DayView, HourView};
