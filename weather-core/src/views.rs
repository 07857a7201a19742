//! Display slices derived from a forecast and the selected unit.

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::{ForecastDay, ForecastResult, HourEntry, Unit};

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub location_name: String,
    pub country: String,
    pub temperature: f64,
    pub unit: Unit,
    pub condition: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourView {
    /// `HH:00`
    pub label: String,
    pub temperature: f64,
    pub condition: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    /// Short weekday name, e.g. `Mon`.
    pub label: String,
    pub max: f64,
    pub min: f64,
    pub condition: String,
    pub icon: String,
}

impl CurrentView {
    pub fn from_forecast(forecast: &ForecastResult, unit: Unit) -> Self {
        let current = &forecast.current;
        Self {
            location_name: forecast.location.name.clone(),
            country: forecast.location.country.clone(),
            temperature: unit.pick(current.temp_c, current.temp_f),
            unit,
            condition: current.condition.text.clone(),
            icon: current.condition.icon.clone(),
        }
    }
}

impl HourView {
    pub fn from_entry(hour: &HourEntry, unit: Unit) -> Self {
        Self {
            label: hour_label(&hour.time),
            temperature: unit.pick(hour.temp_c, hour.temp_f),
            condition: hour.condition.text.trim().to_string(),
            icon: hour.condition.icon.clone(),
        }
    }
}

impl DayView {
    pub fn from_day(day: &ForecastDay, unit: Unit) -> Self {
        let summary = &day.day;
        Self {
            label: weekday_label(&day.date),
            max: unit.pick(summary.maxtemp_c, summary.maxtemp_f),
            min: unit.pick(summary.mintemp_c, summary.mintemp_f),
            condition: summary.condition.text.trim().to_string(),
            icon: summary.condition.icon.clone(),
        }
    }
}

fn hour_label(time: &str) -> String {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M")
        .map(|dt| dt.format("%H:00").to_string())
        .unwrap_or_else(|_| time.to_string())
}

fn weekday_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a").to_string())
        .unwrap_or_else(|_| date.to_string())
}
