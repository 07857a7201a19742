//! Plain-text rendering of the controller's views.

use weather_core::{Unit, ViewController};

/// Header line, loading/error notice and the current conditions.
pub fn current(ctl: &ViewController) -> String {
    let mut out = String::new();

    if ctl.is_loading() {
        out.push_str("Loading...\n");
        return out;
    }
    if let Some(error) = ctl.error() {
        out.push_str(&format!("! {error}\n"));
    }

    if let Some(view) = ctl.current() {
        out.push_str(&format!("{}, {}\n", view.location_name, view.country));
        out.push_str(&format!(
            "  {} {}\n",
            temperature(view.temperature, view.unit),
            view.condition
        ));
        out.push_str(&format!("  {}\n", icon_url(&view.icon)));
    }
    out
}

pub fn hourly(ctl: &ViewController) -> String {
    let hours = ctl.hourly();
    if hours.is_empty() {
        return String::new();
    }

    let unit = ctl.unit();
    let mut out = String::from("Hourly Forecast\n");
    for hour in hours {
        out.push_str(&format!(
            "  {:>5}  {:>7}  {}\n",
            hour.label,
            temperature(hour.temperature, unit),
            hour.condition
        ));
    }
    out
}

pub fn daily(ctl: &ViewController) -> String {
    let days = ctl.daily();
    if days.is_empty() {
        return String::new();
    }

    let mut out = String::from("Daily Forecast\n");
    for day in days {
        out.push_str(&format!(
            "  {:<4} {:>6}° {:>6}°  {}\n",
            day.label, day.max, day.min, day.condition
        ));
    }
    out
}

pub fn all(ctl: &ViewController) -> String {
    [current(ctl), hourly(ctl), daily(ctl)]
        .into_iter()
        .filter(|section| !section.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn temperature(value: f64, unit: Unit) -> String {
    format!("{value}{unit}")
}

/// The service hands out protocol-relative icon URLs.
fn icon_url(icon: &str) -> String {
    if icon.starts_with("//") {
        format!("https:{icon}")
    } else {
        icon.to_string()
    }
}
