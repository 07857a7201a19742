//! Prompt loop standing in for the app's home and search pages.

use std::fmt;

use anyhow::{Context, Result};
use inquire::{InquireError, Select, Text};
use tracing::debug;
use weather_core::{
    Config, ControllerSettings, Geolocator, ViewController, geolocation::geolocator_for,
    provider::provider_from_config,
};

use crate::render;

#[derive(Debug, Clone, Copy)]
enum Action {
    Search,
    ToggleUnit,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Search => "Search city",
            Action::ToggleUnit => "Toggle °C/°F",
            Action::Quit => "Quit",
        })
    }
}

pub async fn run(config: &Config) -> Result<()> {
    let ctl = ViewController::new(provider_from_config(config), ControllerSettings::from(config));
    let geo = geolocator_for(config.position);

    println!("{}", render::current(&ctl));
    load_initial(&ctl, geo.as_ref()).await?;
    println!("{}", render::all(&ctl));

    loop {
        let action = match Select::new(
            &format!("[{}]", ctl.unit()),
            vec![Action::Search, Action::ToggleUnit, Action::Quit],
        )
        .prompt()
        {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read action"),
        };

        match action {
            Action::Search => search_page(&ctl).await?,
            Action::ToggleUnit => {
                ctl.toggle_unit();
                println!("{}", render::all(&ctl));
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

/// Recoverable failures stay in the view state and the menu opens
/// anyway; a missing API key ends the session.
async fn load_initial(ctl: &ViewController, geo: &dyn Geolocator) -> Result<()> {
    match ctl.resolve_initial(geo).await {
        Ok(()) => Ok(()),
        Err(err) if err.is_recoverable() => {
            debug!(error = %err, "initial forecast unavailable");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Reads a query, shows a progress line while the request runs and
/// reports failures in place. Returns to the menu on success.
async fn search_page(ctl: &ViewController) -> Result<()> {
    loop {
        let query = match Text::new("City:").with_placeholder("Enter city name").prompt() {
            Ok(query) => query,
            Err(InquireError::OperationCanceled) => return Ok(()),
            Err(e) => return Err(e).context("Failed to read city"),
        };

        debug!(query = %query, "searching");
        eprint!("Searching...");
        let result = ctl.search(&query).await;
        eprint!("\r            \r");

        match result {
            Ok(()) => {
                println!("{}", render::all(ctl));
                return Ok(());
            }
            Err(err) if err.is_recoverable() => println!("{err}"),
            Err(err) => return Err(err.into()),
        }
    }
}
