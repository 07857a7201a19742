use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use inquire::{CustomType, Password, Text};
use weather_core::{
    Config, ControllerSettings, Coordinates, Unit, ViewController, geolocation::geolocator_for,
    provider::provider_from_config,
};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and defaults.
    Configure,

    /// Show the forecast for the current position, or the default city.
    Show {
        /// Latitude of the current position.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude of the current position.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Show the forecast for a city name or "lat,lon" pair.
    Search {
        query: String,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Search and switch units in a prompt loop.
    Interactive,
}

#[derive(Debug, Args)]
pub struct DisplayArgs {
    /// Temperature unit: c or f. Defaults to the configured unit.
    #[arg(long)]
    unit: Option<Unit>,

    /// Number of forecast days to request.
    #[arg(long)]
    days: Option<u8>,

    #[arg(long, value_enum, default_value_t = View::All)]
    view: View,

    /// Print the raw forecast payload as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    Current,
    Hourly,
    Daily,
    All,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => configure(&mut config)?,
            Command::Show { lat, lon, display } => {
                let position = lat.zip(lon).map(|(lat, lon)| Coordinates::new(lat, lon));
                let geo = geolocator_for(position.or(config.position));
                let ctl = controller(&config, &display);
                ctl.resolve_initial(geo.as_ref()).await?;
                print_views(&ctl, &display)?;
            }
            Command::Search { query, display } => {
                let ctl = controller(&config, &display);
                ctl.search(&query).await?;
                print_views(&ctl, &display)?;
            }
            Command::Interactive => interactive::run(&config).await?,
        }

        Ok(())
    }
}

fn controller(config: &Config, display: &DisplayArgs) -> ViewController {
    let mut settings = ControllerSettings::from(config);
    if let Some(unit) = display.unit {
        settings.unit = unit;
    }
    if let Some(days) = display.days {
        settings.days = days;
    }
    ViewController::new(provider_from_config(config), settings)
}

fn print_views(ctl: &ViewController, display: &DisplayArgs) -> Result<()> {
    if display.json {
        let state = ctl.state();
        let json = serde_json::to_string_pretty(&state.forecast)
            .context("Failed to serialize forecast")?;
        println!("{json}");
        return Ok(());
    }

    let out = match display.view {
        View::Current => render::current(ctl),
        View::Hourly => render::hourly(ctl),
        View::Daily => render::daily(ctl),
        View::All => render::all(ctl),
    };
    print!("{out}");
    Ok(())
}

fn configure(config: &mut Config) -> Result<()> {
    let api_key = Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;
    config.default_city = default_city;

    config.unit = CustomType::<Unit>::new("Temperature unit (c/f):")
        .with_default(config.unit)
        .with_error_message("Please type c or f")
        .prompt()
        .context("Failed to read unit")?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
