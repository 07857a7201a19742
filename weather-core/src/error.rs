use thiserror::Error;

/// Failures of a forecast fetch.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No API credential is configured. Not recoverable at runtime.
    #[error(
        "Missing API key.\n\
         Hint: run `weather configure` or set WEATHER_API_KEY."
    )]
    Configuration,

    /// The service rejected the query with a non-success status.
    #[error("City not found: '{query}' (HTTP {status})")]
    NotFound { query: String, status: u16 },

    /// The request could not complete or its body could not be read.
    #[error("Failed to reach the weather service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Location query must not be empty")]
    EmptyQuery,
}

impl WeatherError {
    /// Whether retrying with another query (or later) can succeed.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, WeatherError::Configuration)
    }
}
