//! PEGELONLINE lookup for the Elbe water level at Dresden.

use serde::Deserialize;
use tracing::warn;

/// Measurement feed for station DRESDEN, water level (W), in centimeters.
pub const MEASUREMENTS_URL: &str =
    "https://www.pegelonline.wsv.de/webservices/rest-api/v2/stations/DRESDEN/W/measurements.json";

/// Sent to the room whenever the lookup fails, whatever the cause.
pub const APOLOGY: &str =
    "Der Pegelstand konnte leider nicht abgerufen werden, bitte versuch es später noch einmal!";

#[derive(Deserialize)]
struct Measurement {
    value: f64,
}

/// Client for the measurement feed.
#[derive(Clone)]
pub struct PegelClient {
    http: reqwest::Client,
    url: String,
}

impl PegelClient {
    pub fn new() -> Self {
        Self::with_url(MEASUREMENTS_URL.to_string())
    }

    /// Client reading from a non-default endpoint. Tests point this at a
    /// mock server.
    pub fn with_url(url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
        }
    }

    /// Latest water level in centimeters, taken from the last entry of the
    /// feed. An empty feed is an error, not a panic.
    pub async fn latest_level(&self) -> Result<f64, Error> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Status(response.status().as_u16()));
        }

        let measurements: Vec<Measurement> = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        measurements.last().map(|m| m.value).ok_or(Error::NoData)
    }

    /// Room-ready report line. Every failure collapses into the fixed
    /// apology; the cause only shows up in the log.
    pub async fn level_message(&self) -> String {
        match self.latest_level().await {
            Ok(level) => format!("Pegel: {level} cm"),
            Err(e) => {
                warn!("Pegel lookup failed: {e}");
                APOLOGY.to_string()
            }
        }
    }
}

#[derive(Debug)]
pub enum Error {
    Http(String),
    Status(u16),
    Parse(String),
    NoData,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Http(e) => write!(f, "HTTP error: {e}"),
            Error::Status(code) => write!(f, "unexpected status {code}"),
            Error::Parse(e) => write!(f, "parse error: {e}"),
            Error::NoData => write!(f, "no measurements"),
        }
    }
}

impl std::error::Error for Error {}
