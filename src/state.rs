//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// A geographic position reported by the platform location source
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// What to ask the provider for. Exactly one form per request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum CityQuery {
    City(String),
    Coordinates(Coordinates),
}

/// Current conditions from one successful fetch
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSnapshot {
    pub name: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Relative humidity, 0-100
    pub humidity: u8,
    /// Sea-level pressure in hPa
    pub pressure: f64,
    /// Meters; some stations don't report it
    pub visibility: Option<f64>,
    pub wind_speed: f64,
    /// Meteorological degrees (direction the wind blows from)
    pub wind_deg: Option<f64>,
    pub description: String,
    /// Provider icon code, e.g. `01d`
    pub icon: String,
}

/// Measurement system requested from the provider
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    #[default]
    Imperial,
    Metric,
}

impl Units {
    /// Value of the provider's `units` query parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            Units::Imperial => "imperial",
            Units::Metric => "metric",
        }
    }

    pub fn wind_suffix(&self) -> &'static str {
        match self {
            Units::Imperial => "mph",
            Units::Metric => "m/s",
        }
    }
}

/// Lookup lifecycle: Idle → Loading → Success/Failure
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum LookupState {
    #[default]
    Idle,
    Loading,
    Success(WeatherSnapshot),
    Failure(LookupError),
}

impl LookupState {
    pub fn is_idle(&self) -> bool {
        matches!(self, LookupState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LookupState::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LookupState::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, LookupState::Failure(_))
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            LookupState::Success(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LookupError> {
        match self {
            LookupState::Failure(error) => Some(error),
            _ => None,
        }
    }
}

/// Spinner advance rate while a lookup is in flight.
pub const SPINNER_TICK_MS: u64 = 80;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Pending city-name input
    #[debug(section = "Query", label = "Input")]
    pub query: String,

    /// Query of the most recently issued request
    #[debug(section = "Query", label = "Last issued", debug_fmt)]
    pub last_query: Option<CityQuery>,

    #[debug(section = "Lookup", label = "State", debug_fmt)]
    pub lookup: LookupState,

    /// Sequence number of the latest issued request; older completions are dropped
    #[debug(section = "Lookup", label = "Request #")]
    pub request_seq: u64,

    /// `request_seq` when the location request went out; a resolve arriving
    /// after any newer lookup is dropped
    #[debug(section = "Location", label = "Requested at #")]
    pub location_seq: u64,

    #[debug(section = "Lookup", label = "Units", debug_fmt)]
    pub units: Units,

    /// Location banner, independent of `lookup`
    #[debug(section = "Location", label = "Error", debug_fmt)]
    pub location_error: Option<String>,

    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(units: Units) -> Self {
        Self {
            units,
            ..Default::default()
        }
    }

    /// Start with the input pre-filled
    pub fn with_query(units: Units, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::new(units)
        }
    }
}
