//! Display mapping - pure function of state, no I/O
//!
//! Components render a [`DisplayModel`] and never look at raw snapshot
//! numbers, so every rounding and suffix rule lives here.

use crate::conditions::condition_emoji;
use crate::state::{AppState, LookupState, Units, WeatherSnapshot};

pub const LOADING_MESSAGE: &str = "Loading Weather Data...";
pub const IDLE_HINT: &str = "Type a city name and press Enter";

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Display-ready strings for one snapshot
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotView {
    pub heading: String,
    pub glyph: &'static str,
    pub description: String,
    pub temperature: String,
    pub high: String,
    pub low: String,
    pub feels_like: String,
    pub humidity: String,
    pub pressure: String,
    pub visibility: String,
    pub wind_speed: String,
    pub wind_direction: Option<&'static str>,
}

impl SnapshotView {
    pub fn new(snapshot: &WeatherSnapshot, units: Units) -> Self {
        Self {
            heading: snapshot.name.clone(),
            glyph: condition_emoji(&snapshot.icon),
            description: snapshot.description.clone(),
            temperature: degrees(snapshot.temperature),
            high: degrees(snapshot.temp_max),
            low: degrees(snapshot.temp_min),
            feels_like: degrees(snapshot.feels_like),
            humidity: percent(snapshot.humidity),
            pressure: hectopascals(snapshot.pressure),
            visibility: kilometers(snapshot.visibility),
            wind_speed: speed(snapshot.wind_speed, units),
            wind_direction: snapshot.wind_deg.map(compass_point),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LookupView {
    Idle,
    Loading { spinner: &'static str },
    Ready(SnapshotView),
    Error(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayModel {
    pub lookup: LookupView,
    /// Orthogonal to `lookup`; rendered as its own banner
    pub location_error: Option<String>,
}

impl DisplayModel {
    pub fn from_state(state: &AppState) -> Self {
        let lookup = match &state.lookup {
            LookupState::Idle => LookupView::Idle,
            LookupState::Loading => LookupView::Loading {
                spinner: spinner_frame(state.tick_count),
            },
            LookupState::Success(snapshot) => {
                LookupView::Ready(SnapshotView::new(snapshot, state.units))
            }
            LookupState::Failure(error) => LookupView::Error(error.to_string()),
        };

        Self {
            lookup,
            location_error: state.location_error.clone(),
        }
    }
}

pub fn spinner_frame(tick_count: u32) -> &'static str {
    SPINNER_FRAMES[tick_count as usize % SPINNER_FRAMES.len()]
}

/// Nearest integer, never `-0`
fn whole(value: f64) -> i64 {
    value.round() as i64
}

pub fn degrees(value: f64) -> String {
    format!("{}°", whole(value))
}

pub fn percent(value: u8) -> String {
    format!("{}%", value)
}

pub fn speed(value: f64, units: Units) -> String {
    format!("{} {}", whole(value), units.wind_suffix())
}

pub fn hectopascals(value: f64) -> String {
    format!("{} hPa", whole(value))
}

/// Meters in, whole kilometers out
pub fn kilometers(meters: Option<f64>) -> String {
    match meters {
        Some(m) => format!("{} km", whole(m / 1000.0)),
        None => "--".to_string(),
    }
}

/// 16-point compass label for a meteorological bearing
pub fn compass_point(deg: f64) -> &'static str {
    let sector = (deg.rem_euclid(360.0) / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[sector]
}
