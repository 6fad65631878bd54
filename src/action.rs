//! Actions - every input to the lookup state machine

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::state::{Coordinates, WeatherSnapshot};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Lookup category =====
    /// City input text changed
    LookupQueryChange(String),

    /// Intent: fetch weather for the current input text
    LookupSubmit,

    /// Intent: re-issue the last issued query
    LookupRefresh,

    /// Result: request `seq` settled with a snapshot
    LookupDidLoad { seq: u64, snapshot: WeatherSnapshot },

    /// Result: request `seq` settled with an error
    LookupDidError { seq: u64, error: LookupError },

    // ===== Location category =====
    /// Intent: ask the platform for the current position (startup)
    LocationRequest,

    /// Result: platform reported a position
    LocationDidResolve(Coordinates),

    /// Result: position unavailable; payload is the banner text
    LocationDidError(String),

    // ===== UI (uncategorized) =====
    /// Force a re-render (cursor movement, etc.)
    UiRender,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
