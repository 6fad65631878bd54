//! Effects - side effects declared by the reducer

use crate::state::CityQuery;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch current conditions; `seq` is echoed back in the result action
    FetchWeather { seq: u64, query: CityQuery },
    /// Ask the platform location source for the current position
    LocateDevice,
}
