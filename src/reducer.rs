//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, CityQuery, LookupState};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Lookup actions =====
        Action::LookupQueryChange(query) => {
            if state.query == query {
                return DispatchResult::unchanged();
            }
            state.query = query;
            DispatchResult::changed()
        }

        Action::LookupSubmit => {
            let query = CityQuery::City(state.query.clone());
            begin_fetch(state, query)
        }

        Action::LookupRefresh => match state.last_query.clone() {
            Some(query) => begin_fetch(state, query),
            None => DispatchResult::unchanged(),
        },

        Action::LookupDidLoad { seq, snapshot } => {
            if seq != state.request_seq {
                return DispatchResult::unchanged();
            }
            state.lookup = LookupState::Success(snapshot);
            DispatchResult::changed()
        }

        Action::LookupDidError { seq, error } => {
            if seq != state.request_seq {
                return DispatchResult::unchanged();
            }
            state.lookup = LookupState::Failure(error);
            DispatchResult::changed()
        }

        // ===== Location actions =====
        Action::LocationRequest => {
            state.location_seq = state.request_seq;
            DispatchResult::changed_with(Effect::LocateDevice)
        }

        Action::LocationDidResolve(coords) => {
            if state.request_seq != state.location_seq {
                return DispatchResult::unchanged();
            }
            begin_fetch(state, CityQuery::Coordinates(coords))
        }

        Action::LocationDidError(message) => {
            state.location_error = Some(message);
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiRender => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.lookup.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Enter Loading, drop both error channels and issue a new numbered request.
fn begin_fetch(state: &mut AppState, query: CityQuery) -> DispatchResult<Effect> {
    state.request_seq += 1;
    state.lookup = LookupState::Loading;
    state.location_error = None;
    state.tick_count = 0;
    state.last_query = Some(query.clone());
    DispatchResult::changed_with(Effect::FetchWeather {
        seq: state.request_seq,
        query,
    })
}
