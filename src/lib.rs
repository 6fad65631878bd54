//! Weather lookup TUI
//!
//! Current conditions for a typed city or the machine's location, driven by
//! a tui-dispatch store. The library exposes the modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod conditions;
pub mod config;
pub mod display;
pub mod effect;
pub mod error;
pub mod geolocation;
pub mod reducer;
pub mod state;
