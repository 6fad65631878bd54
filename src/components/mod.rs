pub mod conditions_panel;
pub mod details_panel;
pub mod lookup_bar;
pub mod lookup_display;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use conditions_panel::{ConditionsPanel, ConditionsPanelProps};
pub use details_panel::{DetailsPanel, DetailsPanelProps};
pub use lookup_bar::{LookupBar, LookupBarProps};
pub use lookup_display::{commit_action, LookupDisplay, LookupDisplayProps, ERROR_ICON};
