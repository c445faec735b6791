//! Reusable Dioxus RSX components for the dashboard.

mod chart_container;
mod chart_header;
mod cluster_selector;
mod error_display;
mod firm_selector;
mod granularity_selector;
mod loading_spinner;
mod mode_selector;
mod sidebar;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use cluster_selector::ClusterSelector;
pub use error_display::ErrorDisplay;
pub use firm_selector::FirmSelector;
pub use granularity_selector::GranularitySelector;
pub use loading_spinner::LoadingSpinner;
pub use mode_selector::ModeSelector;
pub use sidebar::Sidebar;
