//! Terminal dashboard for ClimaCast.
//!
//! `DashboardApp` owns the page state and reacts to keys; `ui::render` draws
//! it with ratatui. Network work runs in `services` and reports back over a
//! channel.

pub mod app;
pub mod app_services;
pub mod dashboard;
pub mod error_mapping;
pub mod pages;
pub mod search;
pub mod services;
pub mod ui;

pub use app::DashboardApp;
pub use app_services::AppServices;
pub use services::ServiceMessage;
