//! Maps UI service errors to climacast_core::AppError for consistent user-facing messages.

mod location;
mod search;
