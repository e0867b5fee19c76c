//! Web layer for the meeting-point planner.
//!
//! Provides a JSON API for nearby-station lookup and meeting-point search.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
