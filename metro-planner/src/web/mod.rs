//! Web layer for the metro planner.
//!
//! Provides HTTP endpoints for planning routes and for exporting the
//! expansion tree of a search to visualization tools.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
