//! Domain types for the metro planner.
//!
//! This module contains the value types that identify positions in the
//! network. All types enforce their invariants at construction time, so code
//! that receives these types can trust their validity.

mod label;
mod line;
mod state;
mod station;

pub use label::{InvalidLabel, Label};
pub use line::{InvalidLineId, LineId};
pub use state::{MissingCost, State};
pub use station::{InvalidStation, STATION_PREFIX, StationId};
