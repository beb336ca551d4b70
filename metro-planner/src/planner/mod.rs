//! Route planner using A* search.
//!
//! This module implements the core route planning algorithm that answers:
//! "I'm at this station on this line - what is the cheapest way to reach my
//! destination on that line?"
//!
//! Search states pair a station with the line being ridden. Riding between
//! adjacent stations costs the travel-matrix edge weight; changing line at a
//! station costs a flat transfer penalty.

mod config;
mod heuristic;
mod neighbors;
mod reconstruct;
mod search;
mod tree;


pub use config::SearchConfig;
pub use heuristic::Heuristic;
pub use neighbors::NeighborGenerator;
pub use reconstruct::reconstruct_path;
pub use search::{Planner, Route, SearchError, SearchOutcome, SearchRequest, SearchResult};
pub use tree::{ExpansionTree, TreeError, TreeNode};
