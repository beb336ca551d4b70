//! Metro route planner.
//!
//! Answers: "I'm at this station on this line, what is the quickest way to
//! reach that station on that line?" Routes are found with A* over
//! (station, line) states, where riding costs the travel time between
//! adjacent stations and changing lines costs a flat transfer penalty.

pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
