//! A* route search.
//!
//! Finds a route from a start label to a goal label, where moving along a
//! line costs the travel-matrix edge weight and changing line costs a flat
//! transfer penalty.
//!
//! The driver keeps an ordered open list and a closed set. Each round it
//! expands the leftmost open state with the lowest `f = g + h`. A label
//! enters open at most once: a cheaper path found later to a label that is
//! already open or closed is discarded, never used to update it.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::domain::{Label, MissingCost, State};
use crate::network::Network;

use super::config::SearchConfig;
use super::heuristic::Heuristic;
use super::neighbors::NeighborGenerator;
use super::reconstruct::reconstruct_path;
use super::tree::{ExpansionTree, TreeError};

/// Error from route search.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// The start station is not served by the start line
    #[error("invalid start position: {0} is not served by line {line}", line = .0.line())]
    InvalidPosition(Label),

    /// A label names a station outside the network
    #[error("unknown station in {label}: network has {stations} stations")]
    UnknownStation { label: Label, stations: usize },

    /// The expansion tree rejected an insertion
    #[error("expansion tree error: {0}")]
    Tree(#[from] TreeError),

    /// A state was ranked before its costs were assigned
    #[error(transparent)]
    MissingCost(#[from] MissingCost),
}

/// Request for route search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Where the rider is, including the line they are on.
    pub start: Label,

    /// Where the rider wants to be, including the line to arrive on.
    pub goal: Label,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(start: Label, goal: Label) -> Self {
        Self { start, goal }
    }

    /// Validate the request against a network.
    pub fn validate(&self, network: &Network) -> Result<(), SearchError> {
        let stations = network.station_count();
        for label in [&self.start, &self.goal] {
            if label.station_index() >= stations {
                return Err(SearchError::UnknownStation {
                    label: label.clone(),
                    stations,
                });
            }
        }

        if !network
            .lines()
            .serves(self.start.line(), self.start.station())
        {
            return Err(SearchError::InvalidPosition(self.start.clone()));
        }

        Ok(())
    }
}

/// A start-to-goal route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    labels: Vec<Label>,
    cost: f64,
}

impl Route {
    /// Labels from start to goal.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Total cost of the route (minutes).
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of line changes along the route.
    pub fn transfers(&self) -> usize {
        self.labels
            .windows(2)
            .filter(|pair| pair[0].station() == pair[1].station())
            .count()
    }
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The goal was reached.
    Found(Route),

    /// Every reachable state was expanded without reaching the goal.
    NoSolution,
}

impl SearchOutcome {
    /// The route, if one was found.
    pub fn route(&self) -> Option<&Route> {
        match self {
            SearchOutcome::Found(route) => Some(route),
            SearchOutcome::NoSolution => None,
        }
    }
}

/// Result of route search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Found route or no-solution.
    pub outcome: SearchOutcome,

    /// Every expanded label, in expansion order.
    pub trace: Vec<Label>,

    /// Every generated state and the state that generated it.
    pub tree: ExpansionTree,
}

impl SearchResult {
    /// Number of states expanded.
    pub fn expanded(&self) -> usize {
        self.trace.len()
    }
}

/// Route planner using A*.
pub struct Planner<'a> {
    network: &'a Network,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a Network, config: &'a SearchConfig) -> Self {
        Self { network, config }
    }

    /// Search for a route from `request.start` to `request.goal`.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        request.validate(self.network)?;

        let heuristic = Heuristic::new(self.network.heuristic(), request.goal.station());
        let generator = NeighborGenerator::new(
            self.network.travel(),
            self.network.lines(),
            heuristic,
            self.config.transfer_cost,
        );

        let start = State::with_costs(
            request.start.clone(),
            0.0,
            heuristic.estimate(request.start.station()),
        );

        debug!(start = %request.start, goal = %request.goal, "Starting route search");

        let mut tree = ExpansionTree::new();
        tree.add_root(&start)?;

        let mut open_labels: HashSet<Label> = HashSet::from([start.label().clone()]);
        let mut open: Vec<State> = vec![start];
        let mut closed: HashSet<Label> = HashSet::new();
        let mut trace: Vec<Label> = Vec::new();
        let mut traced: HashSet<Label> = HashSet::new();

        while !open.is_empty() {
            let current = open.remove(best_index(&open)?);
            open_labels.remove(current.label());

            trace.push(current.label().clone());
            traced.insert(current.label().clone());

            trace!(
                label = %current.label(),
                g = current.g(),
                h = current.h(),
                open = open.len(),
                "Expanding"
            );

            if current.label() == &request.goal {
                let route = Route {
                    labels: reconstruct_path(&trace, &tree),
                    cost: current.cost()?,
                };

                debug!(
                    expanded = trace.len(),
                    generated = tree.len(),
                    cost = route.cost,
                    hops = route.labels.len(),
                    "Route found"
                );

                return Ok(SearchResult {
                    outcome: SearchOutcome::Found(route),
                    trace,
                    tree,
                });
            }

            // Anything already expanded is excluded, not just the parent
            let neighbors: Vec<State> = generator
                .neighbors(&current)?
                .into_iter()
                .filter(|n| !traced.contains(n.label()))
                .collect();

            tree.add_children(current.label(), &neighbors)?;

            for neighbor in neighbors {
                if open_labels.contains(neighbor.label()) || closed.contains(neighbor.label()) {
                    continue;
                }
                open_labels.insert(neighbor.label().clone());
                open.push(neighbor);
            }

            closed.insert(current.label().clone());
        }

        debug!(
            expanded = trace.len(),
            generated = tree.len(),
            "Open list exhausted, no route"
        );

        Ok(SearchResult {
            outcome: SearchOutcome::NoSolution,
            trace,
            tree,
        })
    }
}

/// Index of the leftmost open state with the lowest f.
fn best_index(open: &[State]) -> Result<usize, MissingCost> {
    let mut best = 0;
    let mut best_f = f64::INFINITY;
    for (i, state) in open.iter().enumerate() {
        let f = state.f()?;
        if i == 0 || f < best_f {
            best = i;
            best_f = f;
        }
    }
    Ok(best)
}
