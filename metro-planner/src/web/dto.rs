//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::planner::{SearchOutcome, SearchResult, TreeNode};

/// Request to plan a route.
#[derive(Debug, Deserialize)]
pub struct PlanRouteRequest {
    /// Start label, e.g. "E1r"
    pub start: String,

    /// Goal label, e.g. "E7b"
    pub goal: String,
}

/// Whether a route was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Found,
    NoSolution,
}

/// Response for route planning.
#[derive(Debug, Serialize)]
pub struct PlanRouteResponse {
    /// Found or no_solution
    pub status: RouteStatus,

    /// Labels from start to goal; empty when no route exists
    pub path: Vec<String>,

    /// Total cost in minutes
    pub cost: Option<f64>,

    /// Number of line changes along the route
    pub transfers: Option<usize>,

    /// Number of states expanded
    pub expanded: usize,

    /// Every generated state with its parent and costs
    pub tree: Vec<TreeNode>,
}

/// Query for the DOT export of a search.
#[derive(Debug, Deserialize)]
pub struct TreeQuery {
    /// Start label
    pub start: String,

    /// Goal label
    pub goal: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl PlanRouteResponse {
    /// Create from a search result.
    pub fn from_result(result: &SearchResult) -> Self {
        let tree = result.tree.nodes().to_vec();

        match &result.outcome {
            SearchOutcome::Found(route) => Self {
                status: RouteStatus::Found,
                path: route.labels().iter().map(|l| l.to_string()).collect(),
                cost: Some(route.cost()),
                transfers: Some(route.transfers()),
                expanded: result.expanded(),
                tree,
            },
            SearchOutcome::NoSolution => Self {
                status: RouteStatus::NoSolution,
                path: Vec::new(),
                cost: None,
                transfers: None,
                expanded: result.expanded(),
                tree,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RouteStatus::NoSolution).unwrap(),
            "\"no_solution\""
        );
        assert_eq!(
            serde_json::to_string(&RouteStatus::Found).unwrap(),
            "\"found\""
        );
    }

    #[test]
    fn plan_request_deserializes() {
        let req: PlanRouteRequest =
            serde_json::from_str(r#"{"start": "E1r", "goal": "E7b"}"#).unwrap();
        assert_eq!(req.start, "E1r");
        assert_eq!(req.goal, "E7b");
    }

    #[test]
    fn error_response_shape() {
        let body = ErrorResponse {
            error: "bad label".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"error": "bad label"})
        );
    }
}
