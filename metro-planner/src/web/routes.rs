//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::warn;

use crate::domain::{InvalidLabel, Label};
use crate::network::LineTable;
use crate::planner::{Planner, SearchError, SearchRequest, SearchResult};

use super::dto::*;
use super::state::AppState;

/// Content type for Graphviz output.
const DOT_CONTENT_TYPE: &str = "text/vnd.graphviz";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/lines", get(list_lines))
        .route("/route/plan", post(plan_route))
        .route("/route/tree.dot", get(route_tree_dot))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List the lines of the loaded network.
async fn list_lines(State(state): State<AppState>) -> Json<LineTable> {
    Json(state.network.lines().clone())
}

/// Plan a route between two labels.
async fn plan_route(
    State(state): State<AppState>,
    Json(req): Json<PlanRouteRequest>,
) -> Result<Json<PlanRouteResponse>, AppError> {
    let result = run_search(&state, &req.start, &req.goal)?;
    Ok(Json(PlanRouteResponse::from_result(&result)))
}

/// Run a search and return its expansion tree as Graphviz DOT.
async fn route_tree_dot(
    State(state): State<AppState>,
    Query(query): Query<TreeQuery>,
) -> Result<Response, AppError> {
    let result = run_search(&state, &query.start, &query.goal)?;
    let route = result
        .outcome
        .route()
        .map(|r| r.labels().to_vec())
        .unwrap_or_default();
    let dot = result.tree.to_dot(&route);

    Ok(([(header::CONTENT_TYPE, DOT_CONTENT_TYPE)], dot).into_response())
}

fn run_search(state: &AppState, start: &str, goal: &str) -> Result<SearchResult, AppError> {
    let start = Label::parse(start).map_err(|e| AppError::bad_label(start, e))?;
    let goal = Label::parse(goal).map_err(|e| AppError::bad_label(goal, e))?;

    let planner = Planner::new(&state.network, &state.config);
    let result = planner.search(&SearchRequest::new(start, goal))?;
    Ok(result)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl AppError {
    fn bad_label(input: &str, err: InvalidLabel) -> Self {
        AppError::BadRequest {
            message: format!("Invalid label {input:?}: {err}"),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidPosition(_) | SearchError::UnknownStation { .. } => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        warn!(%status, %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{CostMatrix, LineDefinition, Network};
    use crate::planner::{SearchConfig, TreeError};
    use ndarray::Array2;

    fn test_state() -> AppState {
        let travel = CostMatrix::from_edges(3, &[(0, 1, 5.0), (1, 2, 4.0)]).unwrap();
        let heuristic = CostMatrix::new(Array2::zeros((3, 3))).unwrap();
        let lines = LineTable::new(vec![
            LineDefinition::from_labels("r", &["E1", "E2"]).unwrap(),
            LineDefinition::from_labels("g", &["E2", "E3"]).unwrap(),
        ])
        .unwrap();
        let network = Network::new(lines, travel, heuristic).unwrap();
        AppState::new(network, SearchConfig::default())
    }

    fn plan_request(start: &str, goal: &str) -> Json<PlanRouteRequest> {
        Json(PlanRouteRequest {
            start: start.to_string(),
            goal: goal.to_string(),
        })
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn lines_are_listed() {
        let Json(table) = list_lines(State(test_state())).await;
        assert_eq!(table.len(), 2);
    }

    #[tokio::test]
    async fn plan_route_found() {
        let Json(resp) = plan_route(State(test_state()), plan_request("E1r", "E3g"))
            .await
            .unwrap();

        assert_eq!(resp.status, RouteStatus::Found);
        assert_eq!(resp.path, vec!["E1r", "E2r", "E2g", "E3g"]);
        assert_eq!(resp.cost, Some(12.0));
        assert_eq!(resp.transfers, Some(1));
        assert_eq!(resp.expanded, 4);
        assert_eq!(resp.tree.len(), 4);
        assert_eq!(resp.tree[0].parent, None);
    }

    #[tokio::test]
    async fn plan_route_no_solution() {
        // g never reaches E1
        let Json(resp) = plan_route(State(test_state()), plan_request("E3g", "E1g"))
            .await
            .unwrap();

        assert_eq!(resp.status, RouteStatus::NoSolution);
        assert!(resp.path.is_empty());
        assert_eq!(resp.cost, None);
    }

    #[tokio::test]
    async fn plan_route_rejects_bad_label() {
        let err = plan_route(State(test_state()), plan_request("E1", "E3g"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn plan_route_rejects_invalid_position() {
        let err = plan_route(State(test_state()), plan_request("E3r", "E1r"))
            .await
            .unwrap_err();

        match err {
            AppError::BadRequest { message } => {
                assert_eq!(message, "invalid start position: E3r is not served by line r");
            }
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn tree_dot_export() {
        let query = Query(TreeQuery {
            start: "E1r".to_string(),
            goal: "E2g".to_string(),
        });
        let response = route_tree_dot(State(test_state()), query).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            DOT_CONTENT_TYPE
        );
    }

    #[test]
    fn search_errors_map_to_status() {
        let err: AppError = SearchError::Tree(TreeError::UnknownParent(
            Label::parse("E1r").unwrap(),
        ))
        .into();
        assert!(matches!(err, AppError::Internal { .. }));

        let response = AppError::BadRequest {
            message: "nope".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
