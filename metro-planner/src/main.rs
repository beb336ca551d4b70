use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use metro_planner::domain::Label;
use metro_planner::network::{LineTable, Network};
use metro_planner::planner::{Planner, SearchConfig, SearchOutcome, SearchRequest};
use metro_planner::web::{AppState, create_router};

const DEFAULT_TRAVEL_MATRIX: &str = "dists.csv";
const DEFAULT_HEURISTIC_MATRIX: &str = "real_dists.csv";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = search_config()?;

    let lines = match std::env::var_os("METRO_LINES") {
        Some(path) => LineTable::from_file(PathBuf::from(path))?,
        None => LineTable::reference()?,
    };

    let travel_path = env_or("METRO_TRAVEL_MATRIX", DEFAULT_TRAVEL_MATRIX);
    let heuristic_path = env_or("METRO_HEURISTIC_MATRIX", DEFAULT_HEURISTIC_MATRIX);
    let network = Network::load(lines, &travel_path, &heuristic_path, config.train_speed_kmh)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [start, goal] => {
            println!("{}", plan_once(&network, &config, start, goal)?);
            Ok(())
        }
        [] => serve(network, config).await,
        _ => {
            eprintln!("usage: metro-planner [<START> <GOAL>]");
            std::process::exit(2);
        }
    }
}

/// Run a single search and describe the outcome.
fn plan_once(
    network: &Network,
    config: &SearchConfig,
    start: &str,
    goal: &str,
) -> Result<String, Box<dyn Error>> {
    let request = SearchRequest::new(Label::parse(start)?, Label::parse(goal)?);
    let result = Planner::new(network, config).search(&request)?;

    let mut report = match &result.outcome {
        SearchOutcome::Found(route) => {
            let path: Vec<String> = route.labels().iter().map(|l| l.to_string()).collect();
            format!(
                "{}\nCost: {:.2} min ({} transfers)\n",
                path.join(" -> "),
                route.cost(),
                route.transfers()
            )
        }
        SearchOutcome::NoSolution => "No solution\n".to_string(),
    };
    report.push_str(&format!("Expanded {} states", result.expanded()));

    Ok(report)
}

async fn serve(network: Network, config: SearchConfig) -> Result<(), Box<dyn Error>> {
    let addr: SocketAddr = env_or("METRO_ADDR", DEFAULT_ADDR).parse()?;
    let app = create_router(AppState::new(network, config));

    info!(%addr, "Metro planner listening");
    info!("  GET  /health          - Health check");
    info!("  GET  /lines           - Line table");
    info!("  POST /route/plan      - Plan a route");
    info!("  GET  /route/tree.dot  - Expansion tree as Graphviz");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn search_config() -> Result<SearchConfig, Box<dyn Error>> {
    let defaults = SearchConfig::default();
    let transfer_cost = env_number("METRO_TRANSFER_COST", defaults.transfer_cost)?;
    let train_speed_kmh = env_number("METRO_TRAIN_SPEED", defaults.train_speed_kmh)?;

    if train_speed_kmh.is_nan() || train_speed_kmh <= 0.0 {
        return Err(format!("METRO_TRAIN_SPEED must be positive, got {train_speed_kmh}").into());
    }
    if transfer_cost.is_nan() || transfer_cost < 0.0 {
        return Err(format!("METRO_TRANSFER_COST must not be negative, got {transfer_cost}").into());
    }

    Ok(SearchConfig::new(transfer_cost, train_speed_kmh))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_number(key: &str, default: f64) -> Result<f64, Box<dyn Error>> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| format!("{key} is not a number ({value:?}): {e}").into()),
        Err(_) => Ok(default),
    }
}
