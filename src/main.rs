use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use enroll_ai::config::AppConfig;
use enroll_ai::error::AppError;
use enroll_ai::telemetry;
use enroll_ai::workflows::admissions::{
    admissions_router, AcademicLevel, AdmissionService, BudgetRange, ChildProfile, MatchingConfig,
    MatchingEngine, MemoryApplicationRepository, MockExtractor,
};
use enroll_ai::workflows::catalog::SchoolCatalog;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Admission Matching Orchestrator",
    about = "Run the school admission matching service or offline match reports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Offline matching tools for demos and support
    Match {
        #[command(subcommand)]
        command: MatchCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum MatchCommand {
    /// Rank the catalog against a child profile and print the result
    Report(MatchReportArgs),
}

#[derive(Args, Debug)]
struct MatchReportArgs {
    /// Child's name
    #[arg(long)]
    name: String,
    /// Child's age in years (fractional allowed)
    #[arg(long)]
    age: f32,
    /// Target class label, e.g. "Nursery" or "Class 1"
    #[arg(long)]
    target_class: String,
    /// Preferred curriculum board
    #[arg(long, default_value = "CBSE")]
    board: String,
    /// Free-text home location
    #[arg(long, default_value = "")]
    location: String,
    /// Maximum acceptable commute in km
    #[arg(long, default_value_t = 10.0)]
    max_distance_km: f32,
    /// Lower bound of the annual fee budget
    #[arg(long, default_value_t = 0)]
    budget_min: u32,
    /// Upper bound of the annual fee budget
    #[arg(long, default_value_t = 200_000)]
    budget_max: u32,
    /// Academic self-assessment (below-average, average, above-average, excellent)
    #[arg(long, value_parser = parse_academic_level, default_value = "average")]
    academic_level: AcademicLevel,
    /// Optional catalog CSV export to rank instead of the built-in sample
    #[arg(long)]
    catalog_csv: Option<PathBuf>,
    /// Include the per-school factor breakdown in the output
    #[arg(long)]
    list_factors: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Match {
            command: MatchCommand::Report(args),
        } => run_match_report(args),
    }
}

fn parse_academic_level(raw: &str) -> Result<AcademicLevel, String> {
    match raw
        .trim()
        .to_ascii_lowercase()
        .replace(' ', "-")
        .replace('_', "-")
        .as_str()
    {
        "below-average" => Ok(AcademicLevel::BelowAverage),
        "average" => Ok(AcademicLevel::Average),
        "above-average" => Ok(AcademicLevel::AboveAverage),
        "excellent" => Ok(AcademicLevel::Excellent),
        other => Err(format!(
            "unknown academic level '{other}' (expected below-average, average, above-average, or excellent)"
        )),
    }
}

fn load_catalog(csv_path: Option<&PathBuf>) -> Result<SchoolCatalog, AppError> {
    match csv_path {
        Some(path) => Ok(SchoolCatalog::from_path(path)?),
        None => Ok(SchoolCatalog::sample()),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(load_catalog(config.catalog.csv_path.as_ref())?);
    let service = Arc::new(
        AdmissionService::new(
            catalog,
            Arc::new(MemoryApplicationRepository::default()),
            Arc::new(MockExtractor::default()),
            MatchingConfig::standard(),
        )
        .with_pacing(Duration::from_millis(250)),
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(admissions_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "admission matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_match_report(args: MatchReportArgs) -> Result<(), AppError> {
    let MatchReportArgs {
        name,
        age,
        target_class,
        board,
        location,
        max_distance_km,
        budget_min,
        budget_max,
        academic_level,
        catalog_csv,
        list_factors,
    } = args;

    let imported = catalog_csv.is_some();
    let catalog = load_catalog(catalog_csv.as_ref())?;

    let profile = ChildProfile {
        name,
        age_years: age,
        date_of_birth: None,
        target_class,
        preferred_board: board,
        location,
        max_distance_km,
        budget: BudgetRange {
            min: budget_min,
            max: budget_max,
        },
        academic_level,
    };

    let engine = MatchingEngine::new(MatchingConfig::standard());
    let matches = engine.match_all(&profile, &catalog);

    render_match_report(&profile, &catalog, &matches, imported, list_factors);
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn render_match_report(
    profile: &ChildProfile,
    catalog: &SchoolCatalog,
    matches: &[enroll_ai::workflows::admissions::SchoolMatch],
    imported: bool,
    list_factors: bool,
) {
    println!("Admission match report");
    println!(
        "Child: {} (age {:.1}) targeting {} | board {} | budget {}-{} | within {:.0} km",
        profile.name,
        profile.age_years,
        profile.target_class,
        profile.preferred_board,
        profile.budget.min,
        profile.budget.max,
        profile.max_distance_km
    );

    if imported {
        println!("Data source: catalog CSV import");
    } else {
        println!("Data source: built-in sample catalog");
    }

    println!("\nRanked schools");
    for (rank, matched) in matches.iter().enumerate() {
        let school_name = catalog
            .by_id(&matched.school_id)
            .map(|school| school.name.as_str())
            .unwrap_or("(unknown school)");
        println!(
            "{:>2}. {} [{}] | score {} | {} chance",
            rank + 1,
            school_name,
            matched.school_id,
            matched.score,
            matched.chance.label()
        );

        if list_factors {
            for factor in &matched.factors {
                println!(
                    "    - {} ({}): {}",
                    factor.dimension.label(),
                    factor.verdict.label(),
                    factor.detail
                );
            }
        }
    }
}
