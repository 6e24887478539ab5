use actix_web::{http::header, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{grid_stats, neighborhood_averages, render_health_map, render_priority_csv, ReefAnalyzer};
use crate::models::{BoundingBox, BoundsQuery, ErrorResponse, HealthResponse, MatrixResponse, OccurrencePoint, StatsResponse};
use crate::services::ObisClient;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub obis: Arc<ObisClient>,
    pub analyzer: ReefAnalyzer,
}

/// Configure all reef routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/ocean-matrix", web::get().to(ocean_matrix))
        .route("/restoration-roadmap", web::get().to(restoration_roadmap))
        .route("/ocean-stats", web::get().to(ocean_stats))
        .route("/exports/health-map", web::get().to(export_health_map))
        .route("/exports/restoration-priority", web::get().to(export_restoration_priority));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Validate the query and fetch the occurrence records inside its bounds
///
/// Upstream failures arrive here as an empty record list.
async fn scan(
    state: &AppState,
    query: &BoundsQuery,
) -> Result<(BoundingBox, Vec<OccurrencePoint>), HttpResponse> {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for bounds query: field_errors={:?}", errors);
        return Err(HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        }));
    }

    let bounds = query.bounds();
    if bounds.is_inverted() {
        tracing::warn!("Inverted bounds requested, grid will be degenerate: {:?}", bounds);
    }

    let points = state.obis.fetch(&bounds).await;
    tracing::debug!("Fetched {} occurrence records for {:?}", points.len(), bounds);

    Ok((bounds, points))
}

/// Ocean matrix endpoint
///
/// GET /ocean-matrix?min_lat=..&max_lat=..&min_lon=..&max_lon=..[&seed=..]
///
/// Response body:
/// ```json
/// {
///   "grid": [[{"id": "Sector-0-0", "coordinates": [0, 0], ...}, ...], ...],
///   "raw_point_count": 500
/// }
/// ```
async fn ocean_matrix(
    state: web::Data<AppState>,
    query: web::Query<BoundsQuery>,
) -> impl Responder {
    let (bounds, points) = match scan(&state, &query).await {
        Ok(scanned) => scanned,
        Err(response) => return response,
    };

    let result = state.analyzer.build_matrix(&points, &bounds, query.seed);

    tracing::info!(
        "Built ocean matrix for {:?} from {} records",
        bounds,
        result.raw_point_count
    );

    HttpResponse::Ok().json(MatrixResponse {
        grid: result.grid,
        raw_point_count: result.raw_point_count,
    })
}

/// Restoration roadmap endpoint
///
/// GET /restoration-roadmap?min_lat=..&max_lat=..&min_lon=..&max_lon=..[&seed=..]
///
/// Returns the 10 weakest and the 10 strongest sectors, both ascending.
async fn restoration_roadmap(
    state: web::Data<AppState>,
    query: web::Query<BoundsQuery>,
) -> impl Responder {
    let (bounds, points) = match scan(&state, &query).await {
        Ok(scanned) => scanned,
        Err(response) => return response,
    };

    let roadmap = state.analyzer.build_roadmap(&points, &bounds, query.seed);

    tracing::info!(
        "Built restoration roadmap for {:?} from {} records",
        bounds,
        points.len()
    );

    HttpResponse::Ok().json(roadmap)
}

/// Grid statistics endpoint
///
/// GET /ocean-stats?min_lat=..&max_lat=..&min_lon=..&max_lon=..[&seed=..]
async fn ocean_stats(
    state: web::Data<AppState>,
    query: web::Query<BoundsQuery>,
) -> impl Responder {
    let (bounds, points) = match scan(&state, &query).await {
        Ok(scanned) => scanned,
        Err(response) => return response,
    };

    let result = state.analyzer.build_matrix(&points, &bounds, query.seed);

    HttpResponse::Ok().json(StatsResponse {
        stats: grid_stats(&result.grid),
        neighborhood_averages: neighborhood_averages(&result.grid),
        raw_point_count: result.raw_point_count,
    })
}

/// Plain-text health map download
async fn export_health_map(
    state: web::Data<AppState>,
    query: web::Query<BoundsQuery>,
) -> impl Responder {
    let (bounds, points) = match scan(&state, &query).await {
        Ok(scanned) => scanned,
        Err(response) => return response,
    };

    let result = state.analyzer.build_matrix(&points, &bounds, query.seed);

    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header(attachment("reef_health_map.txt"))
        .body(render_health_map(&result.grid))
}

/// CSV download of the sectors most in need of restoration
async fn export_restoration_priority(
    state: web::Data<AppState>,
    query: web::Query<BoundsQuery>,
) -> impl Responder {
    let (bounds, points) = match scan(&state, &query).await {
        Ok(scanned) => scanned,
        Err(response) => return response,
    };

    let roadmap = state.analyzer.build_roadmap(&points, &bounds, query.seed);

    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(attachment("restoration_priority.csv"))
        .body(render_priority_csv(&roadmap.urgent_restoration_needed))
}

fn attachment(filename: &str) -> (header::HeaderName, String) {
    (
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{}\"", filename),
    )
}
