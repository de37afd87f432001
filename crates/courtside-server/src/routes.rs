// HTTP routes: the dashboard page, dropdown options, chart rendering,
// health, and the WebSocket upgrade.

use crate::protocol::{ChartRequest, ChartResponse};
use crate::render::render_isolated;
use crate::ws;
use chrono::{DateTime, Utc};
use courtside_core::analytics::{dashboard_options, DashboardOptions};
use courtside_core::dataset::{DataSource, Dataset, PlayerTable};
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::warn;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::Filter;

/// The dashboard page.
pub const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Largest accepted `POST /api/chart` body.
const MAX_REQUEST_BYTES: u64 = 16 * 1024;

/// Shared, read-only state handed to every request.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub table: Arc<PlayerTable>,
    pub options: Arc<DashboardOptions>,
    pub source: Arc<DataSource>,
    pub conversion_errors: usize,
    pub loaded_at: DateTime<Utc>,
}

impl AppContext {
    pub fn new(dataset: Dataset) -> Self {
        let options = dashboard_options(&dataset.table);
        AppContext {
            table: Arc::new(dataset.table),
            options: Arc::new(options),
            source: Arc::new(dataset.source),
            conversion_errors: dataset.conversion_errors.len(),
            loaded_at: Utc::now(),
        }
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "ok",
            rows: self.table.len(),
            source: self.source.to_string(),
            fallback: *self.source == DataSource::Fallback,
            conversion_errors: self.conversion_errors,
            loaded_at: self.loaded_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub rows: usize,
    pub source: String,
    pub fallback: bool,
    pub conversion_errors: usize,
    pub loaded_at: String,
}

/// All routes, wrapped in request tracing.
pub fn routes(
    ctx: AppContext,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let ctx_filter = warp::any().map(move || ctx.clone());

    let index = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(INDEX_HTML));

    let options = warp::path!("api" / "options")
        .and(warp::get())
        .and(ctx_filter.clone())
        .map(|ctx: AppContext| warp::reply::json(&*ctx.options));

    let chart = warp::path!("api" / "chart")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_REQUEST_BYTES))
        .and(warp::body::bytes())
        .and(ctx_filter.clone())
        .and_then(handle_chart);

    let health = warp::path!("health")
        .and(warp::get())
        .and(ctx_filter.clone())
        .map(|ctx: AppContext| warp::reply::json(&ctx.health()));

    let socket = warp::path!("ws")
        .and(warp::ws())
        .and(ctx_filter)
        .map(|upgrade: warp::ws::Ws, ctx: AppContext| {
            let table = Arc::clone(&ctx.table);
            upgrade.on_upgrade(move |socket| ws::serve_socket(socket, table))
        });

    index
        .or(options)
        .or(chart)
        .or(health)
        .or(socket)
        .with(warp::trace::request())
}

/// `POST /api/chart`. A body that is not a valid `ChartRequest` gets a 400
/// with a placeholder figure, so the page can show the problem in place.
async fn handle_chart(body: Bytes, ctx: AppContext) -> Result<impl warp::Reply, Infallible> {
    let (status, response) = match serde_json::from_slice::<ChartRequest>(&body) {
        Ok(request) => (StatusCode::OK, render_isolated(ctx.table, request).await),
        Err(e) => {
            warn!("malformed chart request body: {e}");
            (StatusCode::BAD_REQUEST, ChartResponse::invalid(e))
        }
    };
    Ok(warp::reply::with_status(warp::reply::json(&response), status))
}
