//! HTTP UI shell.
//!
//! Serves a static page that draws the layout and chart specs in the browser,
//! plus a JSON API the page calls on every control change. Every request is
//! answered synchronously from the shared controller; sessions live in the
//! browser and send their `SelectionState` with each event.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::chart::ChartSpec;
use crate::controller::{ChartSlot, DashboardController, InputEvent, SlotUpdate};
use crate::core::{PayloadRange, SelectionState, SiteSelection};
use crate::error::DashError;
use crate::layout::{DashboardLayout, LayoutConfig};

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Shared state for axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub controller: Arc<DashboardController>,
    pub layout: Arc<DashboardLayout>,
}

impl AppState {
    #[must_use]
    pub fn new(controller: DashboardController, layout_config: &LayoutConfig) -> Self {
        let layout = DashboardLayout::from_dataset(controller.dataset(), layout_config);
        Self {
            controller: Arc::new(controller),
            layout: Arc::new(layout),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderResponse {
    pub state: SelectionState,
    pub updates: Vec<SlotUpdate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub state: SelectionState,
    pub event: InputEvent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Deserialize)]
struct PieQuery {
    site: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScatterQuery {
    site: Option<String>,
    lo: Option<f64>,
    hi: Option<f64>,
}

/// Maps library errors onto HTTP responses.
#[derive(Debug)]
pub struct ApiError(DashError);

impl From<DashError> for ApiError {
    fn from(value: DashError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            DashError::InvalidSelection(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Creates the router with the page and JSON API routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/layout", get(layout))
        .route("/api/state/initial", get(initial_state))
        .route("/api/charts/pie", get(pie_chart))
        .route("/api/charts/scatter", get(scatter_chart))
        .route("/api/dispatch", post(dispatch))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until the listener fails.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "dashboard listening");
    }
    axum::serve(listener, create_router(state)).await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_check() -> &'static str {
    "ok"
}

async fn layout(State(state): State<AppState>) -> Json<DashboardLayout> {
    Json(state.layout.as_ref().clone())
}

async fn initial_state(State(state): State<AppState>) -> Json<RenderResponse> {
    let (selection, updates) = state.controller.initial_render();
    Json(RenderResponse {
        state: selection,
        updates,
    })
}

async fn pie_chart(
    State(state): State<AppState>,
    Query(query): Query<PieQuery>,
) -> Result<Json<ChartSpec>, ApiError> {
    let mut selection = state.controller.initial_state();
    if let Some(site) = query.site {
        selection.selected_site = SiteSelection::from(site);
    }
    render(&state, ChartSlot::PieChart, &selection)
}

async fn scatter_chart(
    State(state): State<AppState>,
    Query(query): Query<ScatterQuery>,
) -> Result<Json<ChartSpec>, ApiError> {
    let initial = state.controller.initial_state();
    let range = PayloadRange::new(
        query.lo.unwrap_or(initial.payload_range.lo),
        query.hi.unwrap_or(initial.payload_range.hi),
    )?;
    let site = query.site.map_or(SiteSelection::All, SiteSelection::from);
    let selection = SelectionState::new(site, range);
    render(&state, ChartSlot::ScatterChart, &selection)
}

async fn dispatch(
    State(state): State<AppState>,
    Json(request): Json<DispatchRequest>,
) -> Result<Json<RenderResponse>, ApiError> {
    let (selection, updates) = state.controller.dispatch(request.state, &request.event)?;
    Ok(Json(RenderResponse {
        state: selection,
        updates,
    }))
}

fn render(
    state: &AppState,
    slot: ChartSlot,
    selection: &SelectionState,
) -> Result<Json<ChartSpec>, ApiError> {
    state
        .controller
        .render_slot(slot, selection)
        .map(Json)
        .ok_or_else(|| {
            ApiError(DashError::InvalidConfig(format!(
                "no handler registered for `{}`",
                slot.component_id()
            )))
        })
}
