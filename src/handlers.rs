use crate::errors::AppError;
use crate::markdown::render_markdown;
use crate::state::AppState;
use crate::ui;
use crate::view::{
    DashboardView, ExpansionState, METRIC_FIELD_PREFIX, StatusKind, StatusMessage, collect_submissions,
    render_criterion_form, render_dashboard,
};
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub client: Option<String>,
    pub open: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ClinicianQuery {
    pub client: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FlagRequest {
    pub reason: String,
}

const OFFLINE_MESSAGE: &str = "System Offline. Check Connection.";
const CLIENT_NOT_FOUND: &str = "Client not found or no active journey";

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let client_id = client_or_default(&state, query.client.as_deref());
    let journey = state
        .load_journey(&client_id)
        .await
        .map_err(|err| err.with_message(OFFLINE_MESSAGE))?;

    let mut expansion = ExpansionState::initial(&journey, state.config.expand_active);
    if let Some(index) = query.open {
        expansion.toggle(index);
    }

    info!(client_id = %client_id, phases = journey.phases.len(), "journey loaded");
    let view = render_dashboard(&journey, &expansion);
    Ok(Html(ui::render_dashboard_page(&view, &client_id, state.icons)))
}

pub async fn dashboard_view(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<DashboardView>, AppError> {
    let journey = state.load_journey(&client_id).await?;
    let expansion = ExpansionState::initial(&journey, state.config.expand_active);
    Ok(Json(render_dashboard(&journey, &expansion)))
}

pub async fn current_view(State(state): State<AppState>) -> Result<Json<DashboardView>, AppError> {
    let journey = state
        .current_journey()
        .await
        .ok_or_else(|| AppError::not_found("no journey loaded yet"))?;
    let expansion = ExpansionState::initial(&journey, state.config.expand_active);
    Ok(Json(render_dashboard(&journey, &expansion)))
}

pub async fn clinician(
    State(state): State<AppState>,
    Query(query): Query<ClinicianQuery>,
) -> (StatusCode, Html<String>) {
    let client_id = query
        .client
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let Some(client_id) = client_id else {
        return (
            StatusCode::OK,
            Html(ui::render_clinician_page("", None, None, state.icons)),
        );
    };

    let loaded = state
        .load_journey(&client_id)
        .await
        .map_err(|err| err.with_message(CLIENT_NOT_FOUND))
        .and_then(|journey| render_criterion_form(&journey));

    match loaded {
        Ok(form) => (
            StatusCode::OK,
            Html(ui::render_clinician_page(&client_id, Some(&form), None, state.icons)),
        ),
        Err(err) => {
            let status = StatusMessage {
                kind: StatusKind::Error,
                text: err.message,
            };
            (
                err.status,
                Html(ui::render_clinician_page(&client_id, None, Some(&status), state.icons)),
            )
        }
    }
}

pub async fn record_metrics(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let client_id = fields
        .iter()
        .find(|(name, _)| name == "client_id")
        .map(|(_, value)| value.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::bad_request("client_id is required"))?;

    let metric_values: Vec<(String, String)> = fields
        .into_iter()
        .filter_map(|(name, value)| {
            name.strip_prefix(METRIC_FIELD_PREFIX)
                .map(|metric| (metric.to_string(), value))
        })
        .collect();

    let submissions = collect_submissions(&client_id, &metric_values);
    let report = state.api.submit_all(&submissions).await;
    info!(
        client_id = %client_id,
        succeeded = report.succeeded,
        failed = report.failed,
        "metric submission finished"
    );

    let status = report.status_message().unwrap_or_else(|| StatusMessage {
        kind: StatusKind::Error,
        text: "No values entered.".to_string(),
    });
    Ok(Html(ui::render_clinician_page(&client_id, None, Some(&status), state.icons)))
}

pub async fn protocol(
    State(state): State<AppState>,
    Path(protocol_id): Path<String>,
) -> (StatusCode, Html<String>) {
    match state.api.fetch_protocol(&protocol_id).await {
        Ok(document) => {
            let html = render_markdown(&document.content);
            (StatusCode::OK, Html(ui::render_protocol_page(&protocol_id, Ok(&html))))
        }
        Err(err) => (
            err.status,
            Html(ui::render_protocol_page(&protocol_id, Err("Protocol not found"))),
        ),
    }
}

pub async fn flag_protocol(
    Path(protocol_id): Path<String>,
    Form(request): Form<FlagRequest>,
) -> Result<Html<String>, AppError> {
    let reason = request.reason.trim();
    if reason.is_empty() {
        return Err(AppError::bad_request("reason is required"));
    }

    info!(target: "audit", protocol_id = %protocol_id, reason = %reason, "FLAGGED_PROTOCOL");
    Ok(Html(ui::render_flag_confirmation(&protocol_id)))
}

pub async fn icons() -> Html<String> {
    Html(ui::render_icon_preview())
}

fn client_or_default(state: &AppState, requested: Option<&str>) -> String {
    requested
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(state.config.default_client_id.as_str())
        .to_string()
}
