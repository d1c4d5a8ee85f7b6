use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/clinician", get(handlers::clinician))
        .route("/clinician/record", post(handlers::record_metrics))
        .route("/protocol/:protocol_id", get(handlers::protocol))
        .route("/protocol/:protocol_id/flag", post(handlers::flag_protocol))
        .route("/icons", get(handlers::icons))
        .route("/api/view/current", get(handlers::current_view))
        .route("/api/view/:client_id", get(handlers::dashboard_view))
        .with_state(state)
}
