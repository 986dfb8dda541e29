use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{PlanIn, SubmitResponse},
    services,
};
use crate::{error::AppError, state::AppState};

const SUBMIT_BODY_LIMIT: usize = 64 * 1024;
pub const MSG_BODY_TOO_LARGE: &str = "入力内容が長すぎます。内容を短くしてもう一度送信してください。";

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/api/submit", post(submit_plan))
        .layer(DefaultBodyLimit::max(SUBMIT_BODY_LIMIT))
}

/// POST /api/submit
#[instrument(skip(state, payload))]
pub async fn submit_plan(
    State(state): State<AppState>,
    payload: Result<Json<PlanIn>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Json(plan) = payload.map_err(rejection_to_validation)?;

    let id = services::submit(&state.db, &plan).await?;
    info!(
        plan_id = id,
        windows = plan.availabilities.len(),
        "plan submitted"
    );
    Ok(Json(SubmitResponse { ok: true }))
}

fn rejection_to_validation(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Validation(MSG_BODY_TOO_LARGE.into())
    } else {
        AppError::Validation(rejection.body_text())
    }
}
