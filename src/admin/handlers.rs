use axum::{
    extract::State,
    response::Html,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::extractors::AdminAccess;
use crate::{
    error::AppError,
    plans::{dto::PlanListResponse, services},
    state::AppState,
};

const ADMIN_PAGE: &str = include_str!("../../templates/admin.html");

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_page))
        .route("/api/admin/list", get(list_plans))
}

/// GET /admin?token=...
///
/// The page itself holds no data; it fetches the list endpoint with the same
/// token.
#[instrument(skip_all)]
pub async fn admin_page(_access: AdminAccess) -> Html<&'static str> {
    Html(ADMIN_PAGE)
}

/// GET /api/admin/list?token=...
#[instrument(skip_all)]
pub async fn list_plans(
    State(state): State<AppState>,
    _access: AdminAccess,
) -> Result<Json<PlanListResponse>, AppError> {
    let items = services::list_all(&state.db).await?;
    info!(count = items.len(), "plans listed");
    Ok(Json(PlanListResponse { items }))
}
