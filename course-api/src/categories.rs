use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use course_catalog::Category;

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}", get(get_category))
}

/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(state.categories.find_all().await?))
}

/// GET /categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<Json<Category>, AppError> {
    Ok(Json(state.categories.find_by_id(category_id).await?))
}
