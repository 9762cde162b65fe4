use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use super::error::ApiError;
use super::figure::Figure;
use super::page::{self, Bootstrap};
use super::AppState;
use crate::data::filter::Selection;
use crate::data::series::build_chart;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/options", get(options))
        .route("/api/figure", post(figure))
        .with_state(state)
}

async fn index(State(st): State<AppState>) -> Response {
    match page::render(&Bootstrap::new(&st.options)) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            log::error!("failed to render dashboard page: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        }
    }
}

async fn healthz() -> impl IntoResponse {
    Json(json!({"ok": true}))
}

async fn options(State(st): State<AppState>) -> Response {
    Json(Bootstrap::new(&st.options)).into_response()
}

async fn figure(
    State(st): State<AppState>,
    Json(selection): Json<Selection>,
) -> Result<Json<Figure>, ApiError> {
    log::info!(
        "{} {} {} {:?}",
        selection.item_id,
        selection.sex_code,
        selection.age_code,
        selection.years
    );
    selection.validate()?;

    let chart = build_chart(&st.table, &selection);
    Ok(Json(Figure::from_chart(&chart, &st.colors)))
}
