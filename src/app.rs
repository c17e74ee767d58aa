use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/view", get(handlers::get_view))
        .route("/api/intent", post(handlers::intent))
        .with_state(state)
}
