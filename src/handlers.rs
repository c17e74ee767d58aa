use crate::controller::Intent;
use crate::state::AppState;
use crate::ui::render_page;
use crate::view::View;
use axum::{Json, extract::State, response::Html};
use tokio::task;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let controller = state.controller.lock().await;
    Html(render_page(&controller.view()))
}

pub async fn get_view(State(state): State<AppState>) -> Json<View> {
    let controller = state.controller.lock().await;
    Json(controller.view())
}

// Rejected intents still answer with the current view.
pub async fn intent(State(state): State<AppState>, Json(intent): Json<Intent>) -> Json<View> {
    let mut controller = state.controller.lock().await;
    // dispatch may hit the state file
    let view = task::block_in_place(|| {
        let _ = controller.dispatch(intent);
        controller.view()
    });
    Json(view)
}
