mod participants;
mod remove;

use axum::{routing::{delete, get}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/participants", get(participants::participants))
        .route("/{user_id}", delete(remove::remove_user))
}
