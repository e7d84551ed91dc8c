use axum::{routing::get, Router};

use super::handlers::{get_availability, get_matches};
use crate::app_state::AppState;

pub fn match_routes() -> Router<AppState> {
    Router::new()
        .route("/users/{user_id}/matches", get(get_matches))
        .route("/users/{user_id}/availability", get(get_availability))
}
