use axum::{routing::get, Router};

use super::handlers::list_abilities;
use crate::app_state::AppState;

pub fn ability_routes() -> Router<AppState> {
    Router::new().route("/abilities", get(list_abilities))
}
