use axum::{routing::post, Router};

use super::handlers::register;
use crate::app_state::AppState;

pub fn registration_routes() -> Router<AppState> {
    Router::new().route("/registrations", post(register))
}
