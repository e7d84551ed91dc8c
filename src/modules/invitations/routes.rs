use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{list_invitations, send_invitation};
use crate::app_state::AppState;

pub fn invitation_routes() -> Router<AppState> {
    Router::new()
        .route("/invitations", post(send_invitation))
        .route("/users/{user_id}/invitations", get(list_invitations))
}
