use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::json;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{
    app_state::AppState,
    middleware::observability_middleware,
    modules::{
        abilities::routes::ability_routes, invitations::routes::invitation_routes, matches::routes::match_routes,
        registrations::routes::registration_routes,
    },
};

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(ability_routes())
        .merge(registration_routes())
        .merge(match_routes())
        .merge(invitation_routes());

    let mut router = Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(middleware::from_fn(observability_middleware));

    if let Some(cors) = cors_layer(state.env.app.cors_allowed_origin.as_deref()) {
        router = router.layer(cors);
    }

    router.with_state(state)
}

fn cors_layer(origin: Option<&str>) -> Option<CorsLayer> {
    let origin = origin?;
    match origin.parse::<HeaderValue>() {
        Ok(value) => {
            info!(origin = %origin, "CORS enabled");
            Some(
                CorsLayer::new()
                    .allow_origin(value)
                    .allow_methods([Method::GET, Method::POST])
                    .allow_headers([header::CONTENT_TYPE]),
            )
        }
        Err(_) => {
            warn!(origin = %origin, "Ignoring invalid CORS_ALLOWED_ORIGIN");
            None
        }
    }
}

async fn hello() -> &'static str {
    "Mentor Match says hello!\n"
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_status = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "healthy",
        Err(e) => {
            warn!("Database health check failed: {}", e);
            "unhealthy"
        }
    };

    let timestamp = OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();

    Json(json!({
        "status": "ok",
        "timestamp": timestamp,
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": db_status,
        }
    }))
}
