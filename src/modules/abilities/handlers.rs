use axum::Json;
use serde::Serialize;

use crate::db::ABILITY_CATALOG;

#[derive(Debug, Serialize)]
pub struct AbilityCatalogResponse {
    pub abilities: &'static [&'static str],
}

pub async fn list_abilities() -> Json<AbilityCatalogResponse> {
    Json(AbilityCatalogResponse {
        abilities: ABILITY_CATALOG,
    })
}
