use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::{
    validate_abilities, AbilityRepository, AvailabilityRepository, DatabaseError, NewUser, User, UserRepository,
    UserType,
};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::matching::TimeSlot;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 120))]
    pub display_name: String,
    pub user_type: UserType,
    #[serde(default)]
    #[validate(custom(function = "validate_abilities"))]
    pub abilities: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub availability: Vec<TimeSlot>,
}

impl RegistrationPayload {
    /// Field validation plus the rule that only mentors carry abilities.
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        if self.user_type == UserType::Mentee && !self.abilities.is_empty() {
            return Err(AppError::Validation("Only mentors can declare abilities".to_string()));
        }
        Ok(())
    }

    fn new_user(&self) -> NewUser {
        NewUser {
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            user_type: self.user_type,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub user: User,
    pub ability_count: usize,
    pub slot_count: usize,
}

/// Stores a registration. The user's abilities and availability are replaced
/// wholesale in the same transaction.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegistrationPayload>,
) -> AppResult<(StatusCode, Json<RegistrationResponse>)> {
    payload.check()?;

    let mut tx = state.db.begin().await.map_err(DatabaseError::from)?;
    let user = UserRepository::upsert_user(&mut tx, &payload.new_user()).await?;
    let ability_count = AbilityRepository::replace_for_user(&mut tx, user.id, &payload.abilities).await?;
    let slot_count = AvailabilityRepository::replace_for_user(&mut tx, user.id, &payload.availability).await?;
    tx.commit().await.map_err(DatabaseError::from)?;

    info!(
        user_id = %user.id,
        user_type = ?user.user_type,
        ability_count,
        slot_count,
        "Registration stored"
    );

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            user,
            ability_count,
            slot_count,
        }),
    ))
}
