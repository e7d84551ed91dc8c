use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::{AbilityRepository, AvailabilityRepository, AvailabilitySlot, User, UserRepository, UserType};
use crate::error::{AppError, AppResult};
use crate::matching::{self, AvailabilityRecord, MatchCandidate, MatchInput, Participant, TimeSlot, WeekKey};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesResponse {
    pub week_key: WeekKey,
    pub matches: Vec<MatchCandidate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub user_id: Uuid,
    pub week_key: WeekKey,
    pub availability: Vec<TimeSlot>,
}

impl From<User> for Participant {
    fn from(user: User) -> Self {
        Participant {
            id: user.id,
            email: user.email,
            user_type: user.user_type,
        }
    }
}

pub(crate) fn current_week(state: &AppState) -> WeekKey {
    WeekKey::current(state.env.matching.week_key_offset)
}

pub(crate) async fn require_user(state: &AppState, user_id: Uuid) -> AppResult<User> {
    UserRepository::get_user_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))
}

fn to_records(rows: &[AvailabilitySlot]) -> AppResult<Vec<AvailabilityRecord>> {
    rows.iter()
        .map(|row| {
            AvailabilityRecord::try_from(row).map_err(|err| {
                error!(slot_id = %row.id, error = %err, "Stored availability slot is invalid");
                AppError::InternalServerError("Stored availability is corrupt".to_string())
            })
        })
        .collect()
}

/// Up to five overlapping windows with opposite-type users, spread across days.
pub async fn get_matches(State(state): State<AppState>, Path(user_id): Path<Uuid>) -> AppResult<Json<MatchesResponse>> {
    let requester = require_user(&state, user_id).await?;
    let week = current_week(&state);
    let partner_type = requester.user_type.opposite();

    let partners = UserRepository::list_users_by_type(&state.db, partner_type).await?;
    let mut rows = AvailabilityRepository::list_for_user_from_week(&state.db, requester.id, week.monday()).await?;
    rows.extend(AvailabilityRepository::list_for_type_from_week(&state.db, partner_type, week.monday()).await?);
    let availability = to_records(&rows)?;

    let abilities = match requester.user_type {
        UserType::Mentee => {
            let mentor_ids: Vec<Uuid> = partners.iter().map(|p| p.id).collect();
            AbilityRepository::list_for_users(&state.db, &mentor_ids).await?
        }
        UserType::Mentor => HashMap::new(),
    };

    let participants: Vec<Participant> = std::iter::once(requester)
        .chain(partners)
        .map(Participant::from)
        .collect();

    let matches = matching::find_matches(&MatchInput {
        requester_id: user_id,
        current_week: week,
        participants: &participants,
        availability: &availability,
        abilities: &abilities,
        policy: state.env.matching.dedup_policy,
    })?;

    debug!(user_id = %user_id, week_key = %week, count = matches.len(), "Matches served");

    Ok(Json(MatchesResponse { week_key: week, matches }))
}

/// The user's stored slots from the current week on.
pub async fn get_availability(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<AvailabilityResponse>> {
    let user = require_user(&state, user_id).await?;
    let week = current_week(&state);
    let rows = AvailabilityRepository::list_for_user_from_week(&state.db, user.id, week.monday()).await?;
    let availability = to_records(&rows)?.into_iter().map(|record| record.slot).collect();

    Ok(Json(AvailabilityResponse {
        user_id: user.id,
        week_key: week,
        availability,
    }))
}
