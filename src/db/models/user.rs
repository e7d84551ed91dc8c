use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "user_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Mentor,
    Mentee,
}

impl UserType {
    pub fn opposite(self) -> Self {
        match self {
            UserType::Mentor => UserType::Mentee,
            UserType::Mentee => UserType::Mentor,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub user_type: UserType,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 120))]
    pub display_name: String,
    pub user_type: UserType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_type() {
        assert_eq!(UserType::Mentor.opposite(), UserType::Mentee);
        assert_eq!(UserType::Mentee.opposite(), UserType::Mentor);
    }

    #[test]
    fn test_new_user_validation() {
        let ok = NewUser {
            email: "ada@example.com".to_string(),
            display_name: "Ada".to_string(),
            user_type: UserType::Mentor,
        };
        assert!(ok.validate().is_ok());

        let bad = NewUser {
            email: "not-an-email".to_string(),
            display_name: String::new(),
            user_type: UserType::Mentee,
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("display_name"));
    }
}
