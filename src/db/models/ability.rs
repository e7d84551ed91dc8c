use serde::Serialize;
use sqlx::types::Uuid;
use validator::ValidationError;

/// Topics a mentor can offer. Registrations may only use these tags.
pub const ABILITY_CATALOG: &[&str] = &[
    "career-guidance",
    "resume-review",
    "interview-prep",
    "web-development",
    "mobile-development",
    "data-science",
    "machine-learning",
    "cloud-infrastructure",
    "security",
    "product-management",
    "ux-design",
    "entrepreneurship",
    "leadership",
    "public-speaking",
];

pub fn is_known_ability(tag: &str) -> bool {
    ABILITY_CATALOG.contains(&tag)
}

pub fn validate_abilities(abilities: &[String]) -> Result<(), ValidationError> {
    if let Some(unknown) = abilities.iter().find(|tag| !is_known_ability(tag)) {
        let mut error = ValidationError::new("unknown_ability");
        error.message = Some(format!("Unknown ability: {}", unknown).into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct UserAbility {
    pub user_id: Uuid,
    pub ability: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_membership() {
        assert!(is_known_ability("interview-prep"));
        assert!(!is_known_ability("Interview Prep"));
    }

    #[test]
    fn test_validate_abilities_names_the_offender() {
        assert!(validate_abilities(&["leadership".to_string()]).is_ok());
        assert!(validate_abilities(&[]).is_ok());

        let err = validate_abilities(&["leadership".to_string(), "juggling".to_string()]).unwrap_err();
        assert_eq!(err.code, "unknown_ability");
        assert_eq!(err.message.as_deref(), Some("Unknown ability: juggling"));
    }
}
