use crate::validation::{limit_text, require_labels, require_text, ValidationError};

use super::requests::RegisterRequest;
use super::types::UserDetails;

const MAX_EMAIL_LEN: usize = 254;
const MAX_NAME_LEN: usize = 100;
const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 128;
const MAX_NOTES_LEN: usize = 1000;
const MAX_ANIMAL_NAME_LEN: usize = 50;

/// Oldest age accepted in a visitor profile.
pub const MAX_USER_AGE: u8 = 130;
/// Maximum number of favourite animals in a visitor profile.
pub const MAX_FAVORITE_ANIMALS: usize = 20;

/// Canonical form used for storage and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates the shape of an email address.
///
/// Deliberately loose: one `@`, a non-empty local part, and a domain with at
/// least one interior dot. Deliverability is not our problem.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    require_text("email", email, MAX_EMAIL_LEN)?;

    let invalid = |reason: &str| ValidationError::Invalid {
        field: "email",
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("missing '@'"))?;

    if local.is_empty() {
        return Err(invalid("missing local part"));
    }
    if domain.contains('@') {
        return Err(invalid("more than one '@'"));
    }
    if domain.starts_with('.') || domain.ends_with('.') || !domain.contains('.') {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password",
            min: MIN_PASSWORD_LEN,
        });
    }
    if len > MAX_PASSWORD_LEN {
        return Err(ValidationError::TooLong {
            field: "password",
            max: MAX_PASSWORD_LEN,
        });
    }
    Ok(())
}

pub fn validate_user_name(name: &str) -> Result<(), ValidationError> {
    require_text("name", name.trim(), MAX_NAME_LEN)
}

/// Validates a registration request before any hashing or storage work.
pub fn validate_registration(request: &RegisterRequest) -> Result<(), ValidationError> {
    validate_email(&request.email)?;
    validate_password(&request.password)?;
    validate_user_name(&request.name)
}

/// Validates a visitor profile before it is stored.
pub fn validate_user_details(details: &UserDetails) -> Result<(), ValidationError> {
    if let Some(age) = details.age {
        if age > MAX_USER_AGE {
            return Err(ValidationError::Invalid {
                field: "age",
                reason: format!("must be at most {MAX_USER_AGE}"),
            });
        }
    }
    require_labels(
        "favorite_animals",
        &details.favorite_animals,
        MAX_FAVORITE_ANIMALS,
        MAX_ANIMAL_NAME_LEN,
    )?;
    if let Some(notes) = &details.notes {
        limit_text("notes", notes, MAX_NOTES_LEN)?;
    }
    Ok(())
}
