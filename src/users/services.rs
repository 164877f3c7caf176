use lazy_static::lazy_static;
use regex::Regex;

use super::dto::RegisterUserRequest;
use crate::error::ApiError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn validate_registration(body: &RegisterUserRequest) -> Result<(), ApiError> {
    if !is_valid_email(&body.email) {
        return Err(ApiError::Validation {
            message: "Invalid request body".into(),
            issues: Some(format!("email: invalid email address `{}`", body.email)),
        });
    }
    Ok(())
}
