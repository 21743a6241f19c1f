//! Field rules for create and update bodies.

use crate::error::AppError;
use crate::model::{NewUser, UserUpdate};
use regex::Regex;
use std::sync::LazyLock;

/// Longest accepted value for any text column.
pub const MAX_TEXT_LEN: usize = 255;
pub const MAX_AGE: i64 = 150;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

pub struct RequestValidator;

impl RequestValidator {
    /// All nine fields are present by construction; check their contents.
    pub fn validate_new(user: &NewUser) -> Result<(), AppError> {
        validate_text("first_name", &user.first_name)?;
        validate_text("last_name", &user.last_name)?;
        validate_text("company_name", &user.company_name)?;
        validate_text("city", &user.city)?;
        validate_text("state", &user.state)?;
        validate_text("email", &user.email)?;
        validate_text("web", &user.web)?;
        if !EMAIL.is_match(&user.email) {
            return Err(AppError::Validation("email must be a valid email".into()));
        }
        if user.zip < 0 {
            return Err(AppError::Validation("zip must be at least 0".into()));
        }
        validate_age(user.age)
    }

    pub fn validate_update(changes: &UserUpdate) -> Result<(), AppError> {
        validate_text("first_name", &changes.first_name)?;
        validate_text("last_name", &changes.last_name)?;
        validate_age(changes.age)
    }
}

fn validate_text(col: &str, v: &str) -> Result<(), AppError> {
    if v.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", col)));
    }
    if v.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            col, MAX_TEXT_LEN
        )));
    }
    Ok(())
}

fn validate_age(age: i64) -> Result<(), AppError> {
    if !(0..=MAX_AGE).contains(&age) {
        return Err(AppError::Validation(format!("age must be between 0 and {}", MAX_AGE)));
    }
    Ok(())
}
