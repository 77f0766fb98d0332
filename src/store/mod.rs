//! Thin persistence helpers, one module per model.
//!
//! Listing helpers return rows in each model's default ordering. Uniqueness
//! and foreign-key violations come back as [`AppError::Constraint`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, AppResult};

pub mod category;
pub mod comment;
pub mod genre;
pub mod review;
pub mod title;
pub mod user;

pub const SLUG_MAX_LENGTH: usize = 50;

static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug pattern"));

pub(crate) fn validate_slug(slug: &str) -> AppResult<()> {
    if slug.len() > SLUG_MAX_LENGTH {
        return Err(AppError::param_error(format!(
            "slug must be at most {} characters",
            SLUG_MAX_LENGTH
        )));
    }
    if !SLUG_RE.is_match(slug) {
        return Err(AppError::param_error(
            "slug may only contain letters, numbers, underscores or hyphens",
        ));
    }
    Ok(())
}
