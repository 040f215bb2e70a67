use crate::cards::CardSide;
use failure::Fail;

/// A record failed the constraints the store enforces before writing.
#[derive(Debug, Fail, PartialEq)]
pub enum ModelError {
    #[fail(display = "{} must not be empty", field)]
    Required { field: &'static str },
    #[fail(display = "{} is longer than {} characters", field, max)]
    TooLong { field: &'static str, max: usize },
    #[fail(display = "{:?} is not a valid {}", value, field)]
    InvalidChoice { field: &'static str, value: String },
    #[fail(display = "{} is not a card {} scan under {}", path, side, dir)]
    CardPath {
        side: CardSide,
        path: String,
        dir: String,
    },
}

pub(crate) fn check_required(field: &'static str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Required { field });
    }
    Ok(())
}

/// Lengths count characters, not bytes.
pub(crate) fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.chars().count() > max {
        return Err(ModelError::TooLong { field, max });
    }
    Ok(())
}

pub(crate) fn check_opt_len(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ModelError> {
    value.map_or(Ok(()), |v| check_len(field, v, max))
}
