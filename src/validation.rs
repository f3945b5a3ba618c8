use chrono::NaiveDate;

use crate::error::{AppError, Field};
use crate::models::{CreateCourseRequest, FieldUpdate, UpdateCourseRequest};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A create request whose fields passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCourse {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub fn require(field: Field, value: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::MissingField(field));
    }
    Ok(())
}

pub fn parse_date(field: Field, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| AppError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

pub fn ensure_range(start: NaiveDate, end: NaiveDate) -> Result<(), AppError> {
    if start > end {
        return Err(AppError::DateRangeInvalid { start, end });
    }
    Ok(())
}

pub fn validate_create(req: CreateCourseRequest) -> Result<ValidCourse, AppError> {
    require(Field::Name, &req.name)?;
    require(Field::StartDate, &req.start_date)?;
    require(Field::EndDate, &req.end_date)?;

    let start_date = parse_date(Field::StartDate, &req.start_date)?;
    let end_date = parse_date(Field::EndDate, &req.end_date)?;
    ensure_range(start_date, end_date)?;

    Ok(ValidCourse {
        name: req.name,
        start_date,
        end_date,
    })
}

/// Rejects update fields that are supplied but empty. Runs before any lookup
/// or parsing.
pub fn require_supplied(req: &UpdateCourseRequest) -> Result<(), AppError> {
    for (field, update) in [
        (Field::Name, &req.name),
        (Field::StartDate, &req.start_date),
        (Field::EndDate, &req.end_date),
    ] {
        if let FieldUpdate::SetTo(value) = update {
            require(field, value)?;
        }
    }
    Ok(())
}

pub fn parse_date_update(
    field: Field,
    update: &FieldUpdate<String>,
) -> Result<Option<NaiveDate>, AppError> {
    update.as_set().map(|value| parse_date(field, value)).transpose()
}
