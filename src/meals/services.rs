use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime, UtcOffset,
};

use crate::error::AppError;
use crate::meals::dto::MealRequest;
use crate::meals::repo_types::NewMeal;

/// Checks the required fields and normalizes `date_time`.
pub fn validate_meal(req: MealRequest) -> Result<NewMeal, AppError> {
    let meal_type = required("meal_type", req.meal_type)?;
    let food_name = required("food_name", req.food_name)?;
    let date_time = normalize_timestamp(&req.date_time)?;

    Ok(NewMeal {
        date_time,
        meal_type,
        food_name,
        calories: req.calories,
        notes: req.notes,
        image_url: req.image_url,
    })
}

fn required(field: &str, value: String) -> Result<String, AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(value)
}

/// Accepts RFC 3339 and naive ISO-8601 timestamps and returns the canonical
/// form stored in `date_time`: `YYYY-MM-DDTHH:MM:SS[.ffffff][+00:00]`.
///
/// Offset inputs are converted to UTC and carry a `+00:00` suffix; naive
/// inputs are kept as wall time. Fractions are truncated to microseconds and
/// written with six digits, or left out when zero. Text order of stored
/// values is then time order, and the first ten characters are the UTC
/// calendar date.
pub fn normalize_timestamp(raw: &str) -> Result<String, AppError> {
    let raw = raw.trim();
    let invalid = || AppError::Validation(format!("date_time is not a valid timestamp: {raw}"));

    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        let utc = ts.to_offset(UtcOffset::UTC);
        let wall = format_wall_time(PrimitiveDateTime::new(utc.date(), utc.time()))
            .map_err(|_| invalid())?;
        return Ok(format!("{wall}+00:00"));
    }

    let naive = PrimitiveDateTime::parse(
        raw,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            raw,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
    })
    .or_else(|_| {
        PrimitiveDateTime::parse(
            raw,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        )
    })
    .or_else(|_| {
        PrimitiveDateTime::parse(raw, format_description!("[year]-[month]-[day]T[hour]:[minute]"))
    })
    .map_err(|_| invalid())?;

    format_wall_time(naive).map_err(|_| invalid())
}

fn format_wall_time(dt: PrimitiveDateTime) -> Result<String, time::error::Format> {
    if dt.microsecond() == 0 {
        dt.format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second]"
        ))
    } else {
        dt.format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]"
        ))
    }
}

/// Parses a `YYYY-MM-DD` calendar date, returning it in the same form.
pub fn parse_calendar_date(raw: &str) -> Result<String, AppError> {
    let fmt = format_description!("[year]-[month]-[day]");
    let date = Date::parse(raw, fmt)
        .map_err(|_| AppError::Validation(format!("date must be YYYY-MM-DD: {raw}")))?;
    date.format(fmt)
        .map_err(|_| AppError::Validation(format!("date must be YYYY-MM-DD: {raw}")))
}
