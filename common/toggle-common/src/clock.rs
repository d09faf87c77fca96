use time::{macros::format_description, OffsetDateTime};

use crate::ToggleError;

/// Current UTC time as ISO-8601 with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`.
pub fn now_iso8601() -> Result<String, ToggleError> {
    format_iso8601(OffsetDateTime::now_utc())
}

pub fn format_iso8601(at: OffsetDateTime) -> Result<String, ToggleError> {
    let at = at.to_offset(time::UtcOffset::UTC);
    let formatted = at.format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ))?;
    Ok(formatted)
}
