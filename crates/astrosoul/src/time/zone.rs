//! Time-zone resolution and local → UTC conversion.

use chrono::{Duration, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;

/// A zone or offset lookup that could not be completed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemporalError {
    #[error("Unknown time zone: {0}")]
    UnknownZone(String),
    #[error("Local time {local} cannot be represented in {zone}")]
    Unrepresentable { zone: String, local: String },
}

/// Longitude bands: (exclusive upper bound, zone). Anything east of the
/// last bound, or a non-finite longitude, resolves to UTC.
const LONGITUDE_BANDS: &[(f64, &str)] = &[
    (-100.0, "America/Denver"),
    (-85.0, "America/Chicago"),
    (-70.0, "America/New_York"),
    (-10.0, "Europe/London"),
    (20.0, "Europe/Berlin"),
    (40.0, "Europe/Moscow"),
    (80.0, "Asia/Kolkata"),
    (120.0, "Asia/Shanghai"),
    (140.0, "Asia/Tokyo"),
];

/// Coarse zone guess from longitude alone. Advisory only: this is a
/// banded approximation, not a geographic zone database.
pub fn zone_for_longitude(longitude: f64) -> &'static str {
    LONGITUDE_BANDS
        .iter()
        .find(|(upper, _)| longitude < *upper)
        .map(|(_, zone)| *zone)
        .unwrap_or("UTC")
}

/// Convert a civil local time in `zone` to UTC.
///
/// Returns the UTC timestamp and the offset (local − UTC) in seconds that
/// was applied. Ambiguous local times take the earlier instant; times in
/// a DST gap use the offset in force just before the gap.
pub fn local_to_utc(
    local: &NaiveDateTime,
    zone: &str,
) -> Result<(NaiveDateTime, i32), TemporalError> {
    let tz: Tz = zone
        .parse()
        .map_err(|_| TemporalError::UnknownZone(zone.to_string()))?;

    let zoned = match tz.from_local_datetime(local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before_gap = *local - Duration::hours(1);
            tz.from_local_datetime(&before_gap)
                .earliest()
                .map(|dt| dt + Duration::hours(1))
                .ok_or_else(|| TemporalError::Unrepresentable {
                    zone: zone.to_string(),
                    local: local.to_string(),
                })?
        }
    };

    let utc = zoned.naive_utc();
    let offset = (*local - utc).num_seconds() as i32;
    Ok((utc, offset))
}
