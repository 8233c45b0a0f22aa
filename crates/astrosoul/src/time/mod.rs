//! Temporal normalization: free-form date/time text to a UTC instant and
//! its Julian Day.

pub mod julian;
pub mod zone;

pub use julian::{julian_day, julian_day_from_utc, J2000};
pub use zone::{local_to_utc, zone_for_longitude, TemporalError};

use crate::error::ChartError;
use crate::ephemeris::GeoLocation;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const TIME_FORMATS: &[&str] = &[
    "%H:%M:%S%.f",
    "%H:%M:%S",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
    "%I:%M%p",
];

/// Timestamp layout used in chart metadata.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A birth instant resolved to universal time.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInstant {
    pub local: NaiveDateTime,
    pub utc: NaiveDateTime,
    /// Zone that was requested or guessed from longitude.
    pub zone: String,
    /// Offset applied (local − UTC), zero under the fallback.
    pub utc_offset_seconds: i32,
    /// True when the zone could not be applied and local time was taken as UTC.
    pub zone_fallback: bool,
    pub julian_day: f64,
}

pub fn parse_date(text: &str) -> Result<NaiveDate, ChartError> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .ok_or_else(|| ChartError::invalid_input(format!("Unrecognized date: {:?}", text)))
}

pub fn parse_time(text: &str) -> Result<NaiveTime, ChartError> {
    let text = text.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
        .ok_or_else(|| ChartError::invalid_input(format!("Unrecognized time: {:?}", text)))
}

/// Parse date and time text into a civil local timestamp.
pub fn parse_local(date: &str, time: &str) -> Result<NaiveDateTime, ChartError> {
    Ok(parse_date(date)?.and_time(parse_time(time)?))
}

/// Resolve a local birth time to UTC and a Julian Day.
///
/// The zone is `timezone` when given, otherwise a longitude-band guess.
/// If the zone cannot be applied the local time is taken as UTC; this is
/// the only place that fallback is decided.
pub fn resolve_instant(
    date: &str,
    time: &str,
    timezone: Option<&str>,
    location: Option<&GeoLocation>,
) -> Result<ResolvedInstant, ChartError> {
    let local = parse_local(date, time)?;
    let zone = match timezone.map(str::trim).filter(|tz| !tz.is_empty()) {
        Some(tz) => tz.to_string(),
        None => location
            .map(|loc| zone_for_longitude(loc.lon))
            .unwrap_or("UTC")
            .to_string(),
    };

    let (utc, utc_offset_seconds, zone_fallback) = match local_to_utc(&local, &zone) {
        Ok((utc, offset)) => (utc, offset, false),
        Err(e) => {
            log::warn!("{}; treating {} as UTC", e, local);
            (local, 0, true)
        }
    };

    let julian_day = julian_day_from_utc(&utc);
    log::debug!(
        "resolved {} [{}] -> {} UTC, jd {:.5}",
        local,
        zone,
        utc,
        julian_day
    );

    Ok(ResolvedInstant {
        local,
        utc,
        zone,
        utc_offset_seconds,
        zone_fallback,
        julian_day,
    })
}
