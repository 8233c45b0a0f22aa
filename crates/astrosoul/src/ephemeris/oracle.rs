use crate::ephemeris::types::{Body, BodyReading, HouseAngles, HouseSystem};
use thiserror::Error;

/// Errors that can occur when querying a position oracle
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Body not supported by this oracle: {0}")]
    UnknownBody(String),
    #[error("{what} unavailable at jd {jd}: {message}")]
    Unavailable {
        what: String,
        jd: f64,
        message: String,
    },
}

impl OracleError {
    pub fn unavailable(what: impl Into<String>, jd: f64, message: impl Into<String>) -> Self {
        OracleError::Unavailable {
            what: what.into(),
            jd,
            message: message.into(),
        }
    }
}

/// Source of raw ecliptic positions.
///
/// Implementations are shared read-only across requests, so every query
/// takes `&self`.
pub trait PositionOracle: Send + Sync {
    /// Ecliptic longitude and speed of `body` at Julian Day `jd` (UT).
    fn body_position(&self, jd: f64, body: Body) -> Result<BodyReading, OracleError>;

    /// Ascendant, midheaven and the twelve cusps for a place and instant.
    fn angles(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        system: HouseSystem,
    ) -> Result<HouseAngles, OracleError>;

    /// Lunar phase at `jd`, as the Moon–Sun elongation in degrees [0, 360).
    fn lunar_phase(&self, jd: f64) -> Result<f64, OracleError>;
}

/// Moon–Sun elongation from two body readings, normalized to [0, 360).
pub fn elongation(moon: &BodyReading, sun: &BodyReading) -> f64 {
    crate::western::normalize_degrees(moon.lon - sun.lon)
}

impl<T: PositionOracle + ?Sized> PositionOracle for &T {
    fn body_position(&self, jd: f64, body: Body) -> Result<BodyReading, OracleError> {
        (**self).body_position(jd, body)
    }

    fn angles(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        system: HouseSystem,
    ) -> Result<HouseAngles, OracleError> {
        (**self).angles(jd, lat, lon, system)
    }

    fn lunar_phase(&self, jd: f64) -> Result<f64, OracleError> {
        (**self).lunar_phase(jd)
    }
}

impl<T: PositionOracle + ?Sized> PositionOracle for Box<T> {
    fn body_position(&self, jd: f64, body: Body) -> Result<BodyReading, OracleError> {
        (**self).body_position(jd, body)
    }

    fn angles(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        system: HouseSystem,
    ) -> Result<HouseAngles, OracleError> {
        (**self).angles(jd, lat, lon, system)
    }

    fn lunar_phase(&self, jd: f64) -> Result<f64, OracleError> {
        (**self).lunar_phase(jd)
    }
}
