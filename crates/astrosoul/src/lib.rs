//! Natal chart computation: birth time and place to ecliptic positions,
//! houses, aspects and two-chart compatibility.
//!
//! Raw positions come from an injected [`PositionOracle`]; everything else
//! (time normalization, sign and house classification, aspect matching and
//! scoring) is computed here.

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod rounding;
pub mod scoring;
pub mod time;
pub mod western;

pub use aspects::{Aspect, AspectCalculator, AspectKind, AspectStrength, CrossAspect};
pub use chart::{BirthData, Chart, ChartAssembler, ChartOptions};
pub use ephemeris::{Body, FixedOracle, GeoLocation, HouseSystem, OracleError, PositionOracle};
pub use error::ChartError;
pub use scoring::{AdvancedAnalysis, CompatibilityReport, MatchLabel};
pub use western::{Element, Sign};

#[cfg(feature = "swiss")]
pub use ephemeris::SwissEphemerisAdapter;
