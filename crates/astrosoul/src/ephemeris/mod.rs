pub mod fixed;
pub mod oracle;
pub mod types;

#[cfg(feature = "swiss")]
pub mod adapter;

#[cfg(feature = "swiss")]
pub use adapter::SwissEphemerisAdapter;
pub use fixed::FixedOracle;
pub use oracle::{elongation, OracleError, PositionOracle};
pub use types::{Body, BodyReading, GeoLocation, HouseAngles, HouseSystem};
