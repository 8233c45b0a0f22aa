use crate::aspects::Aspect;
use crate::ephemeris::{Body, GeoLocation, HouseSystem};
use crate::rounding::{round3, round5};
use crate::western::{sign_position, Sign};
use serde::{Deserialize, Serialize};

/// Birth event as received from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    pub name: String,
    pub date: String,
    pub time: String,
    pub city: String,
    #[serde(default)]
    pub coordinates: Option<GeoLocation>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Knobs for chart assembly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChartOptions {
    pub house_system: HouseSystem,
    pub include_minor_bodies: bool,
}

/// An angle of the chart (ascendant, midheaven, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnglePoint {
    #[serde(serialize_with = "round3")]
    pub longitude: f64,
    pub sign: Sign,
    pub degree_in_sign: f64,
}

impl AnglePoint {
    pub fn new(longitude: f64) -> Self {
        let position = sign_position(longitude);
        Self {
            longitude,
            sign: position.sign,
            degree_in_sign: position.degree_in_sign,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPosition {
    pub planet: Body,
    pub symbol: String,
    #[serde(serialize_with = "round3")]
    pub longitude: f64,
    pub sign: Sign,
    pub degree_in_sign: f64,
    /// Degrees per day
    #[serde(serialize_with = "round3")]
    pub speed: f64,
    pub house: u8,
    pub is_retrograde: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseCusp {
    pub house: u8,
    #[serde(serialize_with = "round3")]
    pub longitude: f64,
    pub sign: Sign,
    pub degree_in_sign: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetadata {
    pub name: String,
    pub city: String,
    #[serde(serialize_with = "round5")]
    pub julian_day: f64,
    pub local_time: String,
    pub utc_time: String,
    pub timezone: String,
    pub utc_offset_seconds: i32,
    /// Local time was taken as UTC because the zone could not be applied
    pub timezone_fallback: bool,
    pub house_system: HouseSystem,
    /// Houses are the flat fallback, not the requested house system
    pub houses_degraded: bool,
    pub coordinates: GeoLocation,
}

/// A fully assembled natal chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub ascendant: AnglePoint,
    pub midheaven: AnglePoint,
    pub descendant: AnglePoint,
    pub imum_coeli: AnglePoint,
    pub planets: Vec<PlanetPosition>,
    pub houses: Vec<HouseCusp>,
    pub aspects: Vec<Aspect>,
    pub metadata: ChartMetadata,
}

impl Chart {
    /// Body longitudes in chart order.
    pub fn longitudes(&self) -> Vec<(Body, f64)> {
        self.planets.iter().map(|p| (p.planet, p.longitude)).collect()
    }

    pub fn planet(&self, body: Body) -> Option<&PlanetPosition> {
        self.planets.iter().find(|p| p.planet == body)
    }

    pub fn house(&self, number: u8) -> Option<&HouseCusp> {
        self.houses.iter().find(|h| h.house == number)
    }
}
