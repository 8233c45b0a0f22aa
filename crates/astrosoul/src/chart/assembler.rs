use crate::aspects::AspectCalculator;
use crate::chart::types::{
    AnglePoint, BirthData, Chart, ChartMetadata, ChartOptions, HouseCusp, PlanetPosition,
};
use crate::ephemeris::{Body, BodyReading, GeoLocation, HouseAngles, PositionOracle};
use crate::error::ChartError;
use crate::time::{resolve_instant, ResolvedInstant, TIMESTAMP_FORMAT};
use crate::western::{flat_cusps, house_of, normalize_degrees, sign_position};

/// Builds charts from birth data against an injected position oracle.
///
/// Holds no per-request state, so one assembler can serve concurrent
/// requests when its oracle is shareable.
#[derive(Debug, Clone)]
pub struct ChartAssembler<O> {
    oracle: O,
    options: ChartOptions,
}

/// Angles and cusps with a flag telling whether they came from the oracle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartAngles {
    pub angles: HouseAngles,
    pub degraded: bool,
}

impl<O: PositionOracle> ChartAssembler<O> {
    pub fn new(oracle: O) -> Self {
        Self::with_options(oracle, ChartOptions::default())
    }

    pub fn with_options(oracle: O, options: ChartOptions) -> Self {
        Self { oracle, options }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Assemble one complete chart.
    ///
    /// Coordinates are required and checked before anything else. A body
    /// the oracle cannot place is left out; failed angle/cusp queries fall
    /// back to flat houses from a zero ascendant and midheaven.
    pub fn assemble(&self, birth: &BirthData) -> Result<Chart, ChartError> {
        let location = require_coordinates(birth)?;
        let instant = resolve_instant(
            &birth.date,
            &birth.time,
            birth.timezone.as_deref(),
            Some(&location),
        )?;
        if !instant.julian_day.is_finite() {
            return Err(ChartError::computation(format!(
                "non-finite julian day for {}",
                instant.utc
            )));
        }
        let jd = instant.julian_day;

        let ChartAngles { angles, degraded } = self.chart_angles(jd, &location);
        let cusps = angles.cusps;

        let bodies = self.body_readings(jd, self.bodies());
        let planets: Vec<PlanetPosition> = bodies
            .iter()
            .map(|(body, reading)| {
                let position = sign_position(reading.lon);
                PlanetPosition {
                    planet: *body,
                    symbol: body.symbol().to_string(),
                    longitude: reading.lon,
                    sign: position.sign,
                    degree_in_sign: position.degree_in_sign,
                    speed: reading.speed_lon,
                    house: house_of(reading.lon, &cusps),
                    is_retrograde: reading.speed_lon < 0.0,
                }
            })
            .collect();

        let houses = cusps
            .iter()
            .enumerate()
            .map(|(i, cusp)| {
                let position = sign_position(*cusp);
                HouseCusp {
                    house: i as u8 + 1,
                    longitude: *cusp,
                    sign: position.sign,
                    degree_in_sign: position.degree_in_sign,
                }
            })
            .collect();

        let longitudes: Vec<(Body, f64)> = planets.iter().map(|p| (p.planet, p.longitude)).collect();
        let aspects = AspectCalculator::standard().compute_chart_aspects(&longitudes);

        log::debug!(
            "chart for {:?}: {} bodies, {} aspects, houses degraded: {}",
            birth.name,
            planets.len(),
            aspects.len(),
            degraded
        );

        Ok(Chart {
            ascendant: AnglePoint::new(angles.ascendant),
            midheaven: AnglePoint::new(angles.midheaven),
            descendant: AnglePoint::new(normalize_degrees(angles.ascendant + 180.0)),
            imum_coeli: AnglePoint::new(normalize_degrees(angles.midheaven + 180.0)),
            planets,
            houses,
            aspects,
            metadata: self.metadata(birth, &instant, location, degraded),
        })
    }

    /// Bodies this assembler queries, primary first.
    pub fn bodies(&self) -> Vec<Body> {
        let mut bodies = Body::PRIMARY.to_vec();
        if self.options.include_minor_bodies {
            bodies.extend(Body::MINOR);
        }
        bodies
    }

    /// Query each body, dropping the ones the oracle cannot place.
    pub fn body_readings(&self, jd: f64, bodies: Vec<Body>) -> Vec<(Body, BodyReading)> {
        bodies
            .into_iter()
            .filter_map(|body| match self.oracle.body_position(jd, body) {
                Ok(reading) if reading.lon.is_finite() && reading.speed_lon.is_finite() => {
                    Some((body, reading))
                }
                Ok(_) => {
                    log::warn!("Skipping {}: non-finite position", body);
                    None
                }
                Err(e) => {
                    log::warn!("Skipping {}: {}", body, e);
                    None
                }
            })
            .collect()
    }

    /// Angles and cusps from the oracle, or the flat fallback when the
    /// oracle cannot supply them.
    pub fn chart_angles(&self, jd: f64, location: &GeoLocation) -> ChartAngles {
        let queried = self
            .oracle
            .angles(jd, location.lat, location.lon, self.options.house_system);
        match queried {
            Ok(angles) if all_finite(&angles) => ChartAngles {
                angles: HouseAngles {
                    ascendant: normalize_degrees(angles.ascendant),
                    midheaven: normalize_degrees(angles.midheaven),
                    cusps: angles.cusps.map(normalize_degrees),
                },
                degraded: false,
            },
            Ok(_) => {
                log::warn!("Non-finite house angles; using flat houses");
                degraded_angles()
            }
            Err(e) => {
                log::warn!("{}; using flat houses", e);
                degraded_angles()
            }
        }
    }

    fn metadata(
        &self,
        birth: &BirthData,
        instant: &ResolvedInstant,
        location: GeoLocation,
        houses_degraded: bool,
    ) -> ChartMetadata {
        ChartMetadata {
            name: birth.name.clone(),
            city: birth.city.clone(),
            julian_day: instant.julian_day,
            local_time: instant.local.format(TIMESTAMP_FORMAT).to_string(),
            utc_time: instant.utc.format(TIMESTAMP_FORMAT).to_string(),
            timezone: instant.zone.clone(),
            utc_offset_seconds: instant.utc_offset_seconds,
            timezone_fallback: instant.zone_fallback,
            house_system: self.options.house_system,
            houses_degraded,
            coordinates: location,
        }
    }
}

/// Coordinates are mandatory for every chart operation.
pub(crate) fn require_coordinates(birth: &BirthData) -> Result<GeoLocation, ChartError> {
    birth
        .coordinates
        .ok_or_else(|| ChartError::invalid_input("Coordinates are required"))
}

fn all_finite(angles: &HouseAngles) -> bool {
    angles.ascendant.is_finite()
        && angles.midheaven.is_finite()
        && angles.cusps.iter().all(|c| c.is_finite())
}

/// Zero ascendant and midheaven with flat cusps.
fn degraded_angles() -> ChartAngles {
    ChartAngles {
        angles: HouseAngles {
            ascendant: 0.0,
            midheaven: 0.0,
            cusps: flat_cusps(0.0, 0.0),
        },
        degraded: true,
    }
}
