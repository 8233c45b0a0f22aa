//! Deterministic in-memory oracle.
//!
//! Positions move linearly from an epoch at a fixed daily speed, which is
//! enough to drive the whole chart pipeline without ephemeris files.

use crate::ephemeris::oracle::{elongation, OracleError, PositionOracle};
use crate::ephemeris::types::{Body, BodyReading, HouseAngles, HouseSystem};
use std::collections::BTreeMap;

/// Julian Day of 2004-02-12 05:55 UT, the epoch of [`FixedOracle::reference`].
pub const REFERENCE_EPOCH: f64 = 2_453_047.746_53;

#[derive(Debug, Clone, Default)]
pub struct FixedOracle {
    epoch: f64,
    bodies: BTreeMap<Body, BodyReading>,
    angles: Option<HouseAngles>,
}

impl FixedOracle {
    /// An empty oracle: every body and the angles are unavailable.
    pub fn new(epoch: f64) -> Self {
        Self {
            epoch,
            bodies: BTreeMap::new(),
            angles: None,
        }
    }

    /// Ten primary bodies, angles and Placidus cusps for 2004-02-12 11:25
    /// in Akola, India.
    pub fn reference() -> Self {
        const POSITIONS: [(Body, f64, f64); 10] = [
            (Body::Sun, 322.847, 1.0114),
            (Body::Moon, 215.738, 13.8577),
            (Body::Mercury, 307.793, 1.5732),
            (Body::Venus, 4.201, 1.1745),
            (Body::Mars, 35.618, 0.6378),
            (Body::Jupiter, 166.563, -0.1105),
            (Body::Saturn, 96.835, -0.0439),
            (Body::Uranus, 332.220, 0.0570),
            (Body::Neptune, 313.241, 0.0376),
            (Body::Pluto, 261.776, 0.0222),
        ];

        let mut oracle = Self::new(REFERENCE_EPOCH).with_angles(HouseAngles {
            ascendant: 46.619,
            midheaven: 305.222,
            cusps: [
                46.619, 74.914, 99.813, 125.222, 154.448, 189.259, 226.619, 254.914, 279.813,
                305.222, 334.448, 9.259,
            ],
        });
        for (body, lon, speed) in POSITIONS {
            oracle = oracle.with_body(body, lon, speed);
        }
        oracle
    }

    pub fn with_body(mut self, body: Body, lon: f64, speed_lon: f64) -> Self {
        self.bodies.insert(body, BodyReading { lon, speed_lon });
        self
    }

    pub fn without_body(mut self, body: Body) -> Self {
        self.bodies.remove(&body);
        self
    }

    pub fn with_angles(mut self, angles: HouseAngles) -> Self {
        self.angles = Some(angles);
        self
    }

    /// Make every angle/cusp query fail.
    pub fn without_angles(mut self) -> Self {
        self.angles = None;
        self
    }

    pub fn epoch(&self) -> f64 {
        self.epoch
    }
}

impl PositionOracle for FixedOracle {
    fn body_position(&self, jd: f64, body: Body) -> Result<BodyReading, OracleError> {
        let base = self
            .bodies
            .get(&body)
            .ok_or_else(|| OracleError::unavailable(body.name(), jd, "no fixed position"))?;
        Ok(BodyReading {
            lon: (base.lon + base.speed_lon * (jd - self.epoch)).rem_euclid(360.0),
            speed_lon: base.speed_lon,
        })
    }

    fn angles(
        &self,
        jd: f64,
        _lat: f64,
        _lon: f64,
        system: HouseSystem,
    ) -> Result<HouseAngles, OracleError> {
        self.angles.ok_or_else(|| {
            OracleError::unavailable(format!("{} houses", system.name()), jd, "no fixed angles")
        })
    }

    fn lunar_phase(&self, jd: f64) -> Result<f64, OracleError> {
        let moon = self.body_position(jd, Body::Moon)?;
        let sun = self.body_position(jd, Body::Sun)?;
        Ok(elongation(&moon, &sun))
    }
}
