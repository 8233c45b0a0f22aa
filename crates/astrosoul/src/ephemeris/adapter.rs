use crate::ephemeris::oracle::{elongation, OracleError, PositionOracle};
use crate::ephemeris::types::{Body, BodyReading, HouseAngles, HouseSystem};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};
use swisseph::{AscMc, Cusp};

/// Default location of the Swiss Ephemeris data files
pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

// FLG_SWIEPH = 2 (use Swiss Ephemeris files), FLG_SPEED = 256
const CALC_FLAGS: i32 = 2 | 256;

thread_local! {
    // The C library keeps its data path per thread, so each thread that
    // queries must have it applied once.
    static APPLIED_PATH: RefCell<Option<String>> = RefCell::new(None);
}

/// Swiss Ephemeris body codes
fn body_code(body: Body) -> u32 {
    match body {
        Body::Sun => 0,
        Body::Moon => 1,
        Body::Mercury => 2,
        Body::Venus => 3,
        Body::Mars => 4,
        Body::Jupiter => 5,
        Body::Saturn => 6,
        Body::Uranus => 7,
        Body::Neptune => 8,
        Body::Pluto => 9,
        Body::NorthNode => 11, // TRUE_NODE
        Body::Chiron => 15,
        Body::Ceres => 17,
        Body::Pallas => 18,
        Body::Juno => 19,
    }
}

/// House system selector byte
fn house_system_byte(system: HouseSystem) -> u8 {
    match system {
        HouseSystem::Placidus => b'P',
        HouseSystem::Koch => b'K',
        HouseSystem::Equal => b'E',
        HouseSystem::WholeSign => b'W',
        HouseSystem::Regiomontanus => b'R',
        HouseSystem::Campanus => b'C',
        HouseSystem::Porphyry => b'O',
    }
}

/// Swiss Ephemeris adapter implementation
///
/// Holds no mutable state; one instance is built at startup from the
/// configured data path and shared by every request.
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    /// `ephemeris_path` as handed to the C library
    path_str: String,
}

impl SwissEphemerisAdapter {
    /// Create an adapter reading data files from `ephemeris_path`.
    pub fn new(ephemeris_path: impl Into<PathBuf>) -> Result<Self, OracleError> {
        let path = ephemeris_path.into();
        let path_str = match path.to_str() {
            Some(s) if !s.contains('\0') => s.to_string(),
            _ => {
                return Err(OracleError::FileNotFound {
                    path: path.display().to_string(),
                    message: "Ephemeris path is not valid UTF-8 or contains a NUL byte".to_string(),
                })
            }
        };
        if !path.exists() {
            return Err(OracleError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }
        log::info!("Swiss Ephemeris data path: {}", path.display());
        Ok(Self {
            ephemeris_path: path,
            path_str,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }

    /// Point the calling thread's Swiss Ephemeris at this adapter's data
    /// path, unless it already is.
    fn apply_path(&self) {
        APPLIED_PATH.with(|applied| {
            let mut applied = applied.borrow_mut();
            if applied.as_deref() != Some(self.path_str.as_str()) {
                log::debug!("Setting Swiss Ephemeris path: {}", self.path_str);
                set_ephe_path(&self.path_str);
                *applied = Some(self.path_str.clone());
            }
        });
    }
}

/// Data path applied on the calling thread, if any.
#[cfg(test)]
fn applied_path() -> Option<String> {
    APPLIED_PATH.with(|applied| applied.borrow().clone())
}

impl PositionOracle for SwissEphemerisAdapter {
    fn body_position(&self, jd: f64, body: Body) -> Result<BodyReading, OracleError> {
        self.apply_path();
        let result = calc_ut(jd, body_code(body), CALC_FLAGS as u32).map_err(|e| {
            OracleError::unavailable(body.name(), jd, format!("Swiss Ephemeris error: {}", e))
        })?;

        let lon = result.out[0];
        let speed_lon = result.out[3];
        if !lon.is_finite() || !speed_lon.is_finite() {
            return Err(OracleError::unavailable(
                body.name(),
                jd,
                "non-finite position returned",
            ));
        }

        Ok(BodyReading {
            lon: lon.rem_euclid(360.0),
            speed_lon,
        })
    }

    fn angles(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        system: HouseSystem,
    ) -> Result<HouseAngles, OracleError> {
        self.apply_path();
        let (c, a) = houses_ex(jd, CALC_FLAGS, lat, lon, house_system_byte(system) as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusps = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if cusps
            .iter()
            .chain([&ascmc.ascendant, &ascmc.mc])
            .any(|v| !v.is_finite())
        {
            return Err(OracleError::unavailable(
                format!("{} houses", system.name()),
                jd,
                "house calculation failed",
            ));
        }

        Ok(HouseAngles {
            ascendant: ascmc.ascendant.rem_euclid(360.0),
            midheaven: ascmc.mc.rem_euclid(360.0),
            cusps: cusps.map(|c| c.rem_euclid(360.0)),
        })
    }

    fn lunar_phase(&self, jd: f64) -> Result<f64, OracleError> {
        let moon = self.body_position(jd, Body::Moon)?;
        let sun = self.body_position(jd, Body::Sun)?;
        Ok(elongation(&moon, &sun))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_is_rejected() {
        let err = SwissEphemerisAdapter::new("/definitely/not/a/swisseph/dir").err();
        assert!(matches!(err, Some(OracleError::FileNotFound { .. })));
    }

    #[test]
    fn test_path_with_nul_is_rejected() {
        let err = SwissEphemerisAdapter::new("/tmp/ephe\0data").err();
        assert!(matches!(err, Some(OracleError::FileNotFound { .. })));
    }

    #[test]
    fn test_existing_path_is_kept() {
        let dir = std::env::temp_dir();
        let adapter = SwissEphemerisAdapter::new(&dir).unwrap();
        assert_eq!(adapter.ephemeris_path(), dir.as_path());
    }

    #[test]
    fn test_path_is_applied_on_every_querying_thread() {
        let dir = std::env::temp_dir();
        let adapter = SwissEphemerisAdapter::new(&dir).unwrap();
        let expected = dir.to_str().map(str::to_string);

        std::thread::scope(|scope| {
            for _ in 0..2 {
                scope.spawn(|| {
                    assert_eq!(applied_path(), None);
                    adapter.apply_path();
                    assert_eq!(applied_path(), expected);
                });
            }
        });
    }

    #[test]
    fn test_body_codes_are_distinct() {
        let mut codes: Vec<u32> = Body::PRIMARY
            .iter()
            .chain(Body::MINOR.iter())
            .map(|b| body_code(*b))
            .collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 15);
    }
}
