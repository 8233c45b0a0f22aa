//! Zodiac signs and the longitude → sign mapping.
//!
//! Signs are contiguous 30° bands in zodiacal order starting with Aries at
//! 0°. Each sign carries its element and traditional ruler.

use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Sign for a zero-based index, wrapping past Pisces.
    pub fn from_index(index: usize) -> Self {
        Sign::ALL[index % 12]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    pub fn symbol(&self) -> &'static str {
        const GLYPHS: [&str; 12] = [
            "♈", "♉", "♊", "♋", "♌", "♍", "♎", "♏", "♐", "♑", "♒", "♓",
        ];
        GLYPHS[self.index()]
    }

    /// Fire, earth, air and water repeat in that order from Aries.
    pub fn element(&self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// Traditional (pre-outer-planet) ruler
    pub fn ruler(&self) -> Body {
        match self {
            Sign::Aries | Sign::Scorpio => Body::Mars,
            Sign::Taurus | Sign::Libra => Body::Venus,
            Sign::Gemini | Sign::Virgo => Body::Mercury,
            Sign::Cancer => Body::Moon,
            Sign::Leo => Body::Sun,
            Sign::Sagittarius | Sign::Pisces => Body::Jupiter,
            Sign::Capricorn | Sign::Aquarius => Body::Saturn,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a longitude falls in the zodiac.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignPosition {
    pub sign: Sign,
    /// Degrees past the start of the sign, 2 decimals, in [0, 30)
    pub degree_in_sign: f64,
}

/// Normalize any angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

pub fn sign_of(longitude: f64) -> Sign {
    let lon = normalize_degrees(longitude);
    Sign::from_index(((lon / 30.0).floor() as usize).min(11))
}

/// Degrees past the start of the sign, rounded to 2 decimals.
///
/// A value that would round up to 30.00 is reported as 29.99 so it never
/// leaves its sign.
pub fn degree_in_sign(longitude: f64) -> f64 {
    let lon = normalize_degrees(longitude);
    let raw = lon - (lon / 30.0).floor().min(11.0) * 30.0;
    let rounded = (raw * 100.0).round() / 100.0;
    if rounded >= 30.0 {
        29.99
    } else {
        rounded.max(0.0)
    }
}

pub fn sign_position(longitude: f64) -> SignPosition {
    SignPosition {
        sign: sign_of(longitude),
        degree_in_sign: degree_in_sign(longitude),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_starts() {
        for (i, sign) in Sign::ALL.iter().enumerate() {
            assert_eq!(sign_of(i as f64 * 30.0), *sign);
            assert_eq!(sign_of(i as f64 * 30.0 + 29.999), *sign);
        }
    }

    #[test]
    fn test_negative_longitudes_wrap() {
        assert_eq!(sign_of(-1.0), Sign::Pisces);
        assert_eq!(degree_in_sign(-1.0), 29.0);
        assert_eq!(sign_of(-360.0), Sign::Aries);
        assert_eq!(sign_of(725.0), Sign::Aries);
        assert_eq!(normalize_degrees(-1e-18), 0.0);
    }

    #[test]
    fn test_degree_rounding_stays_in_sign() {
        assert_eq!(degree_in_sign(59.999), 29.99);
        assert_eq!(sign_of(59.999), Sign::Taurus);
        assert_eq!(degree_in_sign(46.619), 16.62);
    }

    #[test]
    fn test_elements_and_rulers() {
        assert_eq!(Sign::Leo.element(), Element::Fire);
        assert_eq!(Sign::Capricorn.element(), Element::Earth);
        assert_eq!(Sign::Aquarius.element(), Element::Air);
        assert_eq!(Sign::Pisces.element(), Element::Water);
        assert_eq!(Sign::Scorpio.ruler(), Body::Mars);
        assert_eq!(Sign::Aquarius.ruler(), Body::Saturn);
    }
}
