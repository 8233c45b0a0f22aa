use crate::ephemeris::Body;
use crate::rounding::round2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named aspects and their exact angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    /// Table order used when testing a separation
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    pub fn angle(&self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Conjunction",
            AspectKind::Sextile => "Sextile",
            AspectKind::Square => "Square",
            AspectKind::Trine => "Trine",
            AspectKind::Opposition => "Opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectStrength {
    Strong,
    Moderate,
    Weak,
}

/// One aspect angle matched by a separation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectMatch {
    pub kind: AspectKind,
    /// Absolute deviation from the exact angle
    pub orb: f64,
    pub strength: AspectStrength,
}

/// Aspect between two bodies of one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aspect {
    pub planet1: Body,
    pub planet2: Body,
    pub aspect: AspectKind,
    #[serde(serialize_with = "round2")]
    pub orb: f64,
    pub strength: AspectStrength,
}

/// Aspect between the same body in two different charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossAspect {
    pub planet: Body,
    pub aspect: AspectKind,
    #[serde(serialize_with = "round2")]
    pub orb: f64,
    pub strength: AspectStrength,
}
