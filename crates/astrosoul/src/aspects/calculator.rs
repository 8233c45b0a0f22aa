use crate::aspects::types::{
    Aspect, AspectKind, AspectMatch, AspectStrength, CrossAspect,
};
use crate::ephemeris::Body;

/// Orb for natal chart and compatibility aspects
pub const STANDARD_ORB: f64 = 8.0;
/// Tighter orb used by the advanced analysis
pub const ADVANCED_ORB: f64 = 5.0;

/// Orb fractions of the tolerance bounding the strength buckets
const STRONG_RATIO: f64 = 0.375;
const WEAK_RATIO: f64 = 0.625;

/// Shortest arc between two longitudes, in [0, 180].
pub fn separation(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (lon1 - lon2).rem_euclid(360.0);
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// Aspect calculator for a fixed orb tolerance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectCalculator {
    tolerance: f64,
}

impl AspectCalculator {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Calculator used for chart and compatibility aspects
    pub fn standard() -> Self {
        Self::new(STANDARD_ORB)
    }

    pub fn advanced() -> Self {
        Self::new(ADVANCED_ORB)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Bucket an orb relative to this calculator's tolerance.
    pub fn strength(&self, orb: f64) -> AspectStrength {
        if orb <= self.tolerance * STRONG_RATIO {
            AspectStrength::Strong
        } else if orb > self.tolerance * WEAK_RATIO {
            AspectStrength::Weak
        } else {
            AspectStrength::Moderate
        }
    }

    /// Every aspect angle within tolerance of the separation of two
    /// longitudes. Each angle is tested on its own, so wide tolerances can
    /// yield more than one match.
    pub fn match_aspects(&self, lon1: f64, lon2: f64) -> Vec<AspectMatch> {
        let angle_diff = separation(lon1, lon2);
        AspectKind::ALL
            .iter()
            .filter_map(|kind| {
                let orb = (angle_diff - kind.angle()).abs();
                (orb <= self.tolerance).then(|| AspectMatch {
                    kind: *kind,
                    orb,
                    strength: self.strength(orb),
                })
            })
            .collect()
    }

    /// Aspects between every unordered pair of distinct bodies, in input
    /// order.
    pub fn compute_chart_aspects(&self, bodies: &[(Body, f64)]) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for (i, (body1, lon1)) in bodies.iter().enumerate() {
            for (body2, lon2) in &bodies[i + 1..] {
                if body1 == body2 {
                    continue;
                }
                aspects.extend(self.match_aspects(*lon1, *lon2).into_iter().map(|m| Aspect {
                    planet1: *body1,
                    planet2: *body2,
                    aspect: m.kind,
                    orb: m.orb,
                    strength: m.strength,
                }));
            }
        }
        aspects
    }

    /// Aspects between each body in `chart_a` and the same body in
    /// `chart_b`. Bodies missing from either side are skipped.
    pub fn compute_cross_aspects(
        &self,
        chart_a: &[(Body, f64)],
        chart_b: &[(Body, f64)],
    ) -> Vec<CrossAspect> {
        let mut aspects = Vec::new();
        for (body, lon_a) in chart_a {
            let Some((_, lon_b)) = chart_b.iter().find(|(other, _)| other == body) else {
                continue;
            };
            aspects.extend(self.match_aspects(*lon_a, *lon_b).into_iter().map(|m| CrossAspect {
                planet: *body,
                aspect: m.kind,
                orb: m.orb,
                strength: m.strength,
            }));
        }
        aspects
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::standard()
    }
}
