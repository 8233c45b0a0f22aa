//! Two-chart compatibility scoring.

use crate::aspects::{AspectCalculator, AspectKind, AspectStrength, CrossAspect};
use crate::chart::{BirthData, Chart, ChartAssembler};
use crate::ephemeris::PositionOracle;
use crate::error::ChartError;
use serde::{Deserialize, Serialize};

const BASE_SCORE: f64 = 50.0;

/// Qualitative band for a compatibility score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchLabel {
    #[serde(rename = "Excellent Match")]
    Excellent,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Moderate Match")]
    Moderate,
    #[serde(rename = "Challenging Match")]
    Challenging,
}

impl MatchLabel {
    pub fn for_score(score: u8) -> Self {
        match score {
            80.. => MatchLabel::Excellent,
            60..=79 => MatchLabel::Good,
            40..=59 => MatchLabel::Moderate,
            _ => MatchLabel::Challenging,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityReport {
    /// 0..=100
    pub score: u8,
    pub label: MatchLabel,
    pub aspects: Vec<CrossAspect>,
    pub chart_a: Chart,
    pub chart_b: Chart,
}

/// Points one cross-chart aspect contributes to the score.
fn aspect_points(aspect: &CrossAspect) -> f64 {
    let strong = aspect.strength == AspectStrength::Strong;
    match aspect.aspect {
        AspectKind::Trine | AspectKind::Sextile => {
            if strong {
                10.0
            } else {
                5.0
            }
        }
        AspectKind::Square | AspectKind::Opposition => {
            if strong {
                -5.0
            } else {
                -2.0
            }
        }
        AspectKind::Conjunction => 5.0,
    }
}

/// Sum aspect points onto the base score, then clamp once to 0..=100.
pub fn score_aspects(aspects: &[CrossAspect]) -> u8 {
    let total = aspects.iter().map(aspect_points).sum::<f64>() + BASE_SCORE;
    total.clamp(0.0, 100.0).round() as u8
}

/// Cross-chart aspects between the same bodies of two charts.
pub fn cross_aspects(chart_a: &Chart, chart_b: &Chart) -> Vec<CrossAspect> {
    AspectCalculator::standard().compute_cross_aspects(&chart_a.longitudes(), &chart_b.longitudes())
}

impl<O: PositionOracle> ChartAssembler<O> {
    /// Assemble both charts (concurrently; they share nothing) and score
    /// the aspects between their matching bodies.
    pub fn compatibility(
        &self,
        birth_a: &BirthData,
        birth_b: &BirthData,
    ) -> Result<CompatibilityReport, ChartError> {
        let (chart_a, chart_b) = rayon::join(|| self.assemble(birth_a), || self.assemble(birth_b));
        let (chart_a, chart_b) = (chart_a?, chart_b?);

        let aspects = cross_aspects(&chart_a, &chart_b);
        let score = score_aspects(&aspects);
        log::debug!("compatibility: {} cross aspects, score {}", aspects.len(), score);

        Ok(CompatibilityReport {
            score,
            label: MatchLabel::for_score(score),
            aspects,
            chart_a,
            chart_b,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::Body;

    fn cross(aspect: AspectKind, strength: AspectStrength) -> CrossAspect {
        CrossAspect {
            planet: Body::Sun,
            aspect,
            orb: 0.0,
            strength,
        }
    }

    #[test]
    fn test_points_per_aspect() {
        use AspectKind::*;
        use AspectStrength::*;
        assert_eq!(score_aspects(&[cross(Trine, Strong)]), 60);
        assert_eq!(score_aspects(&[cross(Sextile, Weak)]), 55);
        assert_eq!(score_aspects(&[cross(Square, Strong)]), 45);
        assert_eq!(score_aspects(&[cross(Opposition, Moderate)]), 48);
        assert_eq!(score_aspects(&[cross(Conjunction, Weak)]), 55);
        assert_eq!(score_aspects(&[]), 50);
    }

    #[test]
    fn test_clamp_is_applied_once_at_the_end() {
        // 50 - 5*12 + 10*2 = 10: per-step clamping would give 20.
        let mut aspects = vec![cross(AspectKind::Square, AspectStrength::Strong); 12];
        aspects.extend(vec![cross(AspectKind::Trine, AspectStrength::Strong); 2]);
        assert_eq!(score_aspects(&aspects), 10);

        let many = vec![cross(AspectKind::Trine, AspectStrength::Strong); 20];
        assert_eq!(score_aspects(&many), 100);
        let awful = vec![cross(AspectKind::Square, AspectStrength::Strong); 20];
        assert_eq!(score_aspects(&awful), 0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(MatchLabel::for_score(100), MatchLabel::Excellent);
        assert_eq!(MatchLabel::for_score(80), MatchLabel::Excellent);
        assert_eq!(MatchLabel::for_score(79), MatchLabel::Good);
        assert_eq!(MatchLabel::for_score(60), MatchLabel::Good);
        assert_eq!(MatchLabel::for_score(40), MatchLabel::Moderate);
        assert_eq!(MatchLabel::for_score(39), MatchLabel::Challenging);
        assert_eq!(
            serde_json::to_string(&MatchLabel::Good).unwrap(),
            "\"Good Match\""
        );
    }
}
