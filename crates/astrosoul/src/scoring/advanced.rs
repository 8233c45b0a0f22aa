//! Tight-orb aspect analysis with lunar phase.

use crate::aspects::{Aspect, AspectCalculator};
use crate::chart::assembler::require_coordinates;
use crate::chart::{BirthData, ChartAssembler};
use crate::ephemeris::{Body, PositionOracle};
use crate::error::ChartError;
use crate::rounding::{round3, round5};
use crate::time::resolve_instant;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedAnalysis {
    /// Moon–Sun elongation in degrees, [0, 360)
    #[serde(serialize_with = "round3")]
    pub lunar_phase: f64,
    pub aspects: Vec<Aspect>,
    #[serde(serialize_with = "round5")]
    pub astronomical_day: f64,
}

impl<O: PositionOracle> ChartAssembler<O> {
    /// Recompute the ten primary bodies and match aspects at the advanced
    /// orb. Independent of any assembled chart; no houses or signs.
    pub fn advanced_analysis(&self, birth: &BirthData) -> Result<AdvancedAnalysis, ChartError> {
        let location = require_coordinates(birth)?;
        let instant = resolve_instant(
            &birth.date,
            &birth.time,
            birth.timezone.as_deref(),
            Some(&location),
        )?;
        let jd = instant.julian_day;

        let longitudes: Vec<(Body, f64)> = self
            .body_readings(jd, Body::PRIMARY.to_vec())
            .into_iter()
            .map(|(body, reading)| (body, reading.lon))
            .collect();
        let aspects = AspectCalculator::advanced().compute_chart_aspects(&longitudes);

        let lunar_phase = self
            .oracle()
            .lunar_phase(jd)
            .map_err(|e| ChartError::computation(e.to_string()))?;

        Ok(AdvancedAnalysis {
            lunar_phase,
            aspects,
            astronomical_day: jd,
        })
    }
}
