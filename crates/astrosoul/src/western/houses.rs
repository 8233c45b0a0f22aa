//! House membership over circular cusp intervals.
//!
//! Cusps come in house order 1..12 but wrap at 360°, so house `n` is the
//! arc that starts at cusp `n` and runs forward to cusp `n + 1` (cusp 1
//! for house 12). Membership is tested on that arc, never on raw order.

use crate::western::signs::normalize_degrees;

/// Forward arc from `from` to `to`, in [0, 360).
fn forward_arc(from: f64, to: f64) -> f64 {
    normalize_degrees(to - from)
}

/// House number (1..=12) whose arc `[cusp_n, cusp_n+1)` contains `longitude`.
///
/// When several arcs contain the longitude (cusps out of circular order,
/// as in the flat fallback where cusp 10 sits at the midheaven), the house
/// whose cusp lies nearest before the longitude wins; ties go to the lower
/// house number. Zero-width arcs are empty. A longitude outside every arc
/// (all cusps equal) lands in house 1.
pub fn house_of(longitude: f64, cusps: &[f64; 12]) -> u8 {
    let lon = normalize_degrees(longitude);
    let mut best: Option<(usize, f64)> = None;
    for house in 0..12 {
        let start = cusps[house];
        let width = forward_arc(start, cusps[(house + 1) % 12]);
        let offset = forward_arc(start, lon);
        if offset < width && best.map_or(true, |(_, nearest)| offset < nearest) {
            best = Some((house, offset));
        }
    }
    best.map_or(1, |(house, _)| house as u8 + 1)
}

/// Flat cusps used when the house system is unavailable: house 1 at the
/// ascendant, house 10 at the midheaven, every other house 30° further
/// along from the ascendant.
pub fn flat_cusps(ascendant: f64, midheaven: f64) -> [f64; 12] {
    std::array::from_fn(|i| match i + 1 {
        1 => ascendant,
        10 => midheaven,
        n => normalize_degrees(ascendant + 30.0 * (n - 1) as f64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Placidus cusps for 2004-02-12 11:25, Akola. House 12 wraps past 0°.
    const AKOLA: [f64; 12] = [
        46.619, 74.914, 99.813, 125.222, 154.448, 189.259, 226.619, 254.914, 279.813, 305.222,
        334.448, 9.259,
    ];

    #[test]
    fn test_each_cusp_opens_its_house() {
        for (i, cusp) in AKOLA.iter().enumerate() {
            assert_eq!(house_of(*cusp, &AKOLA), i as u8 + 1);
            assert_eq!(house_of(cusp + 0.001, &AKOLA), i as u8 + 1);
            let previous = if i == 0 { 12 } else { i as u8 };
            assert_eq!(house_of(cusp - 0.001, &AKOLA), previous);
        }
    }

    #[test]
    fn test_wrap_across_zero() {
        // 334.448 (11) .. 9.259 (12) .. 46.619 (1)
        assert_eq!(house_of(359.99, &AKOLA), 11);
        assert_eq!(house_of(0.0, &AKOLA), 11);
        assert_eq!(house_of(5.0, &AKOLA), 11);
        assert_eq!(house_of(9.259, &AKOLA), 12);
        assert_eq!(house_of(20.0, &AKOLA), 12);
        assert_eq!(house_of(360.0 + 20.0, &AKOLA), 12);
        assert_eq!(house_of(-340.0, &AKOLA), 12);
    }

    #[test]
    fn test_linear_scan_misclassification_is_fixed() {
        // A scan that stops at the first cusp above the longitude puts 5°
        // in house 12 here; it belongs to house 11 (334.448 .. 9.259).
        assert_ne!(house_of(5.0, &AKOLA), 12);
        // And 350° is past every raw cusp but still in house 11.
        assert_eq!(house_of(350.0, &AKOLA), 11);
    }

    #[test]
    fn test_flat_cusps_pin_angles() {
        let cusps = flat_cusps(100.0, 10.0);
        assert_eq!(cusps[0], 100.0);
        assert_eq!(cusps[9], 10.0);
        assert_eq!(cusps[1], 130.0);
        assert_eq!(cusps[8], 340.0);
        assert_eq!(cusps[10], 40.0);
        assert_eq!(cusps[11], 70.0);
    }

    #[test]
    fn test_flat_fallback_reaches_late_houses() {
        // Cusp 10 at 0 makes the arcs of houses 9 and 10 overlap others.
        let cusps = flat_cusps(0.0, 0.0);
        assert_eq!(house_of(5.0, &cusps), 1);
        assert_eq!(house_of(100.0, &cusps), 4);
        assert_eq!(house_of(250.0, &cusps), 9);
        assert_eq!(house_of(310.0, &cusps), 11);
        assert_eq!(house_of(322.847, &cusps), 11);
        assert_eq!(house_of(345.0, &cusps), 12);

        let reached: std::collections::BTreeSet<u8> =
            (0..360).map(|d| house_of(d as f64 + 0.5, &cusps)).collect();
        assert_eq!(reached.len(), 11);
        // House 10 starts on the same cusp as house 1 and loses the tie.
        assert!(!reached.contains(&10));
    }

    #[test]
    fn test_degenerate_cusps_fall_back_to_first_house() {
        assert_eq!(house_of(123.0, &[0.0; 12]), 1);
    }
}
