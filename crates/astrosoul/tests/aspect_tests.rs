use astrosoul::aspects::{separation, AspectCalculator, AspectKind, AspectStrength};
use astrosoul::ephemeris::Body;

#[test]
fn test_calculate_aspect_conjunction() {
    let calculator = AspectCalculator::standard();

    // Two bodies 2 degrees apart: conjunction within the 8 degree orb
    let matches = calculator.match_aspects(100.0, 102.0);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, AspectKind::Conjunction);
    assert!((matches[0].orb - 2.0).abs() < 1e-9);
    assert_eq!(matches[0].strength, AspectStrength::Strong);
}

#[test]
fn test_calculate_aspect_opposition() {
    let calculator = AspectCalculator::standard();

    // 178 degrees apart
    let matches = calculator.match_aspects(100.0, 278.0);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, AspectKind::Opposition);
}

#[test]
fn test_aspect_across_zero_degrees() {
    let calculator = AspectCalculator::standard();

    // 355 and 5 are 10 degrees apart, not 350
    assert!(calculator.match_aspects(355.0, 5.0).is_empty());
    let matches = calculator.match_aspects(358.0, 2.0);
    assert_eq!(matches[0].kind, AspectKind::Conjunction);
    assert!((separation(358.0, 2.0) - 4.0).abs() < 1e-9);
}

#[test]
fn test_advanced_orb_is_tighter() {
    let standard = AspectCalculator::standard();
    let advanced = AspectCalculator::advanced();

    // Trine with a 6 degree orb
    assert_eq!(standard.match_aspects(0.0, 126.0).len(), 1);
    assert!(advanced.match_aspects(0.0, 126.0).is_empty());

    let matches = advanced.match_aspects(0.0, 123.0);
    assert_eq!(matches[0].kind, AspectKind::Trine);
    assert_eq!(matches[0].strength, AspectStrength::Moderate);
}

#[test]
fn test_compute_chart_aspects() {
    let calculator = AspectCalculator::standard();
    let bodies = [
        (Body::Sun, 100.0),
        (Body::Moon, 102.0),
        (Body::Mars, 190.0),
    ];

    let aspects = calculator.compute_chart_aspects(&bodies);

    // Sun–Moon conjunction, Sun–Mars square, Moon–Mars square
    assert_eq!(aspects.len(), 3);
    assert_eq!(aspects[0].planet1, Body::Sun);
    assert_eq!(aspects[0].planet2, Body::Moon);
    assert_eq!(aspects[0].aspect, AspectKind::Conjunction);
    assert_eq!(aspects[1].aspect, AspectKind::Square);
    assert_eq!(aspects[1].strength, AspectStrength::Strong);
    assert_eq!(aspects[2].planet1, Body::Moon);
    assert_eq!(aspects[2].strength, AspectStrength::Strong);
}

#[test]
fn test_aspect_serialization() {
    let calculator = AspectCalculator::standard();
    let aspects = calculator.compute_chart_aspects(&[(Body::Sun, 10.0), (Body::Moon, 134.123)]);
    let json = serde_json::to_value(&aspects[0]).unwrap();

    assert_eq!(json["planet1"], "Sun");
    assert_eq!(json["planet2"], "Moon");
    assert_eq!(json["aspect"], "Trine");
    assert_eq!(json["orb"], 4.12);
    assert_eq!(json["strength"], "moderate");
}
