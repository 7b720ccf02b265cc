//! Integration tests for the snapshot model and display mapping.

use tokenhud_core::{
    DEFAULT_TOTAL, DisplayState, SnapshotPatch, Tier, UsageSnapshot, compute_percentage,
};

#[test]
fn test_derived_fields_match_formula() {
    let totals = [1_u64, 7, 1_000, 200_000, 1_000_000];
    let useds = [0_u64, 1, 999, 25_000, 180_000, 250_000];

    for &total in &totals {
        for &used in &useds {
            let snapshot = UsageSnapshot::new(used, total).unwrap();
            let expected_remaining = i64::try_from(total).unwrap() - i64::try_from(used).unwrap();
            assert_eq!(snapshot.remaining, expected_remaining);

            #[allow(clippy::cast_precision_loss)]
            let expected_pct = 100.0 * expected_remaining as f64 / total as f64;
            assert!(
                (snapshot.percentage - expected_pct).abs() < 1e-9,
                "used={used} total={total}"
            );
        }
    }
}

#[test]
fn test_division_guard() {
    assert_eq!(compute_percentage(0, 0), 0.0);
    assert_eq!(compute_percentage(-5, 0), 0.0);
}

#[test]
fn test_end_to_end_warning_tier() {
    let snapshot = UsageSnapshot::new(180_000, 200_000).unwrap();
    assert_eq!(snapshot.remaining, 20_000);
    assert_eq!(snapshot.percentage, 10.0);

    let display = DisplayState::from_snapshot(&snapshot);
    assert_eq!(display.headline_text, "20,000");
    assert_eq!(display.detail_text, "180,000 / 200,000 (10.0%)");
    assert_eq!(display.tier, Tier::Warning);
}

#[test]
fn test_end_to_end_default_total_nominal_tier() {
    let snapshot = UsageSnapshot::new(25_000, DEFAULT_TOTAL).unwrap();
    assert_eq!(snapshot.total, 200_000);
    assert_eq!(snapshot.remaining, 175_000);
    assert_eq!(snapshot.percentage, 87.5);
    assert_eq!(DisplayState::from_snapshot(&snapshot).tier, Tier::Nominal);
}

#[test]
fn test_reader_merge_then_render() {
    let mut current = UsageSnapshot::initial();
    let patch = SnapshotPatch::from_json(
        r#"{"used": 195000, "total": 200000, "remaining": 5000, "percentage": 2.5}"#,
    )
    .unwrap();
    current.apply(&patch);

    let display = DisplayState::from_snapshot(&current);
    assert_eq!(display.headline_text, "5,000");
    assert_eq!(display.detail_text, "195,000 / 200,000 (2.5%)");
    assert_eq!(display.tier, Tier::Alert);
}
