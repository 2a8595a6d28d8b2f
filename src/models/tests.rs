#![allow(clippy::unwrap_used)]

use super::*;

fn make_budget(overall: f64, limits: &[(i64, f64)]) -> Budget {
    Budget::new(6, 2025, overall, limits.iter().copied().collect())
}

// ── Budget ────────────────────────────────────────────────────

#[test]
fn test_budget_new() {
    let budget = make_budget(1500.0, &[(1, 300.0), (2, 450.0)]);
    assert!(budget.id.is_none());
    assert_eq!(budget.month, 6);
    assert_eq!(budget.year, 2025);
    assert_eq!(budget.overall_budget, 1500.0);
    assert_eq!(budget.category_budgets.len(), 2);
}

#[test]
fn test_assigned_id_treats_zero_as_unassigned() {
    assert_eq!(make_budget(0.0, &[]).assigned_id(), None);
    assert_eq!(make_budget(0.0, &[]).with_id(0).assigned_id(), None);
    assert_eq!(make_budget(0.0, &[]).with_id(7).assigned_id(), Some(7));
}

#[test]
fn test_total_categorized() {
    let budget = make_budget(1500.0, &[(1, 300.0), (2, 450.0)]);
    assert_eq!(budget.total_categorized(), 750.0);
    assert_eq!(make_budget(100.0, &[]).total_categorized(), 0.0);
}

#[test]
fn test_uncategorized() {
    assert_eq!(make_budget(1500.0, &[(1, 300.0), (2, 450.0)]).uncategorized(), 750.0);
}

#[test]
fn test_uncategorized_floors_at_zero() {
    // Categories over-allocated beyond the overall ceiling
    let budget = make_budget(100.0, &[(1, 80.0), (2, 80.0)]);
    assert_eq!(budget.uncategorized(), 0.0);
}

#[test]
fn test_retain_categories() {
    let mut budget = make_budget(1000.0, &[(1, 100.0), (2, 200.0), (3, 300.0)]);
    budget.retain_categories(&[1, 3, 99]);
    let ids: Vec<i64> = budget.category_budgets.keys().copied().collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_budget_period() {
    assert_eq!(make_budget(0.0, &[]).period(), Period::new(6, 2025));
}

// ── Period ────────────────────────────────────────────────────

#[test]
fn test_month_name() {
    assert_eq!(month_name(1), "January");
    assert_eq!(month_name(12), "December");
    assert_eq!(month_name(0), "Unknown");
    assert_eq!(month_name(13), "Unknown");
}

#[test]
fn test_month_number() {
    assert_eq!(month_number("January"), 1);
    assert_eq!(month_number("september"), 9);
    assert_eq!(month_number(" December "), 12);
    assert_eq!(month_number("Smarch"), 1);
}

#[test]
fn test_month_name_number_roundtrip() {
    for m in 1..=12 {
        assert_eq!(month_number(month_name(m)), m);
    }
}

#[test]
fn test_period_display() {
    assert_eq!(Period::new(3, 2024).to_string(), "March 2024");
    assert_eq!(format!("{}", Period::new(14, 2024)), "Unknown 2024");
}

#[test]
fn test_period_stepping_wraps_year() {
    assert_eq!(Period::new(1, 2024).previous(), Some(Period::new(12, 2023)));
    assert_eq!(Period::new(12, 2024).next(), Some(Period::new(1, 2025)));
    assert_eq!(
        Period::new(6, 2024).next().and_then(|p| p.previous()),
        Some(Period::new(6, 2024))
    );
}

#[test]
fn test_period_stepping_stops_at_year_bounds() {
    assert_eq!(Period::new(1, i32::MIN).previous(), None);
    assert_eq!(Period::new(12, i32::MAX).next(), None);
    // Within the same year there is no overflow to worry about
    assert_eq!(Period::new(2, i32::MIN).previous(), Some(Period::new(1, i32::MIN)));
    assert_eq!(Period::new(11, i32::MAX).next(), Some(Period::new(12, i32::MAX)));
}

#[test]
fn test_period_ordering() {
    assert!(Period::new(12, 2023) < Period::new(1, 2024));
    assert!(Period::new(2, 2024) > Period::new(1, 2024));
    assert!(Period::new(1, 2025) > Period::new(12, 2024));

    let mut periods = vec![Period::new(3, 2025), Period::new(11, 2023), Period::new(1, 2024)];
    periods.sort();
    assert_eq!(
        periods,
        vec![Period::new(11, 2023), Period::new(1, 2024), Period::new(3, 2025)]
    );
}

#[test]
fn test_current_period_is_valid() {
    let now = Period::current();
    assert!((1..=12).contains(&now.month));
    assert_ne!(now.month_name(), "Unknown");
}

#[test]
fn test_available_years() {
    let years = Period::available_years();
    assert_eq!(*years.start(), 2020);
    assert_eq!(*years.end(), 2080);
}
