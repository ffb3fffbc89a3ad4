//! 25년 누적 비용 비교 테스트.
use solar_sizing_toolbox::estimation::{
    build_projection, estimate_from_monthly_units, EstimationConfig,
};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

#[test]
fn reference_projection() {
    let cfg = EstimationConfig::default();
    let res = estimate_from_monthly_units(300.0, &cfg).expect("estimate");
    let p = build_projection(&res, &cfg);

    assert_eq!(p.years, 25);
    assert_eq!(p.cumulative_grid_cost.len(), 25);
    assert_eq!(p.cumulative_solar_savings.len(), 25);
    assert_eq!(p.cumulative_net_solar_cost.len(), 25);

    assert_close("grid y1", p.cumulative_grid_cost[0], 28_800.0, 1e-9);
    assert_close("grid y2", p.cumulative_grid_cost[1], 28_800.0 * 2.05, 1e-9);
    assert_close("savings y1", p.cumulative_solar_savings[0], 28_800.0, 1e-12);
    assert_close("savings y2", p.cumulative_solar_savings[1], 28_800.0 + 28_800.0 * 0.992, 1e-12);
    assert_close("net y1", p.cumulative_net_solar_cost[0], 109_200.0, 1e-9);

    // 누적 절감액이 초기 투자비(109200)를 넘는 첫 해는 4년차
    assert_eq!(p.payback_year_index, Some(3));
    assert_eq!(p.payback_year(), Some(4));
}

#[test]
fn payback_index_is_first_crossing() {
    let cfg = EstimationConfig::default();
    let res = estimate_from_monthly_units(520.0, &cfg).expect("estimate");
    let p = build_projection(&res, &cfg);
    let idx = p.payback_year_index.expect("payback within horizon");
    for i in 0..idx {
        assert!(p.cumulative_net_solar_cost[i] > p.cumulative_grid_cost[i]);
    }
    assert!(p.cumulative_net_solar_cost[idx] <= p.cumulative_grid_cost[idx]);
}

#[test]
fn zero_degradation_gives_linear_savings() {
    let cfg = EstimationConfig {
        degradation_rate_percent_per_year: 0.0,
        ..EstimationConfig::default()
    };
    let res = estimate_from_monthly_units(300.0, &cfg).expect("estimate");
    let p = build_projection(&res, &cfg);
    for (i, saved) in p.cumulative_solar_savings.iter().enumerate() {
        assert_close("linear", *saved, 28_800.0 * (i + 1) as f64, 1e-12);
    }
}

#[test]
fn no_savings_means_no_payback() {
    let cfg = EstimationConfig {
        grid_rate_per_unit: 0.0,
        ..EstimationConfig::default()
    };
    let res = estimate_from_monthly_units(300.0, &cfg).expect("estimate");
    let p = build_projection(&res, &cfg);
    assert_eq!(p.payback_year_index, None);
    assert!(p.cumulative_grid_cost.iter().all(|g| *g == 0.0));
}

#[test]
fn zero_inflation_is_linear_grid_cost() {
    let mut cfg = EstimationConfig::default();
    cfg.coefficients.grid_inflation_rate = 0.0;
    cfg.coefficients.projection_years = 10;
    let res = estimate_from_monthly_units(300.0, &cfg).expect("estimate");
    let p = build_projection(&res, &cfg);
    assert_eq!(p.years, 10);
    assert_close("grid y10", p.cumulative_grid_cost[9], 288_000.0, 1e-12);
}

#[test]
fn labels_cover_horizon() {
    let cfg = EstimationConfig::default();
    let res = estimate_from_monthly_units(100.0, &cfg).expect("estimate");
    let labels = build_projection(&res, &cfg).labels();
    assert_eq!(labels.len(), 25);
    assert_eq!(labels[0], "Year 1");
    assert_eq!(labels[24], "Year 25");
}
