//! 월 사용량/가전 목록 산정 회귀 테스트.
use solar_sizing_toolbox::estimation::{
    estimate_from_appliances, estimate_from_monthly_units, monthly_units, ApplianceEntry,
    AreaAssessment, EstimationConfig, EstimationError, Preset,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

fn config_with_area(available_area_m2: f64) -> EstimationConfig {
    EstimationConfig {
        available_area_m2,
        ..EstimationConfig::default()
    }
}

#[test]
fn reference_household_300_units() {
    let res = estimate_from_monthly_units(300.0, &EstimationConfig::default()).expect("estimate");
    assert_close("kW", res.required_kw, 1.82, 1e-9);
    assert_close("area", res.area_m2, 18.2, 1e-9);
    assert_close("cost", res.cost, 109_200.0, 1e-9);
    assert_close("bill", res.monthly_grid_bill, 2400.0, 1e-9);
    assert_close("savings", res.monthly_savings, 2400.0, 1e-9);
    assert_close("payback", res.payback_years, 3.8, 1e-9);
    assert_close("battery", res.battery_kwh, 7.28, 1e-9);
    assert_eq!(res.battery_count, 5);
    assert_close("initial", res.initial_cost, res.cost, 0.0);
    assert_eq!(res.area_comment, AreaAssessment::Unspecified);
    assert_eq!(res.area_comment.as_str(), "");
}

#[test]
fn required_kw_and_area_follow_rounding() {
    let cfg = EstimationConfig {
        sun_hours_per_day: 4.2,
        ..EstimationConfig::default()
    };
    for units in [1.0, 57.5, 120.0, 333.3, 1250.0] {
        let res = estimate_from_monthly_units(units, &cfg).expect("estimate");
        let kw = ((units / (4.2 * 30.0)) * 100.0).round() / 100.0;
        assert_close("kW", res.required_kw, kw, 1e-9);
        assert_close("area", res.area_m2, ((kw * 10.0) * 100.0).round() / 100.0, 1e-9);
    }
}

#[test]
fn rejects_non_positive_units_and_sun_hours() {
    let cfg = EstimationConfig::default();
    assert!(matches!(
        estimate_from_monthly_units(0.0, &cfg),
        Err(EstimationError::InvalidInput(_))
    ));
    assert!(matches!(
        estimate_from_monthly_units(-10.0, &cfg),
        Err(EstimationError::InvalidInput(_))
    ));
    assert!(matches!(
        estimate_from_monthly_units(f64::NAN, &cfg),
        Err(EstimationError::InvalidInput(_))
    ));
    let no_sun = EstimationConfig {
        sun_hours_per_day: 0.0,
        ..EstimationConfig::default()
    };
    assert!(matches!(
        estimate_from_monthly_units(300.0, &no_sun),
        Err(EstimationError::InvalidInput(_))
    ));
}

#[test]
fn zero_grid_rate_gives_zero_payback() {
    let cfg = EstimationConfig {
        grid_rate_per_unit: 0.0,
        ..EstimationConfig::default()
    };
    let res = estimate_from_monthly_units(300.0, &cfg).expect("estimate");
    assert_eq!(res.monthly_savings, 0.0);
    assert_eq!(res.payback_years, 0.0);
}

#[test]
fn half_cent_sizes_round_on_the_stored_value() {
    let cfg = EstimationConfig {
        sun_hours_per_day: 4.0,
        ..EstimationConfig::default()
    };
    let nine = estimate_from_monthly_units(9.0, &cfg).expect("9 units");
    assert_eq!(nine.required_kw, 0.07);
    assert_eq!(nine.cost, 4200.0);
    assert_eq!(nine.area_m2, 0.7);

    let twenty_one = estimate_from_monthly_units(21.0, &cfg).expect("21 units");
    assert_eq!(twenty_one.required_kw, 0.17);
    assert_eq!(twenty_one.cost, 10_200.0);
}

#[test]
fn negative_available_area_counts_as_given() {
    let res = estimate_from_monthly_units(300.0, &config_with_area(-1.0)).expect("estimate");
    assert_eq!(res.area_comment, AreaAssessment::Insufficient);
}

#[test]
fn area_comment_against_available_area() {
    let fits = estimate_from_monthly_units(300.0, &config_with_area(20.0)).expect("fits");
    assert_eq!(fits.area_comment, AreaAssessment::Sufficient);
    assert_eq!(fits.area_comment.as_str(), "sufficient");

    let exact = estimate_from_monthly_units(300.0, &config_with_area(18.2)).expect("exact");
    assert_eq!(exact.area_comment, AreaAssessment::Sufficient);

    let short = estimate_from_monthly_units(300.0, &config_with_area(10.0)).expect("short");
    assert_eq!(short.area_comment, AreaAssessment::Insufficient);
    assert_eq!(short.area_comment.as_str(), "insufficient");
}

#[test]
fn appliances_delegate_to_monthly_units() {
    let appliances = vec![
        ApplianceEntry::new("Fridge", 150.0, 10.0, 30.0),
        ApplianceEntry::new("TV", 100.0, 3.0, 30.0),
    ];
    let units = monthly_units(&appliances);
    assert_close("units", units, 54.0, 1e-12);

    let cfg = EstimationConfig::default();
    let from_list = estimate_from_appliances(&appliances, &cfg).expect("appliances");
    let from_units = estimate_from_monthly_units(units, &cfg).expect("units");
    assert_eq!(from_list, from_units);
    assert_close("kW", from_list.required_kw, 0.33, 1e-9);
}

#[test]
fn empty_appliance_list_is_invalid() {
    let cfg = EstimationConfig::default();
    assert!(matches!(
        estimate_from_appliances(&[], &cfg),
        Err(EstimationError::InvalidInput(_))
    ));
    assert!(estimate_from_appliances(&Preset::Custom.appliances(), &cfg).is_err());
}

#[test]
fn appliances_with_no_energy_are_invalid() {
    let idle = vec![ApplianceEntry::new("Standby", 0.0, 24.0, 30.0)];
    assert!(estimate_from_appliances(&idle, &EstimationConfig::default()).is_err());
}

#[test]
fn repeated_estimates_are_identical() {
    let cfg = config_with_area(15.0);
    let a = estimate_from_monthly_units(412.7, &cfg).expect("a");
    let b = estimate_from_monthly_units(412.7, &cfg).expect("b");
    assert_eq!(a, b);
    assert_eq!(a.required_kw.to_bits(), b.required_kw.to_bits());

    let villa = Preset::ModernUrbanVilla.appliances();
    assert_eq!(
        estimate_from_appliances(&villa, &cfg).expect("c"),
        estimate_from_appliances(&villa, &cfg).expect("d")
    );
}

#[test]
fn preset_monthly_units() {
    assert_close(
        "rural",
        monthly_units(&Preset::BasicRuralHome.appliances()),
        139.92,
        1e-9,
    );
    assert_eq!(Preset::UrbanMiddleClassFlat.appliances().len(), 10);
    assert_eq!(Preset::ModernUrbanVilla.appliances().len(), 11);
    assert!(Preset::Custom.appliances().is_empty());
}

#[test]
fn preset_names_parse() {
    for preset in Preset::ALL {
        assert_eq!(preset.name().parse::<Preset>(), Ok(preset));
    }
    assert_eq!("villa".parse::<Preset>(), Ok(Preset::ModernUrbanVilla));
    assert!("castle".parse::<Preset>().is_err());
}

#[test]
fn custom_coefficients_change_sizing() {
    let mut cfg = EstimationConfig::default();
    cfg.coefficients.cost_per_kw = 50_000.0;
    cfg.coefficients.battery_autonomy_hours = 8.0;
    let res = estimate_from_monthly_units(300.0, &cfg).expect("estimate");
    assert_close("cost", res.cost, 91_000.0, 1e-9);
    assert_close("battery", res.battery_kwh, 14.56, 1e-9);
    assert_eq!(res.battery_count, 9);
}
