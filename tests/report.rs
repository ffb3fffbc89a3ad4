//! 보고서 검증/내보내기 테스트.
use std::fs;

use solar_sizing_toolbox::estimation::{
    build_projection, estimate_from_monthly_units, EstimationConfig,
};
use solar_sizing_toolbox::report::{
    find_installer, ChartData, Contact, Location, Report, ReportError, INSTALLERS,
};

fn contact(email: &str) -> Contact {
    Contact {
        name: "Asha".into(),
        email: email.into(),
        phone: "98765".into(),
    }
}

fn prepared(email: &str) -> Result<Report, ReportError> {
    let cfg = EstimationConfig::default();
    let result = estimate_from_monthly_units(300.0, &cfg).expect("estimate");
    let projection = build_projection(&result, &cfg);
    Report::prepare(
        contact(email),
        INSTALLERS[0],
        Location::default(),
        cfg.sun_hours_per_day,
        Some(&result),
        Some(&projection),
    )
}

#[test]
fn blank_email_is_rejected() {
    assert!(matches!(prepared("   "), Err(ReportError::MissingEmail)));
}

#[test]
fn missing_estimation_is_rejected() {
    let res = Report::prepare(
        contact("asha@example.com"),
        INSTALLERS[1],
        Location::default(),
        5.5,
        None,
        None,
    );
    assert!(matches!(res, Err(ReportError::NoEstimation)));
}

#[test]
fn zero_kilowatt_estimate_cannot_be_reported() {
    let cfg = EstimationConfig::default();
    let tiny = estimate_from_monthly_units(0.5, &cfg).expect("estimate");
    assert_eq!(tiny.required_kw, 0.0);
    let projection = build_projection(&tiny, &cfg);
    let res = Report::prepare(
        contact("asha@example.com"),
        INSTALLERS[0],
        Location::default(),
        cfg.sun_hours_per_day,
        Some(&tiny),
        Some(&projection),
    );
    assert!(matches!(res, Err(ReportError::NoEstimation)));
}

#[test]
fn summary_lists_results_and_unknown_location() {
    let report = prepared("asha@example.com").expect("report");
    let text = report.summary_text();
    assert!(text.starts_with("Hello Asha,"));
    assert!(text.contains("System Size: 1.82 kW"));
    assert!(text.contains("Estimated Cost: ₹109200"));
    assert!(text.contains("Payback Period: 3.8 years"));
    assert!(text.contains("150Ah Batteries Needed: 5"));
    assert!(text.contains("Projected Payback: Year 4"));
    assert!(text.contains("Location: N/A, N/A"));
    assert!(text.contains("Sun Hours Used: 5.5 hours/day"));
}

#[test]
fn summary_shows_entered_location() {
    let mut report = prepared("asha@example.com").expect("report");
    report.location = Location {
        lat: Some(28.61),
        lon: None,
    };
    assert!(report.summary_text().contains("Location: 28.61, N/A"));
}

#[test]
fn location_display() {
    let loc = Location {
        lat: Some(12.97),
        lon: Some(77.59),
    };
    assert_eq!(loc.to_string(), "12.97, 77.59");
}

#[test]
fn payload_uses_report_field_names() {
    let report = prepared("asha@example.com").expect("report");
    let value = serde_json::to_value(report.payload()).expect("json");
    assert_eq!(value["email"], "asha@example.com");
    assert_eq!(value["sunHours"], 5.5);
    assert_eq!(value["installer"]["name"], "SunGrid Pvt Ltd");
    assert_eq!(value["location"]["lat"], serde_json::Value::Null);
    assert_eq!(value["results"]["requiredKW"], 1.82);
    assert_eq!(value["results"]["num150AhBatteries"], 5);
    assert_eq!(value["results"]["areaComment"], "");
}

#[test]
fn chart_data_marks_payback() {
    let report = prepared("asha@example.com").expect("report");
    let chart = ChartData::from_projection(&report.projection);
    assert_eq!(chart.labels.len(), 25);
    assert_eq!(chart.datasets.len(), 2);
    assert_eq!(chart.datasets[0].data, report.projection.cumulative_grid_cost);
    assert_eq!(chart.payback_label.as_deref(), Some("Year 4"));
}

#[test]
fn writes_three_files() {
    let report = prepared("asha@example.com").expect("report");
    let dir = std::env::temp_dir().join(format!("solar_report_{}", std::process::id()));
    let exported = report.write_to_dir(&dir).expect("export");
    let summary = fs::read_to_string(&exported.summary).expect("summary");
    assert!(summary.contains("Thank you for using Sun4sure!"));
    let chart: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&exported.chart).expect("chart")).expect("json");
    assert_eq!(chart["paybackLabel"], "Year 4");
    assert!(exported.payload.exists());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn installer_lookup_ignores_case() {
    assert_eq!(
        find_installer("brightwatts solutions").map(|i| i.email),
        Some("brightwatts@example.com")
    );
    assert!(find_installer("Nobody Solar").is_none());
}
