use solar_sizing_toolbox::climatology::{sun_hours_from_json, ClimatologyError};

#[test]
fn averages_all_periods() {
    let doc = r#"{"properties":{"parameter":{"ALLSKY_SFC_SW_DWN":
        {"JAN": 4.0, "FEB": 5.0, "MAR": 5.333}}}}"#;
    let hours = sun_hours_from_json(doc).expect("sun hours");
    assert!((hours - 4.78).abs() < 1e-9, "got {hours}");
}

#[test]
fn missing_parameter() {
    let doc = r#"{"properties":{"parameter":{"T2M":{"JAN": 25.0}}}}"#;
    assert!(matches!(
        sun_hours_from_json(doc),
        Err(ClimatologyError::MissingParameter)
    ));
}

#[test]
fn empty_parameter() {
    let doc = r#"{"properties":{"parameter":{"ALLSKY_SFC_SW_DWN":{}}}}"#;
    assert!(matches!(sun_hours_from_json(doc), Err(ClimatologyError::Empty)));
}

#[test]
fn malformed_json() {
    assert!(matches!(
        sun_hours_from_json("not json"),
        Err(ClimatologyError::Parse(_))
    ));
}
