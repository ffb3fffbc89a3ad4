//! 명령행 인자 파싱 테스트.
use clap::Parser;
use solar_sizing_toolbox::cli::{Args, Command};
use solar_sizing_toolbox::estimation::{EstimationConfig, Preset};

#[test]
fn monthly_overrides_apply_without_touching_base() {
    let args = Args::try_parse_from([
        "solar_sizing_toolbox",
        "monthly",
        "--units",
        "300",
        "--sun-hours",
        "6",
        "--available-area",
        "20",
    ])
    .expect("parse");
    let Some(Command::Monthly(monthly)) = args.command else {
        panic!("expected monthly command");
    };
    assert_eq!(monthly.units, 300.0);
    let base = EstimationConfig::default();
    let applied = monthly.overrides.applied_to(&base);
    assert_eq!(applied.sun_hours_per_day, 6.0);
    assert_eq!(applied.available_area_m2, 20.0);
    assert_eq!(applied.grid_rate_per_unit, base.grid_rate_per_unit);
    assert_eq!(base.sun_hours_per_day, 5.5);
}

#[test]
fn appliances_accepts_preset_alias() {
    let args = Args::try_parse_from(["solar_sizing_toolbox", "appliances", "--preset", "flat"])
        .expect("parse");
    let Some(Command::Appliances(appliances)) = args.command else {
        panic!("expected appliances command");
    };
    assert_eq!(appliances.preset, Some(Preset::UrbanMiddleClassFlat));
}

#[test]
fn appliances_requires_preset_or_file() {
    assert!(Args::try_parse_from(["solar_sizing_toolbox", "appliances"]).is_err());
}

#[test]
fn no_command_means_interactive() {
    let args = Args::try_parse_from(["solar_sizing_toolbox", "--lang", "en"]).expect("parse");
    assert!(args.command.is_none());
    assert_eq!(args.lang.as_deref(), Some("en"));
}
