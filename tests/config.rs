//! 설정 파일 로드/저장 테스트.
use std::fs;

use solar_sizing_toolbox::config::{self, Config};
use solar_sizing_toolbox::estimation::{Coefficients, EstimationConfig};
use solar_sizing_toolbox::units::AreaUnit;

#[test]
fn partial_file_keeps_defaults() {
    let cfg = Config::from_toml_str("[estimation]\nsun_hours_per_day = 6.0\n").expect("parse");
    assert_eq!(cfg.estimation.sun_hours_per_day, 6.0);
    assert_eq!(cfg.estimation.grid_rate_per_unit, 8.0);
    assert_eq!(cfg.estimation.degradation_rate_percent_per_year, 0.8);
    assert_eq!(cfg.estimation.coefficients, Coefficients::default());
    assert_eq!(cfg.default_units.area, AreaUnit::SquareMeter);
    assert!(cfg.language.is_none());
}

#[test]
fn default_coefficients() {
    let k = Coefficients::default();
    assert_eq!(k.cost_per_kw, 60_000.0);
    assert_eq!(k.area_per_kw_m2, 10.0);
    assert_eq!(k.battery_autonomy_hours, 4.0);
    assert_eq!(k.battery_cell_ah, 150.0);
    assert_eq!(k.battery_cell_voltage, 12.0);
    assert_eq!(k.grid_inflation_rate, 0.05);
    assert_eq!(k.projection_years, 25);
}

#[test]
fn toml_round_trip_preserves_settings() {
    let mut cfg = Config::default();
    cfg.language = Some("en".into());
    cfg.estimation.available_area_m2 = 42.5;
    cfg.default_units.area = AreaUnit::SquareFoot;
    let text = cfg.to_toml_string().expect("serialize");
    let back = Config::from_toml_str(&text).expect("parse");
    assert_eq!(back.language.as_deref(), Some("en"));
    assert_eq!(back.estimation, cfg.estimation);
    assert_eq!(back.default_units.area, AreaUnit::SquareFoot);
}

#[test]
fn load_or_default_creates_file() {
    let path = std::env::temp_dir().join(format!("solar_config_{}.toml", std::process::id()));
    let _ = fs::remove_file(&path);
    let cfg = config::load_or_default(&path).expect("create");
    assert!(path.exists());
    assert_eq!(cfg.estimation, EstimationConfig::default());

    let mut changed = cfg.clone();
    changed.estimation.grid_rate_per_unit = 9.5;
    changed.save(&path).expect("save");
    let reloaded = config::load_or_default(&path).expect("reload");
    assert_eq!(reloaded.estimation.grid_rate_per_unit, 9.5);
    let _ = fs::remove_file(&path);
}
