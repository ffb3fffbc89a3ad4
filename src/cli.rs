//! 명령행 인자 정의.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;
use crate::estimation::{EstimationConfig, Preset};

#[derive(Parser, Debug)]
#[command(author, version, about = "Solar PV system sizing estimator", propagate_version = true)]
pub struct Args {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// UI 언어 (ko, en, auto)
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// 언어팩(TOML) 디렉터리
    #[arg(long, global = true)]
    pub locales: Option<PathBuf>,

    /// 로그 상세도 (-v: info, -vv: debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// 생략하면 대화형 메뉴를 실행한다.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Estimate from monthly consumption in kWh.
    Monthly(MonthlyArgs),

    /// Estimate from a preset or an appliance file.
    Appliances(ApplianceArgs),

    /// List the built-in appliance presets.
    Presets,

    /// Derive sun hours from an irradiance climatology JSON document.
    SunHours(SunHoursArgs),

    /// Estimate and export report.txt, report.json and chart.json.
    Report(ReportArgs),
}

/// 한 번 실행할 때만 적용되는 산정 조건. 설정 파일에는 저장하지 않는다.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct EstimationOverrides {
    /// 일사 시간 [h/일]
    #[arg(long)]
    pub sun_hours: Option<f64>,

    /// 전력 단가 [통화/kWh]
    #[arg(long)]
    pub grid_rate: Option<f64>,

    /// 출력 저하율 [%/년]
    #[arg(long)]
    pub degradation: Option<f64>,

    /// 설치 가능 면적 [m²]
    #[arg(long)]
    pub available_area: Option<f64>,
}

impl EstimationOverrides {
    pub fn applied_to(&self, base: &EstimationConfig) -> EstimationConfig {
        let mut cfg = base.clone();
        if let Some(v) = self.sun_hours {
            cfg.sun_hours_per_day = v;
        }
        if let Some(v) = self.grid_rate {
            cfg.grid_rate_per_unit = v;
        }
        if let Some(v) = self.degradation {
            cfg.degradation_rate_percent_per_year = v;
        }
        if let Some(v) = self.available_area {
            cfg.available_area_m2 = v;
        }
        cfg
    }
}

#[derive(ClapArgs, Debug)]
pub struct MonthlyArgs {
    /// 월 사용량 [kWh]
    #[arg(long)]
    pub units: f64,

    /// 25년 누적 비용 표 출력
    #[arg(long)]
    pub projection: bool,

    #[command(flatten)]
    pub overrides: EstimationOverrides,
}

#[derive(ClapArgs, Debug)]
pub struct ApplianceArgs {
    /// 프리셋 이름 (rural, flat, villa, custom 또는 전체 이름)
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub preset: Option<Preset>,

    /// 가전 목록 파일 (.toml 또는 .json)
    #[arg(long)]
    pub file: Option<PathBuf>,

    #[arg(long)]
    pub projection: bool,

    #[command(flatten)]
    pub overrides: EstimationOverrides,
}

#[derive(ClapArgs, Debug)]
pub struct SunHoursArgs {
    /// 기후 통계 JSON 파일
    #[arg(long)]
    pub file: PathBuf,

    /// 결과를 설정 파일에 저장
    #[arg(long)]
    pub save: bool,
}

#[derive(ClapArgs, Debug)]
pub struct ReportArgs {
    #[arg(long, conflicts_with = "preset", required_unless_present = "preset")]
    pub units: Option<f64>,

    #[arg(long)]
    pub preset: Option<Preset>,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// 설치업체 이름. 생략하면 목록의 첫 업체.
    #[arg(long)]
    pub installer: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// 출력 폴더
    #[arg(long, default_value = "report")]
    pub out: PathBuf,

    #[command(flatten)]
    pub overrides: EstimationOverrides,
}
