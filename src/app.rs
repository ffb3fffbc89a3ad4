use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::cli::{ApplianceArgs, Command, MonthlyArgs, ReportArgs, SunHoursArgs};
use crate::climatology::{self, ClimatologyError};
use crate::config::{Config, ConfigError};
use crate::estimation::appliance::ApplianceList;
use crate::estimation::preset::UnknownPreset;
use crate::estimation::{
    build_projection, estimate_from_appliances, estimate_from_monthly_units, ApplianceEntry,
    EstimationConfig, EstimationError, EstimationResult,
};
use crate::i18n::{self, Translator};
use crate::report::{self, Contact, Location, Report, ReportError};
use crate::tables;
use crate::ui_cli::{self, MenuChoice, Session};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 산정 입력 오류
    Estimation(EstimationError),
    /// 일사량 데이터 오류
    Climatology(ClimatologyError),
    /// 보고서 오류
    Report(ReportError),
    /// 프리셋 이름 오류
    Preset(UnknownPreset),
    /// 가전 목록 파일(TOML) 파싱 오류
    ApplianceToml(toml::de::Error),
    /// 가전 목록 파일(JSON) 파싱 오류
    ApplianceJson(serde_json::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Estimation(e) => write!(f, "산정 오류: {e}"),
            AppError::Climatology(e) => write!(f, "일사량 오류: {e}"),
            AppError::Report(e) => write!(f, "보고서 오류: {e}"),
            AppError::Preset(e) => write!(f, "{e}"),
            AppError::ApplianceToml(e) => write!(f, "가전 목록 파싱 오류: {e}"),
            AppError::ApplianceJson(e) => write!(f, "가전 목록 파싱 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<EstimationError> for AppError {
    fn from(value: EstimationError) -> Self {
        AppError::Estimation(value)
    }
}

impl From<ClimatologyError> for AppError {
    fn from(value: ClimatologyError) -> Self {
        AppError::Climatology(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        AppError::Report(value)
    }
}

impl From<UnknownPreset> for AppError {
    fn from(value: UnknownPreset) -> Self {
        AppError::Preset(value)
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, config_path: &Path, tr: &mut Translator) -> Result<(), AppError> {
    let mut session = Session::default();
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::MonthlyEstimate => ui_cli::handle_monthly(tr, config, &mut session)?,
            MenuChoice::ApplianceEstimate => ui_cli::handle_appliances(tr, config, &mut session)?,
            MenuChoice::Projection => ui_cli::handle_projection(tr, config, &session),
            MenuChoice::Report => ui_cli::handle_report(tr, config, &mut session)?,
            MenuChoice::Settings => {
                if let Some(lang) = ui_cli::handle_settings(tr, config)? {
                    *tr = Translator::new(&lang);
                }
                config.save(config_path)?;
            }
            MenuChoice::Exit => {
                config.save(config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

/// 하위 명령 하나를 실행한다.
pub fn run_command(
    command: Command,
    config: &mut Config,
    config_path: &Path,
    tr: &Translator,
) -> Result<(), AppError> {
    match command {
        Command::Monthly(args) => run_monthly(&args, config, tr),
        Command::Appliances(args) => run_appliances(&args, config, tr),
        Command::Presets => {
            println!("{}", tables::build_presets_table(tr));
            Ok(())
        }
        Command::SunHours(args) => run_sun_hours(&args, config, config_path, tr),
        Command::Report(args) => run_report(&args, config),
    }
}

fn print_estimate(
    result: &EstimationResult,
    estimation: &EstimationConfig,
    config: &Config,
    tr: &Translator,
    with_projection: bool,
) {
    println!("{}", tr.t(i18n::keys::RESULT_HEADING));
    println!("{}", tables::build_result_table(result, tr, &config.default_units));
    if with_projection {
        let projection = build_projection(result, estimation);
        println!("{}", tables::build_projection_table(&projection, tr));
        match projection.payback_year() {
            Some(year) => println!("{} {year}", tr.t(i18n::keys::PROJECTION_PAYBACK)),
            None => println!("{}", tr.t(i18n::keys::PROJECTION_NO_PAYBACK)),
        }
    }
}

fn run_monthly(args: &MonthlyArgs, config: &Config, tr: &Translator) -> Result<(), AppError> {
    let estimation = args.overrides.applied_to(&config.estimation);
    let result = estimate_from_monthly_units(args.units, &estimation)?;
    print_estimate(&result, &estimation, config, tr, args.projection);
    Ok(())
}

fn run_appliances(args: &ApplianceArgs, config: &Config, tr: &Translator) -> Result<(), AppError> {
    let estimation = args.overrides.applied_to(&config.estimation);
    let appliances = match (&args.preset, &args.file) {
        (_, Some(path)) => load_appliance_file(path)?,
        (Some(preset), None) => preset.appliances(),
        (None, None) => Vec::new(),
    };
    let result = estimate_from_appliances(&appliances, &estimation)?;
    println!(
        "{} {:.2}",
        tr.t(i18n::keys::APPLIANCE_DERIVED_UNITS),
        result.monthly_units
    );
    print_estimate(&result, &estimation, config, tr, args.projection);
    Ok(())
}

fn run_sun_hours(
    args: &SunHoursArgs,
    config: &mut Config,
    config_path: &Path,
    tr: &Translator,
) -> Result<(), AppError> {
    let src = fs::read_to_string(&args.file)?;
    let hours = climatology::sun_hours_from_json(&src)?;
    println!("{} {hours}", tr.t(i18n::keys::SUN_HOURS_RESULT));
    if args.save {
        config.estimation.sun_hours_per_day = hours;
        config.save(config_path)?;
        info!(hours, "stored sun hours in config");
    }
    Ok(())
}

fn run_report(args: &ReportArgs, config: &Config) -> Result<(), AppError> {
    let estimation = args.overrides.applied_to(&config.estimation);
    let result = match (args.units, args.preset) {
        (Some(units), _) => estimate_from_monthly_units(units, &estimation)?,
        (None, Some(preset)) => estimate_from_appliances(&preset.appliances(), &estimation)?,
        (None, None) => return Err(ReportError::NoEstimation.into()),
    };
    let projection = build_projection(&result, &estimation);
    let installer = match &args.installer {
        Some(name) => report::find_installer(name)
            .ok_or_else(|| ReportError::UnknownInstaller(name.clone()))?,
        None => report::INSTALLERS[0],
    };
    let contact = Contact {
        name: args.name.clone().unwrap_or_default(),
        email: args.email.clone(),
        phone: args.phone.clone().unwrap_or_default(),
    };
    let location = Location {
        lat: args.lat,
        lon: args.lon,
    };
    let report = Report::prepare(
        contact,
        installer,
        location,
        estimation.sun_hours_per_day,
        Some(&result),
        Some(&projection),
    )?;
    let exported = report.write_to_dir(&args.out)?;
    println!("{}", exported.summary.display());
    println!("{}", exported.payload.display());
    println!("{}", exported.chart.display());
    Ok(())
}

/// 가전 목록 파일을 읽는다. 확장자가 .json이면 JSON, 그 외는 TOML로 본다.
pub fn load_appliance_file(path: &Path) -> Result<Vec<ApplianceEntry>, AppError> {
    let src = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let list: ApplianceList = if is_json {
        serde_json::from_str(&src).map_err(AppError::ApplianceJson)?
    } else {
        toml::from_str(&src).map_err(AppError::ApplianceToml)?
    };
    if list.appliances.is_empty() {
        warn!(path = %path.display(), "appliance file has no entries");
    }
    Ok(list.appliances)
}
