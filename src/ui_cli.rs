use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::warn;

use crate::app::AppError;
use crate::climatology::{self, DEFAULT_SUN_HOURS};
use crate::config::Config;
use crate::estimation::{
    build_projection, estimate_from_appliances, estimate_from_monthly_units, ApplianceEntry,
    EstimationResult, Preset,
};
use crate::i18n::{keys, Translator};
use crate::report::{Contact, Location, Report, ReportError, INSTALLERS};
use crate::tables;
use crate::units::AreaUnit;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    MonthlyEstimate,
    ApplianceEstimate,
    Projection,
    Report,
    Settings,
    Exit,
}

/// 화면 쪽이 들고 있는 가변 상태. 산정 엔진은 이 값을 모른다.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub last_result: Option<EstimationResult>,
    pub contact: Contact,
    pub location: Location,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_MONTHLY));
    println!("{}", tr.t(keys::MAIN_MENU_APPLIANCE));
    println!("{}", tr.t(keys::MAIN_MENU_PROJECTION));
    println!("{}", tr.t(keys::MAIN_MENU_REPORT));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = match read_line(tr.t(keys::PROMPT_MENU_SELECT)) {
            Ok(sel) => sel,
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Ok(MenuChoice::Exit)
            }
            Err(e) => return Err(e),
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::MonthlyEstimate),
            "2" => return Ok(MenuChoice::ApplianceEstimate),
            "3" => return Ok(MenuChoice::Projection),
            "4" => return Ok(MenuChoice::Report),
            "5" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn show_result(tr: &Translator, cfg: &Config, result: &EstimationResult) {
    println!("{}", tr.t(keys::RESULT_HEADING));
    println!("{}", tables::build_result_table(result, tr, &cfg.default_units));
}

/// 월 사용량 산정 메뉴를 처리한다.
pub fn handle_monthly(tr: &Translator, cfg: &Config, session: &mut Session) -> Result<(), AppError> {
    println!("{}", tr.t(keys::MONTHLY_HEADING));
    let units = read_f64(tr, tr.t(keys::PROMPT_MONTHLY_UNITS))?;
    match estimate_from_monthly_units(units, &cfg.estimation) {
        Ok(result) => {
            show_result(tr, cfg, &result);
            session.last_result = Some(result);
        }
        Err(_) => println!("{}", tr.t(keys::ESTIMATE_INVALID_MONTHLY)),
    }
    Ok(())
}

/// 가전 목록 산정 메뉴를 처리한다.
pub fn handle_appliances(
    tr: &Translator,
    cfg: &Config,
    session: &mut Session,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::APPLIANCE_HEADING));
    for (i, preset) in Preset::ALL.iter().enumerate() {
        println!("{}) {}", i + 1, preset.name());
    }
    let preset = loop {
        let sel = read_line(tr.t(keys::PROMPT_PRESET))?;
        match sel.trim().parse::<usize>() {
            Ok(n) if (1..=Preset::ALL.len()).contains(&n) => break Preset::ALL[n - 1],
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    };
    let appliances = if preset == Preset::Custom {
        read_custom_appliances(tr)?
    } else {
        preset.appliances()
    };
    match estimate_from_appliances(&appliances, &cfg.estimation) {
        Ok(result) => {
            println!(
                "{} {:.2}",
                tr.t(keys::APPLIANCE_DERIVED_UNITS),
                result.monthly_units
            );
            show_result(tr, cfg, &result);
            session.last_result = Some(result);
        }
        Err(_) => println!("{}", tr.t(keys::ESTIMATE_INVALID_APPLIANCES)),
    }
    Ok(())
}

fn read_custom_appliances(tr: &Translator) -> Result<Vec<ApplianceEntry>, AppError> {
    println!("{}", tr.t(keys::APPLIANCE_CUSTOM_HINT));
    let mut appliances = Vec::new();
    loop {
        let name = read_line(tr.t(keys::PROMPT_APPLIANCE_NAME))?;
        let name = name.trim();
        if name.is_empty() {
            break;
        }
        let power = read_f64(tr, tr.t(keys::PROMPT_APPLIANCE_POWER))?;
        let hours = read_f64(tr, tr.t(keys::PROMPT_APPLIANCE_HOURS))?;
        let days = read_f64(tr, tr.t(keys::PROMPT_APPLIANCE_DAYS))?;
        appliances.push(ApplianceEntry::new(name, power, hours, days));
    }
    Ok(appliances)
}

/// 마지막 산정 결과의 25년 비용 비교를 출력한다.
pub fn handle_projection(tr: &Translator, cfg: &Config, session: &Session) {
    println!("{}", tr.t(keys::PROJECTION_HEADING));
    let Some(result) = &session.last_result else {
        println!("{}", tr.t(keys::ESTIMATION_REQUIRED));
        return;
    };
    let projection = build_projection(result, &cfg.estimation);
    println!("{}", tables::build_projection_table(&projection, tr));
    match projection.payback_year() {
        Some(year) => println!("{} {year}", tr.t(keys::PROJECTION_PAYBACK)),
        None => println!("{}", tr.t(keys::PROJECTION_NO_PAYBACK)),
    }
}

/// 보고서 내보내기 메뉴를 처리한다.
pub fn handle_report(tr: &Translator, cfg: &Config, session: &mut Session) -> Result<(), AppError> {
    println!("{}", tr.t(keys::REPORT_HEADING));
    let Some(result) = session.last_result.as_ref() else {
        println!("{}", tr.t(keys::ESTIMATION_REQUIRED));
        return Ok(());
    };
    session.contact.name = read_line(tr.t(keys::PROMPT_NAME))?.trim().to_string();
    session.contact.email = read_line(tr.t(keys::PROMPT_EMAIL))?.trim().to_string();
    session.contact.phone = read_line(tr.t(keys::PROMPT_PHONE))?.trim().to_string();
    session.location = Location {
        lat: read_optional_f64(tr, tr.t(keys::PROMPT_LATITUDE))?,
        lon: read_optional_f64(tr, tr.t(keys::PROMPT_LONGITUDE))?,
    };

    println!("{}", tr.t(keys::REPORT_INSTALLERS));
    for (i, installer) in INSTALLERS.iter().enumerate() {
        println!("{}) {}", i + 1, installer.name);
    }
    let sel = read_line(tr.t(keys::PROMPT_SELECT))?;
    let installer = sel
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| INSTALLERS.get(i).copied())
        .unwrap_or(INSTALLERS[0]);

    let projection = build_projection(result, &cfg.estimation);
    let report = match Report::prepare(
        session.contact.clone(),
        installer,
        session.location,
        cfg.estimation.sun_hours_per_day,
        Some(result),
        Some(&projection),
    ) {
        Ok(report) => report,
        Err(ReportError::MissingEmail) => {
            println!("{}", tr.t(keys::REPORT_MISSING_EMAIL));
            return Ok(());
        }
        Err(ReportError::NoEstimation) => {
            println!("{}", tr.t(keys::ESTIMATION_REQUIRED));
            return Ok(());
        }
        Err(e) => {
            warn!(error = %e, "report rejected");
            println!("{} {e}", tr.t(keys::REPORT_EXPORT_FAILED));
            return Ok(());
        }
    };

    let dir = read_line(tr.t(keys::PROMPT_OUTPUT_DIR))?;
    let dir = match dir.trim() {
        "" => PathBuf::from("report"),
        other => PathBuf::from(other),
    };
    match report.write_to_dir(&dir) {
        Ok(exported) => println!("{} {}", tr.t(keys::REPORT_SAVED), exported.summary.display()),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "report export failed");
            println!("{} {e}", tr.t(keys::REPORT_EXPORT_FAILED));
        }
    }
    Ok(())
}

/// 설정 메뉴를 처리한다. 언어가 바뀌면 새 언어 코드를 돌려준다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<Option<String>, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    let est = &cfg.estimation;
    println!(
        "{} sun={} h, rate={}, degradation={} %, area={} m², lang={}, area_unit={}",
        tr.t(keys::SETTINGS_CURRENT),
        est.sun_hours_per_day,
        est.grid_rate_per_unit,
        est.degradation_rate_percent_per_year,
        est.available_area_m2,
        tr.language_code(),
        cfg.default_units.area.symbol()
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let mut new_language = None;
    match sel.trim() {
        "" => return Ok(None),
        "1" => cfg.estimation.sun_hours_per_day = read_f64(tr, tr.t(keys::PROMPT_SUN_HOURS))?,
        "2" => cfg.estimation.grid_rate_per_unit = read_f64(tr, tr.t(keys::PROMPT_GRID_RATE))?,
        "3" => {
            cfg.estimation.degradation_rate_percent_per_year =
                read_f64(tr, tr.t(keys::PROMPT_DEGRADATION))?
        }
        "4" => cfg.estimation.available_area_m2 = read_f64(tr, tr.t(keys::PROMPT_AVAILABLE_AREA))?,
        "5" => {
            let code = read_line(tr.t(keys::PROMPT_LANGUAGE))?.trim().to_lowercase();
            if code.starts_with("ko") || code.starts_with("en") {
                cfg.language = Some(code.clone());
                new_language = Some(code);
            } else {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                return Ok(None);
            }
        }
        "6" => {
            println!("{}", tr.t(keys::AREA_UNIT_OPTIONS));
            cfg.default_units.area = match read_line(tr.t(keys::PROMPT_SELECT))?.trim() {
                "1" => AreaUnit::SquareMeter,
                "2" => AreaUnit::SquareFoot,
                "3" => AreaUnit::SquareYard,
                _ => {
                    println!("{}", tr.t(keys::SETTINGS_INVALID));
                    return Ok(None);
                }
            };
        }
        "7" => {
            let path = read_line(tr.t(keys::PROMPT_CLIMATOLOGY_FILE))?;
            let hours = fs::read_to_string(path.trim())
                .map_err(AppError::from)
                .and_then(|src| climatology::sun_hours_from_json(&src).map_err(AppError::from));
            cfg.estimation.sun_hours_per_day = match hours {
                Ok(h) => h,
                Err(e) => {
                    warn!(error = %e, "falling back to default sun hours");
                    println!("{}", tr.t(keys::SUN_HOURS_FALLBACK));
                    DEFAULT_SUN_HOURS
                }
            };
            println!(
                "{} {}",
                tr.t(keys::SUN_HOURS_RESULT),
                cfg.estimation.sun_hours_per_day
            );
        }
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(None);
        }
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(new_language)
}

/// 한 줄을 읽는다. 입력이 이미 끝났으면 `UnexpectedEof`를 돌려준다.
pub fn next_line<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut buf = String::new();
    if reader.read_line(&mut buf)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "입력이 끝났습니다.",
        ));
    }
    Ok(buf)
}

/// 빈 입력은 None, 숫자가 아니면 오류.
pub fn parse_optional_f64(s: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    match s.trim() {
        "" => Ok(None),
        other => other.parse().map(Some),
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    next_line(&mut io::stdin().lock()).map_err(AppError::Io)
}

fn read_optional_f64(tr: &Translator, prompt: &str) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(prompt)?;
        match parse_optional_f64(&s) {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_line_reports_end_of_input() {
        let mut input: &[u8] = b"1\n";
        assert_eq!(next_line(&mut input).expect("line"), "1\n");
        let err = next_line(&mut input).expect_err("eof");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn blank_coordinate_is_unknown() {
        assert_eq!(parse_optional_f64("  \n"), Ok(None));
        assert_eq!(parse_optional_f64("-12.5\n"), Ok(Some(-12.5)));
        assert!(parse_optional_f64("north").is_err());
    }
}
