use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_MONTHLY: &str = "main_menu.monthly";
    pub const MAIN_MENU_APPLIANCE: &str = "main_menu.appliance";
    pub const MAIN_MENU_PROJECTION: &str = "main_menu.projection";
    pub const MAIN_MENU_REPORT: &str = "main_menu.report";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const MONTHLY_HEADING: &str = "monthly.heading";
    pub const PROMPT_MONTHLY_UNITS: &str = "monthly.prompt_units";
    pub const ESTIMATE_INVALID_MONTHLY: &str = "monthly.invalid";

    pub const APPLIANCE_HEADING: &str = "appliance.heading";
    pub const PROMPT_PRESET: &str = "appliance.prompt_preset";
    pub const APPLIANCE_CUSTOM_HINT: &str = "appliance.custom_hint";
    pub const PROMPT_APPLIANCE_NAME: &str = "appliance.prompt_name";
    pub const PROMPT_APPLIANCE_POWER: &str = "appliance.prompt_power";
    pub const PROMPT_APPLIANCE_HOURS: &str = "appliance.prompt_hours";
    pub const PROMPT_APPLIANCE_DAYS: &str = "appliance.prompt_days";
    pub const APPLIANCE_DERIVED_UNITS: &str = "appliance.derived_units";
    pub const ESTIMATE_INVALID_APPLIANCES: &str = "appliance.invalid";

    pub const PROJECTION_HEADING: &str = "projection.heading";
    pub const PROJECTION_PAYBACK: &str = "projection.payback";
    pub const PROJECTION_NO_PAYBACK: &str = "projection.no_payback";
    pub const ESTIMATION_REQUIRED: &str = "projection.estimation_required";

    pub const REPORT_HEADING: &str = "report.heading";
    pub const PROMPT_NAME: &str = "report.prompt_name";
    pub const PROMPT_EMAIL: &str = "report.prompt_email";
    pub const PROMPT_PHONE: &str = "report.prompt_phone";
    pub const PROMPT_LATITUDE: &str = "report.prompt_latitude";
    pub const PROMPT_LONGITUDE: &str = "report.prompt_longitude";
    pub const REPORT_EXPORT_FAILED: &str = "report.export_failed";
    pub const REPORT_INSTALLERS: &str = "report.installers";
    pub const PROMPT_OUTPUT_DIR: &str = "report.prompt_output_dir";
    pub const REPORT_SAVED: &str = "report.saved";
    pub const REPORT_MISSING_EMAIL: &str = "report.missing_email";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const PROMPT_SUN_HOURS: &str = "settings.prompt_sun_hours";
    pub const PROMPT_GRID_RATE: &str = "settings.prompt_grid_rate";
    pub const PROMPT_DEGRADATION: &str = "settings.prompt_degradation";
    pub const PROMPT_AVAILABLE_AREA: &str = "settings.prompt_available_area";
    pub const PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const AREA_UNIT_OPTIONS: &str = "settings.area_unit_options";

    pub const SUN_HOURS_FALLBACK: &str = "sun_hours.fallback";
    pub const SUN_HOURS_RESULT: &str = "sun_hours.result";
    pub const PROMPT_CLIMATOLOGY_FILE: &str = "sun_hours.prompt_file";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_MONTHLY_UNITS: &str = "result.monthly_units";
    pub const RESULT_REQUIRED_SYSTEM: &str = "result.required_system";
    pub const RESULT_AREA: &str = "result.area";
    pub const RESULT_AREA_SUFFICIENT: &str = "result.area_sufficient";
    pub const RESULT_AREA_INSUFFICIENT: &str = "result.area_insufficient";
    pub const RESULT_COST: &str = "result.cost";
    pub const RESULT_GRID_BILL: &str = "result.grid_bill";
    pub const RESULT_SAVINGS: &str = "result.savings";
    pub const RESULT_PAYBACK: &str = "result.payback";
    pub const RESULT_BATTERY: &str = "result.battery";
    pub const RESULT_BATTERY_COUNT: &str = "result.battery_count";

    pub const TABLE_ITEM: &str = "table.item";
    pub const TABLE_VALUE: &str = "table.value";
    pub const TABLE_YEAR: &str = "table.year";
    pub const TABLE_GRID_COST: &str = "table.grid_cost";
    pub const TABLE_SOLAR_SAVINGS: &str = "table.solar_savings";
    pub const TABLE_NET_SOLAR: &str = "table.net_solar";
    pub const TABLE_PRESET: &str = "table.preset";
    pub const TABLE_APPLIANCE: &str = "table.appliance";
    pub const TABLE_POWER: &str = "table.power";
    pub const TABLE_HOURS: &str = "table.hours";
    pub const TABLE_DAYS: &str = "table.days";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&Path>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides(Path::new("locales"), lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 → 선택 언어 → 한국어 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 테이블은 점(.)으로 이어 붙인 키가 된다.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let path = dir.join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Solar Sizing Toolbox ===",
        MAIN_MENU_MONTHLY => "1) 월 사용량으로 산정",
        MAIN_MENU_APPLIANCE => "2) 가전 목록으로 산정",
        MAIN_MENU_PROJECTION => "3) 25년 비용 비교",
        MAIN_MENU_REPORT => "4) 보고서 내보내기",
        MAIN_MENU_SETTINGS => "5) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        MONTHLY_HEADING => "\n-- 월 사용량 산정 --",
        PROMPT_MONTHLY_UNITS => "월 사용량 [kWh]: ",
        ESTIMATE_INVALID_MONTHLY => "정확한 산정을 위해 유효한 월 사용량과 일사 시간을 입력하세요.",
        APPLIANCE_HEADING => "\n-- 가전 목록 산정 --",
        PROMPT_PRESET => "프리셋 번호: ",
        APPLIANCE_CUSTOM_HINT => "가전을 입력하세요. 이름을 비워 두면 입력을 마칩니다.",
        PROMPT_APPLIANCE_NAME => "가전 이름: ",
        PROMPT_APPLIANCE_POWER => "소비전력 [W]: ",
        PROMPT_APPLIANCE_HOURS => "하루 사용 시간 [h]: ",
        PROMPT_APPLIANCE_DAYS => "월 사용 일수: ",
        APPLIANCE_DERIVED_UNITS => "환산 월 사용량 [kWh]:",
        ESTIMATE_INVALID_APPLIANCES => "가전을 선택하거나 입력하세요.",
        PROJECTION_HEADING => "\n-- 25년 누적 비용 비교 --",
        PROJECTION_PAYBACK => "회수 시점: Year",
        PROJECTION_NO_PAYBACK => "분석 기간 내에 회수되지 않습니다.",
        ESTIMATION_REQUIRED => "먼저 산정을 수행하세요.",
        REPORT_HEADING => "\n-- 보고서 내보내기 --",
        PROMPT_NAME => "이름: ",
        PROMPT_EMAIL => "이메일: ",
        PROMPT_PHONE => "전화번호: ",
        PROMPT_LATITUDE => "위도 (엔터=모름): ",
        PROMPT_LONGITUDE => "경도 (엔터=모름): ",
        REPORT_EXPORT_FAILED => "보고서를 저장하지 못했습니다:",
        REPORT_INSTALLERS => "설치업체:",
        PROMPT_OUTPUT_DIR => "저장 폴더 (엔터=report): ",
        REPORT_SAVED => "보고서를 저장했습니다:",
        REPORT_MISSING_EMAIL => "이메일을 입력하세요.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "현재 설정:",
        SETTINGS_OPTIONS => "1) 일사 시간  2) 전력 단가  3) 출력 저하율  4) 설치 가능 면적  5) 언어  6) 면적 단위  7) 일사량 파일",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 변경되었습니다.",
        PROMPT_SUN_HOURS => "일사 시간 [h/일]: ",
        PROMPT_GRID_RATE => "전력 단가 [₹/kWh]: ",
        PROMPT_DEGRADATION => "출력 저하율 [%/년]: ",
        PROMPT_AVAILABLE_AREA => "설치 가능 면적 [m²] (0=미지정): ",
        PROMPT_LANGUAGE => "언어 (ko/en): ",
        AREA_UNIT_OPTIONS => "면적 단위: 1=m² 2=ft² 3=yd²",
        SUN_HOURS_FALLBACK => "일사 시간을 가져오지 못해 기본값을 사용합니다.",
        SUN_HOURS_RESULT => "일사 시간 [h/일]:",
        PROMPT_CLIMATOLOGY_FILE => "일사량 JSON 파일 경로: ",
        RESULT_HEADING => "\n📊 산정 결과",
        RESULT_MONTHLY_UNITS => "월 사용량",
        RESULT_REQUIRED_SYSTEM => "필요 설비 용량",
        RESULT_AREA => "필요 면적",
        RESULT_AREA_SUFFICIENT => "면적 충분",
        RESULT_AREA_INSUFFICIENT => "면적 부족",
        RESULT_COST => "예상 설치비",
        RESULT_GRID_BILL => "월 전기 요금",
        RESULT_SAVINGS => "월 절감액",
        RESULT_PAYBACK => "회수 기간",
        RESULT_BATTERY => "배터리 용량",
        RESULT_BATTERY_COUNT => "150Ah 배터리 개수",
        TABLE_ITEM => "항목",
        TABLE_VALUE => "값",
        TABLE_YEAR => "연차",
        TABLE_GRID_COST => "누적 계통 비용",
        TABLE_SOLAR_SAVINGS => "누적 절감액",
        TABLE_NET_SOLAR => "태양광 순비용",
        TABLE_PRESET => "프리셋",
        TABLE_APPLIANCE => "가전",
        TABLE_POWER => "W",
        TABLE_HOURS => "h/일",
        TABLE_DAYS => "일/월",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Solar Sizing Toolbox ===",
        MAIN_MENU_MONTHLY => "1) Estimate from monthly units",
        MAIN_MENU_APPLIANCE => "2) Estimate from appliances",
        MAIN_MENU_PROJECTION => "3) 25-year cost comparison",
        MAIN_MENU_REPORT => "4) Export report",
        MAIN_MENU_SETTINGS => "5) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        MONTHLY_HEADING => "\n-- Monthly Mode --",
        PROMPT_MONTHLY_UNITS => "Monthly units [kWh]: ",
        ESTIMATE_INVALID_MONTHLY => "Please enter valid monthly units and sun hours for accurate estimation.",
        APPLIANCE_HEADING => "\n-- Appliance Mode --",
        PROMPT_PRESET => "Preset number: ",
        APPLIANCE_CUSTOM_HINT => "Enter appliances. Leave the name blank to finish.",
        PROMPT_APPLIANCE_NAME => "Appliance name: ",
        PROMPT_APPLIANCE_POWER => "Power [W]: ",
        PROMPT_APPLIANCE_HOURS => "Hours per day: ",
        PROMPT_APPLIANCE_DAYS => "Days per month: ",
        APPLIANCE_DERIVED_UNITS => "Derived monthly units [kWh]:",
        ESTIMATE_INVALID_APPLIANCES => "Please select or enter appliances.",
        PROJECTION_HEADING => "\n-- 25-Year Cost Comparison --",
        PROJECTION_PAYBACK => "Payback: Year",
        PROJECTION_NO_PAYBACK => "No payback within the projection period.",
        ESTIMATION_REQUIRED => "Please perform an estimation first.",
        REPORT_HEADING => "\n-- Export Report --",
        PROMPT_NAME => "Name: ",
        PROMPT_EMAIL => "Email: ",
        PROMPT_PHONE => "Phone: ",
        PROMPT_LATITUDE => "Latitude (enter=unknown): ",
        PROMPT_LONGITUDE => "Longitude (enter=unknown): ",
        REPORT_EXPORT_FAILED => "Failed to save the report:",
        REPORT_INSTALLERS => "Installers:",
        PROMPT_OUTPUT_DIR => "Output folder (enter=report): ",
        REPORT_SAVED => "Report saved:",
        REPORT_MISSING_EMAIL => "Please enter your email.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Current settings:",
        SETTINGS_OPTIONS => "1) Sun hours  2) Grid rate  3) Degradation  4) Available area  5) Language  6) Area unit  7) Irradiance file",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; settings unchanged.",
        SETTINGS_SAVED => "Settings updated.",
        PROMPT_SUN_HOURS => "Sun hours [h/day]: ",
        PROMPT_GRID_RATE => "Grid rate [₹/unit]: ",
        PROMPT_DEGRADATION => "Degradation rate [%/yr]: ",
        PROMPT_AVAILABLE_AREA => "Available area [m²] (0=unset): ",
        PROMPT_LANGUAGE => "Language (ko/en): ",
        AREA_UNIT_OPTIONS => "Area unit: 1=m² 2=ft² 3=yd²",
        SUN_HOURS_FALLBACK => "Failed to fetch sun hours. Using default value.",
        SUN_HOURS_RESULT => "Sun hours [h/day]:",
        PROMPT_CLIMATOLOGY_FILE => "Irradiance JSON file: ",
        RESULT_HEADING => "\n📊 Estimation Result",
        RESULT_MONTHLY_UNITS => "Monthly units",
        RESULT_REQUIRED_SYSTEM => "Required system",
        RESULT_AREA => "Area needed",
        RESULT_AREA_SUFFICIENT => "Area sufficient",
        RESULT_AREA_INSUFFICIENT => "Area insufficient",
        RESULT_COST => "Estimated cost",
        RESULT_GRID_BILL => "Monthly grid bill",
        RESULT_SAVINGS => "Monthly savings",
        RESULT_PAYBACK => "Payback time",
        RESULT_BATTERY => "Battery size needed",
        RESULT_BATTERY_COUNT => "150Ah batteries",
        TABLE_ITEM => "Item",
        TABLE_VALUE => "Value",
        TABLE_YEAR => "Year",
        TABLE_GRID_COST => "Cumulative grid cost",
        TABLE_SOLAR_SAVINGS => "Cumulative savings",
        TABLE_NET_SOLAR => "Solar net cost",
        TABLE_PRESET => "Preset",
        TABLE_APPLIANCE => "Appliance",
        TABLE_POWER => "W",
        TABLE_HOURS => "h/day",
        TABLE_DAYS => "days/month",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_locale_strings() {
        assert_eq!(normalize_locale_string("ko_KR.UTF-8").as_deref(), Some("ko"));
        assert_eq!(normalize_locale_string("en-US").as_deref(), Some("en"));
        assert_eq!(normalize_locale_string("hi_IN"), None);
    }

    #[test]
    fn nested_tables_flatten_to_dotted_keys() {
        let map = parse_toml_to_map("[result]\ncost = \"Cost\"\n").expect("map");
        assert_eq!(map.get("result.cost").map(String::as_str), Some("Cost"));
    }
}
