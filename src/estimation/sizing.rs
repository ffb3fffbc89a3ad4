use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::appliance::{monthly_units, ApplianceEntry};

/// 산정 입력 오류.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimationError {
    /// 필수 숫자 입력이 없거나 0 이하
    InvalidInput(&'static str),
}

impl std::fmt::Display for EstimationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimationError::InvalidInput(msg) => write!(f, "입력 오류: {msg}"),
        }
    }
}

impl std::error::Error for EstimationError {}

/// 고정 사업 가정값. 기본값이 표준 산식을 그대로 재현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coefficients {
    /// kW당 설치비 [통화/kW]
    pub cost_per_kw: f64,
    /// kW당 필요 면적 [m²/kW]
    pub area_per_kw_m2: f64,
    /// 배터리 자립 시간 [h]
    pub battery_autonomy_hours: f64,
    /// 배터리 셀 용량 [Ah]
    pub battery_cell_ah: f64,
    /// 배터리 셀 전압 [V]
    pub battery_cell_voltage: f64,
    /// 계통 요금 연간 상승률(0.05 = 5%)
    pub grid_inflation_rate: f64,
    /// 누적 비용 추이 기간 [년]
    pub projection_years: usize,
    /// 한 달 일수
    pub days_per_month: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            cost_per_kw: 60_000.0,
            area_per_kw_m2: 10.0,
            battery_autonomy_hours: 4.0,
            battery_cell_ah: 150.0,
            battery_cell_voltage: 12.0,
            grid_inflation_rate: 0.05,
            projection_years: 25,
            days_per_month: 30.0,
        }
    }
}

/// 사용자가 조정하는 산정 조건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    /// 일평균 일사 시간 [h/일]
    pub sun_hours_per_day: f64,
    /// 계통 전력 단가 [통화/kWh]
    pub grid_rate_per_unit: f64,
    /// 패널 연간 출력 저하율 [%/년]
    pub degradation_rate_percent_per_year: f64,
    /// 설치 가능 면적 [m²]. 0이면 미지정.
    pub available_area_m2: f64,
    pub coefficients: Coefficients,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            sun_hours_per_day: 5.5,
            grid_rate_per_unit: 8.0,
            degradation_rate_percent_per_year: 0.8,
            available_area_m2: 0.0,
            coefficients: Coefficients::default(),
        }
    }
}

/// 필요 면적과 설치 가능 면적 비교 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaAssessment {
    /// 설치 가능 면적 미지정
    #[serde(rename = "")]
    Unspecified,
    #[serde(rename = "sufficient")]
    Sufficient,
    #[serde(rename = "insufficient")]
    Insufficient,
}

impl AreaAssessment {
    /// 0 또는 NaN만 미지정으로 본다. 음수 면적은 지정된 값이므로 항상 부족으로 나온다.
    fn assess(required_m2: f64, available_m2: f64) -> Self {
        if available_m2 == 0.0 || available_m2.is_nan() {
            AreaAssessment::Unspecified
        } else if required_m2 > available_m2 {
            AreaAssessment::Insufficient
        } else {
            AreaAssessment::Sufficient
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AreaAssessment::Unspecified => "",
            AreaAssessment::Sufficient => "sufficient",
            AreaAssessment::Insufficient => "insufficient",
        }
    }
}

/// 산정 결과. 요청마다 새로 만들어지며 이후 변경하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    /// 산정에 사용한 월 사용량 [kWh]
    pub monthly_units: f64,
    /// 필요 설비 용량 [kW], 소수 2자리
    #[serde(rename = "requiredKW")]
    pub required_kw: f64,
    /// 필요 면적 [m²], 소수 2자리
    #[serde(rename = "area")]
    pub area_m2: f64,
    /// 설치비, 정수 반올림
    pub cost: f64,
    /// 월 계통 요금, 정수 반올림
    pub monthly_grid_bill: f64,
    /// 월 절감액. 계통 요금을 전부 상쇄한다고 가정한다.
    pub monthly_savings: f64,
    /// 단순 회수기간 [년], 소수 1자리
    pub payback_years: f64,
    /// 배터리 용량 [kWh], 소수 2자리
    #[serde(rename = "batteryKWh")]
    pub battery_kwh: f64,
    /// 필요한 배터리 셀 개수
    #[serde(rename = "num150AhBatteries")]
    pub battery_count: u32,
    pub area_comment: AreaAssessment,
    /// 누적 비용 추이의 초기 투자비
    #[serde(rename = "initialSolarCost")]
    pub initial_cost: f64,
}

/// 소수 `decimals` 자리로 반올림한다.
/// 곱셈 결과가 아니라 이진 값의 정확한 십진 전개를 기준으로 자르고,
/// 정확히 절반인 값만 0에서 먼 쪽으로 올린다.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let places = decimals.max(0);
    let factor = 10f64.powi(places);
    // 2의 거듭제곱 곱셈은 오차가 없다. 홀수 정수가 나오면 정확한 절반이다.
    let halves = value * 2f64.powi(places + 1);
    if halves.fract() == 0.0 && halves % 2.0 != 0.0 {
        return (value * factor).round() / factor;
    }
    format!("{:.*}", places as usize, value)
        .parse()
        .unwrap_or(value)
}

/// 회수기간 [년]. 월 절감액이 0 이하이면 0을 돌려준다.
fn payback_years(cost: f64, monthly_savings: f64) -> f64 {
    if !(monthly_savings > 0.0) {
        return 0.0;
    }
    round_to(cost / (monthly_savings * 12.0), 1)
}

/// 월 사용량 [kWh]으로 설비 용량과 경제성을 산정한다.
pub fn estimate_from_monthly_units(
    units: f64,
    config: &EstimationConfig,
) -> Result<EstimationResult, EstimationError> {
    if !(units > 0.0) || !units.is_finite() {
        warn!(units, "rejecting monthly units");
        return Err(EstimationError::InvalidInput(
            "월 사용량은 0보다 커야 합니다.",
        ));
    }
    if !(config.sun_hours_per_day > 0.0) || !config.sun_hours_per_day.is_finite() {
        warn!(sun_hours = config.sun_hours_per_day, "rejecting sun hours");
        return Err(EstimationError::InvalidInput(
            "일사 시간은 0보다 커야 합니다.",
        ));
    }
    let k = &config.coefficients;

    let required_kw = round_to(units / (config.sun_hours_per_day * k.days_per_month), 2);
    let area_m2 = round_to(required_kw * k.area_per_kw_m2, 2);
    let cost = round_to(required_kw * k.cost_per_kw, 0);
    let monthly_grid_bill = round_to(units * config.grid_rate_per_unit, 0);
    let monthly_savings = monthly_grid_bill;
    let payback_years = payback_years(cost, monthly_savings);
    let battery_kwh = round_to(required_kw * k.battery_autonomy_hours, 2);
    let cell_wh = k.battery_cell_voltage * k.battery_cell_ah;
    let battery_count = if cell_wh > 0.0 {
        (battery_kwh * 1000.0 / cell_wh).ceil().max(0.0) as u32
    } else {
        0
    };
    let area_comment = AreaAssessment::assess(area_m2, config.available_area_m2);

    let result = EstimationResult {
        monthly_units: units,
        required_kw,
        area_m2,
        cost,
        monthly_grid_bill,
        monthly_savings,
        payback_years,
        battery_kwh,
        battery_count,
        area_comment,
        initial_cost: cost,
    };
    debug!(units, required_kw, cost, payback_years, "estimated system size");
    Ok(result)
}

/// 가전 목록으로 월 사용량을 구한 뒤 [`estimate_from_monthly_units`]로 넘긴다.
pub fn estimate_from_appliances(
    appliances: &[ApplianceEntry],
    config: &EstimationConfig,
) -> Result<EstimationResult, EstimationError> {
    if appliances.is_empty() {
        warn!("rejecting empty appliance list");
        return Err(EstimationError::InvalidInput(
            "가전 목록을 선택하거나 입력하세요.",
        ));
    }
    let units = monthly_units(appliances);
    debug!(count = appliances.len(), units, "derived monthly units from appliances");
    estimate_from_monthly_units(units, config)
}
