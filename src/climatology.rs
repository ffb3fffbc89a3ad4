//! 일사량 기후 통계 응답(JSON)에서 일평균 일사 시간을 구한다.
//! 네트워크 요청은 하지 않는다. 호출 측이 받아온 문서를 넘겨준다.

use serde_json::Value;
use tracing::debug;

use crate::estimation::sizing::round_to;

/// 전천 일사량 파라미터 이름.
pub const IRRADIANCE_PARAMETER: &str = "ALLSKY_SFC_SW_DWN";

/// 조회 실패 시 사용하는 기본 일사 시간 [h/일]
pub const DEFAULT_SUN_HOURS: f64 = 5.5;

#[derive(Debug)]
pub enum ClimatologyError {
    /// JSON 파싱 오류
    Parse(serde_json::Error),
    /// properties.parameter.ALLSKY_SFC_SW_DWN 없음
    MissingParameter,
    /// 숫자 값이 하나도 없음
    Empty,
}

impl std::fmt::Display for ClimatologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClimatologyError::Parse(e) => write!(f, "일사량 데이터 파싱 오류: {e}"),
            ClimatologyError::MissingParameter => {
                write!(f, "일사량 데이터에 {IRRADIANCE_PARAMETER} 항목이 없습니다.")
            }
            ClimatologyError::Empty => write!(f, "일사량 데이터가 비어 있습니다."),
        }
    }
}

impl std::error::Error for ClimatologyError {}

impl From<serde_json::Error> for ClimatologyError {
    fn from(value: serde_json::Error) -> Self {
        ClimatologyError::Parse(value)
    }
}

/// 기간별 일사량(kWh/m²/일 = 피크 일사 시간)의 평균을 소수 2자리로 돌려준다.
///
/// 월별 값과 연평균 값이 함께 들어 있으면 모두 평균에 포함한다.
pub fn sun_hours_from_document(document: &Value) -> Result<f64, ClimatologyError> {
    let values = document
        .pointer(&format!("/properties/parameter/{IRRADIANCE_PARAMETER}"))
        .and_then(Value::as_object)
        .ok_or(ClimatologyError::MissingParameter)?;

    let samples: Vec<f64> = values.values().filter_map(Value::as_f64).collect();
    if samples.is_empty() {
        return Err(ClimatologyError::Empty);
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    debug!(samples = samples.len(), mean, "averaged irradiance climatology");
    Ok(round_to(mean, 2))
}

/// JSON 문자열에서 일사 시간을 구한다.
pub fn sun_hours_from_json(src: &str) -> Result<f64, ClimatologyError> {
    let document: Value = serde_json::from_str(src)?;
    sun_hours_from_document(&document)
}
