use serde::{Deserialize, Serialize};

/// 가전 한 줄(소비전력, 하루 사용시간, 월 사용일수).
///
/// 파일에서 읽을 때 빠진 숫자 필드는 0으로 취급한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceEntry {
    #[serde(default)]
    pub name: String,
    /// 소비전력 [W]
    #[serde(default)]
    pub power: f64,
    /// 하루 사용 시간 [h]
    #[serde(default)]
    pub hours_per_day: f64,
    /// 월 사용 일수 [일]
    #[serde(default)]
    pub days_per_month: f64,
}

impl ApplianceEntry {
    pub fn new(name: &str, power: f64, hours_per_day: f64, days_per_month: f64) -> Self {
        Self {
            name: name.to_string(),
            power,
            hours_per_day,
            days_per_month,
        }
    }

    /// 월간 사용 에너지 [Wh]. 숫자가 아닌 값은 0으로 본다.
    pub fn watt_hours_per_month(&self) -> f64 {
        or_zero(self.power) * or_zero(self.hours_per_day) * or_zero(self.days_per_month)
    }
}

fn or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// 가전 목록의 월 사용량 [kWh] = Σ(W × h × 일) / 1000
pub fn monthly_units(appliances: &[ApplianceEntry]) -> f64 {
    let total_wh: f64 = appliances
        .iter()
        .map(ApplianceEntry::watt_hours_per_month)
        .sum();
    total_wh / 1000.0
}

/// 가전 목록 파일 형식. `[[appliances]]` 배열(TOML) 또는 `{"appliances": [...]}`(JSON).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplianceList {
    #[serde(default)]
    pub appliances: Vec<ApplianceEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_fields_count_as_zero() {
        let entry = ApplianceEntry::new("Broken", f64::NAN, 5.0, 30.0);
        assert_eq!(entry.watt_hours_per_month(), 0.0);
    }

    #[test]
    fn missing_fields_deserialize_to_zero() {
        let list: ApplianceList =
            toml::from_str("[[appliances]]\nname = \"Pump\"\npower = 500.0\n").expect("toml");
        assert_eq!(list.appliances[0].hours_per_day, 0.0);
        assert_eq!(monthly_units(&list.appliances), 0.0);
    }
}
