use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sizing::{EstimationConfig, EstimationResult};

/// 연도별 누적 계통 비용과 태양광 순비용.
///
/// 모든 벡터의 길이는 `years`와 같고, 인덱스 `i`는 `i + 1`년차를 뜻한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSeries {
    pub years: usize,
    /// 계통 요금만 낼 때의 누적 비용
    pub cumulative_grid_cost: Vec<f64>,
    /// 출력 저하를 반영한 누적 절감액
    pub cumulative_solar_savings: Vec<f64>,
    /// 초기 투자비 + 누적 계통 비용 - 누적 절감액
    pub cumulative_net_solar_cost: Vec<f64>,
    /// 순비용이 처음으로 계통 비용 이하가 되는 인덱스. 기간 내에 없으면 None.
    pub payback_year_index: Option<usize>,
}

impl ProjectionSeries {
    /// "Year 1" .. "Year N" 라벨
    pub fn labels(&self) -> Vec<String> {
        (1..=self.years).map(|y| format!("Year {y}")).collect()
    }

    /// 회수 연차(1부터 시작).
    pub fn payback_year(&self) -> Option<usize> {
        self.payback_year_index.map(|i| i + 1)
    }
}

/// 상승률 `rate`로 복리 증가하는 연간 요금의 `year`년 누적합.
fn compounded_total(annual: f64, rate: f64, year: usize) -> f64 {
    let n = year as i32;
    if rate == 0.0 {
        annual * f64::from(n)
    } else {
        annual * (((1.0 + rate).powi(n) - 1.0) / rate)
    }
}

/// 산정 결과로 누적 비용 추이를 만든다. 렌더링은 하지 않는다.
pub fn build_projection(result: &EstimationResult, config: &EstimationConfig) -> ProjectionSeries {
    let k = &config.coefficients;
    let years = k.projection_years;
    let annual_bill = result.monthly_grid_bill * 12.0;
    let retention = 1.0 - config.degradation_rate_percent_per_year / 100.0;

    let cumulative_grid_cost: Vec<f64> = (1..=years)
        .map(|year| compounded_total(annual_bill, k.grid_inflation_rate, year))
        .collect();

    let mut cumulative_solar_savings = Vec::with_capacity(years);
    let mut annual_saving = result.monthly_savings * 12.0;
    let mut running = 0.0;
    for i in 0..years {
        if i > 0 {
            annual_saving *= retention;
        }
        running += annual_saving;
        cumulative_solar_savings.push(running);
    }

    let cumulative_net_solar_cost: Vec<f64> = cumulative_grid_cost
        .iter()
        .zip(&cumulative_solar_savings)
        .map(|(grid, saved)| result.initial_cost + grid - saved)
        .collect();

    let payback_year_index = cumulative_net_solar_cost
        .iter()
        .zip(&cumulative_grid_cost)
        .position(|(net, grid)| net <= grid);

    debug!(years, ?payback_year_index, "built cost projection");
    ProjectionSeries {
        years,
        cumulative_grid_cost,
        cumulative_solar_savings,
        cumulative_net_solar_cost,
        payback_year_index,
    }
}
