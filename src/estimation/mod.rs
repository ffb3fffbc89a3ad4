//! 태양광 설비 용량 산정 엔진.
//! 월 사용량 또는 가전 목록으로부터 설비 용량, 면적, 비용, 배터리, 회수기간을 계산하고
//! 25년 누적 비용 추이를 만든다. 모든 계산은 상태가 없는 순수 함수다.

pub mod appliance;
pub mod preset;
pub mod projection;
pub mod sizing;

pub use appliance::{monthly_units, ApplianceEntry};
pub use preset::Preset;
pub use projection::{build_projection, ProjectionSeries};
pub use sizing::{
    estimate_from_appliances, estimate_from_monthly_units, AreaAssessment, Coefficients,
    EstimationConfig, EstimationError, EstimationResult,
};
