use serde::{Deserialize, Serialize};

/// 설치 면적 표시 단위. 내부 계산은 제곱미터로 한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    SquareMeter,
    SquareFoot,
    SquareYard,
}

impl AreaUnit {
    /// 1 단위가 몇 m²인지
    fn square_meters(&self) -> f64 {
        match self {
            AreaUnit::SquareMeter => 1.0,
            AreaUnit::SquareFoot => 0.092_903_04,
            AreaUnit::SquareYard => 0.836_127_36,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AreaUnit::SquareMeter => "m²",
            AreaUnit::SquareFoot => "ft²",
            AreaUnit::SquareYard => "yd²",
        }
    }
}

/// 면적을 변환한다.
pub fn convert_area(value: f64, from: AreaUnit, to: AreaUnit) -> f64 {
    value * from.square_meters() / to.square_meters()
}
