use serde::{Deserialize, Serialize};

/// 전력량 표시 단위. 내부 기준은 kWh("unit")이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyUnit {
    WattHour,
    KilowattHour,
    MegawattHour,
    Megajoule,
}

impl EnergyUnit {
    /// 1 단위가 몇 kWh인지
    fn kilowatt_hours(&self) -> f64 {
        match self {
            EnergyUnit::WattHour => 1e-3,
            EnergyUnit::KilowattHour => 1.0,
            EnergyUnit::MegawattHour => 1e3,
            EnergyUnit::Megajoule => 1.0 / 3.6,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            EnergyUnit::WattHour => "Wh",
            EnergyUnit::KilowattHour => "kWh",
            EnergyUnit::MegawattHour => "MWh",
            EnergyUnit::Megajoule => "MJ",
        }
    }
}

/// 전력량을 변환한다.
pub fn convert_energy(value: f64, from: EnergyUnit, to: EnergyUnit) -> f64 {
    value * from.kilowatt_hours() / to.kilowatt_hours()
}
