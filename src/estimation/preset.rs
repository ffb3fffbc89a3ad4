use serde::{Deserialize, Serialize};

use super::appliance::ApplianceEntry;

/// 빠른 산정을 위한 고정 가전 구성 프리셋.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    BasicRuralHome,
    UrbanMiddleClassFlat,
    ModernUrbanVilla,
    Custom,
}

/// (이름, W, h/일, 일/월)
type Row = (&'static str, f64, f64, f64);

const BASIC_RURAL_HOME: &[Row] = &[
    ("Fan", 75.0, 6.0, 30.0),
    ("LED Bulb", 9.0, 6.0, 30.0),
    ("TV", 100.0, 3.0, 30.0),
    ("Fridge", 150.0, 24.0, 30.0),
    ("Router", 10.0, 24.0, 30.0),
    ("Mobile Chargers", 10.0, 2.0, 30.0),
];

const URBAN_MIDDLE_CLASS_FLAT: &[Row] = &[
    ("Fan", 75.0, 6.0, 30.0),
    ("LED Bulb", 9.0, 5.0, 30.0),
    ("TV", 100.0, 3.0, 30.0),
    ("Fridge", 150.0, 24.0, 30.0),
    ("Router", 10.0, 24.0, 30.0),
    ("Mobile Chargers", 10.0, 2.0, 30.0),
    ("Laptop", 60.0, 5.0, 30.0),
    ("Washing Machine", 500.0, 0.5, 8.0),
    ("Water Purifier (RO)", 50.0, 2.0, 30.0),
    ("Oven", 1200.0, 0.5, 30.0),
];

const MODERN_URBAN_VILLA: &[Row] = &[
    ("Fan", 75.0, 6.0, 30.0),
    ("LED Bulb", 9.0, 5.0, 30.0),
    ("TV", 100.0, 3.0, 30.0),
    ("Fridge", 150.0, 24.0, 30.0),
    ("Router", 10.0, 24.0, 30.0),
    ("Mobile Chargers", 10.0, 2.0, 30.0),
    ("Laptop", 60.0, 4.0, 30.0),
    ("AC", 1500.0, 5.0, 30.0),
    ("Washing Machine", 500.0, 1.0, 10.0),
    ("Water Purifier (RO)", 50.0, 2.0, 30.0),
    ("Oven", 1200.0, 1.0, 30.0),
];

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::BasicRuralHome,
        Preset::UrbanMiddleClassFlat,
        Preset::ModernUrbanVilla,
        Preset::Custom,
    ];

    /// 화면/파일에 쓰는 표시 이름.
    pub fn name(&self) -> &'static str {
        match self {
            Preset::BasicRuralHome => "Basic Rural Home",
            Preset::UrbanMiddleClassFlat => "Urban Middle-Class Flat",
            Preset::ModernUrbanVilla => "Modern Urban Villa",
            Preset::Custom => "Custom",
        }
    }

    /// 프리셋의 가전 목록. Custom은 비어 있다.
    pub fn appliances(&self) -> Vec<ApplianceEntry> {
        let rows: &[Row] = match self {
            Preset::BasicRuralHome => BASIC_RURAL_HOME,
            Preset::UrbanMiddleClassFlat => URBAN_MIDDLE_CLASS_FLAT,
            Preset::ModernUrbanVilla => MODERN_URBAN_VILLA,
            Preset::Custom => &[],
        };
        rows.iter()
            .map(|&(name, power, hours, days)| ApplianceEntry::new(name, power, hours, days))
            .collect()
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 알 수 없는 프리셋 이름.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreset(pub String);

impl std::fmt::Display for UnknownPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "알 수 없는 프리셋: {}", self.0)
    }
}

impl std::error::Error for UnknownPreset {}

impl std::str::FromStr for Preset {
    type Err = UnknownPreset;

    /// 표시 이름 또는 축약형(rural, flat, villa, custom)을 대소문자 구분 없이 받는다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "basicruralhome" | "rural" | "basic" => Ok(Preset::BasicRuralHome),
            "urbanmiddleclassflat" | "flat" | "urban" => Ok(Preset::UrbanMiddleClassFlat),
            "modernurbanvilla" | "villa" | "modern" => Ok(Preset::ModernUrbanVilla),
            "custom" => Ok(Preset::Custom),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}
