//! 표시용 단위 정의 및 변환 모듈 모음.

pub mod area;
pub mod energy;

pub use area::{convert_area, AreaUnit};
pub use energy::{convert_energy, EnergyUnit};
