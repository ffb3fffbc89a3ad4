//! 태양광 설비 용량 산정 로직을 라이브러리로 분리하여 CLI 뿐 아니라 다른 화면에서도 재사용한다.

pub mod app;
pub mod cli;
pub mod climatology;
pub mod config;
pub mod estimation;
pub mod i18n;
pub mod report;
pub mod tables;
pub mod ui_cli;
pub mod units;
