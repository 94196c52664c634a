//! 발전소 경제성 계산 로직을 라이브러리로 분리하여 GUI와 CLI가 함께 쓴다.

pub mod app;
pub mod charts;
pub mod cli;
pub mod config;
pub mod engine;
pub mod expenses;
pub mod i18n;
pub mod log;
pub mod metrics;
pub mod price_table;
pub mod report;
pub mod ui_cli;
