//! 로거 초기화. `fern`으로 표준출력/표준에러에 색상 레벨과 시각을 붙여 기록한다.
//!
//! 레벨은 `POWER_PLANT_LOG_LEVEL` 환경 변수 > config.toml의 `log_level` > `info` 순으로 정한다.
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record};
use std::env;
use std::fmt::{Arguments, Display};
use std::io::IsTerminal;
use std::sync::OnceLock;
use thiserror::Error;

static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// 로그 레벨 환경 변수 이름.
pub const LOG_LEVEL_ENV: &str = "POWER_PLANT_LOG_LEVEL";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log level: {0}")]
    UnknownLevel(String),
    #[error("logger already set: {0}")]
    AlreadySet(#[from] log::SetLoggerError),
}

pub fn is_logger_initialised() -> bool {
    LOGGER_INIT.get().is_some()
}

/// 레벨 문자열을 `LevelFilter`로 바꾼다.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    match level.trim().to_lowercase().as_str() {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        unknown => Err(LoggerError::UnknownLevel(unknown.to_string())),
    }
}

/// 프로그램 로거를 초기화한다. 이미 초기화되었다면 아무것도 하지 않는다.
pub fn init(log_level_from_config: Option<&str>) -> Result<(), LoggerError> {
    if is_logger_initialised() {
        return Ok(());
    }

    let log_level = env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| {
        log_level_from_config
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_string()
    });
    let log_level = parse_level(&log_level)?;

    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    let use_colour_stdout = std::io::stdout().is_terminal();
    let use_colour_stderr = std::io::stderr().is_terminal();

    Dispatch::new()
        .chain(
            // 경고 미만은 stdout
            Dispatch::new()
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, use_colour_stdout, &colours);
                })
                .level(log_level)
                .chain(std::io::stdout()),
        )
        .chain(
            Dispatch::new()
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, use_colour_stderr, &colours);
                })
                .level(log_level.min(LevelFilter::Warn))
                .chain(std::io::stderr()),
        )
        .apply()?;

    let _ = LOGGER_INIT.set(());
    Ok(())
}

fn write_log<T: Display>(out: FormatCallback, level: T, target: &str, message: &Arguments) {
    let timestamp = Local::now().format("%H:%M:%S");
    out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
}

fn write_log_plain(out: FormatCallback, message: &Arguments, record: &Record) {
    write_log(out, record.level(), record.target(), message);
}

fn write_log_colour(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    use_colour: bool,
    colours: &ColoredLevelConfig,
) {
    if use_colour {
        write_log(out, colours.color(record.level()), record.target(), message);
    } else {
        write_log_plain(out, message, record);
    }
}
