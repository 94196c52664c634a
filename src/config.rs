use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::metrics::ScenarioInput;

/// 작업 디렉터리의 설정 파일 이름.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// 기본 가격 데이터 파일.
pub const DEFAULT_PRICE_DATA_PATH: &str = "d24.csv";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 시간대별 가격 CSV 경로
    pub price_data_path: String,
    /// auto / en-us / ko-kr ...
    pub language: String,
    /// 외부 언어팩 디렉터리(없으면 내장 언어팩)
    pub language_pack_dir: Option<String>,
    /// GUI 창 불투명도(0.3~1.0)
    pub window_alpha: f32,
    /// error / warn / info / debug / trace / off
    pub log_level: String,
    /// 시작 시 입력 위젯 초기값
    pub scenario: ScenarioInput,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            price_data_path: DEFAULT_PRICE_DATA_PATH.into(),
            language: "auto".into(),
            language_pack_dir: None,
            window_alpha: 1.0,
            log_level: "info".into(),
            scenario: ScenarioInput::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_create(Path::new(CONFIG_FILE_NAME))
}

/// 지정 경로의 설정을 읽는다. 파일이 없으면 기본값을 그 경로에 저장하고 반환한다.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_config(self, Path::new(CONFIG_FILE_NAME))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expenses::ExpenseCategory;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let cfg = load_or_create(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn saved_scenario_survives_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut cfg = Config::default();
        cfg.scenario.engine = "Jenbacher 612".into();
        cfg.scenario.num_engines = 4;
        cfg.scenario.expenses.set(ExpenseCategory::Workers, 50_000.0);
        cfg.save_to(&path).unwrap();

        let loaded = load_or_create(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "price_data_path = \"prices.csv\"\n[scenario]\nload_percentage = 75.0\n")
            .unwrap();
        let cfg = load_or_create(&path).unwrap();
        assert_eq!(cfg.price_data_path, "prices.csv");
        assert_eq!(cfg.scenario.load_percentage, 75.0);
        assert_eq!(cfg.scenario.engine, "Wärtsilä W16V25SG");
        assert_eq!(cfg.scenario.expenses.oil, 32_800.0);
        assert_eq!(cfg.language, "auto");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "window_alpha = \"opaque\"").unwrap();
        assert!(matches!(load_or_create(&path), Err(ConfigError::Parse(_))));
    }
}
