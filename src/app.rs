use log::{info, warn};
use std::io::BufRead;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::{Config, ConfigError, CONFIG_FILE_NAME};
use crate::engine::EngineCatalog;
use crate::i18n::{self, Translator};
use crate::log::LoggerError;
use crate::metrics::{self, MetricsError, ScenarioInput};
use crate::price_table::{DataLoadError, PriceTable};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    DataLoad(#[from] DataLoadError),
    #[error("{0}")]
    Metrics(#[from] MetricsError),
    #[error("{0}")]
    Logger(#[from] LoggerError),
}

/// 한 번 로드한 가격표와 현재 시나리오를 묶은 실행 상태.
pub struct Session {
    pub config: Config,
    pub tr: Translator,
    pub engines: EngineCatalog,
    pub prices: PriceTable,
    pub scenario: ScenarioInput,
    /// 메뉴에서 바꾼 설정을 저장할 위치
    pub config_path: PathBuf,
}

impl Session {
    /// 가격 데이터를 읽어 세션을 만든다. 가격 데이터가 없으면 지표를 계산할 수 없으므로 실패한다.
    pub fn open(
        config: Config,
        tr: Translator,
        data_path: PathBuf,
        scenario: ScenarioInput,
    ) -> Result<Self, AppError> {
        let prices = PriceTable::load(&data_path)?;
        let engines = EngineCatalog::builtin();
        // 잘못된 엔진 이름은 계산 전에 드러나도록 한다
        engines.get(&scenario.engine)?;
        Ok(Self {
            config,
            tr,
            engines,
            prices,
            scenario: scenario.clamped(),
            config_path: PathBuf::from(CONFIG_FILE_NAME),
        })
    }

    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = path;
        self
    }

    pub fn metrics(&self) -> Result<metrics::MetricsResult, MetricsError> {
        metrics::compute_metrics(&self.scenario, &self.engines, &self.prices)
    }
}

/// 지표, 요약표, 가격 통계를 한 번 출력한다.
pub fn print_report(session: &Session) -> Result<(), AppError> {
    let m = session.metrics()?;
    ui_cli::print_scenario(&session.tr, &session.scenario);
    ui_cli::print_metrics(&session.tr, &m);
    ui_cli::print_headline(&session.tr, &m);
    ui_cli::print_prices(&session.tr, &session.prices, &m);
    ui_cli::print_expenses(&session.tr, &session.scenario.expenses);
    Ok(())
}

/// CLI 애플리케이션의 메인 루프를 실행한다. 입력이 끝나면 종료와 같게 처리한다.
pub fn run(session: &mut Session, input: &mut impl BufRead) -> Result<(), AppError> {
    loop {
        let tr = session.tr.clone();
        match ui_cli::main_menu(&tr, input)? {
            MenuChoice::Scenario => {
                ui_cli::handle_scenario(&tr, &session.engines, &mut session.scenario, input)?;
                info!("Scenario updated: {:?}", session.scenario);
            }
            MenuChoice::Metrics => match session.metrics() {
                Ok(m) => {
                    ui_cli::print_metrics(&tr, &m);
                    ui_cli::print_headline(&tr, &m);
                }
                Err(e) => {
                    warn!("Metrics unavailable: {e}");
                    println!("{}: {e}", tr.t(i18n::keys::ERROR_PREFIX));
                }
            },
            MenuChoice::Prices => match session.metrics() {
                Ok(m) => ui_cli::print_prices(&tr, &session.prices, &m),
                Err(e) => {
                    warn!("Price analysis unavailable: {e}");
                    println!("{}: {e}", tr.t(i18n::keys::ERROR_PREFIX));
                }
            },
            MenuChoice::Expenses => {
                ui_cli::handle_expenses(&tr, &mut session.scenario.expenses, input)?;
            }
            MenuChoice::Settings => {
                if ui_cli::handle_settings(&tr, &mut session.config, input)? {
                    let code = i18n::resolve_language("auto", Some(&session.config.language));
                    session.tr = Translator::new_with_pack(
                        &code,
                        session.config.language_pack_dir.as_deref(),
                    );
                    session.config.save_to(&session.config_path)?;
                    println!("{}", session.tr.t(i18n::keys::SETTINGS_SAVED));
                }
            }
            MenuChoice::Exit => {
                session.config.save_to(&session.config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn session_for(csv: &str) -> (tempfile::TempDir, Session) {
        let dir = tempdir().unwrap();
        let data = dir.path().join("d24.csv");
        fs::write(&data, csv).unwrap();
        let session = Session::open(
            Config::default(),
            Translator::new("en-us"),
            data,
            ScenarioInput::default(),
        )
        .unwrap()
        .with_config_path(dir.path().join(CONFIG_FILE_NAME));
        (dir, session)
    }

    #[test]
    fn empty_table_does_not_end_the_menu() {
        let header = (0..24).map(|h| h.to_string()).collect::<Vec<_>>().join(",");
        let (dir, mut session) = session_for(&format!("{header}\n"));
        let mut input: &[u8] = b"3\n2\n0\n";
        run(&mut session, &mut input).unwrap();
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn closed_input_saves_and_exits() {
        let header = (0..24).map(|h| format!("h{h}")).collect::<Vec<_>>().join(",");
        let row = vec!["10"; 24].join(",");
        let (dir, mut session) = session_for(&format!("{header}\n{row}\n"));
        let mut input: &[u8] = b"4\n";
        run(&mut session, &mut input).unwrap();
        let saved = crate::config::load_or_create(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(saved.language, "auto");
    }
}
