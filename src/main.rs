use clap::Parser;
use log::error;
use power_plant_economics::app::{self, AppError, Session};
use power_plant_economics::cli::Cli;
use power_plant_economics::{config, i18n, log as logger};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 보고서를 출력하거나 메뉴를 실행한다.
fn main() -> ExitCode {
    match try_run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if logger::is_logger_initialised() {
                error!("{err}");
            } else {
                eprintln!("Error: {err}");
            }
            ExitCode::FAILURE
        }
    }
}

fn try_run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let cfg = config::load_or_default()?;
    logger::init(Some(&cfg.log_level))?;

    let lang = i18n::resolve_language(&cli.lang, Some(&cfg.language));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    let data_path = cli
        .data
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cfg.price_data_path));
    let scenario = cli.apply_overrides(cfg.scenario.clone());

    let mut session = Session::open(cfg, tr, data_path, scenario)?;
    if cli.interactive {
        app::run(&mut session, &mut io::stdin().lock())
    } else {
        app::print_report(&session)
    }
}
