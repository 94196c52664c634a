//! 터미널 실행 파일의 명령행 인자.
use clap::Parser;
use std::path::PathBuf;

use crate::metrics::ScenarioInput;

/// Power plant economic analysis (terminal)
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// 시간대별 가격 CSV (기본값: config.toml의 price_data_path)
    #[arg(short, long)]
    pub data: Option<PathBuf>,
    /// 엔진 종류 (예: "DHA")
    #[arg(short, long)]
    pub engine: Option<String>,
    /// 엔진 대수
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub engines: Option<u32>,
    /// 부하율 [%]
    #[arg(short, long, value_parser = parse_percentage)]
    pub load: Option<f64>,
    /// 가스 단가 (계산에는 쓰이지 않음)
    #[arg(long, value_parser = parse_non_negative)]
    pub gas_price: Option<f64>,
    #[arg(long)]
    pub oil: Option<f64>,
    #[arg(long)]
    pub service_parts: Option<f64>,
    #[arg(long)]
    pub workers: Option<f64>,
    #[arg(long)]
    pub salary_taxes: Option<f64>,
    #[arg(long)]
    pub other_expenses: Option<f64>,
    /// 언어: auto / en-us / ko-kr
    #[arg(short = 'L', long, default_value = "auto")]
    pub lang: String,
    /// 메뉴 방식으로 실행
    #[arg(short, long)]
    pub interactive: bool,
}

impl Cli {
    /// 설정 파일의 시나리오 위에 명령행에서 준 값만 덮어쓴다.
    pub fn apply_overrides(&self, mut scenario: ScenarioInput) -> ScenarioInput {
        if let Some(engine) = &self.engine {
            scenario.engine = engine.clone();
        }
        if let Some(n) = self.engines {
            scenario.num_engines = n;
        }
        if let Some(load) = self.load {
            scenario.load_percentage = load;
        }
        if let Some(gas) = self.gas_price {
            scenario.gas_price = gas;
        }
        let e = &mut scenario.expenses;
        for (slot, value) in [
            (&mut e.oil, self.oil),
            (&mut e.service_and_parts, self.service_parts),
            (&mut e.workers, self.workers),
            (&mut e.salary_taxes, self.salary_taxes),
            (&mut e.other_expenses, self.other_expenses),
        ] {
            if let Some(v) = value {
                *slot = v;
            }
        }
        scenario
    }
}

fn parse_percentage(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=100.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("{v} is not between 0 and 100"))
    }
}

fn parse_non_negative(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(format!("{v} must not be negative"))
    }
}
