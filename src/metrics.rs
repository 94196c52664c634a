//! 발전소 시나리오 경제성 지표 계산.
//!
//! 입력만으로 결과가 정해지는 순수 함수이며 I/O나 공유 상태 변경이 없다.

use crate::engine::EngineCatalog;
use crate::expenses::ExpenseMap;
use crate::price_table::PriceTable;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 투자비에 더하는 설치/예비비 20%.
pub const INVESTMENT_OVERHEAD_FACTOR: f64 = 1.2;
/// 평년 기준 연간 시간(윤년 보정 없음).
pub const HOURS_PER_YEAR: f64 = 8760.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// 지표 계산 실패.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("unknown engine type: {0}")]
    UnknownEngine(String),
    #[error("price table contains no data")]
    EmptyData,
}

/// 한 번의 재계산에 쓰이는 시나리오 입력값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioInput {
    /// 엔진 카탈로그 키
    pub engine: String,
    /// 엔진 대수(1 이상)
    pub num_engines: u32,
    /// 부하율 [%] (0~100)
    pub load_percentage: f64,
    /// 가스 단가. 현재 어떤 식에도 쓰이지 않는 예약 필드.
    pub gas_price: f64,
    pub expenses: ExpenseMap,
}

impl Default for ScenarioInput {
    fn default() -> Self {
        Self {
            engine: EngineCatalog::builtin().default_name().to_string(),
            num_engines: 1,
            load_percentage: 100.0,
            gas_price: 1.0,
            expenses: ExpenseMap::default(),
        }
    }
}

impl ScenarioInput {
    /// 위젯 범위를 벗어난 값을 허용 범위로 맞춘다.
    pub fn clamped(mut self) -> Self {
        self.num_engines = self.num_engines.max(1);
        self.load_percentage = self.load_percentage.clamp(0.0, 100.0);
        self.gas_price = self.gas_price.max(0.0);
        self
    }
}

/// 계산된 지표 묶음.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsResult {
    /// 발전량 [kWe]
    pub generation_kw: f64,
    pub consumption_rate: f64,
    /// 투자비(+20%)
    pub investment: f64,
    pub annual_revenue: f64,
    pub total_monthly_expenses: f64,
    /// 월 매출 - 월 운영비
    pub monthly_revenue: f64,
    /// [%]. 투자비가 0이면 유한하지 않은 값이 된다.
    pub roe: f64,
    /// [%]
    pub roa: f64,
    /// 최저가보다 높은 가격 칸의 비율 [%]. 실제 가동률이 아닌 가격 분포 지표다.
    pub availability_pct: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
}

/// 가격 분포 요약.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: usize,
    /// 최저가보다 큰 칸 수
    pub above_min: usize,
}

/// 가격표 전체를 펼쳐 최저/최고/평균을 구한다.
pub fn summarize_prices(prices: &PriceTable) -> Result<PriceSummary, MetricsError> {
    let count = prices.num_cells();
    if count == 0 {
        return Err(MetricsError::EmptyData);
    }
    let (min, max, sum) = prices.cells().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(lo, hi, sum), v| (lo.min(v), hi.max(v), sum + v),
    );
    let above_min = prices.cells().filter(|v| *v > min).count();
    Ok(PriceSummary {
        min,
        max,
        mean: sum / count as f64,
        count,
        above_min,
    })
}

/// 시나리오, 엔진 카탈로그, 가격표로 지표를 계산한다.
pub fn compute_metrics(
    scenario: &ScenarioInput,
    engines: &EngineCatalog,
    prices: &PriceTable,
) -> Result<MetricsResult, MetricsError> {
    let engine = engines.get(&scenario.engine)?;
    let units = f64::from(scenario.num_engines);
    let load_fraction = scenario.load_percentage / 100.0;

    let generation_kw = engine.rated_power_kw * units * load_fraction;
    let consumption_rate = engine.fuel_consumption_rate * units * load_fraction;
    let investment = engine.unit_price * units * INVESTMENT_OVERHEAD_FACTOR;

    let summary = summarize_prices(prices)?;

    let total_monthly_expenses = scenario.expenses.total();
    let annual_revenue = generation_kw * summary.mean * HOURS_PER_YEAR;
    let monthly_revenue = annual_revenue / MONTHS_PER_YEAR - total_monthly_expenses;

    let roe = (annual_revenue / investment) * 100.0;
    let roa = (annual_revenue / (investment * INVESTMENT_OVERHEAD_FACTOR)) * 100.0;

    let availability_pct = summary.above_min as f64 / summary.count as f64 * 100.0;

    Ok(MetricsResult {
        generation_kw,
        consumption_rate,
        investment,
        annual_revenue,
        total_monthly_expenses,
        monthly_revenue,
        roe,
        roa,
        availability_pct,
        min_price: summary.min,
        max_price: summary.max,
        avg_price: summary.mean,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_table(value: f64) -> PriceTable {
        PriceTable::from_rows(vec![vec![value; 24]]).unwrap()
    }

    #[test]
    fn zero_investment_gives_non_finite_returns() {
        let scenario = ScenarioInput {
            engine: "DHA".into(),
            num_engines: 0,
            ..ScenarioInput::default()
        };
        let m = compute_metrics(&scenario, &EngineCatalog::builtin(), &flat_table(10.0)).unwrap();
        assert_eq!(m.investment, 0.0);
        assert!(!m.roe.is_finite());
        assert!(!m.roa.is_finite());
    }

    #[test]
    fn clamped_restores_widget_ranges() {
        let s = ScenarioInput {
            num_engines: 0,
            load_percentage: 140.0,
            gas_price: -2.0,
            ..ScenarioInput::default()
        }
        .clamped();
        assert_eq!(s.num_engines, 1);
        assert_eq!(s.load_percentage, 100.0);
        assert_eq!(s.gas_price, 0.0);
    }

    #[test]
    fn unknown_engine_reported_before_empty_table() {
        let scenario = ScenarioInput {
            engine: "Caterpillar".into(),
            ..ScenarioInput::default()
        };
        let err = compute_metrics(&scenario, &EngineCatalog::builtin(), &PriceTable::default())
            .unwrap_err();
        assert_eq!(err, MetricsError::UnknownEngine("Caterpillar".into()));
    }
}
