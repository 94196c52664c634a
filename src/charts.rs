//! GUI 차트에 넘길 데이터 가공(히스토그램, 일별 통계, 운영비 비중, 색상 스케일).

use crate::expenses::{ExpenseCategory, ExpenseMap};
use crate::price_table::PriceTable;

/// 가격 분포 히스토그램 기본 구간 수.
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;

/// 등간격 히스토그램.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// 첫 구간 시작값
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// `[min, max]`를 `bins`개의 등간격 구간으로 나눈다. 마지막 구간은 최댓값을 포함한다.
    pub fn from_values<I>(values: I, bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() || bins == 0 {
            return Self {
                start: 0.0,
                bin_width: 0.0,
                counts: Vec::new(),
            };
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // 값이 모두 같으면 값 중심의 폭 1짜리 구간 하나
        if max <= min {
            return Self {
                start: min - 0.5,
                bin_width: 1.0,
                counts: vec![values.len()],
            };
        }

        let bin_width = (max - min) / bins as f64;
        let mut counts = vec![0; bins];
        for v in values {
            let idx = ((v - min) / bin_width) as usize;
            counts[idx.min(bins - 1)] += 1;
        }
        Self {
            start: min,
            bin_width,
            counts,
        }
    }

    /// 각 구간의 (시작, 끝, 개수).
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.counts.iter().enumerate().map(|(i, c)| {
            let lo = self.start + i as f64 * self.bin_width;
            (lo, lo + self.bin_width, *c)
        })
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// 하루(가격표 한 행)의 가격 통계.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// 행마다 최저/최고/평균 가격을 구한다.
pub fn daily_stats(table: &PriceTable) -> Vec<DailyStats> {
    table
        .rows()
        .iter()
        .map(|row| {
            let min = row.iter().copied().fold(f64::INFINITY, f64::min);
            let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let mean = row.iter().sum::<f64>() / row.len() as f64;
            DailyStats { min, max, mean }
        })
        .collect()
}

/// 항목별 운영비 비중(0~1). 합계가 0이면 모두 0.
pub fn expense_shares(expenses: &ExpenseMap) -> Vec<(ExpenseCategory, f64)> {
    let total = expenses.total();
    expenses
        .iter()
        .map(|(c, v)| (c, if total != 0.0 { v / total } else { 0.0 }))
        .collect()
}

/// 히트맵 색상용 정규화 위치(0~1). 범위가 0이면 0.5.
pub fn heat_scale(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.5
    }
}

/// Viridis 근사 색상 정지점(RGB).
const VIRIDIS: [[u8; 3]; 5] = [
    [68, 1, 84],
    [59, 82, 139],
    [33, 145, 140],
    [94, 201, 98],
    [253, 231, 37],
];

/// 0~1 위치를 Viridis 근사 색으로 바꾼다.
pub fn viridis(t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0) * (VIRIDIS.len() - 1) as f64;
    let i = (t.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = t - i as f64;
    let (a, b) = (VIRIDIS[i], VIRIDIS[i + 1]);
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * frac).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}
