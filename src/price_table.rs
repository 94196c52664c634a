//! 시간대별 전력 가격표(행=일, 열=0~23시) 로더.
//!
//! 원본 CSV의 헤더 이름은 사용하지 않고 열을 "Hour 00".."Hour 23"으로 다시 붙인다.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 하루의 시간 슬롯 수 = 가격표 열 수.
pub const HOURS_PER_DAY: usize = 24;

/// 가격 데이터 로드 실패.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot open price data file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("invalid price data in {}: {source}", path.display())]
    Shape {
        path: PathBuf,
        #[source]
        source: ShapeError,
    },
}

/// 가격표 형태 오류. 행 번호는 1부터 센다(헤더 포함 파일 기준).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("row {row} has {found} columns, expected {}", HOURS_PER_DAY)]
    ColumnCount { row: usize, found: usize },
    #[error("row {row}, column {column}: '{value}' is not a finite number")]
    InvalidNumber {
        row: usize,
        column: usize,
        value: String,
    },
}

/// 읽기 전용 가격 격자.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceTable {
    rows: Vec<[f64; HOURS_PER_DAY]>,
}

impl PriceTable {
    /// 메모리상의 행들로 가격표를 만든다. 모든 행은 정확히 24개 값을 가져야 한다.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ShapeError> {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let found = row.len();
                <[f64; HOURS_PER_DAY]>::try_from(row)
                    .map_err(|_| ShapeError::ColumnCount { row: i + 1, found })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }

    /// CSV 파일에서 가격표를 읽는다.
    ///
    /// 첫 레코드는 내용과 관계없이 헤더로 보고 버린다.
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let file = File::open(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(file);

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|source| DataLoadError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            // 헤더가 1행
            let row = parse_record(&record, i + 2).map_err(|source| DataLoadError::Shape {
                path: path.to_path_buf(),
                source,
            })?;
            rows.push(row);
        }
        info!(
            "Loaded price table from {} ({} days x {} hours)",
            path.display(),
            rows.len(),
            HOURS_PER_DAY
        );
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[[f64; HOURS_PER_DAY]] {
        &self.rows
    }

    pub fn num_days(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cells(&self) -> usize {
        self.rows.len() * HOURS_PER_DAY
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 행 우선으로 펼친 모든 가격.
    pub fn cells(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().flat_map(|r| r.iter().copied())
    }

    /// "Hour 00".."Hour 23"
    pub fn hour_labels() -> Vec<String> {
        (0..HOURS_PER_DAY).map(|h| format!("Hour {h:02}")).collect()
    }
}

fn parse_record(record: &StringRecord, row: usize) -> Result<[f64; HOURS_PER_DAY], ShapeError> {
    if record.len() != HOURS_PER_DAY {
        return Err(ShapeError::ColumnCount {
            row,
            found: record.len(),
        });
    }
    let mut out = [0.0; HOURS_PER_DAY];
    for (column, (slot, cell)) in out.iter_mut().zip(record.iter()).enumerate() {
        *slot = cell
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ShapeError::InvalidNumber {
                row,
                column: column + 1,
                value: cell.to_string(),
            })?;
    }
    Ok(out)
}
