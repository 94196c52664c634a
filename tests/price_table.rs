//! 가격표 로더 테스트.
use power_plant_economics::price_table::{DataLoadError, PriceTable, ShapeError, HOURS_PER_DAY};
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

fn write_csv(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("d24.csv");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

fn numeric_row(start: usize) -> String {
    (start..start + HOURS_PER_DAY)
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn text_header() -> String {
    (0..HOURS_PER_DAY)
        .map(|h| format!("{h}:00"))
        .collect::<Vec<_>>()
        .join(",")
}

#[test]
fn header_row_is_discarded() {
    let (_dir, path) = write_csv(&format!("{}\n{}\n{}\n", text_header(), numeric_row(0), numeric_row(100)));
    let table = PriceTable::load(&path).unwrap();
    assert_eq!(table.num_days(), 2);
    assert_eq!(table.rows()[0][0], 0.0);
    assert_eq!(table.rows()[1][23], 123.0);
}

#[test]
fn numeric_header_row_is_discarded() {
    let hours = (0..HOURS_PER_DAY)
        .map(|h| h.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let (_dir, path) = write_csv(&format!("{hours}\n{}\n{}\n", numeric_row(100), numeric_row(200)));
    let table = PriceTable::load(&path).unwrap();
    assert_eq!(table.num_days(), 2);
    assert_eq!(table.num_cells(), 48);
    assert_eq!(table.cells().next(), Some(100.0));
    assert!(table.cells().all(|v| v >= 100.0));
}

#[test]
fn cells_are_trimmed_and_decimal() {
    let row = (0..HOURS_PER_DAY)
        .map(|h| format!(" {}.25 ", h))
        .collect::<Vec<_>>()
        .join(",");
    let (_dir, path) = write_csv(&format!("{}\n{row}\n", text_header()));
    let table = PriceTable::load(&path).unwrap();
    assert_eq!(table.rows()[0][3], 3.25);
}

#[test]
fn shipped_sample_has_thirty_one_days_of_prices() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("d24.csv");
    let table = PriceTable::load(&path).unwrap();
    assert_eq!(table.num_days(), 31);
    assert!(table.cells().all(|v| v > 0.0 && v < 1.0));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = PriceTable::load(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, DataLoadError::Io { .. }));
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn short_row_is_rejected_with_row_number() {
    let short = (0..23).map(|v| v.to_string()).collect::<Vec<_>>().join(",");
    let (_dir, path) = write_csv(&format!("{}\n{}\n{short}\n", text_header(), numeric_row(0)));
    match PriceTable::load(&path).unwrap_err() {
        DataLoadError::Shape { source, .. } => {
            assert_eq!(source, ShapeError::ColumnCount { row: 3, found: 23 });
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_numeric_cell_is_rejected() {
    let mut cells: Vec<String> = (0..HOURS_PER_DAY).map(|v| v.to_string()).collect();
    cells[5] = "n/a".into();
    let (_dir, path) = write_csv(&format!("{}\n{}\n{}\n", text_header(), numeric_row(0), cells.join(",")));
    match PriceTable::load(&path).unwrap_err() {
        DataLoadError::Shape { source, .. } => assert_eq!(
            source,
            ShapeError::InvalidNumber {
                row: 3,
                column: 6,
                value: "n/a".into()
            }
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case("NaN")]
#[case("inf")]
#[case("-inf")]
fn non_finite_cell_is_rejected(#[case] cell: &str) {
    let mut cells: Vec<String> = (0..HOURS_PER_DAY).map(|v| v.to_string()).collect();
    cells[0] = cell.into();
    let (_dir, path) = write_csv(&format!("{}\n{}\n", text_header(), cells.join(",")));
    match PriceTable::load(&path).unwrap_err() {
        DataLoadError::Shape { source, .. } => assert_eq!(
            source,
            ShapeError::InvalidNumber {
                row: 2,
                column: 1,
                value: cell.into()
            }
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn header_only_file_is_empty_table() {
    let (_dir, path) = write_csv(&format!("{}\n", text_header()));
    let table = PriceTable::load(&path).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.num_cells(), 0);
}

#[test]
fn from_rows_checks_width() {
    let err = PriceTable::from_rows(vec![vec![1.0; 24], vec![1.0; 25]]).unwrap_err();
    assert_eq!(err, ShapeError::ColumnCount { row: 2, found: 25 });
}

#[test]
fn hour_labels_are_zero_padded() {
    let labels = PriceTable::hour_labels();
    assert_eq!(labels.len(), HOURS_PER_DAY);
    assert_eq!(labels[0], "Hour 00");
    assert_eq!(labels[9], "Hour 09");
    assert_eq!(labels[23], "Hour 23");
}
