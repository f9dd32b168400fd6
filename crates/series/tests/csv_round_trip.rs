//! File-based integration tests for vaxcast-series.

use std::io::Write;

use chrono::NaiveDate;
use vaxcast_series::{PrepareConfig, ReaderConfig, SeriesError, daily_sequence, prepare, read_csv};

const OWID_EXTRACT: &str = "\
location,iso_code,date,people_vaccinated,coverage_full_dose
Netherlands,NLD,2021-03-03,1000,1.2
Netherlands,NLD,2021-03-01,800,1.0
Belgium,BEL,2021-03-01,900,1.1
Netherlands,NLD,2021-03-02,,
Netherlands,NLD,2021-03-04,1200,1.6
Netherlands,NLD,2021-03-03,1050,1.3
Belgium,BEL,2021-03-02,950,1.4
";

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn read_filter_prepare() {
    let file = write_csv(OWID_EXTRACT);
    let table = read_csv(file.path(), &ReaderConfig::default()).unwrap();
    assert_eq!(table.n_rows(), 7);
    assert_eq!(table.distinct("iso_code").unwrap(), vec!["NLD", "BEL"]);

    let nld = table.filter_eq("iso_code", "NLD").unwrap();
    let series = prepare(&nld, &PrepareConfig::default()).unwrap();

    let start = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
    let expected_dates: Vec<NaiveDate> = daily_sequence(start, 4)
        .into_iter()
        .filter(|d| d.format("%d").to_string() != "02")
        .collect();
    assert_eq!(series.dates(), expected_dates.as_slice());
    // The revised 2021-03-03 row comes later in the file and wins.
    assert_eq!(series.values(), &[1.0, 1.3, 1.6]);
}

#[test]
fn prepared_dates_strictly_increase() {
    let file = write_csv(OWID_EXTRACT);
    let table = read_csv(file.path(), &ReaderConfig::default()).unwrap();
    for key in table.distinct("iso_code").unwrap() {
        let series = prepare(&table.filter_eq("iso_code", &key).unwrap(), &PrepareConfig::default())
            .unwrap();
        for w in series.dates().windows(2) {
            assert!(w[0] < w[1]);
        }
    }
}

#[test]
fn selected_columns_only() {
    let file = write_csv(OWID_EXTRACT);
    let config = ReaderConfig::default().with_columns(["iso_code", "date", "coverage_full_dose"]);
    let table = read_csv(file.path(), &config).unwrap();
    assert!(table.column("people_vaccinated").is_none());
    let series = prepare(&table.filter_eq("iso_code", "BEL").unwrap(), &PrepareConfig::default())
        .unwrap();
    assert_eq!(series.len(), 2);
}

#[test]
fn missing_value_column_is_reported() {
    let file = write_csv("date,people_vaccinated\n2021-03-01,1\n2021-03-02,2\n");
    let table = read_csv(file.path(), &ReaderConfig::default()).unwrap();
    let err = prepare(&table, &PrepareConfig::default()).unwrap_err();
    assert!(matches!(err, SeriesError::MissingColumn { .. }));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_csv(&dir.path().join("absent.csv"), &ReaderConfig::default()).unwrap_err();
    assert!(matches!(err, SeriesError::FileNotFound { .. }));
}
