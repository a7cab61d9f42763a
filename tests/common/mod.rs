//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

use titanic_explorer::pipeline::{
    age_group, AgeGroup, Passenger, PassengerClass, PassengerTable, Port, Sex,
};

/// Create a small raw passenger DataFrame with the source column layout.
///
/// This DataFrame includes:
/// - one missing `Age` (row 2), one missing `Fare` (row 4)
/// - one missing `Embarked` (row 5), with `S` as the most frequent port
/// - titles that need canonicalization (`Mlle`, `Dr`, `the Countess`)
pub fn create_raw_dataframe() -> DataFrame {
    df! {
        "PassengerId" => [1i64, 2, 3, 4, 5, 6],
        "Survived" => [0i64, 1, 1, 1, 0, 0],
        "Pclass" => [3i64, 1, 3, 1, 3, 2],
        "Name" => [
            "Braund, Mr. Owen Harris",
            "Cumings, Mrs. John Bradley (Florence Briggs Thayer)",
            "Heikkinen, Mlle. Laina",
            "Rothes, the Countess. of (Lucy Noel Martha Dyer-Edwards)",
            "Allen, Dr. William Henry",
            "Moran, Master. James",
        ],
        "Sex" => ["male", "female", "female", "female", "male", "male"],
        "Age" => [Some(22.0f64), Some(38.0), None, Some(33.0), Some(35.0), Some(2.0)],
        "SibSp" => [1i64, 1, 0, 0, 0, 0],
        "Parch" => [0i64, 0, 0, 0, 0, 0],
        "Ticket" => ["A/5 21171", "PC 17599", "STON/O2. 3101282", "110152", "373450", "330877"],
        "Fare" => [Some(7.25f64), Some(71.2833), Some(7.925), Some(86.5), None, Some(8.4583)],
        "Cabin" => [None::<&str>, Some("C85"), None, Some("B77"), None, None],
        "Embarked" => [Some("S"), Some("C"), Some("S"), Some("S"), Some("Q"), None],
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("train.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("train.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Write raw CSV text to a temporary file
pub fn create_temp_csv_text(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("train.csv");
    std::fs::write(&csv_path, contents).unwrap();
    (temp_dir, csv_path)
}

/// Build a prepared passenger directly, deriving the age group from `age`
pub fn passenger(
    id: usize,
    survived: bool,
    class: PassengerClass,
    sex: Sex,
    age: f64,
    embarked: Port,
) -> Passenger {
    Passenger {
        id,
        survived,
        class,
        name: format!("Passenger{}, Mr. Test", id),
        sex,
        age,
        fare: 10.0 + id as f64,
        embarked,
        title: "Mr".to_string(),
        age_group: age_group(age),
    }
}

/// A varied prepared table covering every class, sex and port
pub fn create_mixed_table() -> PassengerTable {
    use PassengerClass::*;
    use Port::*;
    use Sex::*;

    let mut rows = vec![
        passenger(0, true, First, Female, 29.0, Southampton),
        passenger(1, false, First, Male, 45.0, Cherbourg),
        passenger(2, true, Second, Female, 8.0, Southampton),
        passenger(3, false, Second, Male, 30.0, Queenstown),
        passenger(4, false, Third, Male, 19.0, Southampton),
        passenger(5, true, Third, Female, 16.0, Queenstown),
        passenger(6, false, Third, Female, 62.0, Cherbourg),
        passenger(7, true, First, Male, 80.0, Southampton),
    ];
    rows[0].title = "Mrs".to_string();
    rows[2].title = "Miss".to_string();
    rows[5].title = "Miss".to_string();
    rows[6].title = "Mrs".to_string();
    PassengerTable::new(rows)
}

/// Assert two floats are within a small tolerance
pub fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 0.01,
        "{} mismatch: expected {}, got {}",
        what,
        expected,
        actual
    );
}

pub fn assert_group(group: Option<AgeGroup>, expected: Option<AgeGroup>, age: f64) {
    assert_eq!(group, expected, "Unexpected age group for age {}", age);
}
