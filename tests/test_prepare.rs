//! Tests for imputation and derived features

use titanic_explorer::pipeline::{
    age_group, canonical_title, extract_raw_passengers, prepare_passengers, AgeGroup,
    DataLoadError, PassengerClass, Port, RawPassenger, Sex, TITLE_CANONICALIZATION,
};

#[path = "common/mod.rs"]
mod common;

use common::*;

fn raw(name: &str, age: Option<f64>, fare: Option<f64>, embarked: Option<&str>) -> RawPassenger {
    RawPassenger {
        survived: Some(1.0),
        class: Some(2.0),
        name: Some(name.to_string()),
        sex: Some("female".to_string()),
        age,
        fare,
        embarked: embarked.map(str::to_string),
    }
}

#[test]
fn test_prepared_rows_have_no_missing_values() {
    let df = create_raw_dataframe();
    let raw = extract_raw_passengers(&df).unwrap();

    let table = prepare_passengers(&raw).unwrap();

    assert_eq!(table.len(), raw.len(), "Row count must be preserved");
    for p in table.iter() {
        assert!(p.age.is_finite(), "Row {} has no age", p.id);
        assert!(p.fare.is_finite(), "Row {} has no fare", p.id);
    }
}

#[test]
fn test_imputation_uses_median_and_mode() {
    let df = create_raw_dataframe();
    let raw = extract_raw_passengers(&df).unwrap();
    let table = prepare_passengers(&raw).unwrap();
    let rows = table.rows();

    // Observed ages: 2, 22, 33, 35, 38 -> median 33
    assert_close(rows[2].age, 33.0, "Imputed age");
    // Observed fares: 7.25, 7.925, 8.4583, 71.2833, 86.5 -> median 8.4583
    assert_close(rows[4].fare, 8.4583, "Imputed fare");
    // Ports: S, C, S, S, Q -> mode S
    assert_eq!(rows[5].embarked, Port::Southampton);
    // Observed values are untouched
    assert_eq!(rows[0].age, 22.0);
    assert_eq!(rows[1].embarked, Port::Cherbourg);
}

#[test]
fn test_even_median_averages_middle_values() {
    let rows = vec![
        raw("A, Mrs. X", Some(10.0), Some(5.0), Some("S")),
        raw("B, Mrs. X", Some(20.0), Some(15.0), Some("S")),
        raw("C, Mrs. X", None, None, Some("S")),
    ];

    let table = prepare_passengers(&rows).unwrap();

    assert_eq!(table.rows()[2].age, 15.0);
    assert_eq!(table.rows()[2].fare, 10.0);
}

#[test]
fn test_port_mode_tie_picks_lowest_code() {
    let rows = vec![
        raw("A, Mrs. X", Some(10.0), Some(5.0), Some("S")),
        raw("B, Mrs. X", Some(20.0), Some(5.0), Some("Q")),
        raw("C, Mrs. X", Some(30.0), Some(5.0), Some("S")),
        raw("D, Mrs. X", Some(40.0), Some(5.0), Some("Q")),
        raw("E, Mrs. X", Some(50.0), Some(5.0), None),
    ];

    let table = prepare_passengers(&rows).unwrap();

    assert_eq!(
        table.rows()[4].embarked,
        Port::Queenstown,
        "Q and S tie; Q sorts first"
    );
}

#[test]
fn test_unknown_port_is_imputed() {
    let rows = vec![
        raw("A, Mrs. X", Some(10.0), Some(5.0), Some("C")),
        raw("B, Mrs. X", Some(20.0), Some(5.0), Some("")),
        raw("C, Mrs. X", Some(30.0), Some(5.0), Some("X")),
    ];

    let table = prepare_passengers(&rows).unwrap();

    assert_eq!(table.rows()[1].embarked, Port::Cherbourg);
    assert_eq!(table.rows()[2].embarked, Port::Cherbourg);
}

#[test]
fn test_title_extraction_and_canonicalization() {
    let df = create_raw_dataframe();
    let raw = extract_raw_passengers(&df).unwrap();
    let table = prepare_passengers(&raw).unwrap();
    let titles: Vec<&str> = table.iter().map(|p| p.title.as_str()).collect();

    assert_eq!(titles, vec!["Mr", "Mrs", "Miss", "Mrs", "Officer", "Master"]);
}

#[test]
fn test_mlle_maps_to_miss() {
    let table = prepare_passengers(&[raw("Smith, Mlle. Anna", Some(24.0), Some(5.0), Some("C"))])
        .unwrap();
    assert_eq!(table.rows()[0].title, "Miss");
}

#[test]
fn test_name_without_title_has_empty_title() {
    let table = prepare_passengers(&[raw("Nobody", Some(24.0), Some(5.0), Some("C"))]).unwrap();
    assert_eq!(table.rows()[0].title, "");
}

#[test]
fn test_canonicalization_is_idempotent() {
    let samples = ["Mr", "Mrs", "Miss", "Master", "Officer", "Rev", "the Countess", "Unknown", ""];
    for title in TITLE_CANONICALIZATION
        .iter()
        .map(|(raw, _)| *raw)
        .chain(samples)
    {
        let once = canonical_title(title);
        assert_eq!(canonical_title(once), once, "Not idempotent for '{}'", title);
    }
}

#[test]
fn test_canonicalization_is_case_sensitive() {
    assert_eq!(canonical_title("dr"), "dr");
    assert_eq!(canonical_title("Dr"), "Officer");
    assert_eq!(canonical_title("the countess"), "the countess");
}

#[test]
fn test_age_group_boundaries() {
    let cases = [
        (0.0, None),
        (0.42, Some(AgeGroup::Child)),
        (12.0, Some(AgeGroup::Child)),
        (12.5, Some(AgeGroup::Teen)),
        (18.0, Some(AgeGroup::Teen)),
        (35.0, Some(AgeGroup::Adult)),
        (35.5, Some(AgeGroup::Middle)),
        (50.0, Some(AgeGroup::Middle)),
        (80.0, Some(AgeGroup::Senior)),
        (80.5, None),
    ];
    for (age, expected) in cases {
        assert_group(age_group(age), expected, age);
    }
}

#[test]
fn test_invalid_categorical_values_fail_the_load() {
    let mut bad_sex = raw("A, Mr. B", Some(10.0), Some(5.0), Some("S"));
    bad_sex.sex = Some("unknown".to_string());
    let err = prepare_passengers(&[bad_sex]).unwrap_err();
    assert!(matches!(err, DataLoadError::InvalidValue { column: "Sex", row: 0, .. }));

    let mut bad_class = raw("A, Mr. B", Some(10.0), Some(5.0), Some("S"));
    bad_class.class = Some(4.0);
    let err = prepare_passengers(&[bad_class]).unwrap_err();
    assert!(matches!(err, DataLoadError::InvalidValue { column: "Pclass", .. }));

    let mut bad_survived = raw("A, Mr. B", Some(10.0), Some(5.0), Some("S"));
    bad_survived.survived = None;
    let err = prepare_passengers(&[bad_survived]).unwrap_err();
    assert!(matches!(err, DataLoadError::InvalidValue { column: "Survived", .. }));
}

#[test]
fn test_column_without_observations_cannot_be_imputed() {
    let rows = vec![
        raw("A, Mrs. X", None, Some(5.0), Some("S")),
        raw("B, Mrs. X", None, Some(5.0), Some("S")),
    ];

    let err = prepare_passengers(&rows).unwrap_err();

    assert!(matches!(err, DataLoadError::NoObservedValues { column: "Age" }));
}

#[test]
fn test_typed_fields_are_parsed() {
    let table = prepare_passengers(&[raw("A, Mrs. X", Some(10.0), Some(5.0), Some("Q"))]).unwrap();
    let p = &table.rows()[0];

    assert!(p.survived);
    assert_eq!(p.class, PassengerClass::Second);
    assert_eq!(p.sex, Sex::Female);
    assert_eq!(p.embarked, Port::Queenstown);
    assert_eq!(p.age_group, Some(AgeGroup::Child));
}

#[test]
fn test_fractional_codes_are_invalid() {
    let mut fractional_class = raw("A, Mr. B", Some(10.0), Some(5.0), Some("S"));
    fractional_class.class = Some(1.7);
    let err = prepare_passengers(&[fractional_class]).unwrap_err();
    assert!(
        matches!(err, DataLoadError::InvalidValue { column: "Pclass", ref value, .. } if value == "1.7"),
        "Class 1.7 must not truncate to 1, got {:?}",
        err
    );

    let mut fractional_survived = raw("A, Mr. B", Some(10.0), Some(5.0), Some("S"));
    fractional_survived.survived = Some(0.5);
    let err = prepare_passengers(&[fractional_survived]).unwrap_err();
    assert!(matches!(err, DataLoadError::InvalidValue { column: "Survived", .. }));
}

#[test]
fn test_whole_float_codes_are_accepted() {
    let mut row = raw("A, Mr. B", Some(10.0), Some(5.0), Some("S"));
    row.survived = Some(0.0);
    row.class = Some(3.0);

    let table = prepare_passengers(&[row]).unwrap();

    assert!(!table.rows()[0].survived);
    assert_eq!(table.rows()[0].class, PassengerClass::Third);
}
