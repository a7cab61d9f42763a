//! Data preparation: imputation and derived features
//!
//! Turns raw rows into the prepared [`PassengerTable`]. Missing ages and fares
//! are filled with the column median, missing ports with the column mode, and
//! every row gets a canonical title and an age group.

use std::collections::BTreeMap;

use super::error::DataLoadError;
use super::model::{AgeGroup, Passenger, PassengerClass, PassengerTable, Port, RawPassenger, Sex};

/// Raw title to canonical title. Titles not listed pass through unchanged.
pub const TITLE_CANONICALIZATION: [(&str, &str); 14] = [
    ("Mlle", "Miss"),
    ("Ms", "Miss"),
    ("Mme", "Mrs"),
    ("Lady", "Mrs"),
    ("the Countess", "Mrs"),
    ("Dona", "Mrs"),
    ("Sir", "Mr"),
    ("Jonkheer", "Mr"),
    ("Don", "Mr"),
    ("Col", "Officer"),
    ("Major", "Officer"),
    ("Capt", "Officer"),
    ("Rev", "Officer"),
    ("Dr", "Officer"),
];

/// Upper bounds of the age bins; each bin is `(previous bound, bound]`.
const AGE_BINS: [(f64, AgeGroup); 5] = [
    (12.0, AgeGroup::Child),
    (18.0, AgeGroup::Teen),
    (35.0, AgeGroup::Adult),
    (50.0, AgeGroup::Middle),
    (80.0, AgeGroup::Senior),
];

/// Fill values chosen for a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Imputation {
    pub age: Option<f64>,
    pub fare: Option<f64>,
    pub embarked: Option<Port>,
}

/// Prepare raw rows into the passenger table.
///
/// The output has the same row count as the input. Fails when a required
/// categorical field is invalid, or when a column has gaps but no observed
/// values to impute them from.
pub fn prepare_passengers(raw: &[RawPassenger]) -> Result<PassengerTable, DataLoadError> {
    let ports: Vec<Option<Port>> = raw.iter().map(|r| parse_port(r.embarked.as_deref())).collect();
    let imputation = Imputation {
        age: median(raw.iter().filter_map(|r| r.age)),
        fare: median(raw.iter().filter_map(|r| r.fare)),
        embarked: mode(ports.iter().flatten().copied()),
    };

    log::debug!(
        "Imputing: {} age, {} fare, {} port value(s) with {:?}",
        raw.iter().filter(|r| r.age.is_none()).count(),
        raw.iter().filter(|r| r.fare.is_none()).count(),
        ports.iter().filter(|p| p.is_none()).count(),
        imputation
    );

    raw.iter()
        .zip(ports)
        .enumerate()
        .map(|(row, (r, port))| prepare_row(row, r, port, &imputation))
        .collect()
}

fn prepare_row(
    row: usize,
    raw: &RawPassenger,
    port: Option<Port>,
    imputation: &Imputation,
) -> Result<Passenger, DataLoadError> {
    let survived = match whole_number(raw.survived) {
        Some(0) => false,
        Some(1) => true,
        _ => return Err(invalid("Survived", row, raw.survived)),
    };

    let class = whole_number(raw.class)
        .and_then(PassengerClass::from_code)
        .ok_or_else(|| invalid("Pclass", row, raw.class))?;

    let sex = raw
        .sex
        .as_deref()
        .and_then(|s| s.parse::<Sex>().ok())
        .ok_or_else(|| invalid("Sex", row, raw.sex.as_deref()))?;

    let age = raw
        .age
        .or(imputation.age)
        .ok_or(DataLoadError::NoObservedValues { column: "Age" })?;
    let fare = raw
        .fare
        .or(imputation.fare)
        .ok_or(DataLoadError::NoObservedValues { column: "Fare" })?;
    let embarked = port
        .or(imputation.embarked)
        .ok_or(DataLoadError::NoObservedValues { column: "Embarked" })?;

    let name = raw.name.clone().unwrap_or_default();
    let title = canonical_title(extract_title(&name)).to_string();

    Ok(Passenger {
        id: row,
        survived,
        class,
        name,
        sex,
        age,
        fare,
        embarked,
        title,
        age_group: age_group(age),
    })
}

fn invalid<T: std::fmt::Debug>(column: &'static str, row: usize, value: Option<T>) -> DataLoadError {
    DataLoadError::InvalidValue {
        column,
        row,
        value: match value {
            Some(v) => format!("{:?}", v),
            None => "<missing>".to_string(),
        },
    }
}

/// Integral value of a code column; fractional codes such as `1.7` are rejected.
fn whole_number(value: Option<f64>) -> Option<i64> {
    value
        .filter(|v| v.is_finite() && v.fract() == 0.0)
        .map(|v| v as i64)
}

fn parse_port(value: Option<&str>) -> Option<Port> {
    value.and_then(|v| v.parse().ok())
}

/// Extract the raw title from a `"Last, Title. First"` name.
///
/// Returns the trimmed text between the first comma and the next period, or
/// an empty string when the name has no such section.
pub fn extract_title(name: &str) -> &str {
    let Some(comma) = name.find(',') else {
        return "";
    };
    let rest = &name[comma + 1..];
    match rest.find('.') {
        Some(period) => rest[..period].trim(),
        None => "",
    }
}

/// Map a raw title to its canonical form.
pub fn canonical_title(title: &str) -> &str {
    TITLE_CANONICALIZATION
        .iter()
        .find(|(raw, _)| *raw == title)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(title)
}

/// Bin an age into its group. Ages of 0 or outside (0, 80] have no group.
pub fn age_group(age: f64) -> Option<AgeGroup> {
    if age <= 0.0 {
        return None;
    }
    AGE_BINS
        .iter()
        .find(|(upper, _)| age <= *upper)
        .map(|(_, group)| *group)
}

/// Median of the given values, averaging the middle pair for even counts.
pub fn median(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sorted: Vec<f64> = values.filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Most frequent value; ties go to the lowest value in sort order.
pub fn mode<T: Ord + Copy>(values: impl Iterator<Item = T>) -> Option<T> {
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    // BTreeMap iterates ascending, so keeping only strictly greater counts
    // leaves the lowest value among ties.
    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_requires_comma_and_period() {
        assert_eq!(extract_title("Braund, Mr. Owen Harris"), "Mr");
        assert_eq!(extract_title("Rothes, the Countess. of (Lucy)"), "the Countess");
        assert_eq!(extract_title("No comma. Here"), "");
        assert_eq!(extract_title("Comma, but no period"), "");
        assert_eq!(extract_title(""), "");
    }

    #[test]
    fn median_of_even_count_averages_middle_pair() {
        assert_eq!(median([4.0, 1.0, 3.0, 2.0].into_iter()), Some(2.5));
        assert_eq!(median([5.0, 1.0, 3.0].into_iter()), Some(3.0));
        assert_eq!(median(std::iter::empty()), None);
    }

    #[test]
    fn mode_breaks_ties_by_lowest_value() {
        let ports = [Port::Southampton, Port::Cherbourg, Port::Southampton, Port::Cherbourg];
        assert_eq!(mode(ports.into_iter()), Some(Port::Cherbourg));
        assert_eq!(mode([3, 1, 3].into_iter()), Some(3));
        assert_eq!(mode(std::iter::empty::<u8>()), None);
    }
}
