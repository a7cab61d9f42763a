//! Aggregates computed from a filtered passenger table
//!
//! Every function here is a single pass over the rows it is given. Group-wise
//! outputs only contain groups that actually occur and are ordered by their
//! group key.

use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{Passenger, PassengerClass, PassengerTable, Port, Sex};

/// Number of buckets used for the age histogram.
pub const HISTOGRAM_BINS: usize = 30;

/// Maximum number of rows shown in the passenger table.
pub const DISPLAY_ROW_LIMIT: usize = 50;

/// Headline metrics. Rate and means are `None` when there are no rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub survival_rate_pct: Option<f64>,
    pub mean_age: Option<f64>,
    pub mean_fare: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SexClassSurvival {
    pub sex: Sex,
    pub class: PassengerClass,
    pub survival_rate_pct: f64,
    pub passengers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleSurvivalCount {
    pub title: String,
    pub survived: bool,
    pub count: usize,
}

/// Ages split by outcome, left unbinned.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgeHistogram {
    pub survived: Vec<f64>,
    pub perished: Vec<f64>,
}

/// One equal-width histogram bucket, `[lower, upper)`; the last bucket also
/// includes its upper edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub survived: usize,
    pub perished: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub age: f64,
    pub fare: f64,
    pub survived: bool,
    pub name: String,
    pub class: PassengerClass,
    pub sex: Sex,
}

/// Projection of a passenger onto the table columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub name: String,
    pub sex: Sex,
    pub age: f64,
    pub class: PassengerClass,
    pub fare: f64,
    pub embarked: Port,
    pub survived: bool,
    pub title: String,
}

impl From<&Passenger> for DisplayRow {
    fn from(p: &Passenger) -> Self {
        Self {
            name: p.name.clone(),
            sex: p.sex,
            age: p.age,
            class: p.class,
            fare: p.fare,
            embarked: p.embarked,
            survived: p.survived,
            title: p.title.clone(),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

fn survived_value(p: &Passenger) -> f64 {
    if p.survived {
        1.0
    } else {
        0.0
    }
}

pub fn summary_metrics(table: &PassengerTable) -> SummaryMetrics {
    SummaryMetrics {
        survival_rate_pct: mean(table.iter().map(survived_value)).map(|r| r * 100.0),
        mean_age: mean(table.iter().map(|p| p.age)),
        mean_fare: mean(table.iter().map(|p| p.fare)),
        count: table.len(),
    }
}

/// Survival rate per `(sex, class)` group present in the table.
pub fn survival_by_sex_and_class(table: &PassengerTable) -> Vec<SexClassSurvival> {
    let mut groups: BTreeMap<(Sex, PassengerClass), (usize, usize)> = BTreeMap::new();
    for p in table {
        let (survivors, total) = groups.entry((p.sex, p.class)).or_default();
        *survivors += usize::from(p.survived);
        *total += 1;
    }

    groups
        .into_iter()
        .map(|((sex, class), (survivors, total))| SexClassSurvival {
            sex,
            class,
            survival_rate_pct: survivors as f64 / total as f64 * 100.0,
            passengers: total,
        })
        .collect()
}

pub fn age_histogram_by_survival(table: &PassengerTable) -> AgeHistogram {
    let mut histogram = AgeHistogram::default();
    for p in table {
        if p.survived {
            histogram.survived.push(p.age);
        } else {
            histogram.perished.push(p.age);
        }
    }
    histogram
}

impl AgeHistogram {
    /// Bin both sequences into `bins` equal-width buckets over the observed
    /// range of all ages.
    pub fn bin(&self, bins: usize) -> Vec<HistogramBin> {
        let all = self.survived.iter().chain(&self.perished);
        let Some((lo, hi)) = all.fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        }) else {
            return Vec::new();
        };
        if bins == 0 {
            return Vec::new();
        }

        // A single distinct value collapses to one bucket.
        let bins = if hi > lo { bins } else { 1 };
        let width = if hi > lo { (hi - lo) / bins as f64 } else { 1.0 };

        let mut out: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                lower: lo + i as f64 * width,
                upper: if i + 1 == bins { hi.max(lo + width) } else { lo + (i + 1) as f64 * width },
                survived: 0,
                perished: 0,
            })
            .collect();

        let index = |v: f64| (((v - lo) / width) as usize).min(bins - 1);
        for &v in &self.survived {
            out[index(v)].survived += 1;
        }
        for &v in &self.perished {
            out[index(v)].perished += 1;
        }
        out
    }
}

pub fn fare_age_scatter_points(table: &PassengerTable) -> Vec<ScatterPoint> {
    table
        .iter()
        .map(|p| ScatterPoint {
            age: p.age,
            fare: p.fare,
            survived: p.survived,
            name: p.name.clone(),
            class: p.class,
            sex: p.sex,
        })
        .collect()
}

/// Row count per `(title, survived)` group present in the table.
pub fn survival_by_title(table: &PassengerTable) -> Vec<TitleSurvivalCount> {
    let mut groups: BTreeMap<(&str, bool), usize> = BTreeMap::new();
    for p in table {
        *groups.entry((p.title.as_str(), p.survived)).or_default() += 1;
    }

    groups
        .into_iter()
        .map(|((title, survived), count)| TitleSurvivalCount {
            title: title.to_string(),
            survived,
            count,
        })
        .collect()
}

/// First `limit` rows in table order, survivors only when requested.
pub fn select_display_rows(
    table: &PassengerTable,
    only_survivors: bool,
    limit: usize,
) -> Vec<DisplayRow> {
    table
        .iter()
        .filter(|p| !only_survivors || p.survived)
        .take(limit)
        .map(DisplayRow::from)
        .collect()
}
