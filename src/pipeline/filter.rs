//! Filter criteria and row filtering

use std::collections::BTreeSet;

use serde::Serialize;

use super::model::{Passenger, PassengerClass, PassengerTable, Port, Sex};

pub const MIN_AGE: f64 = 0.0;
pub const MAX_AGE: f64 = 80.0;

/// Per-interaction filter selection.
///
/// A row passes when its value is selected in every set and its age lies in
/// the inclusive range. An empty set selects nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub classes: BTreeSet<PassengerClass>,
    pub sexes: BTreeSet<Sex>,
    pub min_age: f64,
    pub max_age: f64,
    pub ports: BTreeSet<Port>,
}

impl Default for FilterCriteria {
    /// Everything selected.
    fn default() -> Self {
        Self {
            classes: PassengerClass::ALL.into_iter().collect(),
            sexes: Sex::ALL.into_iter().collect(),
            min_age: MIN_AGE,
            max_age: MAX_AGE,
            ports: Port::ALL.into_iter().collect(),
        }
    }
}

impl FilterCriteria {
    pub fn matches(&self, passenger: &Passenger) -> bool {
        self.classes.contains(&passenger.class)
            && self.sexes.contains(&passenger.sex)
            && passenger.age >= self.min_age
            && passenger.age <= self.max_age
            && self.ports.contains(&passenger.embarked)
    }
}

/// Keep the rows matching every criterion, in table order.
pub fn apply_filters(table: &PassengerTable, criteria: &FilterCriteria) -> PassengerTable {
    table
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .collect()
}
