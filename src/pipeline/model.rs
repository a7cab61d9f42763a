//! Passenger record and its categorical attributes

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::ParseValueError;

/// Ticket class of a passenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum PassengerClass {
    First,
    Second,
    Third,
}

impl PassengerClass {
    pub const ALL: [PassengerClass; 3] = [Self::First, Self::Second, Self::Third];

    /// Numeric class code as it appears in the dataset (1, 2 or 3).
    pub fn code(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            _ => None,
        }
    }
}

impl From<PassengerClass> for u8 {
    fn from(class: PassengerClass) -> Self {
        class.code()
    }
}

impl fmt::Display for PassengerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for PassengerClass {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .ok()
            .and_then(Self::from_code)
            .ok_or_else(|| ParseValueError {
                kind: "passenger class",
                value: s.to_string(),
                expected: "1, 2, 3",
            })
    }
}

/// Sex of a passenger. Ordered female before male, like a sorted group key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Self::Male, Self::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "female" => Ok(Self::Female),
            "male" => Ok(Self::Male),
            _ => Err(ParseValueError {
                kind: "sex",
                value: s.to_string(),
                expected: "male, female",
            }),
        }
    }
}

/// Port of embarkation, ordered by its one-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Port {
    #[serde(rename = "C")]
    Cherbourg,
    #[serde(rename = "Q")]
    Queenstown,
    #[serde(rename = "S")]
    Southampton,
}

impl Port {
    pub const ALL: [Port; 3] = [Self::Cherbourg, Self::Queenstown, Self::Southampton];

    pub fn code(self) -> &'static str {
        match self {
            Self::Cherbourg => "C",
            Self::Queenstown => "Q",
            Self::Southampton => "S",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Cherbourg => "Cherbourg",
            Self::Queenstown => "Queenstown",
            Self::Southampton => "Southampton",
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Port {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "C" => Ok(Self::Cherbourg),
            "Q" => Ok(Self::Queenstown),
            "S" => Ok(Self::Southampton),
            _ => Err(ParseValueError {
                kind: "embarkation port",
                value: s.to_string(),
                expected: "C, Q, S",
            }),
        }
    }
}

/// Age bucket derived from a passenger's age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AgeGroup {
    Child,
    Teen,
    Adult,
    Middle,
    Senior,
}

impl AgeGroup {
    pub fn label(self) -> &'static str {
        match self {
            Self::Child => "Child",
            Self::Teen => "Teen",
            Self::Adult => "Adult",
            Self::Middle => "Middle",
            Self::Senior => "Senior",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A row as read from the source file, before imputation and derivation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPassenger {
    pub survived: Option<f64>,
    pub class: Option<f64>,
    pub name: Option<String>,
    pub sex: Option<String>,
    pub age: Option<f64>,
    pub fare: Option<f64>,
    pub embarked: Option<String>,
}

/// A prepared passenger row. `age`, `fare` and `embarked` are always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Passenger {
    /// Zero-based row position in the source file.
    pub id: usize,
    pub survived: bool,
    pub class: PassengerClass,
    pub name: String,
    pub sex: Sex,
    pub age: f64,
    pub fare: f64,
    pub embarked: Port,
    pub title: String,
    pub age_group: Option<AgeGroup>,
}

/// The immutable, prepared passenger table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PassengerTable {
    rows: Vec<Passenger>,
}

impl PassengerTable {
    pub fn new(rows: Vec<Passenger>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Passenger] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Passenger> {
        self.rows.iter()
    }
}

impl FromIterator<Passenger> for PassengerTable {
    fn from_iter<I: IntoIterator<Item = Passenger>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PassengerTable {
    type Item = &'a Passenger;
    type IntoIter = std::slice::Iter<'a, Passenger>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
