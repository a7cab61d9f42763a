//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{
    FilterCriteria, PassengerClass, Port, Sex, DISPLAY_ROW_LIMIT, MAX_AGE, MIN_AGE,
};

/// Titanic Explorer - filter and summarise passenger survival data
#[derive(Parser, Debug)]
#[command(name = "titanic-explorer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long, default_value = "train.csv")]
    pub input: PathBuf,

    /// Passenger classes to include (comma-separated: 1,2,3)
    #[arg(long = "class", value_delimiter = ',', default_values = ["1", "2", "3"])]
    pub classes: Vec<PassengerClass>,

    /// Sexes to include (comma-separated: male,female)
    #[arg(long = "sex", value_delimiter = ',', default_values = ["male", "female"])]
    pub sexes: Vec<Sex>,

    /// Minimum age (inclusive, 0-80)
    #[arg(long, default_value = "0", value_parser = validate_age)]
    pub min_age: f64,

    /// Maximum age (inclusive, 0-80)
    #[arg(long, default_value = "80", value_parser = validate_age)]
    pub max_age: f64,

    /// Embarkation ports to include (comma-separated: C=Cherbourg, Q=Queenstown, S=Southampton)
    #[arg(long = "port", value_delimiter = ',', default_values = ["C", "Q", "S"])]
    pub ports: Vec<Port>,

    /// Show only survivors in the passenger table
    #[arg(long, default_value = "false")]
    pub only_survivors: bool,

    /// Maximum number of passenger rows to display
    #[arg(long, default_value_t = DISPLAY_ROW_LIMIT, value_parser = validate_rows)]
    pub rows: usize,

    /// Export all computed views of the pass to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Choose filters interactively; each round recomputes the dashboard
    #[arg(long, default_value = "false")]
    pub interactive: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Build filter criteria from the command-line selection.
    pub fn criteria(&self) -> anyhow::Result<FilterCriteria> {
        if self.min_age > self.max_age {
            anyhow::bail!(
                "--min-age ({}) must not be greater than --max-age ({})",
                self.min_age,
                self.max_age
            );
        }

        Ok(FilterCriteria {
            classes: self.classes.iter().copied().collect(),
            sexes: self.sexes.iter().copied().collect(),
            min_age: self.min_age,
            max_age: self.max_age,
            ports: self.ports.iter().copied().collect(),
        })
    }
}

/// Validate that an age bound lies within the selectable range
pub fn validate_age(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(MIN_AGE..=MAX_AGE).contains(&value) {
        return Err(format!(
            "Age must be between {} and {}, got {}",
            MIN_AGE, MAX_AGE, value
        ));
    }
    Ok(value)
}

/// Validate that at least one passenger row is requested
pub fn validate_rows(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid row count", s))?;
    if value == 0 {
        return Err("Row count must be at least 1".to_string());
    }
    Ok(value)
}
