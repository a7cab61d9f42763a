//! Dataset loader for CSV and Parquet files

use std::path::Path;
use std::sync::Arc;

use polars::prelude::*;

use super::error::DataLoadError;
use super::model::RawPassenger;

/// Source columns consumed by the dashboard.
pub const REQUIRED_COLUMNS: [&str; 7] =
    ["Survived", "Pclass", "Name", "Sex", "Age", "Fare", "Embarked"];

/// Numeric columns read as text from CSV; they are parsed leniently later.
const LENIENT_NUMERIC_COLUMNS: [&str; 4] = ["Survived", "Pclass", "Age", "Fare"];

/// Read a dataset file (CSV or Parquet based on extension) into a DataFrame
pub fn read_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    // 0 means full table scan
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let read_error = |source: PolarsError| DataLoadError::Read {
        path: path.to_path_buf(),
        source,
    };

    let lf = match extension.as_str() {
        "csv" => {
            let overwrite = lenient_csv_schema(path).map_err(read_error)?;
            LazyCsvReader::new(path)
                .with_infer_schema_length(schema_length)
                .with_dtype_overwrite(Some(overwrite))
                .finish()
                .map_err(read_error)?
        }
        "parquet" => LazyFrame::scan_parquet(path, Default::default()).map_err(read_error)?,
        _ => return Err(DataLoadError::UnsupportedFormat { extension }),
    };

    let df = lf.collect().map_err(read_error)?;
    log::info!(
        "Read {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Pin the numeric source columns present in the CSV header to `String`.
///
/// Inference only sees the first rows, so a malformed cell further down would
/// otherwise abort the read instead of becoming a missing value.
fn lenient_csv_schema(path: &Path) -> PolarsResult<SchemaRef> {
    let header = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(0))
        .finish()?
        .collect_schema()?;

    let mut schema = Schema::default();
    for col in LENIENT_NUMERIC_COLUMNS {
        if header.get(col).is_some() {
            schema.with_column(col.into(), DataType::String);
        }
    }
    Ok(Arc::new(schema))
}

/// Check that every column in [`REQUIRED_COLUMNS`] is present.
pub fn validate_columns(df: &DataFrame) -> Result<(), DataLoadError> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !present.iter().any(|p| p == *col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataLoadError::MissingColumns { missing })
    }
}

/// Extract raw passenger rows from a DataFrame.
///
/// Numeric columns are cast non-strictly, so a malformed `Age` or `Fare` cell
/// becomes missing instead of failing the load.
pub fn extract_raw_passengers(df: &DataFrame) -> Result<Vec<RawPassenger>, DataLoadError> {
    validate_columns(df)?;

    let survived = float_values(df, "Survived")?;
    let class = float_values(df, "Pclass")?;
    let name = string_values(df, "Name")?;
    let sex = string_values(df, "Sex")?;
    let age = float_values(df, "Age")?;
    let fare = float_values(df, "Fare")?;
    let embarked = string_values(df, "Embarked")?;

    let rows = (0..df.height())
        .map(|i| RawPassenger {
            survived: survived[i],
            class: class[i],
            name: name[i].clone(),
            sex: sex[i].clone(),
            age: age[i],
            fare: fare[i],
            embarked: embarked[i].clone(),
        })
        .collect();

    Ok(rows)
}

/// Read a dataset file straight into raw passenger rows.
pub fn load_raw_passengers(
    path: &Path,
    infer_schema_length: usize,
) -> Result<Vec<RawPassenger>, DataLoadError> {
    let df = read_dataset(path, infer_schema_length)?;
    extract_raw_passengers(&df)
}

fn column_error(column: &str) -> impl Fn(PolarsError) -> DataLoadError + '_ {
    move |source| DataLoadError::Column {
        column: column.to_string(),
        source,
    }
}

fn float_values(df: &DataFrame, col_name: &str) -> Result<Vec<Option<f64>>, DataLoadError> {
    let col = df
        .column(col_name)
        .and_then(|c| c.cast(&DataType::Float64))
        .map_err(column_error(col_name))?;
    let values = col.f64().map_err(column_error(col_name))?;
    Ok(values
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

fn string_values(df: &DataFrame, col_name: &str) -> Result<Vec<Option<String>>, DataLoadError> {
    let col = df
        .column(col_name)
        .and_then(|c| c.cast(&DataType::String))
        .map_err(column_error(col_name))?;
    let values = col.str().map_err(column_error(col_name))?;
    Ok(values
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}
