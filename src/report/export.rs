//! JSON export of a dashboard pass

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{
    AgeHistogram, DisplayRow, FilterCriteria, HistogramBin, ScatterPoint, SexClassSurvival,
    SummaryMetrics, TitleSurvivalCount,
};

use super::DashboardView;

/// Metadata about the exported pass
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the export (RFC 3339)
    pub timestamp: String,
    pub tool_version: String,
    pub input_file: String,
    pub criteria: FilterCriteria,
    pub only_survivors: bool,
    /// Passengers in the unfiltered table
    pub total_passengers: usize,
}

#[derive(Serialize)]
pub struct ExportedHistogram<'a> {
    #[serde(flatten)]
    pub ages: &'a AgeHistogram,
    pub bins: &'a [HistogramBin],
}

/// Complete export of one pass
#[derive(Serialize)]
pub struct DashboardExport<'a> {
    pub metadata: ExportMetadata,
    pub summary: &'a SummaryMetrics,
    pub survival_by_sex_and_class: &'a [SexClassSurvival],
    pub age_histogram: ExportedHistogram<'a>,
    pub fare_age_scatter: &'a [ScatterPoint],
    pub survival_by_title: &'a [TitleSurvivalCount],
    pub display_rows: &'a [DisplayRow],
}

impl<'a> DashboardExport<'a> {
    pub fn new(
        view: &'a DashboardView,
        criteria: &FilterCriteria,
        only_survivors: bool,
        input_file: &Path,
    ) -> Self {
        Self {
            metadata: ExportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input_file.display().to_string(),
                criteria: criteria.clone(),
                only_survivors,
                total_passengers: view.total_passengers,
            },
            summary: &view.metrics,
            survival_by_sex_and_class: &view.by_sex_and_class,
            age_histogram: ExportedHistogram {
                ages: &view.age_histogram,
                bins: &view.age_bins,
            },
            fare_age_scatter: &view.scatter,
            survival_by_title: &view.by_title,
            display_rows: &view.display_rows,
        }
    }
}

/// Write a dashboard pass to a JSON file
pub fn export_dashboard(
    view: &DashboardView,
    criteria: &FilterCriteria,
    only_survivors: bool,
    input_file: &Path,
    output_path: &Path,
) -> Result<()> {
    let export = DashboardExport::new(view, criteria, only_survivors, input_file);

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize dashboard export to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write export file: {}", output_path.display()))?;

    Ok(())
}
