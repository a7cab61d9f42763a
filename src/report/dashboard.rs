//! Terminal rendering of one dashboard pass

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{
    age_histogram_by_survival, fare_age_scatter_points, select_display_rows, summary_metrics,
    survival_by_sex_and_class, survival_by_title, AgeHistogram, DisplayRow, FilterCriteria,
    HistogramBin, PassengerClass, PassengerTable, ScatterPoint, SexClassSurvival, SummaryMetrics,
    TitleSurvivalCount, HISTOGRAM_BINS,
};
use crate::utils::print_step_header;

const NO_DATA: &str = "no data";
const BAR_WIDTH: usize = 30;

/// Every view derived from one filtered table.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub total_passengers: usize,
    pub metrics: SummaryMetrics,
    pub by_sex_and_class: Vec<SexClassSurvival>,
    pub age_histogram: AgeHistogram,
    pub age_bins: Vec<HistogramBin>,
    pub scatter: Vec<ScatterPoint>,
    pub by_title: Vec<TitleSurvivalCount>,
    pub display_rows: Vec<DisplayRow>,
}

impl DashboardView {
    /// Compute all views from a filtered table.
    pub fn compute(
        filtered: &PassengerTable,
        total_passengers: usize,
        only_survivors: bool,
        row_limit: usize,
    ) -> Self {
        let age_histogram = age_histogram_by_survival(filtered);
        let age_bins = age_histogram.bin(HISTOGRAM_BINS);
        Self {
            total_passengers,
            metrics: summary_metrics(filtered),
            by_sex_and_class: survival_by_sex_and_class(filtered),
            age_histogram,
            age_bins,
            scatter: fare_age_scatter_points(filtered),
            by_title: survival_by_title(filtered),
            display_rows: select_display_rows(filtered, only_survivors, row_limit),
        }
    }

    pub fn display(&self, criteria: &FilterCriteria) {
        print_filters(criteria, self.metrics.count, self.total_passengers);

        print_step_header(1, "Key Metrics");
        print_table(metrics_table(&self.metrics));

        print_step_header(2, "Survival Rate by Sex and Class");
        if self.by_sex_and_class.is_empty() {
            print_no_data();
        } else {
            print_table(sex_class_table(&self.by_sex_and_class));
        }

        print_step_header(3, "Age Distribution by Survival");
        if self.age_bins.is_empty() {
            print_no_data();
        } else {
            print_table(histogram_table(&self.age_bins));
        }

        print_step_header(4, "Fare vs Age");
        if self.scatter.is_empty() {
            print_no_data();
        } else {
            print_fare_age_overview(&self.scatter);
        }

        print_step_header(5, "Survival by Title");
        if self.by_title.is_empty() {
            print_no_data();
        } else {
            print_table(title_table(&self.by_title));
        }

        print_step_header(6, "Filtered Passenger Data");
        if self.display_rows.is_empty() {
            print_no_data();
        } else {
            print_table(passenger_table(&self.display_rows));
        }
    }
}

/// Format an optional metric, reporting undefined values as "no data".
pub fn format_metric(value: Option<f64>, format: impl Fn(f64) -> String) -> String {
    value.map(format).unwrap_or_else(|| NO_DATA.to_string())
}

pub fn format_survival_rate(value: Option<f64>) -> String {
    format_metric(value, |v| format!("{:.1}%", v))
}

pub fn format_mean_age(value: Option<f64>) -> String {
    format_metric(value, |v| format!("{:.1}", v))
}

pub fn format_mean_fare(value: Option<f64>) -> String {
    format_metric(value, |v| format!("${:.2}", v))
}

fn print_filters(criteria: &FilterCriteria, shown: usize, total: usize) {
    let join = |items: Vec<String>| {
        if items.is_empty() {
            style("(none)").red().to_string()
        } else {
            items.join(", ")
        }
    };

    println!();
    println!("    {} {}", style("🔍").cyan(), style("FILTERS").white().bold());
    println!(
        "      Class: {}",
        join(criteria.classes.iter().map(|c| c.to_string()).collect())
    );
    println!(
        "      Sex:   {}",
        join(criteria.sexes.iter().map(|s| s.to_string()).collect())
    );
    println!(
        "      Age:   {} - {}",
        criteria.min_age, criteria.max_age
    );
    println!(
        "      Port:  {}",
        join(
            criteria
                .ports
                .iter()
                .map(|p| p.display_name().to_string())
                .collect()
        )
    );
    println!(
        "      {}",
        style(format!("Showing {} of {} passengers", shown, total)).bold()
    );
}

fn print_no_data() {
    println!("    {}", style(NO_DATA).dim());
}

fn print_table(table: Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        header
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn outcome_cell(survived: bool) -> Cell {
    if survived {
        Cell::new("yes").fg(Color::Blue)
    } else {
        Cell::new("no").fg(Color::Yellow)
    }
}

fn metrics_table(metrics: &SummaryMetrics) -> Table {
    let mut table = new_table(&["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Survival Rate"),
        Cell::new(format_survival_rate(metrics.survival_rate_pct)).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Average Age"),
        Cell::new(format_mean_age(metrics.mean_age)),
    ]);
    table.add_row(vec![
        Cell::new("Average Fare"),
        Cell::new(format_mean_fare(metrics.mean_fare)),
    ]);
    table.add_row(vec![
        Cell::new("Total Passengers"),
        Cell::new(metrics.count).add_attribute(Attribute::Bold),
    ]);
    table
}

fn sex_class_table(groups: &[SexClassSurvival]) -> Table {
    let mut table = new_table(&["Sex", "Class", "Passengers", "Survival Rate", ""]);
    for g in groups {
        table.add_row(vec![
            Cell::new(g.sex),
            Cell::new(g.class),
            Cell::new(g.passengers).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", g.survival_rate_pct)).set_alignment(CellAlignment::Right),
            Cell::new(bar(g.survival_rate_pct / 100.0)).fg(Color::Cyan),
        ]);
    }
    table
}

fn histogram_table(bins: &[HistogramBin]) -> Table {
    let peak = bins
        .iter()
        .map(|b| b.survived.max(b.perished))
        .max()
        .unwrap_or(0)
        .max(1);

    let mut table = new_table(&["Age", "Survived", "", "Did Not Survive", ""]);
    for b in bins.iter().filter(|b| b.survived + b.perished > 0) {
        table.add_row(vec![
            Cell::new(format!("{:>5.1} - {:<5.1}", b.lower, b.upper)),
            Cell::new(b.survived).set_alignment(CellAlignment::Right),
            Cell::new(bar(b.survived as f64 / peak as f64)).fg(Color::Blue),
            Cell::new(b.perished).set_alignment(CellAlignment::Right),
            Cell::new(bar(b.perished as f64 / peak as f64)).fg(Color::Yellow),
        ]);
    }
    table
}

/// Points are summarised by class, since a terminal cannot draw the scatter.
fn print_fare_age_overview(points: &[ScatterPoint]) {
    let mut table = new_table(&["Class", "Outcome", "Points", "Age Range", "Fare Range"]);
    for class in PassengerClass::ALL {
        for survived in [true, false] {
            let group: Vec<&ScatterPoint> = points
                .iter()
                .filter(|p| p.class == class && p.survived == survived)
                .collect();
            if group.is_empty() {
                continue;
            }
            let (age_lo, age_hi) = range(group.iter().map(|p| p.age));
            let (fare_lo, fare_hi) = range(group.iter().map(|p| p.fare));
            table.add_row(vec![
                Cell::new(class),
                outcome_cell(survived),
                Cell::new(group.len()).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.1} - {:.1}", age_lo, age_hi)),
                Cell::new(format!("${:.2} - ${:.2}", fare_lo, fare_hi)),
            ]);
        }
    }
    print_table(table);
}

fn title_table(groups: &[TitleSurvivalCount]) -> Table {
    let mut table = new_table(&["Title", "Survived", "Passengers"]);
    for g in groups {
        table.add_row(vec![
            Cell::new(if g.title.is_empty() { "(none)" } else { g.title.as_str() }),
            outcome_cell(g.survived),
            Cell::new(g.count).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn passenger_table(rows: &[DisplayRow]) -> Table {
    let mut table = new_table(&[
        "Name", "Sex", "Age", "Class", "Fare", "Embarked", "Survived", "Title",
    ]);
    for r in rows {
        table.add_row(vec![
            Cell::new(&r.name),
            Cell::new(r.sex),
            Cell::new(format!("{:.1}", r.age)).set_alignment(CellAlignment::Right),
            Cell::new(r.class),
            Cell::new(format!("{:.2}", r.fare)).set_alignment(CellAlignment::Right),
            Cell::new(r.embarked),
            outcome_cell(r.survived),
            Cell::new(&r.title),
        ]);
    }
    table
}

fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}

fn range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
