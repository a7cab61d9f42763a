//! Titanic Explorer: terminal dashboard for passenger survival data
//!
//! Loads the passenger dataset once, then filters and summarises it for one
//! or more rounds of user-chosen criteria.

use anyhow::{Context, Result};
use clap::Parser;

use titanic_explorer::cli::{confirm_continue, prompt_interaction, Cli, Interaction};
use titanic_explorer::pipeline::{apply_filters, DatasetProvider, FilterCriteria, PassengerTable};
use titanic_explorer::report::{export_dashboard, DashboardView};
use titanic_explorer::utils::{
    create_spinner, finish_with_failure, finish_with_success, print_banner, print_completion,
    print_config, print_info, print_success,
};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let criteria = cli.criteria()?;

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.input, cli.export.as_deref());

    let provider = DatasetProvider::new(&cli.input, cli.infer_schema_length);
    let spinner = create_spinner("Loading passenger data...");
    let table = match provider.table() {
        Ok(table) => {
            finish_with_success(&spinner, "Passenger data loaded");
            table
        }
        Err(e) => {
            finish_with_failure(&spinner);
            return Err(e).with_context(|| {
                format!("Failed to load dataset from {}", provider.source().display())
            });
        }
    };
    print_info(&format!("{} passengers prepared", table.len()));

    let mut interaction = Interaction {
        criteria,
        only_survivors: cli.only_survivors,
    };

    if cli.interactive {
        loop {
            interaction = prompt_interaction(&interaction)?;
            run_pass(&cli, table, &interaction.criteria, interaction.only_survivors)?;
            if !confirm_continue()? {
                break;
            }
        }
    } else {
        run_pass(&cli, table, &interaction.criteria, interaction.only_survivors)?;
    }

    print_completion();
    Ok(())
}

/// Filter, aggregate and render once for the given selection.
fn run_pass(
    cli: &Cli,
    table: &PassengerTable,
    criteria: &FilterCriteria,
    only_survivors: bool,
) -> Result<()> {
    let filtered = apply_filters(table, criteria);
    log::debug!("{} of {} rows match {:?}", filtered.len(), table.len(), criteria);

    let view = DashboardView::compute(&filtered, table.len(), only_survivors, cli.rows);
    view.display(criteria);

    if let Some(export_path) = &cli.export {
        export_dashboard(&view, criteria, only_survivors, &cli.input, export_path)?;
        println!();
        print_success(&format!("Exported to {}", export_path.display()));
    }

    Ok(())
}
