use anyhow::Result;

mod config;
mod error;
mod logging;
mod services;

use services::excel::{cleaner, loader};
use services::{renderer, report, selector};

fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = config::Config::load()?;

    // Load -> clean -> select -> render -> report, strictly in sequence.
    let rows = loader::load_sheet(&config.input_path, &config.sheet_name)?;
    let sheet = cleaner::clean_sheet(rows)?;
    let table = selector::build_working_table(&sheet)?;

    let pages = renderer::render_charts(&table, &config.output_dir, config.charts_per_page)?;
    tracing::info!("Wrote {} chart page(s)", pages.len());

    report::print_report(&table)?;

    Ok(())
}
