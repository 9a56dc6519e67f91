//! Interactive POD fetch tool
//!
//! Prompts for a tracking-number spreadsheet, fetches POD records and files
//! in batches, and writes a two-sheet report next to the input file. Errors
//! are printed but never abort the process abnormally — the tool always
//! waits for acknowledgment and exits 0.

use pod_fetch::input::{self, InputSource, PromptInput};
use pod_fetch::{Config, PodPipeline, Result, report};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("POD fetch tool");
    println!("Tracking numbers must be in the first column of the spreadsheet.");
    println!("------------------------------------------------------");
    input::wait_for_enter("Press Enter to start ");

    if let Err(e) = run().await {
        eprintln!("An unexpected error occurred: {e}");
    }

    input::wait_for_enter("Press Enter to exit ");
}

async fn run() -> Result<()> {
    // A path given on the command line skips the prompt
    let input_path = match std::env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => PromptInput.pick_file()?,
    };

    let (input_table, tracking_numbers) = report::read_input(&input_path)?;
    let (pod_dir, report_path) = report::output_locations(&input_path)?;
    std::fs::create_dir_all(&pod_dir)?;

    let pipeline = PodPipeline::new(Config::default())?;
    let records = pipeline.run(&tracking_numbers, &pod_dir).await;

    report::write_report(&records, &input_table, &report_path)?;

    println!("All done! Report saved to: {}", report_path.display());
    println!("All POD files saved in folder: {}", pod_dir.display());
    Ok(())
}
