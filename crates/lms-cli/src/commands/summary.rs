//! Summary report handling shared by the sync commands

use colored::Colorize;
use lms_core::{Config, SummaryRecorder, SummaryStore};

use crate::error::Result;

fn store(config: &Config) -> SummaryStore {
    let summary = &config.settings.summary;
    SummaryStore::new(&summary.dir, summary.expire_days)
}

/// Print the run summary and, when enabled, persist it and expire old
/// reports.
pub fn finish_summary(config: &Config, recorder: &SummaryRecorder) -> Result<()> {
    println!("{}", recorder.render());
    if !config.settings.summary.enabled {
        return Ok(());
    }

    let store = store(config);
    store.sweep_expired()?;
    let path = store.persist(recorder)?;
    println!("Summary file has been saved to: {}", path.display());
    Ok(())
}

/// Run the retention sweep on its own.
pub fn run_clean_summaries(config: &Config) -> Result<()> {
    let store = store(config);
    let removed = store.sweep_expired()?;
    println!(
        "{} Removed {} expired summary file(s) from {}",
        "OK".green().bold(),
        removed,
        store.dir().display()
    );
    Ok(())
}
