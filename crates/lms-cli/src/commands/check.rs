//! The check command

use std::path::Path;

use colored::Colorize;
use lms_core::Config;

use crate::error::Result;

/// Print one line per validated course config.
pub fn run_check(config_path: &Path, config: &Config) -> Result<()> {
    println!(
        "{} Checking {}",
        "=>".blue().bold(),
        config_path.display().to_string().cyan()
    );

    let settings = &config.settings;
    println!("   destination: {}", settings.destination_base.display());
    println!("   cache:       {}", settings.cache_dir.display());

    for (index, course) in config.courses.iter().enumerate() {
        let destination = course
            .destination_base()
            .map(|d| settings.destination_base.join(d).display().to_string())
            .unwrap_or_else(|| "<course title>".to_string());
        println!(
            "   {} [{}] {} {} {} (update: {}) -> {}",
            "-".green(),
            index,
            course.title_matcher().to_string().cyan(),
            course.semester(),
            course.config_type(),
            course.update_type(),
            destination.dimmed()
        );
    }

    println!(
        "{} {} course config(s) valid.",
        "OK".green().bold(),
        config.courses.len()
    );
    Ok(())
}
