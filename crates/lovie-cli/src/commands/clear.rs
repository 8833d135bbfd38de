use crate::output::Output;
use color_eyre::Result;
use movie_log_config::{Config, PathManager};
use std::fs;

pub fn run_clear(all: bool, watched: bool, logs: bool, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    if all {
        clear_watched(config, paths, output)?;
        clear_logs(config, paths, output)?;
        output.success("Watched list and logs cleared");
        return Ok(());
    }

    let mut cleared_anything = false;

    if watched {
        clear_watched(config, paths, output)?;
        cleared_anything = true;
    }

    if logs {
        clear_logs(config, paths, output)?;
        cleared_anything = true;
    }

    if !cleared_anything {
        output.warn("No clear option specified. Use --watched, --logs, or --all");
        output.println("\nExample: lovie clear --watched");
    }

    Ok(())
}

fn clear_watched(config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let mut watched = super::open_watched(config, paths)?;
    if watched.is_empty() {
        output.info("Watched list is already empty");
        return Ok(());
    }

    let count = watched.len();
    watched.clear()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to clear watched list: {}", e))?;
    output.success(format!("Cleared {} watched title(s)", count));
    Ok(())
}

fn clear_logs(config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let log_dir = config
        .logging
        .file
        .as_ref()
        .and_then(|f| f.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| paths.log_dir().to_path_buf());

    if !log_dir.exists() {
        output.info("No log directory found to clear");
        return Ok(());
    }

    // Rotated files share the configured file's stem: lovie.log -> lovie.2026-01-17
    let prefix = config
        .logging
        .file
        .as_ref()
        .and_then(|f| f.file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("lovie")
        .to_string();

    let mut removed = 0;
    for entry in fs::read_dir(&log_dir)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read log directory {}: {}", log_dir.display(), e))?
    {
        let path = entry?.path();
        let is_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with(&prefix))
            .unwrap_or(false);
        if path.is_file() && is_log {
            fs::remove_file(&path)
                .map_err(|e| color_eyre::eyre::eyre!("Failed to remove log file {}: {}", path.display(), e))?;
            removed += 1;
        }
    }

    if removed == 0 {
        output.info("No log files found to clear");
    } else {
        output.success(format!("Cleared {} log file(s) from {}", removed, log_dir.display()));
    }
    Ok(())
}
