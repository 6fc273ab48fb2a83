use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use log::LevelFilter;
use wallgrab_engine::Engine;
use wallgrab_logging::{wg_error, wg_info, LogDestination, DEFAULT_LOG_FILE};

use crate::settings::{load_config, CONFIG_FILENAME};

/// One incremental run. The config path may be given as the first argument.
pub(crate) fn run() -> anyhow::Result<()> {
    wallgrab_logging::initialize(
        LogDestination::Both,
        LevelFilter::Info,
        &PathBuf::from(DEFAULT_LOG_FILE),
    );

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let config = load_config(&config_path)?;

    let engine = Engine::new(&config).context("failed to set up crawler")?;
    let summary = match engine.run_blocking() {
        Ok(summary) => summary,
        Err(err) => {
            wg_error!("Run aborted: {}", err);
            return Err(err).context("run aborted, watermark left unchanged");
        }
    };

    wg_info!(
        "Run finished: {} saved, {} failed, watermark {}",
        summary.downloads.saved.len(),
        summary.downloads.failures.len(),
        summary.new_watermark
    );
    println!("{summary}");

    if config.wait_for_enter {
        wait_for_enter()?;
    }
    Ok(())
}

fn wait_for_enter() -> io::Result<()> {
    print!("Press 'Enter' to exit...");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
