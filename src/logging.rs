//! File-based logging setup.
//!
//! The TUI owns the terminal, so log output goes to `gnosis-tui.log` in the
//! working directory. The level defaults to `info` and can be raised through
//! `GNOSIS_LOG` (e.g. `GNOSIS_LOG=debug`).

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

const LOG_FILE: &str = "gnosis-tui.log";

pub fn init() -> Result<()> {
    let level = match std::env::var("GNOSIS_LOG").ok().as_deref() {
        Some("trace") => LevelFilter::Trace,
        Some("debug") => LevelFilter::Debug,
        Some("warn") => LevelFilter::Warn,
        Some("error") => LevelFilter::Error,
        Some("off") => LevelFilter::Off,
        _ => LevelFilter::Info,
    };

    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}",
        )))
        .build(LOG_FILE)
        .context("failed to open log file")?;

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(Root::builder().appender("file").build(level))
        .context("invalid logging configuration")?;

    log4rs::init_config(config).context("failed to initialize logging")?;
    Ok(())
}
