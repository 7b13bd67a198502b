//! Logger setup for the alfie binary.
//!
//! Lines go to stderr as `[HH:MM:SS] LEVEL: message`, timed from logger
//! installation. Without `RUST_LOG`, alfie's own modules log at Info under
//! `-v` and at Warn otherwise, and dependencies stay at Warn. A set
//! `RUST_LOG` replaces those defaults entirely.

use log::LevelFilter;
use std::io::Write;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Install the stderr logger. Later calls are no-ops.
pub fn init_logger(verbose: bool) {
    let start = *START_TIME.get_or_init(Instant::now);

    let mut builder = env_logger::Builder::new();
    match std::env::var(env_logger::DEFAULT_FILTER_ENV) {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) => {
            builder
                .filter_level(LevelFilter::Warn)
                .filter_module("alfie", alfie_level(verbose));
        }
    }

    let installed = builder
        .format(move |buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                format_elapsed(start.elapsed()),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .try_init();
    if installed.is_err() {
        log::debug!("Logger already installed");
    }
}

fn alfie_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

/// `HH:MM:SS`; hours keep counting past 99.
fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
