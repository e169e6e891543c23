//! Logging infrastructure for imgsweep.
//!
//! Structured logging using the `log` facade and `env_logger` backend.
//! The effective level is determined by (in priority order):
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. The `-v/--verbosity` CLI value: 0 disables logging entirely,
//!    1 through 5 map to error, warn, info, debug and trace
//!
//! # Build-specific Formatting
//!
//! - **Debug builds**: timestamp, level, and module path
//! - **Release builds**: compact format with level and message only

use std::env;
use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Initialize the logging subsystem from the CLI verbosity value.
///
/// Should be called once at startup, before any logging calls are made.
/// Fatal errors are reported on stderr directly, so a verbosity of 0
/// silences progress output without hiding failures.
///
/// # Panics
///
/// Panics if called more than once, as `env_logger` can only be
/// initialized once per process.
pub fn init_logging(verbosity: u8) {
    let mut builder = Builder::new();

    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbosity));
    }

    configure_format(&mut builder);
    builder.init();

    log::debug!("logging initialized at level: {:?}", log::max_level());
}

/// Map the CLI verbosity value to a log level filter.
fn determine_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Configure the log format based on build type.
fn configure_format(builder: &mut Builder) {
    #[cfg(debug_assertions)]
    {
        builder.format(|buf, record| {
            let timestamp = buf.timestamp_seconds();
            let level = record.level();
            let level_style = buf.default_level_style(level);
            writeln!(
                buf,
                "{} {level_style}{:<5}{level_style:#} [{}] {}",
                timestamp,
                level,
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        });
    }

    #[cfg(not(debug_assertions))]
    {
        builder.format(|buf, record| {
            let level = record.level();
            let level_style = buf.default_level_style(level);
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {}",
                level,
                record.args()
            )
        });
    }
}
