//! fern logger for the gateway process.
//!
//! Every line is `[<rfc3339> - <LEVEL>] <message> [<file>:<line>]`. Colour is
//! applied to the level only, and only when writing to a terminal stream.

use crate::error::{Result as ServerErrorResult, ServerError};

use std::fmt::Arguments;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use error_location::ErrorLocation;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback, Output};
use log::{Record, info};

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    File(PathBuf),
    Stdout { colored: bool },
}

impl Sink {
    /// A log file wins over stdout; colour only applies to stdout.
    pub fn select(log_file: Option<PathBuf>, colored: bool) -> Self {
        match log_file {
            Some(path) => Sink::File(path),
            None => Sink::Stdout { colored },
        }
    }
}

/// Install the global logger.
///
/// `log_file` of `None` writes to stdout; `colored` is ignored for files.
#[track_caller]
pub fn initialize(
    log_level: gw_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let sink = Sink::select(log_file, colored);

    let (colors, output): (Option<ColoredLevelConfig>, Output) = match &sink {
        Sink::File(path) => (None, open_log_file(path)?.into()),
        Sink::Stdout { colored } => (
            colored.then(level_colors),
            std::io::stdout().into(),
        ),
    };

    Dispatch::new()
        .level(log_level.0)
        .format(move |out, message, record| write_line(out, message, record, colors.as_ref()))
        .chain(output)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    match sink {
        Sink::File(path) => info!("Logger initialized: level={}, file={}", *log_level, path.display()),
        Sink::Stdout { .. } => info!("Logger initialized: level={}, stdout", *log_level),
    }

    Ok(())
}

#[track_caller]
fn open_log_file(path: &Path) -> ServerErrorResult<std::fs::File> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ServerError::Io {
            path: path.to_path_buf(),
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })
}

fn level_colors() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red)
}

fn write_line(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    colors: Option<&ColoredLevelConfig>,
) {
    let date = humantime::format_rfc3339(SystemTime::now());
    let file = record.file().unwrap_or("unknown");
    let line = record.line().unwrap_or(0);

    match colors {
        Some(colors) => out.finish(format_args!(
            "[{date} - {}] {message} [{file}:{line}]",
            colors.color(record.level())
        )),
        None => out.finish(format_args!(
            "[{date} - {}] {message} [{file}:{line}]",
            record.level()
        )),
    }
}
