use std::collections::VecDeque;

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

pub const MAX_ENTRIES: usize = 100;

#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    pub level: Level,
    #[serde(default)]
    pub target: String,
    pub message: String,
}

/// Add `entry` as the newest entry and drop the oldest ones beyond [`MAX_ENTRIES`].
pub fn push_entry(entries: &mut VecDeque<Entry>, entry: Entry) {
    entries.push_front(entry);
    entries.truncate(MAX_ENTRIES);
}

/// Install a logger writing records up to `level` to `repository`.
///
/// # Errors
///
/// Returns an error if a logger has already been installed.
pub fn init<R: Repository>(repository: R, level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(Logger::new(repository, level)))
        .map(|()| log::set_max_level(level))
}

pub struct Logger<R> {
    repository: R,
    level: LevelFilter,
}

impl<R: Repository> Logger<R> {
    pub fn new(repository: R, level: LevelFilter) -> Self {
        Self { repository, level }
    }
}

impl<R: Repository> log::Log for Logger<R> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();

        console(record.level(), &message);

        // A failing log store must not produce further log records.
        let _ = self.repository.write_entry(Entry {
            time: Local::now().format("%b %d %H:%M:%S").to_string(),
            level: record.level(),
            target: record.target().to_string(),
            message,
        });
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn console(level: Level, message: &str) {
    match level {
        Level::Error => gloo_console::error!(message),
        Level::Warn => gloo_console::warn!(message),
        Level::Info => gloo_console::info!(message),
        Level::Debug | Level::Trace => gloo_console::debug!(message),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn console(_: Level, _: &str) {}
