//! In-app logger: keeps the most recent records for the side panel.
//!
//! The terminal is in raw mode on the alternate screen while the app runs,
//! so records cannot go to stderr. They are kept in a small ring buffer
//! instead and drawn by the view.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError, RwLock};

use log::{Level, LevelFilter, Log, Metadata, Record};

/// How many records are retained.
const CAPACITY: usize = 64;

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

/// The process-wide logger, created on first use.
pub fn get_logger() -> &'static AppLogger {
    LOGGER.get_or_init(|| AppLogger::new(LevelFilter::Info, CAPACITY))
}

/// Install the app logger as the `log` backend.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let logger = get_logger();
    logger.set_level(level);
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// A captured log record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

pub struct AppLogger {
    level: RwLock<LevelFilter>,
    capacity: usize,
    messages: Mutex<VecDeque<Message>>,
}

impl AppLogger {
    fn new(level: LevelFilter, capacity: usize) -> Self {
        Self {
            level: RwLock::new(level),
            capacity,
            messages: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn level(&self) -> LevelFilter {
        *self.level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_level(&self, level: LevelFilter) {
        *self.level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    fn messages(&self) -> MutexGuard<'_, VecDeque<Message>> {
        // A panic while holding the lock leaves the buffer usable.
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, message: Message) {
        let mut messages = self.messages();
        if messages.len() == self.capacity {
            messages.pop_front();
        }
        messages.push_back(message);
    }

    /// Up to `n` most recent messages, oldest first.
    pub fn recent(&self, n: usize) -> Vec<Message> {
        let messages = self.messages();
        let skip = messages.len().saturating_sub(n);
        messages.iter().skip(skip).cloned().collect()
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.push(Message {
                level: record.level(),
                text: record.args().to_string(),
            });
        }
    }

    fn flush(&self) {}
}
