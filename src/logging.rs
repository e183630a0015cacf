//! Model logging: every message is kept in a shared buffer for inspection
//! and report export, and forwarded to `tracing`.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Success,
    Warning,
    Fatal,
    Debug,
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Success => "SUCCESS",
            LogLevel::Warning => "WARNING",
            LogLevel::Fatal => "FATAL",
            LogLevel::Debug => "DEBUG",
            LogLevel::Verbose => "VERBOSE",
        };
        f.pad(name)
    }
}

/// A single recorded log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessage {
    pub level: LogLevel,
    pub source: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:>10} {}: {}",
            self.timestamp.to_rfc3339(),
            self.level,
            self.source,
            self.message
        )
    }
}

/// Logging sink owned by each model.
///
/// Clones share the same buffer, so a parser or service can log into the
/// model that owns it under its own `source`. The buffer holds at most
/// [`Logger::MAX_BUFFERED`] messages; once full, the oldest half is dropped.
/// Every message still reaches `tracing`.
#[derive(Debug, Clone)]
pub struct Logger {
    source: String,
    buffer: Arc<Mutex<Vec<LogMessage>>>,
}

impl Logger {
    pub const MAX_BUFFERED: usize = 10_000;

    pub fn new(source: impl Into<String>) -> Self {
        Logger {
            source: source.into(),
            buffer: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A logger writing into a buffer shared with other models, e.g. one
    /// report covering the whole catalog.
    pub fn with_buffer(source: impl Into<String>, buffer: Arc<Mutex<Vec<LogMessage>>>) -> Self {
        Logger {
            source: source.into(),
            buffer,
        }
    }

    /// A logger writing into the same buffer under a different source.
    pub fn scoped(&self, source: impl Into<String>) -> Self {
        Logger {
            source: source.into(),
            buffer: Arc::clone(&self.buffer),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn success(&self, message: impl Into<String>) {
        self.log(LogLevel::Success, message.into());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message.into());
    }

    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message.into());
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message.into());
    }

    pub fn verbose(&self, message: impl Into<String>) {
        self.log(LogLevel::Verbose, message.into());
    }

    pub fn log(&self, level: LogLevel, message: String) {
        match level {
            LogLevel::Success => tracing::info!(source = %self.source, "{}", message),
            LogLevel::Warning => tracing::warn!(source = %self.source, "{}", message),
            LogLevel::Fatal => tracing::error!(source = %self.source, "{}", message),
            LogLevel::Debug => tracing::debug!(source = %self.source, "{}", message),
            LogLevel::Verbose => tracing::trace!(source = %self.source, "{}", message),
        }

        let mut buffer = self.lock_buffer();
        if buffer.len() >= Self::MAX_BUFFERED {
            buffer.drain(..Self::MAX_BUFFERED / 2);
        }
        buffer.push(LogMessage {
            level,
            source: self.source.clone(),
            message,
            timestamp: Utc::now(),
        });
    }

    /// All recorded messages, oldest first.
    pub fn messages(&self) -> Vec<LogMessage> {
        self.lock_buffer().clone()
    }

    pub fn filter(&self, level: LogLevel) -> Vec<LogMessage> {
        self.lock_buffer()
            .iter()
            .filter(|m| m.level == level)
            .cloned()
            .collect()
    }

    /// Messages at `level` whose text contains `query`.
    pub fn filter_containing(&self, level: LogLevel, query: &str) -> Vec<LogMessage> {
        self.lock_buffer()
            .iter()
            .filter(|m| m.level == level && m.message.contains(query))
            .cloned()
            .collect()
    }

    pub fn warnings(&self) -> Vec<LogMessage> {
        self.filter(LogLevel::Warning)
    }

    pub fn warnings_containing(&self, query: &str) -> Vec<LogMessage> {
        self.filter_containing(LogLevel::Warning, query)
    }

    pub fn fatals(&self) -> Vec<LogMessage> {
        self.filter(LogLevel::Fatal)
    }

    pub fn verbose_containing(&self, query: &str) -> Vec<LogMessage> {
        self.filter_containing(LogLevel::Verbose, query)
    }

    pub fn clear(&self) {
        self.lock_buffer().clear();
    }

    /// Take every recorded message, leaving the buffer empty.
    pub fn drain(&self) -> Vec<LogMessage> {
        std::mem::take(&mut *self.lock_buffer())
    }

    /// Write every recorded message to `path`, one per line.
    pub fn save_report(&self, path: &Path) -> io::Result<()> {
        let mut report = String::new();
        for message in self.lock_buffer().iter() {
            report.push_str(&message.to_string());
            report.push('\n');
        }
        fs::write(path, report)
    }

    fn lock_buffer(&self) -> MutexGuard<'_, Vec<LogMessage>> {
        // A panic while pushing a message leaves the buffer usable.
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
