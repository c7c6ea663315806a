//! Callbacks the host hands to the orchestrators
//!
//! A `LogSink` is the build log a user reads; a `FailureSignal` tells the host
//! to mark the surrounding execution as failed. Both are called from the
//! orchestrators only, never from the registry client.

use std::io::Write;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};
use std::sync::Mutex;

/// Plain-text build log
pub trait LogSink: Send + Sync {
    fn info(&self, line: &str);

    fn fatal(&self, line: &str);
}

/// Marks the host execution as failed
pub trait FailureSignal: Send + Sync {
    fn signal_failure(&self, message: &str);
}

/// The build log and failure signal of one host execution
#[derive(Clone, Copy)]
pub struct HostCallbacks<'a> {
    pub sink: &'a dyn LogSink,
    pub failure: &'a dyn FailureSignal,
}

impl<'a> HostCallbacks<'a> {
    pub fn new(sink: &'a dyn LogSink, failure: &'a dyn FailureSignal) -> Self {
        Self { sink, failure }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    Info(String),
    Fatal(String),
}

impl LogLine {
    pub fn text(&self) -> &str {
        match self {
            LogLine::Info(text) | LogLine::Fatal(text) => text,
        }
    }
}

/// Writes to stdout; fatal lines carry a `FATAL:` prefix
#[derive(Debug, Default)]
pub struct ConsoleLogSink;

impl LogSink for ConsoleLogSink {
    fn info(&self, line: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }

    fn fatal(&self, line: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "FATAL: {line}");
    }
}

/// Keeps every line in memory
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    lines: Mutex<Vec<LogLine>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<LogLine> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.text().contains(needle))
    }

    pub fn fatal_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|line| match line {
                LogLine::Fatal(text) => Some(text),
                LogLine::Info(_) => None,
            })
            .collect()
    }

    fn push(&self, line: LogLine) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line);
    }
}

impl LogSink for MemoryLogSink {
    fn info(&self, line: &str) {
        self.push(LogLine::Info(line.to_string()));
    }

    fn fatal(&self, line: &str) {
        self.push(LogLine::Fatal(line.to_string()));
    }
}

#[derive(Debug, Default)]
pub struct NoOpFailureSignal;

impl FailureSignal for NoOpFailureSignal {
    fn signal_failure(&self, _message: &str) {}
}

/// Records failure signals so the host can read them back, e.g. to choose an
/// exit status
#[derive(Debug, Default)]
pub struct FailureFlag {
    count: AtomicUsize,
    last_message: Mutex<Option<String>>,
}

impl FailureFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_failed(&self) -> bool {
        self.count() > 0
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn last_message(&self) -> Option<String> {
        self.last_message
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl FailureSignal for FailureFlag {
    fn signal_failure(&self, message: &str) {
        self.count.fetch_add(1, Ordering::SeqCst);
        *self
            .last_message
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(message.to_string());
    }
}
