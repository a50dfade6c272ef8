//! Verbosity-gated logger for the cardid tool
//!
//! Messages go to stdout, to an in-memory buffer, or both. Text output is
//! human-readable; JSON output writes one object per line.

use crate::Result;
use serde::Serialize;
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// Verbosity level for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub enum VerbosityLevel {
    /// Silent - no output at all
    Silent = 0,
    /// Minimal - only results and failures
    Minimal = 1,
    /// Normal - results plus summaries (default)
    #[default]
    Normal = 2,
    /// Verbose - every checked line and file
    Verbose = 3,
}

impl std::str::FromStr for VerbosityLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityLevel::Silent),
            "minimal" | "1" => Ok(VerbosityLevel::Minimal),
            "normal" | "2" => Ok(VerbosityLevel::Normal),
            "verbose" | "3" => Ok(VerbosityLevel::Verbose),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log entry
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Verbosity level of this log entry
    pub level: VerbosityLevel,
    /// Log message
    pub message: String,
    /// Optional category (e.g., "card_id", "check_failure")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Structured payload written instead of the entry in JSON mode
    #[serde(skip)]
    pub data: Option<serde_json::Value>,
}

impl LogEntry {
    /// Render this entry as a single JSON line
    pub fn to_json_line(&self) -> Result<String> {
        let rendered = match &self.data {
            Some(data) => serde_json::to_string(data)?,
            None => serde_json::to_string(self)?,
        };
        Ok(rendered)
    }
}

/// Guard type that provides read-only access to log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Logger with verbosity filtering and optional in-memory capture
pub struct Logger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl Logger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    /// Create a logger with specified verbosity
    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        Logger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    /// Set output mode (Stdout, Memory, or Both)
    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    /// Set output format (Text or JSON)
    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    /// Get access to captured log entries
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    /// Clear the log buffer
    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }

    /// Flush buffered logs to stdout, respecting verbosity and format settings
    ///
    /// This prints all buffered logs and then clears the buffer.
    pub fn flush_buffer(&mut self) -> Result<()> {
        for entry in self.log_buffer.borrow().iter() {
            if entry.level <= self.verbosity {
                self.write_stdout(entry)?;
            }
        }
        self.clear_logs();
        Ok(())
    }

    /// Log at Minimal level
    pub fn minimal(&self, message: &str) -> Result<()> {
        self.log(VerbosityLevel::Minimal, None, message, None)
    }

    /// Log at Normal level
    pub fn normal(&self, message: &str) -> Result<()> {
        self.log(VerbosityLevel::Normal, None, message, None)
    }

    /// Log at Verbose level
    pub fn verbose(&self, message: &str) -> Result<()> {
        self.log(VerbosityLevel::Verbose, None, message, None)
    }

    /// Log a categorized record with a structured payload
    ///
    /// Text output prints `message`; JSON output prints `data`. Fails with
    /// [`ReadoutError::SerializationError`] if `data` has no JSON form.
    ///
    /// [`ReadoutError::SerializationError`]: crate::ReadoutError::SerializationError
    pub fn record<T: Serialize>(
        &self,
        level: VerbosityLevel,
        category: &str,
        message: &str,
        data: &T,
    ) -> Result<()> {
        let data = serde_json::to_value(data)?;
        self.log(level, Some(category), message, Some(data))
    }

    fn log(
        &self,
        level: VerbosityLevel,
        category: Option<&str>,
        message: &str,
        data: Option<serde_json::Value>,
    ) -> Result<()> {
        let should_capture = matches!(self.output_mode, OutputMode::Memory | OutputMode::Both);
        let should_output = matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both)
            && level != VerbosityLevel::Silent
            && level <= self.verbosity;

        // Early exit if message won't be used
        if !should_capture && !should_output {
            return Ok(());
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            category: category.map(str::to_string),
            data,
        };

        if should_output {
            self.write_stdout(&entry)?;
        }

        if should_capture {
            self.log_buffer.borrow_mut().push(entry);
        }
        Ok(())
    }

    fn write_stdout(&self, entry: &LogEntry) -> Result<()> {
        match self.output_format {
            OutputFormat::Text if entry.level <= VerbosityLevel::Minimal => {
                println!("{}", entry.message)
            }
            OutputFormat::Text => println!("  {}", entry.message),
            OutputFormat::Json => println!("{}", entry.to_json_line()?),
        }
        Ok(())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("verbosity", &self.verbosity)
            .field("output_format", &self.output_format)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}
