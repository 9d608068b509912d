use std::path::Path;
use anyhow::Result;
use rusqlite::Connection;
use depval::ValidationOptions;
use crate::formatters::{OutputFormat, Formatter};
use crate::formatters::text::TextFormatter;
use crate::formatters::json::JsonFormatter;
use crate::formatters::table::TableFormatter;
use crate::utils::error::CliError;

/// CLI execution context
pub struct Context {
    /// Verbosity level
    verbosity: u8,

    /// Current formatter
    formatter: Box<dyn Formatter>,

    /// Probe options shared by all commands
    options: ValidationOptions,
}

impl Context {
    /// Create a new context
    pub fn new(verbosity: u8, format: OutputFormat, colored: bool) -> Self {
        let formatter: Box<dyn Formatter> = match (format, colored) {
            (OutputFormat::Text, true) => Box::new(TextFormatter::new()),
            (OutputFormat::Text, false) => Box::new(TextFormatter::without_colors()),
            (OutputFormat::Json, _) => Box::new(JsonFormatter::new()),
            (OutputFormat::Table, true) => Box::new(TableFormatter::new()),
            (OutputFormat::Table, false) => Box::new(TableFormatter::without_colors()),
        };

        Context {
            verbosity,
            formatter,
            options: ValidationOptions::default(),
        }
    }

    /// Get the current formatter
    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    /// Get the verbosity level
    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    /// Get the probe options
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Set the probe options
    pub fn set_options(&mut self, options: ValidationOptions) {
        self.options = options;
    }

    /// Open the SQLite database to validate against
    pub fn open_database(&self, path: &Path) -> Result<Connection> {
        if !path.is_file() {
            return Err(CliError::DatabaseNotFound(path.display().to_string()).into());
        }
        Ok(depval::sql::sqlite::open_read_only(path)?)
    }
}
