// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;

pub const DEFAULT_LOG_FILE_NAME: &str = "line_engine_log.txt";

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout or stderr,
/// 3. both.
///
/// Note that the line engine draws to `stdout` in raw mode, so logging to
/// [`DisplayPreference::Stdout`] while the engine runs will garble the line. Prefer a
/// file.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

/// The `String` is the path of the log file. Eg: `/tmp/momoko.log` or `momoko.log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    #[must_use]
    pub fn new_file(maybe_file_path: Option<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(
                maybe_file_path.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn new_display(display_preference: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(display_preference),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn new_file_and_display(
        maybe_file_path: Option<String>,
        display_preference: DisplayPreference,
    ) -> Self {
        Self {
            writer_config: WriterConfig::DisplayAndFile(
                display_preference,
                maybe_file_path.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}
