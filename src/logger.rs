use chrono::{DateTime, Local};
use colored::*;
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;

use crate::error::{Result, TryOnError};

static CONSOLE_LOGGER: Lazy<ConsoleLogger> = Lazy::new(ConsoleLogger::new);

pub fn init() -> Result<()> {
    init_with_config(LoggerConfig::default())
}

pub fn init_with_config(config: LoggerConfig) -> Result<()> {
    let max_level = config.min_level;
    CONSOLE_LOGGER.update_config(config)?;

    log::set_logger(&*CONSOLE_LOGGER)
        .map_err(|e| TryOnError::Logger(format!("failed to set logger: {}", e)))?;

    log::set_max_level(max_level);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct LogLine {
    pub timestamp: DateTime<Local>,
    pub thread: String,
    pub target: String,
    pub level: String,
    pub message: String,
}

impl LogLine {
    fn from_record(record: &Record) -> Self {
        let current = std::thread::current();
        let thread = current
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{:?}", current.id()));

        Self {
            timestamp: Local::now(),
            thread,
            target: record.target().to_string(),
            level: record.level().to_string(),
            message: record.args().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LevelFilter,
    pub show_colors: bool,
    pub output_json: bool,
    pub timestamp_format: String,
    pub log_file_path: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LevelFilter::Info,
            show_colors: true,
            output_json: false,
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            log_file_path: None,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn with_json_output(mut self, enabled: bool) -> Self {
        self.output_json = enabled;
        self
    }

    pub fn with_file_output(mut self, path: impl Into<String>) -> Self {
        self.log_file_path = Some(path.into());
        self
    }

    pub fn development() -> Self {
        Self {
            min_level: LevelFilter::Debug,
            show_colors: true,
            ..Default::default()
        }
    }

    pub fn production() -> Self {
        Self {
            min_level: LevelFilter::Info,
            show_colors: false,
            output_json: true,
            ..Default::default()
        }
    }

    /// `LOG_LEVEL`, `LOG_FORMAT=json` and `LOG_FILE` override the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(level) = std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|raw| raw.parse::<LevelFilter>().ok())
        {
            config.min_level = level;
        }

        if std::env::var("LOG_FORMAT").map_or(false, |val| val.eq_ignore_ascii_case("json")) {
            config.output_json = true;
            config.show_colors = false;
        }

        if let Ok(path) = std::env::var("LOG_FILE") {
            config.log_file_path = Some(path);
        }

        config
    }
}

pub struct ConsoleLogger {
    config: Mutex<LoggerConfig>,
    log_file: Mutex<Option<File>>,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self {
            config: Mutex::new(LoggerConfig::default()),
            log_file: Mutex::new(None),
        }
    }

    pub fn update_config(&self, new_config: LoggerConfig) -> Result<()> {
        let file = match &new_config.log_file_path {
            Some(path) => Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| {
                        TryOnError::Logger(format!("cannot open log file {}: {}", path, e))
                    })?,
            ),
            None => None,
        };

        if let Ok(mut log_file) = self.log_file.lock() {
            *log_file = file;
        }
        if let Ok(mut config) = self.config.lock() {
            *config = new_config;
        }
        Ok(())
    }

    fn format_line(line: &LogLine, config: &LoggerConfig) -> String {
        if config.output_json {
            return serde_json::to_string(line).unwrap_or_default();
        }

        let timestamp = line.timestamp.format(&config.timestamp_format).to_string();
        let level = format!("{:<8}", line.level);

        if config.show_colors {
            format!(
                "{} {:<8} {:<16} {} {}",
                timestamp.bright_black(),
                line.thread,
                line.target.bright_blue(),
                level.color(level_color(&line.level)).bold(),
                line.message
            )
        } else {
            format!(
                "{} {:<8} {:<16} {} {}",
                timestamp, line.thread, line.target, level, line.message
            )
        }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

fn level_color(level: &str) -> Color {
    match level {
        "ERROR" => Color::Red,
        "WARN" => Color::Yellow,
        "INFO" => Color::Green,
        "DEBUG" => Color::Blue,
        _ => Color::Cyan,
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match self.config.lock() {
            Ok(config) => metadata.level() <= config.min_level,
            Err(_) => true,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = LogLine::from_record(record);
        let Ok(config) = self.config.lock() else {
            return;
        };

        let formatted = Self::format_line(&line, &config);
        if record.level() <= Level::Warn {
            eprintln!("{}", formatted);
        } else {
            println!("{}", formatted);
        }

        if let Ok(mut log_file) = self.log_file.lock() {
            if let Some(file) = log_file.as_mut() {
                let plain = Self::format_line(
                    &line,
                    &LoggerConfig {
                        show_colors: false,
                        ..config.clone()
                    },
                );
                let _ = writeln!(file, "{}", plain);
            }
        }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        if let Ok(mut log_file) = self.log_file.lock() {
            if let Some(file) = log_file.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

/// Logs the startup banner of the demo server.
pub fn log_startup_info(app_name: &str, version: &str, host: &str, port: u16) {
    log::info!("Starting {} v{}", app_name, version);
    log::info!("Demo UI will run on http://{}:{}", host, port);
}
