use chrono::{DateTime, Local};
use colored::*;
use log::{Level, Metadata, Record};
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};

static CONSOLE_LOGGER: Lazy<ConsoleLogger> = Lazy::new(ConsoleLogger::new);

pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    let filter = config.min_level.to_log_level_filter();
    CONSOLE_LOGGER.update_config(config);

    log::set_logger(&*CONSOLE_LOGGER).map_err(|e| format!("Failed to set logger: {:?}", e))?;
    log::set_max_level(filter);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    pub fn color(&self) -> Color {
        match self {
            LogLevel::Trace => Color::Cyan,
            LogLevel::Debug => Color::Blue,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            LogLevel::Trace => "🔍",
            LogLevel::Debug => "🐛",
            LogLevel::Info => "💡",
            LogLevel::Warn => "⚠️",
            LogLevel::Error => "❌",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    pub fn to_log_level(&self) -> Level {
        match self {
            LogLevel::Trace => Level::Trace,
            LogLevel::Debug => Level::Debug,
            LogLevel::Info => Level::Info,
            LogLevel::Warn => Level::Warn,
            LogLevel::Error => Level::Error,
        }
    }

    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        self.to_log_level().to_level_filter()
    }

    pub fn from_log_level(level: Level) -> Self {
        match level {
            Level::Trace => LogLevel::Trace,
            Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Info,
            Level::Warn => LogLevel::Warn,
            Level::Error => LogLevel::Error,
        }
    }

    /// Warnings and errors go to stderr so stdout stays clean for the report.
    pub fn is_diagnostic(&self) -> bool {
        *self >= LogLevel::Warn
    }
}

/// One formatted line's worth of a `log::Record`.
#[derive(Debug, Clone)]
pub struct LogLine {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
    pub module: String,
}

impl LogLine {
    fn from_record(record: &Record) -> Self {
        Self {
            timestamp: Local::now(),
            level: LogLevel::from_log_level(record.level()),
            message: record.args().to_string(),
            module: record.module_path().unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub show_colors: bool,
    pub show_emojis: bool,
    /// Debug runs also print the timestamp and emitting module.
    pub show_origin: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::cli()
    }
}

impl LoggerConfig {
    /// Operator-facing output: just the level badge and the message.
    pub fn cli() -> Self {
        Self {
            min_level: LogLevel::Info,
            show_colors: true,
            show_emojis: true,
            show_origin: false,
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self.show_origin = level <= LogLevel::Debug;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }
}

pub struct ConsoleLogger {
    config: Mutex<LoggerConfig>,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self {
            config: Mutex::new(LoggerConfig::default()),
        }
    }

    pub fn update_config(&self, new_config: LoggerConfig) {
        if let Ok(mut config) = self.config.lock() {
            *config = new_config;
        }
    }

    fn render(line: &LogLine, config: &LoggerConfig) -> String {
        let paint = |text: String, style: fn(ColoredString) -> ColoredString| {
            if config.show_colors {
                style(text.normal()).to_string()
            } else {
                text
            }
        };

        let badge = if config.show_emojis {
            format!("{} {}", line.level.emoji(), line.level.as_str())
        } else {
            line.level.as_str().to_string()
        };
        let level_color = line.level.color();
        let badge = if config.show_colors {
            badge.color(level_color).bold().to_string()
        } else {
            badge
        };

        let mut output = String::new();
        if config.show_origin {
            output.push_str(&paint(
                line.timestamp.format("%H:%M:%S%.3f").to_string(),
                |s| s.bright_black(),
            ));
            output.push(' ');
        }
        output.push_str(&format!("[{}] ", badge));
        if config.show_origin && !line.module.is_empty() {
            output.push_str(&paint(format!("{}: ", line.module), |s| s.bright_blue()));
        }

        if config.show_colors && line.level.is_diagnostic() {
            output.push_str(&line.message.color(level_color).to_string());
        } else {
            output.push_str(&line.message);
        }
        output
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match self.config.lock() {
            Ok(config) => metadata.level() <= config.min_level.to_log_level(),
            Err(_) => true,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = LogLine::from_record(record);
        if let Ok(config) = self.config.lock() {
            let text = Self::render(&line, &config);
            if line.level.is_diagnostic() {
                eprintln!("{}", text);
            } else {
                println!("{}", text);
            }
        }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }
}

/// Measures how long an operation took; logs on drop.
pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn new(name: &str) -> Self {
        log::debug!("⏱️  Starting timer: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log::debug!(
            "⏱️  Timer '{}' completed in {}ms",
            self.name,
            self.elapsed().as_millis()
        );
    }
}

pub fn timer(name: &str) -> Timer {
    Timer::new(name)
}

pub fn log_config_info(config: &crate::config::Config) {
    log::debug!("⚙️  Configuration loaded:");
    log::debug!("   Model: {}", config.huggingface.model_id());
    log::debug!("   Endpoint: {}", config.huggingface.base_url());
    log::debug!(
        "   API token in environment: {}",
        if config.huggingface.api_key.is_some() { "✅" } else { "❌" }
    );
    match &config.repo_root {
        Some(root) => log::debug!("   Repo root: {}", root.display()),
        None => log::debug!("   Repo root: <next to executable>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(level: LogLevel) -> LogLine {
        LogLine {
            timestamp: Local::now(),
            level,
            message: "hello".to_string(),
            module: "blog_image::pipeline".to_string(),
        }
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(LogLevel::Info.as_str(), "INFO");
        assert_eq!(LogLevel::Error.emoji(), "❌");
        assert_eq!(LogLevel::Debug.color(), Color::Blue);
        assert!(LogLevel::Warn.is_diagnostic());
        assert!(!LogLevel::Info.is_diagnostic());
        assert_eq!(LogLevel::Debug.to_log_level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_debug_level_shows_origin() {
        let config = LoggerConfig::cli();
        assert!(!config.show_origin);
        let config = config.with_level(LogLevel::Debug);
        assert!(config.show_origin);
        assert_eq!(config.min_level, LogLevel::Debug);
    }

    #[test]
    fn test_plain_render() {
        let config = LoggerConfig::cli().with_colors(false);
        assert_eq!(
            ConsoleLogger::render(&line(LogLevel::Warn), &config),
            "[⚠️ WARN] hello"
        );

        let config = config.with_level(LogLevel::Debug);
        let text = ConsoleLogger::render(&line(LogLevel::Info), &config);
        assert!(text.ends_with("[💡 INFO] blog_image::pipeline: hello"));
    }

    #[test]
    fn test_logger_initialization() {
        let config = LoggerConfig::cli().with_level(LogLevel::Debug);
        assert!(init_with_config(config).is_ok());
        assert!(log::log_enabled!(log::Level::Debug));
    }
}
