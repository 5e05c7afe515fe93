//! Logging through prefix printers.
//!
//! [`PrefixLogger`] implements [`log::Log`] by printing every record behind
//! its level name: `[WARN]: disk almost full (app::storage)`. Multi-line
//! messages are indented like any other printer output.
//!
//! Optional tracing integration is available via `PrefixTracingLayer` when
//! the `tracing` feature is enabled.

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::{OffsetDateTime, format_description::OwnedFormatItem};

use crate::color::Color;
use crate::error::PrintError;
use crate::printer::{Printer, PrinterConfig, PrinterFactory};
use crate::style::{Font, Style};
use crate::sync::lock_recover;
use crate::terminal::ColorChoice;

/// Prefix-printer logger for the `log` crate.
///
/// Records go to the factory's error sink by default. All internal state is
/// protected by mutexes with poison recovery, so the logger can be shared
/// between threads.
pub struct PrefixLogger {
    factory: PrinterFactory,
    level: LevelFilter,
    stderr: bool,
    show_time: bool,
    omit_repeated_times: bool,
    show_target: bool,
    color: ColorChoice,
    time_format: OwnedFormatItem,
    last_time: Mutex<Option<String>>,
}

impl PrefixLogger {
    /// Create a logger printing through `factory`.
    #[must_use]
    pub fn new(factory: PrinterFactory) -> Self {
        let time_format = time::format_description::parse_owned::<2>("[hour]:[minute]:[second]")
            .unwrap_or_else(|_| OwnedFormatItem::Literal(Vec::<u8>::new().into_boxed_slice()));
        Self {
            factory,
            level: LevelFilter::Info,
            stderr: true,
            show_time: true,
            omit_repeated_times: true,
            show_target: true,
            color: ColorChoice::Auto,
            time_format,
            last_time: Mutex::new(None),
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Print to the error sink (default) or the standard output sink.
    #[must_use]
    pub fn stderr(mut self, stderr: bool) -> Self {
        self.stderr = stderr;
        self
    }

    /// Enable or disable timestamps.
    #[must_use]
    pub fn show_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    /// Blank out a timestamp equal to the previous one.
    #[must_use]
    pub fn omit_repeated_times(mut self, omit: bool) -> Self {
        self.omit_repeated_times = omit;
        self
    }

    /// Append the record target in parentheses.
    #[must_use]
    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// Set when level styles are emitted.
    #[must_use]
    pub fn color(mut self, choice: ColorChoice) -> Self {
        self.color = choice;
        self
    }

    /// Override time format. Invalid descriptions keep the current format.
    #[must_use]
    pub fn time_format(mut self, format: &str) -> Self {
        if let Ok(parsed) = time::format_description::parse_owned::<2>(format) {
            self.time_format = parsed;
        }
        self
    }

    /// Install as the global logger.
    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level);
        log::set_boxed_logger(Box::new(self))
    }

    /// Format `record` into output lines without writing them.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the printer is built without conflicting
    /// sinks.
    pub fn format_record(&self, record: &Record<'_>) -> Result<Vec<String>, PrintError> {
        self.printer_for(record.level()).format(&self.message(record))
    }

    fn format_time(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        now.format(&self.time_format)
            .unwrap_or_else(|_| now.to_string())
    }

    fn level_style(level: Level) -> Style {
        match level {
            Level::Trace => Style::new().attributes(Font::Dim),
            Level::Debug => Style::new().color(Color::Blue),
            Level::Info => Style::new().color(Color::Green),
            Level::Warn => Style::new().color(Color::Yellow),
            Level::Error => Style::new().color(Color::Red).attributes(Font::Bold),
        }
    }

    fn printer_for(&self, level: Level) -> Printer {
        let config = PrinterConfig::new(level.as_str())
            .stderr(self.stderr)
            .prefix_style(Self::level_style(level))
            .color(self.color);
        self.factory.make_printer(config)
    }

    fn message(&self, record: &Record<'_>) -> String {
        let mut message = String::new();

        if self.show_time {
            let time_str = self.format_time();
            let display = if self.omit_repeated_times {
                let mut last = lock_recover(&self.last_time);
                if last.as_ref() == Some(&time_str) {
                    " ".repeat(time_str.len())
                } else {
                    *last = Some(time_str.clone());
                    time_str
                }
            } else {
                time_str
            };
            message.push_str(&display);
            message.push(' ');
        }

        message.push_str(&record.args().to_string());

        if self.show_target && !record.target().is_empty() {
            message.push_str(" (");
            message.push_str(record.target());
            message.push(')');
        }

        message
    }
}

impl Log for PrefixLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // A logger has nowhere to report its own write failures.
        let _ = self.printer_for(record.level()).print(&self.message(record));
    }

    fn flush(&self) {}
}

#[cfg(feature = "tracing")]
mod tracing_integration {
    use super::PrefixLogger;
    use crate::printer::PrinterFactory;
    use log::{Level, Log};
    use std::fmt::{Debug, Write as _};

    use tracing::field::{Field, Visit};
    use tracing::{Event, Level as TracingLevel, Subscriber};
    use tracing_subscriber::{Layer, layer::Context};

    /// Tracing layer that prints events like `PrefixLogger`.
    pub struct PrefixTracingLayer {
        logger: PrefixLogger,
    }

    impl PrefixTracingLayer {
        /// Create a tracing layer printing through `factory`.
        #[must_use]
        pub fn new(factory: PrinterFactory) -> Self {
            Self {
                logger: PrefixLogger::new(factory).level(log::LevelFilter::Trace),
            }
        }

        /// Use an existing logger configuration.
        #[must_use]
        pub fn with_logger(logger: PrefixLogger) -> Self {
            Self { logger }
        }

        /// Install as the global tracing subscriber.
        pub fn init(self) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
            use tracing_subscriber::prelude::*;

            let subscriber = tracing_subscriber::registry().with(self);
            tracing::subscriber::set_global_default(subscriber)
        }
    }

    /// Collects an event into printer text: the message, then `key=value`
    /// pairs for the remaining fields.
    #[derive(Default)]
    struct EventText {
        message: String,
        fields: String,
    }

    impl EventText {
        fn field_buffer(&mut self, field: &Field) -> &mut String {
            if field.name() == "message" {
                &mut self.message
            } else {
                if !self.fields.is_empty() {
                    self.fields.push(' ');
                }
                self.fields.push_str(field.name());
                self.fields.push('=');
                &mut self.fields
            }
        }

        fn finish(mut self) -> String {
            if self.message.is_empty() {
                return self.fields;
            }
            if !self.fields.is_empty() {
                self.message.push(' ');
                self.message.push_str(&self.fields);
            }
            self.message
        }
    }

    impl Visit for EventText {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.field_buffer(field).push_str(value);
        }

        fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
            let _ = write!(self.field_buffer(field), "{value:?}");
        }
    }

    /// `tracing` and `log` share level names.
    fn log_level(level: &TracingLevel) -> Level {
        level.as_str().parse().unwrap_or(Level::Trace)
    }

    impl<S> Layer<S> for PrefixTracingLayer
    where
        S: Subscriber,
    {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let metadata = event.metadata();
            let mut text = EventText::default();
            event.record(&mut text);
            let text = text.finish();

            self.logger.log(
                &log::Record::builder()
                    .args(format_args!("{text}"))
                    .level(log_level(metadata.level()))
                    .target(metadata.target())
                    .file(metadata.file())
                    .line(metadata.line())
                    .module_path(metadata.module_path())
                    .build(),
            );
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::sink::BufferSink;
        use tracing_subscriber::prelude::*;

        fn layer() -> (PrefixTracingLayer, BufferSink) {
            let buffer = BufferSink::new();
            let factory = PrinterFactory::isolated().with_stderr(buffer.clone());
            let logger = PrefixLogger::new(factory)
                .level(log::LevelFilter::Trace)
                .show_time(false)
                .show_target(false);
            (PrefixTracingLayer::with_logger(logger), buffer)
        }

        #[test]
        fn test_log_level_by_name() {
            assert_eq!(log_level(&TracingLevel::TRACE), Level::Trace);
            assert_eq!(log_level(&TracingLevel::DEBUG), Level::Debug);
            assert_eq!(log_level(&TracingLevel::INFO), Level::Info);
            assert_eq!(log_level(&TracingLevel::WARN), Level::Warn);
            assert_eq!(log_level(&TracingLevel::ERROR), Level::Error);
        }

        #[test]
        fn test_event_message_then_fields() {
            let (layer, buffer) = layer();
            let subscriber = tracing_subscriber::registry().with(layer);

            tracing::subscriber::with_default(subscriber, || {
                tracing::warn!(code = 7, user = "ann", "careful");
            });

            assert_eq!(buffer.lines(), vec!["[WARN]: careful code=7 user=ann"]);
        }

        #[test]
        fn test_event_fields_only() {
            let (layer, buffer) = layer();
            let subscriber = tracing_subscriber::registry().with(layer);

            tracing::subscriber::with_default(subscriber, || {
                tracing::info!(port = 8080);
            });

            assert_eq!(buffer.lines(), vec!["[INFO]: port=8080"]);
        }

        #[test]
        fn test_multiline_message_is_indented() {
            let (layer, buffer) = layer();
            let subscriber = tracing_subscriber::registry().with(layer);

            tracing::subscriber::with_default(subscriber, || {
                tracing::error!("first\nsecond");
            });

            assert_eq!(buffer.lines(), vec!["[ERROR]: first", "         second"]);
        }
    }
}

#[cfg(feature = "tracing")]
pub use tracing_integration::PrefixTracingLayer;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::BufferSink;

    fn logger() -> (PrefixLogger, BufferSink) {
        let buffer = BufferSink::new();
        let factory = PrinterFactory::isolated().with_stderr(buffer.clone());
        let logger = PrefixLogger::new(factory)
            .show_time(false)
            .color(ColorChoice::Never);
        (logger, buffer)
    }

    #[test]
    fn test_logger_defaults() {
        let logger = PrefixLogger::new(PrinterFactory::isolated());
        assert_eq!(logger.level, LevelFilter::Info);
        assert!(logger.stderr);
        assert!(logger.show_time);
        assert!(logger.omit_repeated_times);
        assert!(logger.show_target);
        assert_eq!(logger.color, ColorChoice::Auto);
    }

    #[test]
    fn test_log_enabled_info_level() {
        let (logger, _) = logger();

        let info_meta = log::Metadata::builder().level(Level::Info).build();
        let error_meta = log::Metadata::builder().level(Level::Error).build();
        let debug_meta = log::Metadata::builder().level(Level::Debug).build();

        assert!(logger.enabled(&info_meta));
        assert!(logger.enabled(&error_meta));
        assert!(!logger.enabled(&debug_meta));
    }

    #[test]
    fn test_log_writes_to_error_sink() {
        let (logger, buffer) = logger();
        logger.log(
            &log::Record::builder()
                .args(format_args!("disk almost full"))
                .level(Level::Warn)
                .target("app::storage")
                .build(),
        );
        assert_eq!(
            buffer.lines(),
            vec!["[WARN]: disk almost full (app::storage)"]
        );
    }

    #[test]
    fn test_log_filters_below_level() {
        let (logger, buffer) = logger();
        logger.log(
            &log::Record::builder()
                .args(format_args!("noise"))
                .level(Level::Trace)
                .build(),
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_log_to_stdout() {
        let out = BufferSink::new();
        let factory = PrinterFactory::isolated().with_stdout(out.clone());
        let logger = PrefixLogger::new(factory)
            .stderr(false)
            .show_time(false)
            .show_target(false)
            .color(ColorChoice::Never);
        logger.log(
            &log::Record::builder()
                .args(format_args!("ready"))
                .level(Level::Info)
                .build(),
        );
        assert_eq!(out.lines(), vec!["[INFO]: ready"]);
    }

    #[test]
    fn test_format_record_multiline_message() {
        let (logger, _) = logger();
        let logger = logger.show_target(false);
        let lines = logger
            .format_record(
                &log::Record::builder()
                    .args(format_args!("first\nsecond"))
                    .level(Level::Error)
                    .build(),
            )
            .unwrap();
        assert_eq!(lines, vec!["[ERROR]: first", "         second"]);
    }

    #[test]
    fn test_format_record_level_style() {
        let (logger, _) = logger();
        let logger = logger.color(ColorChoice::Always).show_target(false);
        let lines = logger
            .format_record(
                &log::Record::builder()
                    .args(format_args!("boom"))
                    .level(Level::Error)
                    .build(),
            )
            .unwrap();
        assert_eq!(lines, vec!["\x1b[31m\x1b[1m[ERROR]\x1b[39m\x1b[0m: boom"]);
    }

    #[test]
    fn test_format_record_with_time() {
        let (logger, _) = logger();
        let logger = logger
            .show_time(true)
            .omit_repeated_times(false)
            .time_format("[hour]:[minute]");
        let lines = logger
            .format_record(
                &log::Record::builder()
                    .args(format_args!("tick"))
                    .level(Level::Info)
                    .build(),
            )
            .unwrap();
        // "[INFO]: HH:MM tick"
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[INFO]: "));
        assert!(lines[0].ends_with(" tick"));
        assert_eq!(lines[0].len(), "[INFO]: HH:MM tick".len());
    }

    #[test]
    fn test_time_format_invalid_keeps_previous() {
        let (logger, _) = logger();
        let logger = logger
            .time_format("[hour]:[minute]")
            .time_format("[not a component");
        let time = logger.format_time();
        assert_eq!(time.len(), 5);
        assert_eq!(time.as_bytes()[2], b':');
        assert!(
            time.chars()
                .enumerate()
                .all(|(i, c)| i == 2 || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_logger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PrefixLogger>();
    }

    #[test]
    fn test_logger_flush_is_noop() {
        let (logger, _) = logger();
        logger.flush();
    }
}
