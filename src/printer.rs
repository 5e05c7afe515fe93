//! Prefix printers.
//!
//! A [`PrinterFactory`] turns a [`PrinterConfig`] into a [`Printer`]. Every
//! call to the printer formats one line (or one block of lines) behind a
//! framed prefix and writes it to the configured sink:
//!
//! ```text
//! [BUILD:3]: compiling
//!            linking
//! ```
//!
//! The factory is the context object that owns the shared counter registry
//! and the three sinks a printer can select.

use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::sync::Arc;

use crate::cells::visible_len;
use crate::color::Color;
use crate::counter::{CounterBinding, CounterRegistry};
use crate::error::PrintError;
use crate::sink::{EchoSink, Sink};
use crate::style::{Attributes, Style, StyleWrap};
use crate::terminal::{self, ColorChoice};

/// The label shown inside the frame.
///
/// Text prefixes can be uppercased; any other displayable value is shown
/// as formatted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// A string label.
    Text(String),
    /// The string form of a non-string value.
    Value(String),
}

impl Prefix {
    /// Build a prefix from any displayable value. It is never uppercased.
    #[must_use]
    pub fn value(value: impl fmt::Display) -> Self {
        Self::Value(value.to_string())
    }

    /// The label as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Value(s) => s,
        }
    }

    fn display(&self, upper: bool) -> Cow<'_, str> {
        match self {
            Self::Text(s) if upper => Cow::Owned(s.to_uppercase()),
            Self::Text(s) | Self::Value(s) => Cow::Borrowed(s),
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Prefix {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Prefix {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for Prefix {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

macro_rules! prefix_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Prefix {
                fn from(value: $ty) -> Self {
                    Self::value(value)
                }
            }
        )*
    };
}

prefix_from_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool);

/// Configuration captured by [`PrinterFactory::make_printer`].
///
/// Construct with [`PrinterConfig::new`] and adjust with the builder
/// methods; every field also stays public.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Label inside the frame.
    pub prefix: Prefix,
    /// Left frame delimiter.
    pub frame_left: String,
    /// Right frame delimiter.
    pub frame_right: String,
    /// Placed before the counter value and after the frame.
    pub separator: String,
    /// Uppercase text prefixes.
    pub upper: bool,
    /// Write to the error sink.
    pub stderr: bool,
    /// Write to the echo sink.
    pub echo: bool,
    /// First counter value; `None` prints no counter.
    pub counter_start: Option<u64>,
    /// Use the registry's shared counter instead of a private one.
    pub global_counter: bool,
    /// Spaces between the separator and the text.
    pub whitespace: usize,
    /// Style of the printed text.
    pub text_style: Style,
    /// Style of the prefix.
    pub prefix_style: Style,
    /// Style the frame delimiters along with the prefix.
    pub format_frames: bool,
    /// When style control sequences are emitted.
    pub color: ColorChoice,
}

impl PrinterConfig {
    /// Default configuration for `prefix`.
    pub fn new(prefix: impl Into<Prefix>) -> Self {
        Self {
            prefix: prefix.into(),
            frame_left: String::from("["),
            frame_right: String::from("]"),
            separator: String::from(":"),
            upper: true,
            stderr: false,
            echo: false,
            counter_start: None,
            global_counter: false,
            whitespace: 1,
            text_style: Style::new(),
            prefix_style: Style::new(),
            format_frames: true,
            color: ColorChoice::default(),
        }
    }

    /// Set both frame delimiters.
    #[must_use]
    pub fn frames(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.frame_left = left.into();
        self.frame_right = right.into();
        self
    }

    /// Set the left frame delimiter.
    #[must_use]
    pub fn frame_left(mut self, left: impl Into<String>) -> Self {
        self.frame_left = left.into();
        self
    }

    /// Set the right frame delimiter.
    #[must_use]
    pub fn frame_right(mut self, right: impl Into<String>) -> Self {
        self.frame_right = right.into();
        self
    }

    /// Set the separator.
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Enable/disable uppercasing of text prefixes.
    #[must_use]
    pub fn upper(mut self, upper: bool) -> Self {
        self.upper = upper;
        self
    }

    /// Select the error sink.
    #[must_use]
    pub fn stderr(mut self, stderr: bool) -> Self {
        self.stderr = stderr;
        self
    }

    /// Select the echo sink.
    #[must_use]
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Number lines starting at `start`.
    #[must_use]
    pub fn counter_start(mut self, start: u64) -> Self {
        self.counter_start = Some(start);
        self
    }

    /// Use the shared counter.
    #[must_use]
    pub fn global_counter(mut self, global: bool) -> Self {
        self.global_counter = global;
        self
    }

    /// Set the number of spaces after the separator.
    #[must_use]
    pub fn whitespace(mut self, count: usize) -> Self {
        self.whitespace = count;
        self
    }

    /// Enable/disable styling of the frame delimiters.
    #[must_use]
    pub fn format_frames(mut self, format_frames: bool) -> Self {
        self.format_frames = format_frames;
        self
    }

    /// Set when styles are emitted.
    #[must_use]
    pub fn color(mut self, choice: ColorChoice) -> Self {
        self.color = choice;
        self
    }

    /// Replace the text style.
    #[must_use]
    pub fn text_style(mut self, style: Style) -> Self {
        self.text_style = style;
        self
    }

    /// Replace the prefix style.
    #[must_use]
    pub fn prefix_style(mut self, style: Style) -> Self {
        self.prefix_style = style;
        self
    }

    /// Text foreground color by name. Unknown names clear the selection.
    #[must_use]
    pub fn text_fg(mut self, name: impl AsRef<str>) -> Self {
        self.text_style.color = color_by_name(name.as_ref());
        self
    }

    /// Text background color by name. Unknown names clear the selection.
    #[must_use]
    pub fn text_bg(mut self, name: impl AsRef<str>) -> Self {
        self.text_style.bgcolor = color_by_name(name.as_ref());
        self
    }

    /// Text font styles by name, e.g. `"bold"` or `"dim underline"`.
    #[must_use]
    pub fn text_font(mut self, names: impl AsRef<str>) -> Self {
        self.text_style.attributes = fonts_by_name(names.as_ref());
        self
    }

    /// Prefix foreground color by name. Unknown names clear the selection.
    #[must_use]
    pub fn prefix_fg(mut self, name: impl AsRef<str>) -> Self {
        self.prefix_style.color = color_by_name(name.as_ref());
        self
    }

    /// Prefix background color by name. Unknown names clear the selection.
    #[must_use]
    pub fn prefix_bg(mut self, name: impl AsRef<str>) -> Self {
        self.prefix_style.bgcolor = color_by_name(name.as_ref());
        self
    }

    /// Prefix font styles by name.
    #[must_use]
    pub fn prefix_font(mut self, names: impl AsRef<str>) -> Self {
        self.prefix_style.attributes = fonts_by_name(names.as_ref());
        self
    }
}

fn color_by_name(name: &str) -> Option<Color> {
    let color = Color::from_name(name);
    if color.is_none() {
        log::debug!("unknown color {name:?}, leaving unstyled");
    }
    color
}

fn fonts_by_name(names: &str) -> Attributes {
    let attributes = Attributes::from_names(names);
    if attributes.is_empty() && !names.trim().is_empty() {
        log::debug!("unknown font style {names:?}, leaving unstyled");
    }
    attributes
}

/// Builds printers that share a counter registry and a set of sinks.
#[derive(Debug, Clone)]
pub struct PrinterFactory {
    registry: Arc<CounterRegistry>,
    stdout: Sink,
    stderr: Sink,
    echo: Sink,
}

impl Default for PrinterFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PrinterFactory {
    /// Factory over the process-wide counter registry and the real
    /// standard streams.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(CounterRegistry::global())
    }

    /// Factory with a private counter registry.
    #[must_use]
    pub fn isolated() -> Self {
        Self::with_registry(Arc::new(CounterRegistry::new()))
    }

    /// Factory over `registry`.
    #[must_use]
    pub fn with_registry(registry: Arc<CounterRegistry>) -> Self {
        Self {
            registry,
            stdout: Sink::Stdout,
            stderr: Sink::Stderr,
            echo: Sink::custom(EchoSink::new()),
        }
    }

    /// Replace the standard output sink.
    #[must_use]
    pub fn with_stdout(mut self, sink: impl Into<Sink>) -> Self {
        self.stdout = sink.into();
        self
    }

    /// Replace the standard error sink.
    #[must_use]
    pub fn with_stderr(mut self, sink: impl Into<Sink>) -> Self {
        self.stderr = sink.into();
        self
    }

    /// Replace the echo sink.
    #[must_use]
    pub fn with_echo(mut self, sink: impl Into<Sink>) -> Self {
        self.echo = sink.into();
        self
    }

    /// The counter registry printers bind to in global mode.
    #[must_use]
    pub fn registry(&self) -> &Arc<CounterRegistry> {
        &self.registry
    }

    /// Build a printer for `config`.
    ///
    /// The sink and counter are resolved here. Selecting both the error
    /// and echo sinks is accepted; the printer fails when called.
    #[must_use]
    pub fn make_printer(&self, config: PrinterConfig) -> Printer {
        let sink = match (config.stderr, config.echo) {
            (true, true) => SinkBinding::Conflicting,
            (true, false) => SinkBinding::Resolved(self.stderr.clone()),
            (false, true) => SinkBinding::Resolved(self.echo.clone()),
            (false, false) => SinkBinding::Resolved(self.stdout.clone()),
        };
        let counter =
            CounterBinding::resolve(config.counter_start, config.global_counter, &self.registry);
        Printer {
            config,
            sink,
            counter,
        }
    }
}

/// Build a printer for `config` with the default factory.
#[must_use]
pub fn make_printer(config: PrinterConfig) -> Printer {
    PrinterFactory::new().make_printer(config)
}

/// Build a printer for `prefix` with default settings.
#[must_use]
pub fn prefix_printer(prefix: impl Into<Prefix>) -> Printer {
    make_printer(PrinterConfig::new(prefix))
}

#[derive(Debug)]
enum SinkBinding {
    Resolved(Sink),
    Conflicting,
}

/// A configured printer. See the [module docs](self).
#[derive(Debug)]
pub struct Printer {
    config: PrinterConfig,
    sink: SinkBinding,
    counter: CounterBinding,
}

impl Printer {
    /// The captured configuration.
    #[must_use]
    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    /// The value the next counted line will show, if a counter is bound.
    #[must_use]
    pub fn counter_value(&self) -> Option<u64> {
        self.counter.current()
    }

    /// Print `text` behind the prefix.
    ///
    /// An empty `text` prints the framed prefix alone. Text with line
    /// breaks prints one line per part, continuation lines indented to the
    /// column where the first line's text starts.
    ///
    /// # Errors
    ///
    /// `PrintError::ConflictingSink` if both the error and echo sinks were
    /// selected, `PrintError::Io` if the sink write fails.
    pub fn print(&self, text: &str) -> Result<(), PrintError> {
        self.emit(&self.config.prefix, text)
    }

    /// Print once with a different prefix, keeping everything else.
    ///
    /// # Errors
    ///
    /// Same as [`Printer::print`].
    pub fn print_as(&self, prefix: impl Into<Prefix>, text: &str) -> Result<(), PrintError> {
        self.emit(&prefix.into(), text)
    }

    /// Format `text` into lines without writing them.
    ///
    /// Advances the counter exactly like [`Printer::print`].
    ///
    /// # Errors
    ///
    /// `PrintError::ConflictingSink` if both the error and echo sinks were
    /// selected.
    pub fn format(&self, text: &str) -> Result<Vec<String>, PrintError> {
        let sink = self.sink()?;
        Ok(self.render(&self.config.prefix, text, sink))
    }

    /// Borrow the printer as a closure.
    pub fn as_fn(&self) -> impl Fn(&str) -> Result<(), PrintError> + '_ {
        move |text: &str| self.print(text)
    }

    fn sink(&self) -> Result<&Sink, PrintError> {
        match &self.sink {
            SinkBinding::Resolved(sink) => Ok(sink),
            SinkBinding::Conflicting => Err(PrintError::ConflictingSink),
        }
    }

    fn emit(&self, prefix: &Prefix, text: &str) -> Result<(), PrintError> {
        let sink = self.sink()?;
        let lines = self.render(prefix, text, sink);
        log::trace!("printing {} line(s) for prefix {prefix}", lines.len());
        for line in &lines {
            sink.write_line(line)?;
        }
        Ok(())
    }

    fn render(&self, prefix: &Prefix, text: &str, sink: &Sink) -> Vec<String> {
        let config = &self.config;
        let (text_wrap, prefix_wrap) = if terminal::styles_enabled(config.color, sink.stream()) {
            (config.text_style.wrap(), config.prefix_style.wrap())
        } else {
            (StyleWrap::default(), StyleWrap::default())
        };

        let label = prefix.display(config.upper);
        let label = if config.format_frames {
            label.into_owned()
        } else {
            prefix_wrap.apply(&label)
        };

        let mut framed = String::with_capacity(
            config.frame_left.len() + label.len() + config.frame_right.len() + 8,
        );
        framed.push_str(&config.frame_left);
        framed.push_str(&label);
        if let Some(count) = self.counter.next() {
            let _ = write!(framed, "{}{count}", config.separator);
        }
        framed.push_str(&config.frame_right);

        let framed = if config.format_frames {
            prefix_wrap.apply(&framed)
        } else {
            framed
        };

        if text.is_empty() {
            return vec![framed];
        }

        let lead = format!(
            "{framed}{}{}",
            config.separator,
            " ".repeat(config.whitespace)
        );

        if !text.contains('\n') {
            return vec![format!("{lead}{}", text_wrap.apply(text))];
        }

        let mut parts = text.split('\n');
        let first = parts.next().unwrap_or_default();
        let first_line = format!("{lead}{}", text_wrap.apply(first));
        let indent = " ".repeat(visible_len(&lead));

        std::iter::once(first_line)
            .chain(parts.map(|line| format!("{indent}{}", text_wrap.apply(line))))
            .collect()
    }
}
