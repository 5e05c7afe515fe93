//! Output sinks.
//!
//! A sink receives the finished lines of a printer, one call per line.
//! [`Sink`] is the selection a printer resolves once at construction:
//! standard output, standard error, or any [`LineSink`] implementation.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::cells::strip_control_codes;
use crate::sync::lock_recover;
use crate::terminal::{self, Stream};

/// Destination for formatted lines.
pub trait LineSink: Send + Sync + fmt::Debug {
    /// Write one line. The sink supplies the line terminator.
    fn write_line(&self, line: &str) -> io::Result<()>;

    /// The standard stream behind this sink, if any.
    ///
    /// Used by `ColorChoice::Auto` to check for a terminal.
    fn stream(&self) -> Option<Stream> {
        None
    }
}

/// Sink selection for a printer.
#[derive(Debug, Clone)]
pub enum Sink {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
    /// A caller-provided sink.
    Custom(Arc<dyn LineSink>),
}

impl Sink {
    /// Wrap a [`LineSink`].
    pub fn custom(sink: impl LineSink + 'static) -> Self {
        Self::Custom(Arc::new(sink))
    }

    /// Write one line to the selected destination.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        match self {
            Self::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{line}")
            }
            Self::Stderr => {
                let mut err = io::stderr().lock();
                writeln!(err, "{line}")
            }
            Self::Custom(sink) => sink.write_line(line),
        }
    }

    /// The standard stream behind this sink, if any.
    #[must_use]
    pub fn stream(&self) -> Option<Stream> {
        match self {
            Self::Stdout => Some(Stream::Stdout),
            Self::Stderr => Some(Stream::Stderr),
            Self::Custom(sink) => sink.stream(),
        }
    }
}

impl<S: LineSink + 'static> From<S> for Sink {
    fn from(sink: S) -> Self {
        Self::custom(sink)
    }
}

/// Echo-style sink, in the manner of a CLI framework's `echo` helper.
///
/// Each line is flushed immediately. Control sequences are stripped when the
/// stream is not a terminal, so piped output stays plain.
#[derive(Debug, Clone, Copy)]
pub struct EchoSink {
    stream: Stream,
}

impl EchoSink {
    /// Echo to standard output.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }

    /// Echo to standard error.
    #[must_use]
    pub const fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }
}

impl Default for EchoSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSink for EchoSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let line = if terminal::is_stream_terminal(self.stream) {
            std::borrow::Cow::Borrowed(line)
        } else {
            strip_control_codes(line)
        };
        match self.stream {
            Stream::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{line}")?;
                out.flush()
            }
            Stream::Stderr => {
                let mut err = io::stderr().lock();
                writeln!(err, "{line}")?;
                err.flush()
            }
        }
    }

    fn stream(&self) -> Option<Stream> {
        Some(self.stream)
    }
}

/// In-memory sink collecting lines.
///
/// Clones share the same buffer, so one handle can be given to a printer
/// while another reads the captured output.
///
/// ```
/// use confprint::sink::BufferSink;
///
/// let buffer = BufferSink::new();
/// let printer = confprint::PrinterFactory::isolated()
///     .with_stdout(buffer.clone())
///     .make_printer(confprint::PrinterConfig::new("done").frames("(", ")"));
/// printer.print("").unwrap();
/// assert_eq!(buffer.contents(), "(DONE)\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl BufferSink {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured lines, without terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        lock_recover(&self.lines).clone()
    }

    /// Captured output as written to a stream: every line plus `\n`.
    #[must_use]
    pub fn contents(&self) -> String {
        lock_recover(&self.lines)
            .iter()
            .map(|line| format!("{line}\n"))
            .collect()
    }

    /// Remove and return the captured lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *lock_recover(&self.lines))
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock_recover(&self.lines).is_empty()
    }
}

impl LineSink for BufferSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        lock_recover(&self.lines).push(line.to_string());
        Ok(())
    }
}

/// Sink over any [`Write`] implementation.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write + Send> fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink").finish_non_exhaustive()
    }
}

impl<W: Write + Send> LineSink for WriterSink<W> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = lock_recover(&self.writer);
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")
    }
}

/// Sink calling a closure for every line.
pub struct FnSink<F> {
    func: F,
}

impl<F> FnSink<F>
where
    F: Fn(&str) -> io::Result<()> + Send + Sync,
{
    /// Wrap `func`.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSink").finish_non_exhaustive()
    }
}

impl<F> LineSink for FnSink<F>
where
    F: Fn(&str) -> io::Result<()> + Send + Sync,
{
    fn write_line(&self, line: &str) -> io::Result<()> {
        (self.func)(line)
    }
}

/// Print a plain line to standard error.
pub fn err_print(text: &str) -> io::Result<()> {
    Sink::Stderr.write_line(text)
}
