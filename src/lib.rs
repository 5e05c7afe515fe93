//! # confprint
//!
//! Prefix printers for terminal output.
//!
//! A printer is configured once and then called with text. Every line it
//! writes carries a framed, optionally colored and counted prefix:
//!
//! ```text
//! [BUILD]: compiling
//! [TEST:0]: first case
//! [TEST:1]: second case
//!           with a second line
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use confprint::prelude::*;
//!
//! let warn = make_printer(PrinterConfig::new("warn").prefix_fg("yellow").stderr(true));
//! warn.print("disk almost full").unwrap();
//!
//! let step = make_printer(PrinterConfig::new("step").counter_start(1));
//! step.print("fetch").unwrap();
//! step.print("build").unwrap();
//! ```
//!
//! ## Core Concepts
//!
//! - **PrinterConfig**: Prefix, frames, separator, styles, sink and counter options
//! - **PrinterFactory**: Builds printers over a counter registry and a set of sinks
//! - **Printer**: Formats and writes prefixed lines
//! - **Style**: Foreground, background and font attributes as SGR sequences
//! - **Sink**: Where lines go (stdout, stderr, echo, or any `LineSink`)

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cells;
pub mod color;
pub mod counter;
pub mod error;
pub mod logging;
pub mod printer;
pub mod sink;
pub mod style;
pub mod sync;
pub mod terminal;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::counter::CounterRegistry;
    pub use crate::error::PrintError;
    pub use crate::printer::{
        Prefix, Printer, PrinterConfig, PrinterFactory, make_printer, prefix_printer,
    };
    pub use crate::sink::{BufferSink, LineSink, Sink, err_print};
    pub use crate::style::{Attributes, Font, Style};
    pub use crate::terminal::ColorChoice;
}

// Re-export key types at crate root
pub use color::Color;
pub use counter::CounterRegistry;
pub use error::PrintError;
pub use logging::PrefixLogger;
pub use printer::{Prefix, Printer, PrinterConfig, PrinterFactory, make_printer, prefix_printer};
pub use sink::{BufferSink, LineSink, Sink, err_print};
pub use style::{Attributes, Font, Style};
pub use terminal::ColorChoice;

#[cfg(feature = "tracing")]
pub use logging::PrefixTracingLayer;
