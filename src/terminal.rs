//! Terminal detection.
//!
//! Decides whether a printer should emit style control sequences for a
//! given output stream, based on the configured [`ColorChoice`] and the
//! environment.

use std::io::IsTerminal;

/// Whether printers emit style control sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorChoice {
    /// Always emit styles.
    #[default]
    Always,
    /// Emit styles when the stream is a terminal and the environment allows it.
    Auto,
    /// Never emit styles.
    Never,
}

/// A standard output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdout,
    Stderr,
}

struct EnvSettings {
    no_color: Option<String>,
    force_color: Option<String>,
    term: Option<String>,
}

fn read_env_settings() -> EnvSettings {
    EnvSettings {
        no_color: std::env::var("NO_COLOR").ok(),
        force_color: std::env::var("FORCE_COLOR").ok(),
        term: std::env::var("TERM").ok(),
    }
}

/// Check if `stream` is connected to a terminal, honoring `FORCE_COLOR`.
#[must_use]
pub fn is_stream_terminal(stream: Stream) -> bool {
    force_color_forces_terminal(std::env::var("FORCE_COLOR").ok().as_deref()) || is_tty(stream)
}

fn is_tty(stream: Stream) -> bool {
    match stream {
        Stream::Stdout => std::io::stdout().is_terminal(),
        Stream::Stderr => std::io::stderr().is_terminal(),
    }
}

/// Decide whether styles are emitted on `stream` under `choice`.
///
/// `Auto` turns styles off when `NO_COLOR` is set, when `TERM` is `dumb`
/// or `unknown`, or when the output is not a terminal (unless
/// `FORCE_COLOR` says otherwise). `None` is an output that is never a
/// terminal, such as an in-memory buffer.
#[must_use]
pub fn styles_enabled(choice: ColorChoice, stream: Option<Stream>) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            let env = read_env_settings();
            auto_styles_with(&env, stream.is_some_and(is_tty))
        }
    }
}

fn auto_styles_with(env: &EnvSettings, is_tty: bool) -> bool {
    // https://no-color.org/
    if env
        .no_color
        .as_deref()
        .is_some_and(|value| !value.is_empty())
    {
        return false;
    }

    if force_color_forces_terminal(env.force_color.as_deref()) {
        return true;
    }

    let term = env
        .term
        .as_ref()
        .map(|value| value.trim().to_lowercase())
        .unwrap_or_default();
    if term == "dumb" || term == "unknown" {
        return false;
    }

    is_tty
}

fn force_color_forces_terminal(force_color: Option<&str>) -> bool {
    let Some(force_color) = force_color else {
        return false;
    };
    let force_color = force_color.trim();
    // Treat empty / "0" as "unset" (no override).
    !force_color.is_empty() && force_color != "0"
}
