//! Property-based tests for confprint.
//!
//! Uses proptest to verify formatting invariants over generated prefixes,
//! frames and text.

use proptest::prelude::*;

use confprint::cells::{strip_control_codes, visible_len, visible_len_uncached};
use confprint::color::Color;
use confprint::printer::{PrinterConfig, PrinterFactory};
use confprint::style::{Attributes, Style};
use confprint::terminal::ColorChoice;

// ============================================================================
// Custom Strategies
// ============================================================================

/// Generate a palette color.
fn color() -> impl Strategy<Value = Color> {
    (0usize..Color::ALL.len()).prop_map(|i| Color::ALL[i])
}

/// Generate random Attributes bitflags.
fn random_attributes() -> impl Strategy<Value = Attributes> {
    any::<u16>().prop_map(Attributes::from_bits_truncate)
}

/// Generate a random Style.
fn random_style() -> impl Strategy<Value = Style> {
    (
        prop::option::of(color()),
        prop::option::of(color()),
        random_attributes(),
    )
        .prop_map(|(fg, bg, attrs)| {
            let mut style = Style::new().attributes(attrs);
            style.color = fg;
            style.bgcolor = bg;
            style
        })
}

/// Single-line text without control characters.
fn line_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?]{1,40}"
}

/// Frame delimiters.
fn frame() -> impl Strategy<Value = String> {
    "[\\[\\](){}<>|]{0,2}"
}

fn config() -> impl Strategy<Value = PrinterConfig> {
    (
        "[a-z]{0,8}",
        frame(),
        frame(),
        "[:#\\-]{0,2}",
        0usize..4,
        any::<bool>(),
        random_style(),
        random_style(),
        any::<bool>(),
    )
        .prop_map(
            |(prefix, left, right, sep, ws, upper, text_style, prefix_style, format_frames)| {
                PrinterConfig::new(prefix)
                    .frames(left, right)
                    .separator(sep)
                    .whitespace(ws)
                    .upper(upper)
                    .text_style(text_style)
                    .prefix_style(prefix_style)
                    .format_frames(format_frames)
            },
        )
}

// ============================================================================
// Formatting properties
// ============================================================================

proptest! {
    /// Without a counter, formatting the same text twice gives the same lines.
    #[test]
    fn format_is_repeatable_without_counter(config in config(), text in line_text()) {
        let printer = PrinterFactory::isolated().make_printer(config);
        prop_assert_eq!(printer.format(&text).unwrap(), printer.format(&text).unwrap());
    }

    /// Text without line breaks always yields exactly one line.
    #[test]
    fn single_line_text_yields_one_line(config in config(), text in line_text()) {
        let printer = PrinterFactory::isolated().make_printer(config);
        prop_assert_eq!(printer.format(&text).unwrap().len(), 1);
    }

    /// Empty text yields only the framed prefix.
    #[test]
    fn empty_text_is_frame_only(config in config()) {
        let expected = format!(
            "{}{}{}",
            config.frame_left,
            if config.upper { config.prefix.as_str().to_uppercase() } else { config.prefix.as_str().to_string() },
            config.frame_right,
        );
        let printer = PrinterFactory::isolated().make_printer(config);
        let lines = printer.format("").unwrap();
        prop_assert_eq!(lines.len(), 1);
        prop_assert_eq!(strip_control_codes(&lines[0]), expected);
    }

    /// Continuation lines start at the column of the first line's text.
    #[test]
    fn continuation_indent_matches_lead(
        config in config(),
        parts in prop::collection::vec(line_text(), 2..5),
    ) {
        let text = parts.join("\n");
        let printer = PrinterFactory::isolated().make_printer(config);
        let lines = printer.format(&text).unwrap();
        prop_assert_eq!(lines.len(), parts.len());

        let lead = visible_len(&lines[0]) - visible_len(&parts[0]);
        for (line, part) in lines.iter().zip(&parts).skip(1) {
            let plain = strip_control_codes(line);
            prop_assert_eq!(&*plain, format!("{}{}", " ".repeat(lead), part));
        }
    }

    /// Styles never change the visible output.
    #[test]
    fn styles_are_invisible(config in config(), text in line_text()) {
        let styled = PrinterFactory::isolated().make_printer(config.clone());
        let plain = PrinterFactory::isolated().make_printer(config.color(ColorChoice::Never));
        let styled_lines: Vec<String> = styled
            .format(&text)
            .unwrap()
            .iter()
            .map(|l| strip_control_codes(l).into_owned())
            .collect();
        prop_assert_eq!(styled_lines, plain.format(&text).unwrap());
    }

    /// A local counter shows consecutive values.
    #[test]
    fn local_counter_is_consecutive(start in 0u64..1_000_000, calls in 1usize..10) {
        let printer = PrinterFactory::isolated()
            .make_printer(PrinterConfig::new("c").counter_start(start));
        for offset in 0..calls as u64 {
            let line = printer.format("").unwrap().remove(0);
            prop_assert_eq!(line, format!("[C:{}]", start + offset));
        }
    }
}

// ============================================================================
// Width properties
// ============================================================================

proptest! {
    /// Cached and uncached width measurement agree.
    #[test]
    fn visible_len_cache_consistent(text in "\\PC{0,30}") {
        prop_assert_eq!(visible_len(&text), visible_len_uncached(&text));
    }

    /// Wrapping in a style adds no visible width.
    #[test]
    fn style_wrap_has_no_width(style in random_style(), text in "\\PC{0,30}") {
        prop_assert_eq!(visible_len(&style.wrap().apply(&text)), visible_len(&text));
    }
}
