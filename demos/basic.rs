//! Prefix printers in a small build script style program.

use confprint::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let info = prefix_printer("info");
    info.print("starting build")?;

    let step = make_printer(
        PrinterConfig::new("step")
            .counter_start(1)
            .prefix_fg("cyan")
            .prefix_font("bold")
            .color(ColorChoice::Auto),
    );
    step.print("fetch dependencies")?;
    step.print("compile\n  12 crates\n  3 warnings")?;
    step.print("link")?;

    let done = make_printer(
        PrinterConfig::new("done")
            .frames("(", ")")
            .prefix_fg("green")
            .color(ColorChoice::Auto),
    );
    done.print("")?;

    let warn = make_printer(
        PrinterConfig::new("warn")
            .stderr(true)
            .prefix_fg("yellow")
            .color(ColorChoice::Auto),
    );
    warn.print("3 warnings emitted")?;
    warn.print_as("hint", "run with --verbose for details")?;

    err_print("plain line on stderr")?;

    let bad = make_printer(PrinterConfig::new("bad").stderr(true).echo(true));
    if let Err(err) = bad.print("never shown") {
        info.print(&format!("expected failure: {err}"))?;
    }

    Ok(())
}
