//! Failure reporting: stock callbacks and colored terminal rendering.
//!
//! The engine hands every failure message to a [`ReportFn`]; what happens
//! next is policy that lives here, not in the engine. `panicking` is the
//! usual choice inside `#[test]` functions, `sink` captures messages for
//! inspection, and `printing` writes them to stderr with colored diff
//! markers.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::engine::ReportFn;

/// A callback that panics with the failure message, which is how a failing
/// assertion reaches the Rust test framework.
pub fn panicking() -> ReportFn {
    Box::new(|message: &str| panic!("{}", message))
}

/// A callback that captures messages into the returned buffer. Used by this
/// crate's own tests to observe failures without failing.
pub fn sink() -> (ReportFn, Rc<RefCell<Vec<String>>>) {
    let captured = Rc::new(RefCell::new(Vec::new()));
    let writer = Rc::clone(&captured);
    let report: ReportFn = Box::new(move |message: &str| {
        writer.borrow_mut().push(message.to_string());
    });
    (report, captured)
}

/// A callback that prints the colored message to stderr and lets the test
/// continue.
pub fn printing() -> ReportFn {
    Box::new(|message: &str| print_failure(message))
}

/// Write a failure message with the diff markers colored: red for `- `
/// (got-only) lines, green for `+ ` (want-only) lines, bold red for the
/// `FAIL` header.
pub fn write_failure<W: WriteColor>(w: &mut W, message: &str) -> io::Result<()> {
    for line in message.lines() {
        if line.starts_with("FAIL") {
            w.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        } else if line.starts_with("- ") {
            w.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        } else if line.starts_with("+ ") {
            w.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        } else {
            w.reset()?;
        }
        writeln!(w, "{}", line)?;
    }
    w.reset()
}

/// Print a failure message to stderr, colored when stderr is a terminal.
pub fn print_failure(message: &str) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = write_failure(&mut stderr, message);
}
