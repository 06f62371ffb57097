//! Shared helpers for the integration tests: assertion contexts wired to a
//! capturing reporter, so failing assertions can be inspected instead of
//! failing the suite.

use std::cell::RefCell;
use std::rc::Rc;

use attest::{report, Attest, CmpOption};

pub type Captured = Rc<RefCell<Vec<String>>>;

pub fn context(name: &str) -> (Attest, Captured) {
    let (reporter, captured) = report::sink();
    (Attest::new(name, reporter), captured)
}

#[allow(dead_code)]
pub fn context_with_options(name: &str, options: Vec<CmpOption>) -> (Attest, Captured) {
    let (reporter, captured) = report::sink();
    (Attest::with_options(name, options, reporter), captured)
}

/// Every failing assertion must hit the callback exactly once, and a
/// passing one not at all.
pub fn check_reported(captured: &Captured, messages: &[&str]) {
    assert_eq!(
        captured.borrow().as_slice(),
        messages,
        "report callback log mismatch"
    );
}
