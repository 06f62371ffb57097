//! The assertion engine.
//!
//! [`Attest`] wraps a test's name, a fixed comparison-option list, an
//! equality oracle, and a report-failure callback, and exposes exactly two
//! assertion methods: [`same`](Attest::same) and [`differ`](Attest::differ).
//! On failure both compose a readable message, hand it to the callback once,
//! and return it; on success both return an empty string and touch nothing.
//!
//! The engine never aborts the process. Whether a failing assertion halts
//! the test is the callback's policy: [`report::panicking`](crate::report::panicking)
//! integrates with the Rust test framework by panicking, while
//! [`report::sink`](crate::report::sink) just records the message.
//!
//! # Examples
//!
//! ```rust
//! use attest::{report, Attest};
//!
//! let be = Attest::new("doc", report::panicking());
//! be.same(2, 2, &[]);
//! be.differ("left", "right", &[]);
//! ```

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::compare::{Oracle, Structural};
use crate::error::CompareFault;
use crate::options::CmpOption;
use crate::value::Value;

/// The report-failure callback. Invoked exactly once per failing assertion
/// with the composed message; its return is ignored and its abort policy is
/// its own.
pub type ReportFn = Box<dyn Fn(&str)>;

/// A per-test assertion context. Create one per test; it is immutable after
/// construction and not meant to be shared across threads.
pub struct Attest {
    name: String,
    options: Vec<CmpOption>,
    oracle: Box<dyn Oracle>,
    report: ReportFn,
}

impl Attest {
    /// Context with the default option set: caller options are empty, and
    /// `EquateErrors` + `MatchAnyError` are always present.
    pub fn new(name: impl Into<String>, report: ReportFn) -> Self {
        Self::with_options(name, Vec::new(), report)
    }

    /// Context with caller-supplied options. `EquateErrors` and
    /// `MatchAnyError` are appended after them.
    pub fn with_options(
        name: impl Into<String>,
        mut options: Vec<CmpOption>,
        report: ReportFn,
    ) -> Self {
        options.push(CmpOption::EquateErrors);
        options.push(CmpOption::MatchAnyError);
        Attest {
            name: name.into(),
            options,
            oracle: Box::new(Structural),
            report,
        }
    }

    /// Swap in a different equality oracle.
    pub fn with_oracle(mut self, oracle: Box<dyn Oracle>) -> Self {
        self.oracle = oracle;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &[CmpOption] {
        &self.options
    }

    /// Fails unless `got` equals `want`. The failure message is returned;
    /// it is empty on success.
    pub fn same(
        &self,
        got: impl Into<Value>,
        want: impl Into<Value>,
        notes: &[&str],
    ) -> String {
        let (got, want) = (got.into(), want.into());
        let explanation = self.eq_explanation(&got, &want);
        self.fail_if_diff(explanation, notes)
    }

    /// Fails if `got` equals `dontwant`. The failure message is returned;
    /// it is empty on success.
    pub fn differ(
        &self,
        got: impl Into<Value>,
        dontwant: impl Into<Value>,
        notes: &[&str],
    ) -> String {
        let (got, dontwant) = (got.into(), dontwant.into());
        let explanation = self.ne_explanation(&got, &dontwant);
        self.fail_if_diff(explanation, notes)
    }

    /// Non-empty explanation when `got` is not the same as `want`, or when
    /// the comparison could not complete.
    fn eq_explanation(&self, got: &Value, want: &Value) -> String {
        match self.compare(got, want) {
            Err(fault) => format!("error: {fault}"),
            Ok(true) => String::new(),
            Ok(false) => {
                if want.is_nil() {
                    format!("got {}, wanted nil", got.typed_repr())
                } else if got.is_nil() {
                    format!("got nil, wanted {}", want.typed_repr())
                } else {
                    self.oracle.diff(got, want, &self.options)
                }
            }
        }
    }

    /// Non-empty explanation when `got` is the same as `dontwant`, or when
    /// the comparison could not complete.
    fn ne_explanation(&self, got: &Value, dontwant: &Value) -> String {
        match self.compare(got, dontwant) {
            Err(fault) => format!("error: {fault}"),
            Ok(false) => String::new(),
            Ok(true) => {
                if got.is_nil() {
                    "got nil, wanted non-nil".to_string()
                } else {
                    format!("got {}, wanted anything else", got.typed_repr())
                }
            }
        }
    }

    /// The single fault-catching boundary around the oracle call. A panic
    /// from the oracle becomes a `CompareFault` instead of killing the test
    /// process.
    fn compare(&self, a: &Value, b: &Value) -> Result<bool, CompareFault> {
        match catch_unwind(AssertUnwindSafe(|| {
            self.oracle.equal(a, b, &self.options)
        })) {
            Ok(outcome) => outcome,
            Err(payload) => Err(CompareFault::Panicked(panic_text(payload))),
        }
    }

    /// Composes the full message when the explanation is non-empty, hands
    /// it to the report callback, and returns it.
    fn fail_if_diff(&self, explanation: String, notes: &[&str]) -> String {
        if explanation.is_empty() {
            return explanation;
        }
        let mut message = format!("FAIL in {}\n", self.name);
        if !notes.is_empty() {
            message.push_str(&notes.join(" "));
            message.push('\n');
        }
        message.push_str(&explanation);
        (self.report)(&message);
        message
    }
}

fn panic_text(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report;
    use crate::value::Record;

    #[test]
    fn success_returns_empty_and_skips_callback() {
        let (reporter, captured) = report::sink();
        let be = Attest::new("tn", reporter);
        assert_eq!(be.same(42, 42, &["note"]), "");
        assert_eq!(be.differ(1, 2, &["note"]), "");
        assert!(captured.borrow().is_empty());
    }

    #[test]
    fn failure_reports_exactly_once() {
        let (reporter, captured) = report::sink();
        let be = Attest::new("tn", reporter);
        let msg = be.same(1, 2, &[]);
        assert!(!msg.is_empty());
        assert_eq!(captured.borrow().as_slice(), [msg]);
    }

    #[test]
    fn notes_join_between_header_and_body() {
        let (reporter, _captured) = report::sink();
        let be = Attest::new("tn", reporter);
        let msg = be.same(Value::Nil, 42, &["n1", "n2"]);
        assert_eq!(msg, "FAIL in tn\nn1 n2\ngot nil, wanted int(42)");
    }

    #[test]
    fn opaque_comparison_faults_both_ways() {
        let bad = || Value::from(Record::new("exbad").field("a", Value::Opaque("i64".into())));
        let (reporter, captured) = report::sink();
        let be = Attest::new("tn", reporter);
        let expected = "FAIL in tn\nn1 n2\nerror: cannot compare opaque field `a` of exbad";
        assert_eq!(be.same(bad(), bad(), &["n1", "n2"]), expected);
        assert_eq!(be.differ(bad(), bad(), &["n1", "n2"]), expected);
        assert_eq!(captured.borrow().len(), 2);
    }

    struct Exploding;

    impl Oracle for Exploding {
        fn equal(
            &self,
            _got: &Value,
            _want: &Value,
            _opts: &[CmpOption],
        ) -> Result<bool, CompareFault> {
            panic!("boom")
        }

        fn diff(&self, _got: &Value, _want: &Value, _opts: &[CmpOption]) -> String {
            String::new()
        }
    }

    #[test]
    fn oracle_panic_becomes_error_message() {
        let (reporter, captured) = report::sink();
        let be = Attest::new("tn", reporter).with_oracle(Box::new(Exploding));
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));
        let msg = be.same(1, 1, &[]);
        std::panic::set_hook(hook);
        assert_eq!(msg, "FAIL in tn\nerror: comparison panicked: boom");
        assert_eq!(captured.borrow().len(), 1);
    }
}
