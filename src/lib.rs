//! Attest wraps a test's reporting hooks behind a struct with only two
//! assertion methods: [`Attest::same`] and [`Attest::differ`].
//!
//! Objectives:
//! 1. Make tests easier to read with a minimal assertion vocabulary.
//! 2. Keep format strings out of test code.
//! 3. Make failure messages easy to interpret: a `FAIL in <name>` header,
//!    optional notes, and either a structural diff or a nil/non-nil
//!    explanation.
//!
//! Comparison runs through a pluggable [`Oracle`]; the default one does
//! deep structural equality over [`Value`] with an option list that always
//! equates wrapped errors and honors the [`ANY_ERROR`] sentinel. A
//! comparison that cannot complete is reported as a failure, never a crash.
//!
//! ```rust
//! use attest::{report, Attest, ErrorValue, ANY_ERROR};
//!
//! let be = Attest::new("doc", report::panicking());
//! be.same(2, 2, &[]);
//! be.differ("left", "right", &[]);
//! be.same(ErrorValue::new("boom"), ANY_ERROR, &["any error will do"]);
//! ```

pub mod compare;
pub mod diff;
pub mod engine;
pub mod error;
pub mod options;
pub mod report;
pub mod value;

pub use compare::{Oracle, Structural};
pub use engine::{Attest, ReportFn};
pub use error::CompareFault;
pub use options::CmpOption;
pub use value::{ErrorValue, Record, Value};

/// Matches any non-nil error value, and nothing else.
pub const ANY_ERROR: Value = Value::AnyError;
