//! Fault taxonomy for the comparison oracle.
//!
//! A fault means the comparison itself could not complete; the engine turns
//! it into an `"error: "`-prefixed failure message instead of crashing the
//! test process.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareFault {
    /// A record field holds an opaque value and no ignore option covers it.
    #[error("cannot compare opaque field `{field}` of {type_name}")]
    OpaqueField { type_name: String, field: String },

    /// An opaque value showed up outside any record.
    #[error("cannot compare opaque value <{0}>")]
    OpaqueValue(String),

    /// The oracle panicked; the payload text is preserved.
    #[error("comparison panicked: {0}")]
    Panicked(String),
}
