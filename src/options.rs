//! Comparison options.
//!
//! An ordered option list is fixed on the [`Attest`](crate::Attest) context
//! at construction and threaded through every equality and diff call. The
//! constructor always appends [`CmpOption::EquateErrors`] and
//! [`CmpOption::MatchAnyError`] after any caller-supplied options.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CmpOption {
    /// Two error values are equal when either wraps the other.
    EquateErrors,
    /// The any-error sentinel matches any non-nil error value.
    MatchAnyError,
    /// Skip the named fields of records with the given type name.
    IgnoreFields {
        type_name: String,
        fields: Vec<String>,
    },
    /// Skip opaque fields of records with the given type name instead of
    /// faulting on them.
    IgnoreOpaque { type_name: String },
    /// Sort list elements into a canonical order before comparing.
    SortLists,
}

impl CmpOption {
    pub fn ignore_fields(type_name: impl Into<String>, fields: &[&str]) -> Self {
        CmpOption::IgnoreFields {
            type_name: type_name.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn ignore_opaque(type_name: impl Into<String>) -> Self {
        CmpOption::IgnoreOpaque {
            type_name: type_name.into(),
        }
    }
}

pub(crate) fn equate_errors(opts: &[CmpOption]) -> bool {
    opts.iter().any(|o| matches!(o, CmpOption::EquateErrors))
}

pub(crate) fn match_any_error(opts: &[CmpOption]) -> bool {
    opts.iter().any(|o| matches!(o, CmpOption::MatchAnyError))
}

pub(crate) fn sort_lists(opts: &[CmpOption]) -> bool {
    opts.iter().any(|o| matches!(o, CmpOption::SortLists))
}

pub(crate) fn field_ignored(opts: &[CmpOption], type_name: &str, field: &str) -> bool {
    opts.iter().any(|o| match o {
        CmpOption::IgnoreFields {
            type_name: t,
            fields,
        } => t == type_name && fields.iter().any(|f| f == field),
        _ => false,
    })
}

pub(crate) fn opaque_ignored(opts: &[CmpOption], type_name: &str) -> bool {
    opts.iter().any(|o| match o {
        CmpOption::IgnoreOpaque { type_name: t } => t == type_name,
        _ => false,
    })
}
