//! Dynamic values for the assertion engine.
//!
//! Assertion inputs are untyped from the caller's point of view: anything
//! convertible into [`Value`] can be handed to
//! [`Attest::same`](crate::Attest::same). The variant set is closed — nil,
//! primitives, structured records, pointer-like wrappers, and error-like
//! values — and the runtime tag is used only for display formatting and the
//! nil/sentinel checks, never for deeper branching.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A value under comparison.
///
/// # Examples
///
/// ```rust
/// use attest::Value;
/// let n = Value::Int(42);
/// assert_eq!(n.typed_repr(), "int(42)");
/// let s = Value::from("a");
/// assert_eq!(s.typed_repr(), "string(a)");
/// let nil = Value::default();
/// assert!(nil.is_nil());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Record(Record),
    /// Pointer-like indirection. Never equal to the bare inner value.
    Pointer(Box<Value>),
    Error(ErrorValue),
    /// Sentinel that matches any non-nil error value.
    AnyError,
    /// A placeholder for internals the comparison cannot reach. Comparing
    /// one faults unless an ignore option covers it.
    Opaque(String),
}

/// A named structured value with ordered fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub type_name: String,
    pub fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Record {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field, builder style.
    ///
    /// ```rust
    /// use attest::{Record, Value};
    /// let ex = Record::new("ex").field("A", 1);
    /// assert_eq!(Value::from(ex).typed_repr(), "ex({1})");
    /// ```
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

/// An error-like value with optional wrapped sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorValue {
    pub message: String,
    pub sources: Vec<ErrorValue>,
}

impl ErrorValue {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorValue {
            message: message.into(),
            sources: Vec::new(),
        }
    }

    /// Wrap one or more errors into a single joined error. The joined
    /// message is the source messages separated by newlines.
    pub fn join(sources: impl IntoIterator<Item = ErrorValue>) -> Self {
        let sources: Vec<ErrorValue> = sources.into_iter().collect();
        let message = sources
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        ErrorValue { message, sources }
    }

    /// Whether this error matches `target`: same message, or any wrapped
    /// source matches transitively.
    pub fn is(&self, target: &ErrorValue) -> bool {
        self.message == target.message || self.sources.iter().any(|s| s.is(target))
    }
}

impl Value {
    /// Returns true if the value is Nil.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Pointer-like wrapper around any value.
    pub fn pointer(inner: impl Into<Value>) -> Self {
        Value::Pointer(Box::new(inner.into()))
    }

    /// The display label for the value's type: `int`, `string`, `ex` for a
    /// record named `ex`, `*ex` for a pointer to it.
    pub fn type_label(&self) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "f64".to_string(),
            Value::Str(_) => "string".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Map(_) => "map".to_string(),
            Value::Record(r) => r.type_name.clone(),
            Value::Pointer(inner) => format!("*{}", inner.type_label()),
            Value::Error(_) | Value::AnyError => "error".to_string(),
            Value::Opaque(_) => "opaque".to_string(),
        }
    }

    /// A single-line literal rendering without the type label.
    pub fn literal(&self) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(x) => x.to_string(),
            Value::Str(s) => s.clone(),
            Value::List(xs) => {
                let inner: Vec<String> = xs.iter().map(Value::literal).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Map(m) => {
                let inner: Vec<String> =
                    m.iter().map(|(k, v)| format!("{}: {}", k, v.literal())).collect();
                format!("{{{}}}", inner.join(", "))
            }
            Value::Record(r) => {
                let inner: Vec<String> = r.fields.iter().map(|(_, v)| v.literal()).collect();
                format!("{{{}}}", inner.join(" "))
            }
            Value::Pointer(inner) => format!("&{}", inner.literal()),
            Value::Error(e) => e.message.clone(),
            Value::AnyError => "any".to_string(),
            Value::Opaque(tag) => format!("<{}>", tag),
        }
    }

    /// Diagnostic rendering with the type label: `int(42)`, `string(a)`,
    /// `ex({1})`, `*ex(&{1})`. For human display only; nothing parses it.
    pub fn typed_repr(&self) -> String {
        format!("{}({})", self.type_label(), self.literal())
    }

    /// Multi-line rendering used as diff input. Scalars render as their
    /// typed repr; structured values open a brace per line so the line diff
    /// can point at individual fields.
    pub fn pretty(&self) -> String {
        match self {
            Value::List(_) | Value::Map(_) | Value::Record(_) | Value::Pointer(_) => {
                let mut out = String::new();
                self.pretty_into(&mut out, 0);
                out
            }
            _ => self.typed_repr(),
        }
    }

    fn pretty_into(&self, out: &mut String, indent: usize) {
        let pad = "  ".repeat(indent + 1);
        let close_pad = "  ".repeat(indent);
        match self {
            Value::List(xs) => {
                out.push('[');
                if !xs.is_empty() {
                    out.push('\n');
                    for x in xs {
                        out.push_str(&pad);
                        x.pretty_or_literal(out, indent + 1);
                        out.push_str(",\n");
                    }
                    out.push_str(&close_pad);
                }
                out.push(']');
            }
            Value::Map(m) => {
                out.push('{');
                if !m.is_empty() {
                    out.push('\n');
                    for (k, v) in m {
                        out.push_str(&pad);
                        out.push_str(k);
                        out.push_str(": ");
                        v.pretty_or_literal(out, indent + 1);
                        out.push_str(",\n");
                    }
                    out.push_str(&close_pad);
                }
                out.push('}');
            }
            Value::Record(r) => {
                out.push_str(&r.type_name);
                out.push('{');
                if !r.fields.is_empty() {
                    out.push('\n');
                    for (name, v) in &r.fields {
                        out.push_str(&pad);
                        out.push_str(name);
                        out.push_str(": ");
                        v.pretty_or_literal(out, indent + 1);
                        out.push_str(",\n");
                    }
                    out.push_str(&close_pad);
                }
                out.push('}');
            }
            Value::Pointer(inner) => {
                out.push('&');
                inner.pretty_or_literal(out, indent);
            }
            _ => out.push_str(&self.literal()),
        }
    }

    fn pretty_or_literal(&self, out: &mut String, indent: usize) {
        match self {
            Value::List(_) | Value::Map(_) | Value::Record(_) | Value::Pointer(_) => {
                self.pretty_into(out, indent)
            }
            _ => out.push_str(&self.literal()),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.literal())
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(xs: Vec<Value>) -> Self {
        Value::List(xs)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(m: BTreeMap<String, Value>) -> Self {
        Value::Map(m)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl From<ErrorValue> for Value {
    fn from(e: ErrorValue) -> Self {
        Value::Error(e)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Nil,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(xs) => {
                Value::List(xs.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(m) => {
                Value::Map(m.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn typed_repr_scalars() {
        assert_eq!(Value::Int(42).typed_repr(), "int(42)");
        assert_eq!(Value::Float(42.0).typed_repr(), "f64(42)");
        assert_eq!(Value::from("a").typed_repr(), "string(a)");
        assert_eq!(Value::Bool(true).typed_repr(), "bool(true)");
    }

    #[test]
    fn typed_repr_records_and_pointers() {
        let ex = Value::from(Record::new("ex").field("A", 1));
        assert_eq!(ex.typed_repr(), "ex({1})");
        assert_eq!(Value::pointer(ex).typed_repr(), "*ex(&{1})");
    }

    #[test]
    fn pretty_record_is_line_oriented() {
        let ex = Value::from(Record::new("ex").field("A", 1));
        assert_eq!(ex.pretty(), "ex{\n  A: 1,\n}");
        assert_eq!(Value::pointer(ex).pretty(), "&ex{\n  A: 1,\n}");
    }

    #[test]
    fn pretty_scalar_is_typed() {
        assert_eq!(Value::Float(42.0).pretty(), "f64(42)");
    }

    #[test]
    fn option_conversion_maps_none_to_nil() {
        assert_eq!(Value::from(Option::<i64>::None), Value::Nil);
        assert_eq!(Value::from(Some(3)), Value::Int(3));
    }

    #[test]
    fn json_conversion() {
        let v = Value::from(json!({"A": 1, "B": [true, null]}));
        match &v {
            Value::Map(m) => {
                assert_eq!(m["A"], Value::Int(1));
                assert_eq!(
                    m["B"],
                    Value::List(vec![Value::Bool(true), Value::Nil])
                );
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn joined_errors_match_their_sources() {
        let e1 = ErrorValue::new("1");
        let joined = ErrorValue::join([e1.clone()]);
        assert!(joined.is(&e1));
        assert!(e1.is(&joined));
        let wide = ErrorValue::join([e1.clone(), ErrorValue::new("2")]);
        assert!(wide.is(&e1));
        assert!(!e1.is(&wide));
    }
}
