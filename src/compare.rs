//! The structural equality oracle.
//!
//! [`Oracle`] is the narrow seam between the assertion engine and whatever
//! computes deep equality and diffs. [`Structural`] is the default
//! implementation; a substitute can be injected with
//! [`Attest::with_oracle`](crate::Attest::with_oracle) without touching the
//! engine's logic.

use crate::error::CompareFault;
use crate::options::{
    self, equate_errors, field_ignored, match_any_error, opaque_ignored, sort_lists,
};
use crate::value::{Record, Value};

/// Deep equality plus textual diff, sharing one option list.
///
/// `equal` reports a fault instead of panicking when the comparison cannot
/// complete; the engine additionally catches panics from implementations
/// that do not honor that contract.
pub trait Oracle {
    fn equal(
        &self,
        got: &Value,
        want: &Value,
        opts: &[options::CmpOption],
    ) -> Result<bool, CompareFault>;

    fn diff(&self, got: &Value, want: &Value, opts: &[options::CmpOption]) -> String;
}

/// The built-in structural oracle.
#[derive(Debug, Default)]
pub struct Structural;

impl Oracle for Structural {
    fn equal(
        &self,
        got: &Value,
        want: &Value,
        opts: &[options::CmpOption],
    ) -> Result<bool, CompareFault> {
        equal_values(got, want, opts)
    }

    fn diff(&self, got: &Value, want: &Value, opts: &[options::CmpOption]) -> String {
        crate::diff::render_diff(got, want, opts)
    }
}

/// Structural equality under the given options. `Err` means the comparison
/// could not complete, which the engine reports as a failure.
pub fn equal_values(
    a: &Value,
    b: &Value,
    opts: &[options::CmpOption],
) -> Result<bool, CompareFault> {
    // The sentinel rule runs ahead of structural comparison.
    if match_any_error(opts) && (matches!(a, Value::AnyError) || matches!(b, Value::AnyError)) {
        let other = if matches!(a, Value::AnyError) { b } else { a };
        return Ok(matches!(other, Value::Error(_) | Value::AnyError));
    }
    match (a, b) {
        (Value::Opaque(tag), _) | (_, Value::Opaque(tag)) => {
            Err(CompareFault::OpaqueValue(tag.clone()))
        }
        (Value::Error(x), Value::Error(y)) => {
            if equate_errors(opts) {
                Ok(x.is(y) || y.is(x))
            } else {
                Ok(x == y)
            }
        }
        (Value::Pointer(x), Value::Pointer(y)) => equal_values(x, y, opts),
        (Value::List(xs), Value::List(ys)) => equal_lists(xs, ys, opts),
        (Value::Map(x), Value::Map(y)) => {
            if x.len() != y.len() {
                return Ok(false);
            }
            for (k, xv) in x {
                match y.get(k) {
                    Some(yv) => {
                        if !equal_values(xv, yv, opts)? {
                            return Ok(false);
                        }
                    }
                    None => return Ok(false),
                }
            }
            Ok(true)
        }
        (Value::Record(x), Value::Record(y)) => equal_records(x, y, opts),
        _ => Ok(a == b),
    }
}

fn equal_lists(xs: &[Value], ys: &[Value], opts: &[options::CmpOption]) -> Result<bool, CompareFault> {
    if xs.len() != ys.len() {
        return Ok(false);
    }
    if sort_lists(opts) {
        let xs = sorted(xs);
        let ys = sorted(ys);
        return pairwise_equal(&xs, &ys, opts);
    }
    pairwise_equal(xs, ys, opts)
}

fn pairwise_equal(
    xs: &[Value],
    ys: &[Value],
    opts: &[options::CmpOption],
) -> Result<bool, CompareFault> {
    for (x, y) in xs.iter().zip(ys) {
        if !equal_values(x, y, opts)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Canonical element order for `SortLists`: any total order works as long
/// as it is deterministic, so the rendered repr serves as the key.
pub(crate) fn sorted(xs: &[Value]) -> Vec<Value> {
    let mut out = xs.to_vec();
    out.sort_by_cached_key(Value::typed_repr);
    out
}

fn equal_records(
    x: &Record,
    y: &Record,
    opts: &[options::CmpOption],
) -> Result<bool, CompareFault> {
    if x.type_name != y.type_name {
        return Ok(false);
    }
    let xf: Vec<&(String, Value)> = x
        .fields
        .iter()
        .filter(|(name, _)| !field_ignored(opts, &x.type_name, name))
        .collect();
    let yf: Vec<&(String, Value)> = y
        .fields
        .iter()
        .filter(|(name, _)| !field_ignored(opts, &y.type_name, name))
        .collect();
    if xf.len() != yf.len() {
        return Ok(false);
    }
    for ((xname, xv), (yname, yv)) in xf.iter().zip(&yf) {
        if xname != yname {
            return Ok(false);
        }
        if matches!(xv, Value::Opaque(_)) || matches!(yv, Value::Opaque(_)) {
            if opaque_ignored(opts, &x.type_name) {
                continue;
            }
            return Err(CompareFault::OpaqueField {
                type_name: x.type_name.clone(),
                field: xname.clone(),
            });
        }
        if !equal_values(xv, yv, opts)? {
            return Ok(false);
        }
    }
    Ok(true)
}
