//! Line-oriented diff rendering for failed equality assertions.
//!
//! Both sides render to a multi-line literal, a line diff runs over the two
//! texts, and the result is rewritten into the failure body: a
//! `mismatch -got +want` header, `- ` markers for got-only lines, `+ ` for
//! want-only lines, a two-space indent on common lines. Trailing commas and
//! blank lines are trimmed.

use difference::{Changeset, Difference};

use crate::compare::sorted;
use crate::options::{sort_lists, CmpOption};
use crate::value::Value;

pub fn render_diff(got: &Value, want: &Value, opts: &[CmpOption]) -> String {
    let got_text = canonical(got, opts).pretty();
    let want_text = canonical(want, opts).pretty();
    let changeset = Changeset::new(&got_text, &want_text, "\n");

    let mut out = String::from("mismatch -got +want\n");
    for d in &changeset.diffs {
        match d {
            Difference::Same(block) => push_lines(&mut out, block, "  ", false),
            Difference::Rem(block) => push_lines(&mut out, block, "- ", true),
            Difference::Add(block) => push_lines(&mut out, block, "+ ", true),
        }
    }
    out.trim_end().to_string()
}

fn push_lines(out: &mut String, block: &str, marker: &str, strip_indent: bool) {
    for line in block.lines() {
        let body = if strip_indent { line.trim_start() } else { line };
        let body = body.trim_end().trim_end_matches(',');
        if body.trim().is_empty() {
            continue;
        }
        out.push_str(marker);
        out.push_str(body);
        out.push('\n');
    }
}

/// The diff must agree with the equality verdict, so `SortLists`
/// canonicalizes list order here too.
fn canonical(v: &Value, opts: &[CmpOption]) -> Value {
    if !sort_lists(opts) {
        return v.clone();
    }
    sort_deep(v)
}

fn sort_deep(v: &Value) -> Value {
    match v {
        Value::List(xs) => {
            let inner: Vec<Value> = xs.iter().map(sort_deep).collect();
            Value::List(sorted(&inner))
        }
        Value::Map(m) => Value::Map(
            m.iter()
                .map(|(k, x)| (k.clone(), sort_deep(x)))
                .collect(),
        ),
        Value::Record(r) => {
            let mut r = r.clone();
            for (_, x) in &mut r.fields {
                *x = sort_deep(x);
            }
            Value::Record(r)
        }
        Value::Pointer(inner) => Value::Pointer(Box::new(sort_deep(inner))),
        _ => v.clone(),
    }
}
