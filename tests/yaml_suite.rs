//! YAML-driven assertion cases.
//!
//! Suites live under `tests/suites/`; each file holds a list of cases with
//! a relation (`same` or `differ`), two values, and the exact expected
//! failure message (empty for a passing assertion).

mod common;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkdir::WalkDir;

use attest::Value;

#[derive(Debug, Deserialize)]
struct SuiteCase {
    name: String,
    relation: Relation,
    #[serde(default)]
    got: serde_yaml::Value,
    #[serde(default)]
    want: serde_yaml::Value,
    #[serde(default)]
    notes: Vec<String>,
    message: String,
    #[serde(default)]
    skip: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Relation {
    Same,
    Differ,
}

fn discover_suites(root: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file()
                && e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect()
}

fn load_cases(path: &Path) -> Vec<SuiteCase> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()))
}

fn to_value(v: serde_yaml::Value) -> Value {
    match v {
        serde_yaml::Value::Null => Value::Nil,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_yaml::Value::String(s) => Value::Str(s),
        serde_yaml::Value::Sequence(xs) => Value::List(xs.into_iter().map(to_value).collect()),
        serde_yaml::Value::Mapping(m) => Value::Map(
            m.into_iter()
                .filter_map(|(k, v)| k.as_str().map(|k| (k.to_string(), to_value(v))))
                .collect(),
        ),
        serde_yaml::Value::Tagged(t) => to_value(t.value),
    }
}

#[test]
fn yaml_assertion_suites() {
    let suites = discover_suites("tests/suites");
    assert!(!suites.is_empty(), "no YAML suites found");

    let mut ran = 0;
    for path in suites {
        for case in load_cases(&path) {
            if case.skip {
                continue;
            }
            let (be, captured) = common::context(&case.name);
            let notes: Vec<&str> = case.notes.iter().map(String::as_str).collect();
            let got = to_value(case.got);
            let want = to_value(case.want);
            let message = match case.relation {
                Relation::Same => be.same(got, want, &notes),
                Relation::Differ => be.differ(got, want, &notes),
            };
            assert_eq!(
                message,
                case.message,
                "case `{}` in {}",
                case.name,
                path.display()
            );
            if case.message.is_empty() {
                common::check_reported(&captured, &[]);
            } else {
                common::check_reported(&captured, &[case.message.as_str()]);
            }
            ran += 1;
        }
    }
    assert!(ran > 0, "all YAML cases were skipped");
}
