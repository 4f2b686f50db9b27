//! Structural, path-addressable comparison of two delivery stream snapshots.
//!
//! Both specs are projected to a JSON tree whose object keys become path
//! segments (`Spec.EncryptionConfiguration.KeyType`). The walk treats an
//! absent substructure and one whose every leaf is absent as the same thing,
//! at every depth.

use std::collections::BTreeSet;

use kinesync_core::{Resource, ResourceSpec};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::tags;

pub const SPEC_PATH: &str = "Spec";
pub const TAGS_PATH: &str = "Spec.Tags";
pub const ENCRYPTION_PATH: &str = "Spec.EncryptionConfiguration";
pub const DESTINATION_PATH: &str = "Spec.DestinationConfiguration";
pub const NAME_PATH: &str = "Spec.DeliveryStreamName";
pub const TYPE_PATH: &str = "Spec.DeliveryStreamType";

static NULL: Value = Value::Null;

/// One field that differs between the two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Difference {
    /// Dot-separated path, e.g. "Spec.EncryptionConfiguration.KeyType"
    pub path: String,
    /// Value on the first (desired) side
    pub a: Value,
    /// Value on the second (observed) side
    pub b: Value,
}

/// All differing paths, in walk order (sorted by path within each object).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Delta {
    differences: Vec<Difference>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.differences.iter().map(|d| d.path.as_str())
    }

    /// True if `path` itself, anything beneath it, or an enclosing
    /// substructure was recorded as different.
    pub fn different_at(&self, path: &str) -> bool {
        self.paths().any(|stored| {
            stored == path || is_descendant(stored, path) || is_descendant(path, stored)
        })
    }
}

fn is_descendant(path: &str, ancestor: &str) -> bool {
    path.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with('.'))
}

/// Compare the specs of two snapshots. Status fields are derived and never
/// compared.
///
/// Tags are an unordered set keyed by tag key, so they are compared with
/// [`tags::equal_tags`] and reported as a single `Spec.Tags` path.
pub fn compare(a: &Resource, b: &Resource) -> Delta {
    let mut differences = Vec::new();

    walk(SPEC_PATH, &spec_tree(&a.spec), &spec_tree(&b.spec), &mut differences);

    if !tags::equal_tags(&a.spec.tags, &b.spec.tags) {
        differences.push(Difference {
            path: TAGS_PATH.to_string(),
            a: serde_json::to_value(&a.spec.tags).unwrap_or_default(),
            b: serde_json::to_value(&b.spec.tags).unwrap_or_default(),
        });
    }

    Delta { differences }
}

/// Absent, or present with nothing set anywhere beneath it.
///
/// Empty lists count as absent; empty strings and `false` do not.
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.values().all(is_absent),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Structural equality under the absent/empty equivalence.
pub fn equivalent(a: &Value, b: &Value) -> bool {
    if is_absent(a) && is_absent(b) {
        return true;
    }

    match (a, b) {
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| equivalent(x, y))
        }
        (Value::Object(x), Value::Object(y)) => union_keys(Some(x), Some(y))
            .into_iter()
            .all(|key| equivalent(field(Some(x), key), field(Some(y), key))),
        _ => a == b,
    }
}

fn spec_tree(spec: &ResourceSpec) -> Value {
    // Plain data with string keys; serialization cannot fail.
    let mut tree = serde_json::to_value(spec).unwrap_or_default();
    if let Value::Object(map) = &mut tree {
        map.remove("Tags");
    }
    tree
}

fn walk(path: &str, a: &Value, b: &Value, out: &mut Vec<Difference>) {
    if is_absent(a) && is_absent(b) {
        return;
    }

    match (a, b) {
        (Value::Object(x), Value::Object(y)) => walk_objects(path, Some(x), Some(y), out),
        (Value::Object(x), Value::Null) => walk_objects(path, Some(x), None, out),
        (Value::Null, Value::Object(y)) => walk_objects(path, None, Some(y), out),
        // Lists are ordered; any element difference marks the whole list.
        _ => {
            if !equivalent(a, b) {
                out.push(Difference {
                    path: path.to_string(),
                    a: a.clone(),
                    b: b.clone(),
                });
            }
        }
    }
}

fn walk_objects(
    path: &str,
    a: Option<&Map<String, Value>>,
    b: Option<&Map<String, Value>>,
    out: &mut Vec<Difference>,
) {
    for key in union_keys(a, b) {
        let child = format!("{path}.{key}");
        walk(&child, field(a, key), field(b, key), out);
    }
}

fn union_keys<'a>(
    a: Option<&'a Map<String, Value>>,
    b: Option<&'a Map<String, Value>>,
) -> BTreeSet<&'a str> {
    a.into_iter()
        .chain(b)
        .flat_map(|map| map.keys())
        .map(String::as_str)
        .collect()
}

fn field<'a>(map: Option<&'a Map<String, Value>>, key: &str) -> &'a Value {
    map.and_then(|m| m.get(key)).unwrap_or(&NULL)
}
