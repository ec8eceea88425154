//! Product customization values and structural comparison.
//!
//! A customization is the set of options a shopper picked on the detail
//! screen (fabric, lapel, monogram, ...). Two cart lines with the same name
//! merge only when their customizations match structurally, so the
//! comparison here is the heart of cart identity.
//!
//! Keys are kept in a `BTreeMap`, which makes both equality and the
//! canonical [`Customization::fingerprint`] independent of the order in
//! which options were selected.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single option value.
///
/// Deserializes untagged, so `{"lapel": "peak", "buttons": 2,
/// "monogram": {"enabled": true}}` maps onto the obvious variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<OptionValue>),
    Group(BTreeMap<String, OptionValue>),
}

impl OptionValue {
    /// Parse a loosely-typed literal such as a CLI `key=value` right-hand side.
    ///
    /// `true`/`false` become flags, anything that parses as a finite number
    /// becomes a number, everything else is text.
    pub fn parse_literal(raw: &str) -> Self {
        let raw = raw.trim();
        match raw {
            "true" => return OptionValue::Flag(true),
            "false" => return OptionValue::Flag(false),
            _ => {}
        }
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => OptionValue::Number(n),
            _ => OptionValue::Text(raw.to_string()),
        }
    }

    /// Deep structural comparison.
    ///
    /// Non-finite numbers never match, not even themselves, so a malformed
    /// value degrades to "different line" rather than an error.
    pub fn matches(&self, other: &OptionValue) -> bool {
        match (self, other) {
            (OptionValue::Flag(a), OptionValue::Flag(b)) => a == b,
            (OptionValue::Number(a), OptionValue::Number(b)) => {
                a.is_finite() && b.is_finite() && a == b
            }
            (OptionValue::Text(a), OptionValue::Text(b)) => a == b,
            (OptionValue::List(a), OptionValue::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.matches(y))
            }
            (OptionValue::Group(a), OptionValue::Group(b)) => groups_match(a, b),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn is_group(&self) -> bool {
        matches!(self, OptionValue::Group(_))
    }
}

impl PartialEq for OptionValue {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Flag(b) => write!(f, "{}", b),
            OptionValue::Number(n) => write!(f, "{}", n),
            OptionValue::Text(s) => write!(f, "{}", s),
            OptionValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            OptionValue::Group(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}:{}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Flag(b)
    }
}

/// Largest integer magnitude an `f64` holds exactly.
const MAX_EXACT_INTEGER: i64 = 1 << 53;

/// Integers beyond 2^53 would be rounded and could compare equal to a
/// different value, so they are refused.
impl TryFrom<i64> for OptionValue {
    type Error = CommerceError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        if n.unsigned_abs() > MAX_EXACT_INTEGER as u64 {
            return Err(CommerceError::ValidationError(format!(
                "option value {} is too large to store exactly",
                n
            )));
        }
        Ok(OptionValue::Number(n as f64))
    }
}

impl From<i32> for OptionValue {
    fn from(n: i32) -> Self {
        OptionValue::Number(n as f64)
    }
}

impl From<f64> for OptionValue {
    fn from(n: f64) -> Self {
        OptionValue::Number(n)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

fn groups_match(a: &BTreeMap<String, OptionValue>, b: &BTreeMap<String, OptionValue>) -> bool {
    // Both maps iterate in sorted key order.
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|((ka, va), (kb, vb))| ka == kb && va.matches(vb))
}

/// The options selected for one configured product. May be empty.
///
/// Dotted keys are always stored nested: `monogram.enabled` and
/// `{"monogram": {"enabled": ..}}` are the same option whichever way it
/// arrives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, OptionValue>",
    into = "BTreeMap<String, OptionValue>"
)]
pub struct Customization(BTreeMap<String, OptionValue>);

impl Customization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; `key` may be a dotted path.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set_path(&key.into(), value);
        self
    }

    /// Build from a JSON object, as handed over by a catalog or a client.
    ///
    /// `null` is treated as "no customization".
    pub fn from_json(value: serde_json::Value) -> Result<Self, CommerceError> {
        match value {
            serde_json::Value::Null => Ok(Self::new()),
            serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Err(CommerceError::ValidationError(format!(
                "customization must be an object, got {}",
                other
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.set_path(&key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.0.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.0.iter()
    }

    /// Look up a dotted path such as `monogram.enabled`.
    pub fn get_path(&self, path: &str) -> Option<&OptionValue> {
        let mut segments = path.split('.');
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            match current {
                OptionValue::Group(map) => current = map.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Set a dotted path, creating intermediate groups as needed.
    ///
    /// A non-group value sitting on an intermediate segment is replaced by a
    /// group. Non-empty group values are merged in option by option.
    pub fn set_path(&mut self, path: &str, value: impl Into<OptionValue>) {
        match value.into() {
            OptionValue::Group(map) if !map.is_empty() => {
                for (key, inner) in map {
                    self.set_path(&format!("{}.{}", path, key), inner);
                }
            }
            leaf => self.set_leaf(path, leaf),
        }
    }

    fn set_leaf(&mut self, path: &str, value: OptionValue) {
        let segments: Vec<&str> = path.split('.').collect();
        let (last, parents) = match segments.split_last() {
            Some(split) => split,
            None => return,
        };

        let mut map = &mut self.0;
        for segment in parents {
            let entry = map
                .entry(segment.to_string())
                .or_insert_with(|| OptionValue::Group(BTreeMap::new()));
            if !entry.is_group() {
                *entry = OptionValue::Group(BTreeMap::new());
            }
            let OptionValue::Group(inner) = entry else {
                return;
            };
            map = inner;
        }
        map.insert(last.to_string(), value);
    }

    /// Flatten into `(dotted.path, value)` pairs in canonical order.
    ///
    /// Groups are descended into; lists are leaves.
    pub fn leaf_paths(&self) -> Vec<(String, &OptionValue)> {
        let mut out = Vec::new();
        collect_leaves(&self.0, "", &mut out);
        out
    }

    /// Deep, order-independent structural equality.
    pub fn matches(&self, other: &Customization) -> bool {
        groups_match(&self.0, &other.0)
    }

    /// Canonical rendering, e.g. `fabric=wool;lapel=peak;monogram.enabled=true`.
    pub fn fingerprint(&self) -> String {
        self.leaf_paths()
            .into_iter()
            .map(|(path, value)| format!("{}={}", path, value))
            .collect::<Vec<_>>()
            .join(";")
    }
}

fn collect_leaves<'a>(
    map: &'a BTreeMap<String, OptionValue>,
    prefix: &str,
    out: &mut Vec<(String, &'a OptionValue)>,
) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            OptionValue::Group(inner) if !inner.is_empty() => collect_leaves(inner, &path, out),
            _ => out.push((path, value)),
        }
    }
}

impl From<BTreeMap<String, OptionValue>> for Customization {
    fn from(raw: BTreeMap<String, OptionValue>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<Customization> for BTreeMap<String, OptionValue> {
    fn from(customization: Customization) -> Self {
        customization.0
    }
}

impl PartialEq for Customization {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl fmt::Display for Customization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "standard");
        }
        let parts: Vec<String> = self
            .leaf_paths()
            .into_iter()
            .map(|(path, value)| format!("{}: {}", path, value))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for Customization {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut c = Customization::new();
        for (k, v) in iter {
            c.set_path(&k.into(), v);
        }
        c
    }
}
