//! Selectors: the contextual facts a caller supplies with every query

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

use crate::phase::PhaseType;

/// A criterion name paired with a typed value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selector {
    criterion: String,
    value: SelectorValue,
}

impl Selector {
    pub fn new(criterion: impl Into<String>, value: impl Into<SelectorValue>) -> Self {
        Self {
            criterion: criterion.into(),
            value: value.into(),
        }
    }

    /// Selector carrying a time of day, for `TimeOfDayRange` constraints
    pub fn time_of_day(criterion: impl Into<String>, time: NaiveTime) -> Self {
        Self::new(criterion, time.format("%H:%M:%S%.f").to_string())
    }

    /// Selector carrying an instant, for `TimeOfYearRange` constraints
    pub fn instant(criterion: impl Into<String>, instant: DateTime<Utc>) -> Self {
        Self::new(
            criterion,
            instant.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        )
    }

    pub fn criterion(&self) -> &str {
        &self.criterion
    }

    pub fn value(&self) -> &SelectorValue {
        &self.value
    }

    /// JSON wire form `{"criterion": ..., "value": ...}`
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("criterion".into(), Value::String(self.criterion.clone()));
        map.insert("value".into(), self.value.to_json());
        Value::Object(map)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.criterion, self.value)
    }
}

/// Typed selector value.
///
/// On the wire only three JSON kinds exist: booleans, numbers and strings.
/// `Id` and `Phase` values serialize as strings and read back as `String`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "WireValue")]
pub enum SelectorValue {
    Bool(bool),
    Number(f64),
    Id(Uuid),
    Phase(PhaseType),
    String(String),
}

impl SelectorValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SelectorValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SelectorValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The raw string, for `String` values only
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SelectorValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Textual form used for string membership: strings, ids and phase labels
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            SelectorValue::String(s) => Some(Cow::Borrowed(s)),
            SelectorValue::Id(id) => Some(Cow::Owned(id.hyphenated().to_string())),
            SelectorValue::Phase(phase) => Some(Cow::Borrowed(phase.label())),
            SelectorValue::Bool(_) | SelectorValue::Number(_) => None,
        }
    }

    /// Phase value, parsing string labels
    pub fn as_phase(&self) -> Option<PhaseType> {
        match self {
            SelectorValue::Phase(phase) => Some(*phase),
            SelectorValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            SelectorValue::Bool(b) => Value::Bool(*b),
            SelectorValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            SelectorValue::Id(id) => Value::String(id.hyphenated().to_string()),
            SelectorValue::Phase(phase) => Value::String(phase.label().to_string()),
            SelectorValue::String(s) => Value::String(s.clone()),
        }
    }

    /// Stable, kind-qualified fragment used to build cache keys
    fn key_fragment(&self) -> String {
        match self {
            SelectorValue::Bool(b) => format!("b:{b}"),
            SelectorValue::Number(n) => format!("n:{:016x}", n.to_bits()),
            SelectorValue::Id(id) => format!("i:{}", id.hyphenated()),
            SelectorValue::Phase(phase) => format!("p:{}", phase.label()),
            SelectorValue::String(s) => format!("s:{s}"),
        }
    }
}

impl fmt::Display for SelectorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorValue::Bool(b) => write!(f, "{b}"),
            SelectorValue::Number(n) => write!(f, "{n}"),
            SelectorValue::Id(id) => write!(f, "{}", id.hyphenated()),
            SelectorValue::Phase(phase) => f.write_str(phase.label()),
            SelectorValue::String(s) => f.write_str(s),
        }
    }
}

impl Serialize for SelectorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SelectorValue::Bool(b) => serializer.serialize_bool(*b),
            SelectorValue::Number(n) => serializer.serialize_f64(*n),
            SelectorValue::Id(id) => serializer.collect_str(&id.hyphenated()),
            SelectorValue::Phase(phase) => serializer.serialize_str(phase.label()),
            SelectorValue::String(s) => serializer.serialize_str(s),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl From<WireValue> for SelectorValue {
    fn from(value: WireValue) -> Self {
        match value {
            WireValue::Bool(b) => SelectorValue::Bool(b),
            WireValue::Number(n) => SelectorValue::Number(n),
            WireValue::String(s) => SelectorValue::String(s),
        }
    }
}

impl From<bool> for SelectorValue {
    fn from(value: bool) -> Self {
        SelectorValue::Bool(value)
    }
}

impl From<f64> for SelectorValue {
    fn from(value: f64) -> Self {
        SelectorValue::Number(value)
    }
}

impl From<i64> for SelectorValue {
    fn from(value: i64) -> Self {
        SelectorValue::Number(value as f64)
    }
}

impl From<i32> for SelectorValue {
    fn from(value: i32) -> Self {
        SelectorValue::Number(f64::from(value))
    }
}

impl From<Uuid> for SelectorValue {
    fn from(value: Uuid) -> Self {
        SelectorValue::Id(value)
    }
}

impl From<PhaseType> for SelectorValue {
    fn from(value: PhaseType) -> Self {
        SelectorValue::Phase(value)
    }
}

impl From<&str> for SelectorValue {
    fn from(value: &str) -> Self {
        SelectorValue::String(value.to_string())
    }
}

impl From<String> for SelectorValue {
    fn from(value: String) -> Self {
        SelectorValue::String(value)
    }
}

/// The selectors resolution actually reads: the first one per criterion, in
/// their original order.
pub fn first_per_criterion(selectors: &[Selector]) -> Vec<&Selector> {
    let mut seen = HashSet::with_capacity(selectors.len());
    selectors
        .iter()
        .filter(|s| seen.insert(s.criterion.as_str()))
        .collect()
}

/// Order-independent identity of a selector set.
///
/// Built from [`first_per_criterion`], so two sets that resolve alike share
/// a key and `[a, b]` equals `[b, a]`. Entries are `(criterion, value)`
/// pairs sorted by criterion; values are kind-qualified so `1` and `"1"`
/// differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectorKey(Vec<(String, String)>);

impl SelectorKey {
    pub fn entries(&self) -> &[(String, String)] {
        &self.0
    }
}

pub fn selector_key(selectors: &[Selector]) -> SelectorKey {
    let mut entries: Vec<(String, String)> = first_per_criterion(selectors)
        .into_iter()
        .map(|s| (s.criterion.clone(), s.value.key_fragment()))
        .collect();
    entries.sort();
    SelectorKey(entries)
}
