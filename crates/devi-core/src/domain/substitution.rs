//! Token values for one generation job.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::DomainError;

/// Values that replace tokens in template paths and contents.
///
/// A positional map addresses its values as `0`, `1`, `2`, …; a named map
/// addresses them by key. Only scalar values (strings, numbers, booleans) take
/// part in literal token replacement. Structured values such as the
/// `parameters` bag are only visible to the templating pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SubstitutionMap {
    Positional(Vec<String>),
    Named(BTreeMap<String, Value>),
}

impl Default for SubstitutionMap {
    fn default() -> Self {
        Self::Named(BTreeMap::new())
    }
}

impl SubstitutionMap {
    /// Empty named map.
    pub fn named() -> Self {
        Self::default()
    }

    pub fn positional<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Parse `KEY=VALUE` pairs as given on the command line.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::named();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .filter(|(key, _)| !key.trim().is_empty())
                .ok_or_else(|| DomainError::InvalidSubstitution { input: pair.into() })?;
            map.insert(key.trim(), value);
        }
        Ok(map)
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a value.
    ///
    /// Inserting into a positional map turns it into a named map whose
    /// existing values keep their index keys, so `{{0}}` keeps resolving.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        if let Self::Positional(values) = self {
            let named = values
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), Value::String(v.clone())))
                .collect();
            *self = Self::Named(named);
        }
        if let Self::Named(map) = self {
            map.insert(key.into(), value.into());
        }
    }

    /// Scalar value for a token, rendered as text.
    pub fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Positional(values) => key
                .parse::<usize>()
                .ok()
                .and_then(|i| values.get(i))
                .cloned(),
            Self::Named(map) => map.get(key).and_then(scalar_text),
        }
    }

    /// Look a value up by exact key, falling back to a dotted walk into
    /// nested objects (`parameters.builtin`).
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let Self::Named(map) = self else {
            return None;
        };
        if let Some(value) = map.get(path) {
            return Some(value);
        }
        let mut parts = path.split('.');
        let mut current = map.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Handlebars-style truthiness of [`Self::lookup`].
    pub fn is_truthy(&self, path: &str) -> bool {
        match self.lookup(path) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty() && s != "false" && s != "0",
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(_)) => true,
        }
    }

    /// `(token, text)` pairs for every scalar value.
    pub fn tokens(&self) -> Vec<(String, String)> {
        match self {
            Self::Positional(values) => values
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v.clone()))
                .collect(),
            Self::Named(map) => map
                .iter()
                .filter_map(|(k, v)| scalar_text(v).map(|text| (k.clone(), text)))
                .collect(),
        }
    }

    /// Data handed to the templating pass.
    pub fn to_context(&self) -> Value {
        match self {
            Self::Positional(values) => {
                Value::Array(values.iter().cloned().map(Value::String).collect())
            }
            Self::Named(map) => Value::Object(map.clone().into_iter().collect()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Positional(values) => values.len(),
            Self::Named(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
