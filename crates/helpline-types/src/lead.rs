//! Sales-lead qualification types.
//!
//! A [`LeadRecord`] maps required field names to string values, where the
//! empty string means "not yet known". The set and order of required fields
//! is configuration ([`RequiredFields`]), not a constant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered list of field names a sales lead must provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RequiredFields(Vec<String>);

impl RequiredFields {
    /// Build from names, trimming them and dropping blanks and duplicates
    /// while keeping first-seen order.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into().trim().to_string();
            if !field.is_empty() && !out.contains(&field) {
                out.push(field);
            }
        }
        Self(out)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-separated list, as embedded in prompts.
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for RequiredFields {
    fn default() -> Self {
        Self::new(["company_name", "team_size"])
    }
}

impl From<Vec<String>> for RequiredFields {
    fn from(fields: Vec<String>) -> Self {
        Self::new(fields)
    }
}

impl From<RequiredFields> for Vec<String> {
    fn from(fields: RequiredFields) -> Self {
        fields.0
    }
}

/// Coerce an untrusted JSON value into a field string.
///
/// Strings are trimmed, null becomes empty, everything else uses its JSON text.
pub fn coerce_field_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Per-session record of sales qualification fields.
///
/// Serialized as a flat JSON object keyed by field name. Keys outside the
/// required set (e.g. from an older configuration) are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadRecord {
    values: BTreeMap<String, String>,
}

impl LeadRecord {
    /// A record with every required field present and empty.
    pub fn empty(fields: &RequiredFields) -> Self {
        Self {
            values: fields.iter().map(|f| (f.to_string(), String::new())).collect(),
        }
    }

    /// Build a record from an untrusted JSON value.
    ///
    /// Non-object input yields the empty record. Every value is coerced with
    /// [`coerce_field_value`] and missing required fields are added empty.
    pub fn from_json_value(value: &Value, fields: &RequiredFields) -> Self {
        let mut record = Self::empty(fields);
        if let Value::Object(map) = value {
            for (key, v) in map {
                record.values.insert(key.clone(), coerce_field_value(v));
            }
        }
        record
    }

    /// Stored value for a field; empty when unknown.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    pub fn is_filled(&self, field: &str) -> bool {
        !self.get(field).trim().is_empty()
    }

    /// Merge freshly extracted values into this record.
    ///
    /// A required field is overwritten only by a non-empty extracted value
    /// that differs from the stored one; empty or absent extracted values
    /// never clear anything. Returns whether the record changed.
    pub fn merge(&mut self, extracted: &LeadRecord, fields: &RequiredFields) -> bool {
        let mut dirty = false;
        for field in fields.iter() {
            let candidate = extracted.get(field).trim();
            if !candidate.is_empty() && self.get(field) != candidate {
                self.values.insert(field.to_string(), candidate.to_string());
                dirty = true;
            }
        }
        dirty
    }

    /// Required fields still empty, in required-field order.
    pub fn missing(&self, fields: &RequiredFields) -> Vec<String> {
        fields
            .iter()
            .filter(|f| !self.is_filled(f))
            .map(str::to_string)
            .collect()
    }

    /// Number of required fields holding a non-empty value.
    pub fn filled_count(&self, fields: &RequiredFields) -> usize {
        fields.iter().filter(|f| self.is_filled(f)).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
