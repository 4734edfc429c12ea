//! Typed views over model output, one per pipeline step.
//!
//! Each verdict is built from raw text via [`super::extract_json_object`] and
//! applies its own per-field defaults, so callers never touch `serde_json`
//! values directly.

use serde_json::Value;

use helpline_types::intent::Intent;
use helpline_types::lead::{coerce_field_value, LeadRecord, RequiredFields};

use super::extract_json_object;

/// Result of the classification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentVerdict {
    pub intent: Intent,
    /// False when the output had no usable `intent` and the fallback applied.
    pub recognized: bool,
}

impl IntentVerdict {
    pub fn parse(raw: &str) -> Self {
        let parsed = extract_json_object(raw)
            .get("intent")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Intent>().ok());

        match parsed {
            Some(intent) => Self {
                intent,
                recognized: true,
            },
            None => Self {
                intent: Intent::FALLBACK,
                recognized: false,
            },
        }
    }
}

/// Lead fields extracted from a single message.
///
/// Every required field is present in the returned record; fields the model
/// omitted (or set to null) are empty. Keys outside the required set are
/// ignored.
pub fn parse_lead_extraction(raw: &str, fields: &RequiredFields) -> LeadRecord {
    let obj = extract_json_object(raw);
    let mut record = LeadRecord::empty(fields);
    for field in fields.iter() {
        if let Some(value) = obj.get(field) {
            record.set(field, coerce_field_value(value));
        }
    }
    record
}

/// Result of the follow-up question step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowUpVerdict {
    /// `None` when `missing_fields` was absent or not a list.
    pub missing_fields: Option<Vec<String>>,
    /// `None` when `followup_prompt` was absent, not a string, or blank.
    pub followup_prompt: Option<String>,
}

impl FollowUpVerdict {
    pub fn parse(raw: &str) -> Self {
        let obj = extract_json_object(raw);

        let missing_fields = match obj.get("missing_fields") {
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .map(coerce_field_value)
                    .filter(|s| !s.is_empty())
                    .collect(),
            ),
            _ => None,
        };

        let followup_prompt = match obj.get("followup_prompt") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        };

        Self {
            missing_fields,
            followup_prompt,
        }
    }

    /// Follow-up question, or the templated question for `missing`.
    pub fn question_or_template(&self, missing: &[String]) -> String {
        self.followup_prompt
            .clone()
            .unwrap_or_else(|| templated_followup(missing))
    }
}

/// Question used when the model gives no usable follow-up.
pub fn templated_followup(missing: &[String]) -> String {
    format!("Could you please provide {}?", missing.join(", "))
}

/// Result of the escalation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EscalationVerdict {
    pub escalate: bool,
}

impl EscalationVerdict {
    /// Accepts a JSON boolean or the strings `"true"`/`"false"`; anything else
    /// is `false`.
    pub fn parse(raw: &str) -> Self {
        let escalate = match extract_json_object(raw).get("escalate") {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
            _ => false,
        };
        Self { escalate }
    }
}
