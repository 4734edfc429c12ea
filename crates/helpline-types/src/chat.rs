//! Chat request/result types.

use serde::{Deserialize, Serialize};

use crate::intent::Intent;

/// Outcome of running one inbound message through the support pipeline.
///
/// The JSON keys match what the chat front end reads (`classification`,
/// `response`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResult {
    #[serde(rename = "classification")]
    pub intent: Intent,
    #[serde(rename = "response")]
    pub reply: String,
    pub escalate: bool,
    /// Retrieved knowledge document text; empty when nothing matched.
    pub kb_snippet: String,
    /// Required lead fields still unknown after this message.
    pub missing_fields: Vec<String>,
    /// Question asking for the missing fields; empty when nothing is missing.
    pub followup_prompt: String,
}

impl MessageResult {
    pub fn snippet_found(&self) -> bool {
        !self.kb_snippet.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_result_wire_keys() {
        let result = MessageResult {
            intent: Intent::Greeting,
            reply: "Hello!".to_string(),
            escalate: false,
            kb_snippet: String::new(),
            missing_fields: Vec::new(),
            followup_prompt: String::new(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["classification"], "greeting");
        assert_eq!(json["response"], "Hello!");
        assert_eq!(json["escalate"], false);
        assert_eq!(json["kb_snippet"], "");
        assert!(json["missing_fields"].as_array().unwrap().is_empty());
        assert_eq!(json["followup_prompt"], "");
        assert!(!result.snippet_found());
    }
}
