use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Classified purpose of an inbound support message.
///
/// Produced fresh for every message and never persisted. When the model's
/// answer cannot be mapped onto one of the five variants the pipeline falls
/// back to [`Intent::FALLBACK`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    TechnicalSupport,
    FeatureRequest,
    SalesLead,
    HumanRequest,
    Greeting,
}

impl Intent {
    /// Intent assumed when classification output is missing or unusable.
    pub const FALLBACK: Intent = Intent::TechnicalSupport;

    /// All intents, in the order they are presented to the classifier.
    pub const ALL: [Intent; 5] = [
        Intent::TechnicalSupport,
        Intent::FeatureRequest,
        Intent::SalesLead,
        Intent::HumanRequest,
        Intent::Greeting,
    ];

    /// Wire name used in prompts and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::TechnicalSupport => "technical_support",
            Intent::FeatureRequest => "feature_request",
            Intent::SalesLead => "sales_lead",
            Intent::HumanRequest => "human_request",
            Intent::Greeting => "greeting",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "technical_support" => Ok(Intent::TechnicalSupport),
            "feature_request" => Ok(Intent::FeatureRequest),
            "sales_lead" => Ok(Intent::SalesLead),
            "human_request" => Ok(Intent::HumanRequest),
            "greeting" => Ok(Intent::Greeting),
            other => Err(format!("invalid intent: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_roundtrip() {
        for intent in Intent::ALL {
            let parsed: Intent = intent.to_string().parse().unwrap();
            assert_eq!(intent, parsed);
        }
    }

    #[test]
    fn test_intent_parse_is_lenient_about_case_and_whitespace() {
        assert_eq!(" Sales_Lead\n".parse::<Intent>().unwrap(), Intent::SalesLead);
    }

    #[test]
    fn test_intent_parse_rejects_unknown() {
        let err = "billing".parse::<Intent>().unwrap_err();
        assert!(err.contains("billing"));
    }

    #[test]
    fn test_intent_serde() {
        let json = serde_json::to_string(&Intent::HumanRequest).unwrap();
        assert_eq!(json, "\"human_request\"");
        let parsed: Intent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Intent::HumanRequest);
    }

    #[test]
    fn test_fallback_is_technical_support() {
        assert_eq!(Intent::FALLBACK, Intent::TechnicalSupport);
    }
}
