//! Prompt builders for each pipeline step.
//!
//! Every prompt ends with the user's message quoted on its own line and asks
//! for a single JSON object, which `crate::structured` then parses.

use helpline_types::intent::Intent;
use helpline_types::lead::RequiredFields;

/// Inputs to the drafting prompt.
#[derive(Debug, Clone, Copy)]
pub struct DraftContext<'a> {
    pub intent: Intent,
    pub kb_snippet: &'a str,
    pub missing_fields: &'a [String],
    pub followup_prompt: &'a str,
    pub message: &'a str,
}

/// Builds the prompt text for every generation call in the pipeline.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Classification prompt listing the five intents and tie-break rules.
    pub fn intent(message: &str) -> String {
        let choices = Intent::ALL
            .iter()
            .map(Intent::as_str)
            .collect::<Vec<_>>()
            .join(" | ");
        format!(
            r#"You are an AI assistant for a customer-service automation system.
Your ONLY job is to classify the user's intent. Do NOT reply conversationally.

Possible intents:
- technical_support      (errors, issues, troubleshooting)
- feature_request        (new ideas or improvements)
- sales_lead             (pricing, interest in product, company/team/use-case information)
- human_request          (wants to speak to a real person)
- greeting               (hi, hello, casual opener)

Rules:
- If the user gives ANY business detail (company name, team size, industry, use case), answer sales_lead.
- If the user asks to talk to a person, agent or human, answer human_request.
- If the message is only a greeting, answer greeting.
- Otherwise pick the most suitable intent.
- Output valid JSON ONLY.

Return:
{{ "intent": "<{choices}>" }}

User message: "{message}"
"#
        )
    }

    /// Extraction prompt asking for every required field, empty when absent.
    pub fn lead_extraction(message: &str, fields: &RequiredFields) -> String {
        let listed = bullet_list(fields.as_slice());
        let template = fields
            .iter()
            .map(|f| format!("  \"{f}\": \"<value or empty>\""))
            .collect::<Vec<_>>()
            .join(",\n");
        format!(
            r#"You extract structured data.

Extract these fields from the user's message:
{listed}

Return only JSON:
{{
{template}
}}
User: "{message}"
"#
        )
    }

    /// Follow-up prompt naming exactly the still-missing fields.
    pub fn follow_up(message: &str, missing: &[String]) -> String {
        let listed = bullet_list(missing);
        format!(
            r#"You are a sales assistant.

Required fields:
{listed}

Task:
Identify which required fields the user has NOT provided.
Write ONE polite question asking ONLY for those missing fields.

Return JSON ONLY:
{{
  "missing_fields": [...],
  "followup_prompt": "<polite question>"
}}

User: "{message}"
"#
        )
    }

    /// Drafting prompt with per-intent tone rules.
    pub fn draft_reply(ctx: &DraftContext<'_>) -> String {
        let missing = serde_json::to_string(ctx.missing_fields).unwrap_or_else(|_| "[]".into());
        format!(
            r#"You are a customer-support assistant drafting a helpful reply.

Tone:
- Warm, soft, polite.
- If intent = greeting, you may greet gently.
- If intent is anything else, DO NOT greet. Respond directly but kindly.

Rules:
- human_request: confirm a human will assist.
- technical_support:
    - If KB is present, summarize it simply and ask if it helps.
    - If KB is empty, say you are forwarding it to the technical team.
- feature_request: thank them and confirm it has been logged.
- sales_lead:
    - If fields are missing, ask the followup softly.
    - Otherwise ask one mild clarifying question.

Return ONLY JSON:
{{ "response": "<final reply>" }}

Context:
Intent: {intent}
KB: "{kb}"
Missing: {missing}
Followup: "{followup}"
User: "{message}"
"#,
            intent = ctx.intent,
            kb = ctx.kb_snippet,
            followup = ctx.followup_prompt,
            message = ctx.message,
        )
    }

    /// Escalation prompt; `kb_found` is rendered as lowercase `true`/`false`.
    pub fn escalation(message: &str, intent: Intent, kb_found: bool) -> String {
        format!(
            r#"Decide if a human agent is required.

Escalate = true if:
- User explicitly asks for a human
- Technical issue but no KB snippet
- User is frustrated or urgent
- Sales inquiry unclear or complex

Return ONLY:
{{ "escalate": true_or_false }}

Intent: {intent}
KB Found: {kb_found}
User: "{message}"
"#
        )
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|i| format!("- {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}
