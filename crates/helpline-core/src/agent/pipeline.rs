//! Per-message support pipeline.
//!
//! `SupportAgent` runs the four steps for every inbound message, strictly in
//! order: classify intent, run the intent's side effect (knowledge lookup,
//! lead capture or feature-request logging), draft the reply, decide
//! escalation. Nothing in here fails: every generation error and malformed
//! model output degrades to the step's default and a `warn!`.

use std::sync::Arc;

use tracing::field::Empty;
use tracing::{Instrument, debug, info, info_span, warn};

use helpline_observe::genai_attrs;

use helpline_types::chat::MessageResult;
use helpline_types::config::HelplineConfig;
use helpline_types::intent::Intent;
use helpline_types::lead::RequiredFields;
use helpline_types::llm::GenerationRequest;
use helpline_types::session::SessionId;

use crate::llm::box_provider::BoxTextGenerator;
use crate::retrieval::SimilarityRetriever;
use crate::storage::{FeatureRequestLog, LeadStore};
use crate::structured::extract_reply_text;
use crate::structured::verdict::{
    EscalationVerdict, FollowUpVerdict, IntentVerdict, parse_lead_extraction,
};

use super::prompt::{DraftContext, PromptBuilder};

/// Prefix of the text substituted for a failed generation call.
pub const GENERATION_ERROR_MARKER: &str = "[generation error]";

/// Reply used when drafting produced nothing usable.
pub const FALLBACK_REPLY: &str =
    "Thanks for reaching out. A member of our team will follow up with you shortly.";

/// Settings the pipeline needs from the global config.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub required_fields: RequiredFields,
    /// Model name; empty uses the generator's default.
    pub model: String,
    pub temperature: f64,
    /// Token cap for classification, drafting and escalation.
    pub reply_max_tokens: u32,
    /// Token cap for lead extraction and follow-up.
    pub tool_max_tokens: u32,
}

impl PipelineConfig {
    pub fn from_config(config: &HelplineConfig) -> Self {
        Self {
            required_fields: config.leads.required_fields.clone(),
            model: config.generation.model.clone(),
            temperature: config.generation.temperature,
            reply_max_tokens: config.generation.reply_max_tokens,
            tool_max_tokens: config.generation.tool_max_tokens,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_config(&HelplineConfig::default())
    }
}

/// Lead-capture outcome surfaced in the message result.
#[derive(Debug, Default)]
struct LeadOutcome {
    missing: Vec<String>,
    followup: String,
}

/// Orchestrates one message through classification, side effects, drafting
/// and escalation.
pub struct SupportAgent<L, F> {
    generator: BoxTextGenerator,
    retriever: Arc<SimilarityRetriever>,
    leads: L,
    feature_log: F,
    config: PipelineConfig,
}

impl<L: LeadStore, F: FeatureRequestLog> SupportAgent<L, F> {
    pub fn new(
        generator: BoxTextGenerator,
        retriever: Arc<SimilarityRetriever>,
        leads: L,
        feature_log: F,
        config: PipelineConfig,
    ) -> Self {
        Self {
            generator,
            retriever,
            leads,
            feature_log,
            config,
        }
    }

    pub fn retriever(&self) -> &Arc<SimilarityRetriever> {
        &self.retriever
    }

    pub fn leads(&self) -> &L {
        &self.leads
    }

    pub fn feature_log(&self) -> &F {
        &self.feature_log
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one message through the pipeline.
    #[tracing::instrument(skip_all, fields(session_id = %session))]
    pub async fn handle(&self, message: &str, session: &SessionId) -> MessageResult {
        let intent = self.classify_intent(message, session).await;
        info!(%intent, "message classified");

        let mut kb_snippet = String::new();
        let mut lead = LeadOutcome::default();

        match intent {
            Intent::TechnicalSupport => {
                kb_snippet = self.retriever.search_snippet(message);
                debug!(found = !kb_snippet.is_empty(), "knowledge lookup");
            }
            Intent::SalesLead => {
                lead = self.collect_lead(message, session).await;
            }
            Intent::FeatureRequest => {
                self.record_feature_request(message, session).await;
            }
            Intent::HumanRequest | Intent::Greeting => {}
        }

        let reply = self
            .draft_reply(
                &DraftContext {
                    intent,
                    kb_snippet: &kb_snippet,
                    missing_fields: &lead.missing,
                    followup_prompt: &lead.followup,
                    message,
                },
                session,
            )
            .await;

        let escalate = self
            .decide_escalation(message, intent, !kb_snippet.is_empty(), session)
            .await;

        MessageResult {
            intent,
            reply,
            escalate,
            kb_snippet,
            missing_fields: lead.missing,
            followup_prompt: lead.followup,
        }
    }

    async fn classify_intent(&self, message: &str, session: &SessionId) -> Intent {
        let raw = self
            .generate(
                genai_attrs::OP_CLASSIFY_INTENT,
                PromptBuilder::intent(message),
                self.config.reply_max_tokens,
                session,
            )
            .await;
        let verdict = IntentVerdict::parse(&raw);
        if !verdict.recognized {
            warn!(fallback = %verdict.intent, "no usable intent in model output");
        }
        verdict.intent
    }

    /// Load, extract, merge and persist the lead, then ask for what is missing.
    async fn collect_lead(&self, message: &str, session: &SessionId) -> LeadOutcome {
        let fields = &self.config.required_fields;
        let mut record = self.leads.load(session, fields).await;

        let raw = self
            .generate(
                genai_attrs::OP_EXTRACT_LEAD,
                PromptBuilder::lead_extraction(message, fields),
                self.config.tool_max_tokens,
                session,
            )
            .await;
        let extracted = parse_lead_extraction(&raw, fields);
        let changed = record.merge(&extracted, fields);

        if let Err(e) = self.leads.save(session, &record).await {
            warn!(error = %e, "failed to persist lead record");
        }

        let missing = record.missing(fields);
        info!(
            changed,
            filled = record.filled_count(fields),
            missing = missing.len(),
            "lead record updated"
        );

        if missing.is_empty() {
            return LeadOutcome::default();
        }

        let raw = self
            .generate(
                genai_attrs::OP_FOLLOW_UP,
                PromptBuilder::follow_up(message, &missing),
                self.config.tool_max_tokens,
                session,
            )
            .await;
        let verdict = FollowUpVerdict::parse(&raw);
        if let Some(model_missing) = &verdict.missing_fields {
            if model_missing != &missing {
                debug!(?model_missing, ?missing, "model missing list ignored");
            }
        }
        let followup = verdict.question_or_template(&missing);

        LeadOutcome { missing, followup }
    }

    async fn record_feature_request(&self, message: &str, session: &SessionId) {
        match self.feature_log.append(session, message).await {
            Ok(()) => info!("feature request logged"),
            Err(e) => warn!(error = %e, "failed to log feature request"),
        }
    }

    async fn draft_reply(&self, ctx: &DraftContext<'_>, session: &SessionId) -> String {
        let raw = self
            .generate(
                genai_attrs::OP_DRAFT_REPLY,
                PromptBuilder::draft_reply(ctx),
                self.config.reply_max_tokens,
                session,
            )
            .await;
        let reply = extract_reply_text(&raw);
        if reply.is_empty() || reply.starts_with(GENERATION_ERROR_MARKER) {
            warn!("drafting produced no usable reply, using fallback");
            return FALLBACK_REPLY.to_string();
        }
        reply
    }

    async fn decide_escalation(
        &self,
        message: &str,
        intent: Intent,
        kb_found: bool,
        session: &SessionId,
    ) -> bool {
        let raw = self
            .generate(
                genai_attrs::OP_DECIDE_ESCALATION,
                PromptBuilder::escalation(message, intent, kb_found),
                self.config.reply_max_tokens,
                session,
            )
            .await;
        let verdict = EscalationVerdict::parse(&raw);
        if intent == Intent::HumanRequest {
            return true;
        }
        verdict.escalate
    }

    /// One generation call. Errors become the marker text so the step's
    /// parser falls through to its default.
    async fn generate(
        &self,
        step: &'static str,
        prompt: String,
        max_tokens: u32,
        session: &SessionId,
    ) -> String {
        let mut request = GenerationRequest::new(prompt, max_tokens)
            .with_session(session.as_str())
            .with_temperature(self.config.temperature);
        request.model = if self.config.model.is_empty() {
            self.generator.default_model().to_string()
        } else {
            self.config.model.clone()
        };

        let span = info_span!(
            "gen_ai.generate",
            gen_ai.operation.name = step,
            gen_ai.provider.name = self.generator.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = max_tokens,
            gen_ai.request.temperature = self.config.temperature,
            gen_ai.usage.input_tokens = Empty,
            gen_ai.usage.output_tokens = Empty,
            gen_ai.response.finish_reasons = Empty,
        );

        match self
            .generator
            .generate(&request)
            .instrument(span.clone())
            .await
        {
            Ok(response) => {
                span.record(genai_attrs::GEN_AI_USAGE_INPUT_TOKENS, response.usage.input_tokens);
                span.record(genai_attrs::GEN_AI_USAGE_OUTPUT_TOKENS, response.usage.output_tokens);
                if let Some(reason) = &response.done_reason {
                    span.record(genai_attrs::GEN_AI_RESPONSE_FINISH_REASONS, reason.as_str());
                }
                debug!(step, raw = %response.content, "raw model output");
                response.content
            }
            Err(e) => {
                warn!(step, error = %e, "generation failed");
                format!("{GENERATION_ERROR_MARKER} {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use helpline_types::error::StoreError;
    use helpline_types::knowledge::KnowledgeDocument;
    use helpline_types::lead::LeadRecord;
    use helpline_types::llm::{GenerationResponse, LlmError, Usage};

    use crate::llm::provider::TextGenerator;

    /// Replays queued outputs in order; an exhausted queue behaves like an
    /// unreachable service.
    #[derive(Clone, Default)]
    struct ScriptedGenerator {
        outputs: Arc<Mutex<VecDeque<String>>>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedGenerator {
        fn with_outputs(outputs: &[&str]) -> Self {
            let script = Self::default();
            script
                .outputs
                .lock()
                .unwrap()
                .extend(outputs.iter().map(|s| s.to_string()));
            script
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    impl TextGenerator for ScriptedGenerator {
        fn name(&self) -> &str {
            "scripted"
        }

        fn default_model(&self) -> &str {
            "scripted-1"
        }

        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<GenerationResponse, LlmError> {
            self.prompts.lock().unwrap().push(request.prompt.clone());
            let next = self.outputs.lock().unwrap().pop_front();
            match next {
                Some(content) => Ok(GenerationResponse {
                    content,
                    model: request.model.clone(),
                    done_reason: Some("stop".to_string()),
                    usage: Usage::default(),
                }),
                None => Err(LlmError::Provider {
                    message: "connection refused".to_string(),
                }),
            }
        }
    }

    #[derive(Clone, Default)]
    struct MemoryLeadStore {
        records: Arc<Mutex<HashMap<String, LeadRecord>>>,
    }

    impl MemoryLeadStore {
        fn record(&self, session: &str) -> Option<LeadRecord> {
            self.records.lock().unwrap().get(session).cloned()
        }
    }

    impl LeadStore for MemoryLeadStore {
        async fn load(&self, session: &SessionId, fields: &RequiredFields) -> LeadRecord {
            self.records
                .lock()
                .unwrap()
                .get(session.as_str())
                .cloned()
                .unwrap_or_else(|| LeadRecord::empty(fields))
        }

        async fn save(&self, session: &SessionId, record: &LeadRecord) -> Result<(), StoreError> {
            self.records
                .lock()
                .unwrap()
                .insert(session.as_str().to_string(), record.clone());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct MemoryFeatureLog {
        entries: Arc<Mutex<HashMap<String, Vec<String>>>>,
        fail: bool,
    }

    impl FeatureRequestLog for MemoryFeatureLog {
        async fn append(&self, session: &SessionId, text: &str) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::Io("disk full".to_string()));
            }
            self.entries
                .lock()
                .unwrap()
                .entry(session.as_str().to_string())
                .or_default()
                .push(text.trim().to_string());
            Ok(())
        }

        async fn entries(&self, session: &SessionId) -> Result<Vec<String>, StoreError> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .get(session.as_str())
                .cloned()
                .unwrap_or_default())
        }
    }

    struct Harness {
        agent: SupportAgent<MemoryLeadStore, MemoryFeatureLog>,
        script: ScriptedGenerator,
        leads: MemoryLeadStore,
        features: MemoryFeatureLog,
    }

    fn harness_with(
        outputs: &[&str],
        docs: Vec<KnowledgeDocument>,
        features: MemoryFeatureLog,
    ) -> Harness {
        let script = ScriptedGenerator::with_outputs(outputs);
        let leads = MemoryLeadStore::default();
        let agent = SupportAgent::new(
            BoxTextGenerator::new(script.clone()),
            Arc::new(SimilarityRetriever::with_documents(docs, 0.12)),
            leads.clone(),
            features.clone(),
            PipelineConfig::default(),
        );
        Harness {
            agent,
            script,
            leads,
            features,
        }
    }

    fn harness(outputs: &[&str]) -> Harness {
        harness_with(outputs, Vec::new(), MemoryFeatureLog::default())
    }

    fn session(id: &str) -> SessionId {
        SessionId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_greeting_fresh_session() {
        let h = harness(&[
            r#"{"intent": "greeting"}"#,
            r#"{"response": "Hello! How can I help you today?"}"#,
            r#"{"escalate": false}"#,
        ]);
        let result = h.agent.handle("hi", &session("s1")).await;

        assert_eq!(result.intent, Intent::Greeting);
        assert_eq!(result.reply, "Hello! How can I help you today?");
        assert!(!result.escalate);
        assert!(result.kb_snippet.is_empty());
        assert!(result.missing_fields.is_empty());
        assert!(result.followup_prompt.is_empty());
        assert_eq!(h.script.prompts().len(), 3);
        assert!(h.leads.record("s1").is_none());
    }

    #[tokio::test]
    async fn test_sales_lead_complete_in_one_message() {
        let h = harness(&[
            r#"{"intent": "sales_lead"}"#,
            r#"{"company_name": "Acme", "team_size": "8"}"#,
            r#"{"response": "Thanks! What would you like to use it for?"}"#,
            r#"{"escalate": false}"#,
        ]);
        let result = h
            .agent
            .handle("I work at Acme, team of 8", &session("s2"))
            .await;

        assert_eq!(result.intent, Intent::SalesLead);
        assert!(result.missing_fields.is_empty());
        assert!(result.followup_prompt.is_empty());
        let record = h.leads.record("s2").unwrap();
        assert_eq!(record.get("company_name"), "Acme");
        assert_eq!(record.get("team_size"), "8");
        // No follow-up call when nothing is missing.
        assert_eq!(h.script.prompts().len(), 4);
    }

    #[tokio::test]
    async fn test_sales_lead_partial_then_completed() {
        let h = harness(&[
            r#"{"intent": "sales_lead"}"#,
            r#"{"company_name": "Acme", "team_size": ""}"#,
            r#"{"missing_fields": ["team_size", "company_name"], "followup_prompt": "How many people are on your team?"}"#,
            r#"{"response": "Great to meet Acme! How many people are on your team?"}"#,
            r#"{"escalate": false}"#,
            r#"{"intent": "sales_lead"}"#,
            r#"{"team_size": 12}"#,
            r#"{"response": "Thanks, that helps."}"#,
            r#"{"escalate": false}"#,
        ]);
        let s = session("s3");

        let first = h.agent.handle("We're Acme", &s).await;
        assert_eq!(first.missing_fields, vec!["team_size".to_string()]);
        assert_eq!(first.followup_prompt, "How many people are on your team?");
        assert!(h.script.prompts()[2].contains("- team_size"));

        let second = h.agent.handle("About 12 of us", &s).await;
        assert!(second.missing_fields.is_empty());
        let record = h.leads.record("s3").unwrap();
        assert_eq!(record.get("company_name"), "Acme");
        assert_eq!(record.get("team_size"), "12");
    }

    #[tokio::test]
    async fn test_follow_up_template_when_model_output_unusable() {
        let h = harness(&[
            r#"{"intent": "sales_lead"}"#,
            "I could not find anything.",
            "not json either",
            r#"{"response": "Could you tell me a bit more?"}"#,
            r#"{"escalate": "true"}"#,
        ]);
        let result = h.agent.handle("Interested in pricing", &session("s4")).await;

        assert_eq!(
            result.missing_fields,
            vec!["company_name".to_string(), "team_size".to_string()]
        );
        assert_eq!(
            result.followup_prompt,
            "Could you please provide company_name, team_size?"
        );
        assert!(result.escalate);
        // Record is persisted even when nothing was extracted.
        assert!(h.leads.record("s4").is_some());
    }

    #[tokio::test]
    async fn test_human_request_forces_escalation() {
        let h = harness(&[
            r#"{"intent": "human_request"}"#,
            r#"{"response": "Of course, a member of our team will join shortly."}"#,
            r#"{"escalate": false}"#,
        ]);
        let result = h
            .agent
            .handle("I need to talk to a person", &session("s5"))
            .await;

        assert_eq!(result.intent, Intent::HumanRequest);
        assert!(result.escalate);
    }

    #[tokio::test]
    async fn test_technical_support_uses_knowledge() {
        let docs = vec![
            KnowledgeDocument::new(
                "password_reset.txt",
                "To reset your password, open Settings and choose Reset password.",
            ),
            KnowledgeDocument::new("billing.txt", "Invoices are emailed monthly."),
        ];
        let h = harness_with(
            &[
                r#"{"intent": "technical_support"}"#,
                r#"{"response": "Open Settings and choose Reset password. Does that help?"}"#,
                r#"{"escalate": false}"#,
            ],
            docs,
            MemoryFeatureLog::default(),
        );
        let result = h
            .agent
            .handle("How do I reset my password?", &session("s6"))
            .await;

        assert_eq!(result.intent, Intent::TechnicalSupport);
        assert!(result.kb_snippet.contains("Reset password"));
        let prompts = h.script.prompts();
        assert!(prompts[1].contains("open Settings"));
        assert!(prompts[2].contains("KB Found: true"));
    }

    #[tokio::test]
    async fn test_feature_request_is_logged() {
        let h = harness(&[
            r#"{"intent": "feature_request"}"#,
            r#"{"response": "Thanks, we've logged your idea."}"#,
            r#"{"escalate": false}"#,
        ]);
        let s = session("s7");
        h.agent.handle("  Please add dark mode  ", &s).await;

        let entries = h.features.entries(&s).await.unwrap();
        assert_eq!(entries, vec!["Please add dark mode".to_string()]);
    }

    #[tokio::test]
    async fn test_feature_log_failure_is_not_surfaced() {
        let failing = MemoryFeatureLog {
            fail: true,
            ..Default::default()
        };
        let h = harness_with(
            &[
                r#"{"intent": "feature_request"}"#,
                r#"{"response": "Thanks for the suggestion!"}"#,
                r#"{"escalate": false}"#,
            ],
            Vec::new(),
            failing,
        );
        let result = h.agent.handle("Add CSV export", &session("s8")).await;
        assert_eq!(result.intent, Intent::FeatureRequest);
        assert_eq!(result.reply, "Thanks for the suggestion!");
    }

    #[tokio::test]
    async fn test_generation_unavailable_degrades() {
        let h = harness(&[]);
        let result = h.agent.handle("My app crashes", &session("s9")).await;

        assert_eq!(result.intent, Intent::TechnicalSupport);
        assert_eq!(result.reply, FALLBACK_REPLY);
        assert!(!result.escalate);
        assert!(result.kb_snippet.is_empty());
        // Each step is attempted exactly once.
        assert_eq!(h.script.prompts().len(), 3);
    }

    #[tokio::test]
    async fn test_unparseable_draft_passes_through_trimmed() {
        let h = harness(&[
            r#"{"intent": "greeting"}"#,
            "  Hi there, happy to help.  ",
            "maybe",
        ]);
        let result = h.agent.handle("hello", &session("s10")).await;
        assert_eq!(result.reply, "Hi there, happy to help.");
        assert!(!result.escalate);
    }
}
