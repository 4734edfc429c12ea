//! OpenTelemetry GenAI Semantic Convention attribute constants.
//!
//! Span fields are declared literally in `info_span!`; these constants are
//! used with `Span::record` and for the operation-name values, so both sides
//! agree on spelling.

// --- Required attributes ---

/// The name of the operation being performed (e.g., "classify_intent").
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The name of the GenAI provider (e.g., "ollama").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

// --- Recommended attributes ---

pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";

pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

/// The number of input tokens consumed.
pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

/// The number of output tokens generated.
pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

/// Why generation stopped (e.g., "stop", "length").
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

// --- Operation name values, one per pipeline step ---

pub const OP_CLASSIFY_INTENT: &str = "classify_intent";

pub const OP_EXTRACT_LEAD: &str = "extract_lead";

pub const OP_FOLLOW_UP: &str = "follow_up";

pub const OP_DRAFT_REPLY: &str = "draft_reply";

pub const OP_DECIDE_ESCALATION: &str = "decide_escalation";

// --- Provider name values ---

pub const PROVIDER_OLLAMA: &str = "ollama";
