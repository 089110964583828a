//! Guardrail classifier integration
//!
//! The guardrail service scores submitted text for prompt-attack patterns.
//! `api` defines the wire contract and the client seam, `http` the real
//! client, and `classifier` the policy that turns verdicts into scan results.

pub mod api;
pub mod classifier;
pub mod http;

pub use api::{
    ContentFilter, ContentPolicyAssessment, GuardrailApi, GuardrailAssessment, GuardrailVerdict,
    ACTION_INTERVENED, FILTER_PROMPT_ATTACK,
};
pub use classifier::ThreatClassifier;
pub use http::HttpGuardrailApi;
