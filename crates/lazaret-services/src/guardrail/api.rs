//! Guardrail wire contract
//!
//! Verdict DTOs mirror the guardrail service's JSON shape, camelCase keys
//! included, so the fields deserialize verbatim. Policy interpretation of a
//! verdict belongs to `classifier`, not here.

use async_trait::async_trait;
use serde::Deserialize;

/// Response-level action value indicating the guardrail blocked the content.
pub const ACTION_INTERVENED: &str = "GUARDRAIL_INTERVENED";

/// Content-policy filter type covering prompt-attack detections.
pub const FILTER_PROMPT_ATTACK: &str = "PROMPT_ATTACK";

#[derive(Debug, Clone, Deserialize)]
pub struct GuardrailVerdict {
    pub action: String,
    #[serde(default)]
    pub assessments: Vec<GuardrailAssessment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuardrailAssessment {
    #[serde(rename = "contentPolicy", default)]
    pub content_policy: Option<ContentPolicyAssessment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentPolicyAssessment {
    #[serde(default)]
    pub filters: Vec<ContentFilter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentFilter {
    #[serde(rename = "type")]
    pub filter_type: String,
    #[serde(default)]
    pub detected: bool,
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(rename = "filterStrength", default)]
    pub filter_strength: Option<String>,
}

/// Client seam for the guardrail service.
#[async_trait]
pub trait GuardrailApi: Send + Sync {
    async fn apply(
        &self,
        guardrail_id: &str,
        guardrail_version: &str,
        text: &str,
    ) -> anyhow::Result<GuardrailVerdict>;
}
