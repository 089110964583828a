//! Threat classification over the guardrail service
//!
//! Turns guardrail verdicts into scan classifications. The surface is
//! deliberately infallible: a missing guardrail configuration passes content
//! through as Clean (configuration must not block ingestion), while a failed
//! guardrail invocation comes back as Malicious at 0.5 so a broken classifier
//! quarantines rather than admits.

use std::sync::Arc;

use lazaret_core::models::{ClassificationResult, ThreatDetail};

use super::api::{GuardrailApi, GuardrailVerdict, ACTION_INTERVENED, FILTER_PROMPT_ATTACK};

/// Upper bound on the text submitted to the guardrail, in characters.
const MAX_SCAN_CHARS: usize = 10_000;

pub struct ThreatClassifier {
    api: Arc<dyn GuardrailApi>,
    guardrail_id: Option<String>,
    guardrail_version: String,
}

impl ThreatClassifier {
    pub fn new(
        api: Arc<dyn GuardrailApi>,
        guardrail_id: Option<String>,
        guardrail_version: impl Into<String>,
    ) -> Self {
        Self {
            api,
            guardrail_id,
            guardrail_version: guardrail_version.into(),
        }
    }

    /// Classify extracted text. Only the first `MAX_SCAN_CHARS` characters
    /// are submitted.
    pub async fn classify(&self, text: &str) -> ClassificationResult {
        let Some(guardrail_id) = self.guardrail_id.as_deref() else {
            tracing::warn!("no guardrail configured, content passes unscanned");
            return ClassificationResult::clean();
        };

        let sample = truncate_chars(text, MAX_SCAN_CHARS);

        match self
            .api
            .apply(guardrail_id, &self.guardrail_version, sample)
            .await
        {
            Ok(verdict) => evaluate_verdict(&verdict),
            Err(e) => {
                tracing::error!(error = %e, "guardrail invocation failed, treating content as suspect");
                ClassificationResult::malicious(
                    0.5,
                    ThreatDetail::ScanError {
                        error: e.to_string(),
                    },
                )
            }
        }
    }
}

/// The first detected prompt-attack filter decides the verdict; anything
/// short of an intervention is Clean.
fn evaluate_verdict(verdict: &GuardrailVerdict) -> ClassificationResult {
    if verdict.action != ACTION_INTERVENED {
        return ClassificationResult::clean();
    }

    for assessment in &verdict.assessments {
        let Some(content_policy) = &assessment.content_policy else {
            continue;
        };
        for filter in &content_policy.filters {
            if filter.filter_type == FILTER_PROMPT_ATTACK && filter.detected {
                let confidence_level = filter
                    .confidence
                    .clone()
                    .unwrap_or_else(|| "UNKNOWN".to_string());
                let confidence = confidence_score(&confidence_level);
                tracing::warn!(
                    confidence_level = %confidence_level,
                    confidence,
                    "prompt attack detected"
                );
                return ClassificationResult::malicious(
                    confidence,
                    ThreatDetail::PromptInjection {
                        confidence_level,
                        filter_strength: filter.filter_strength.clone(),
                        action: verdict.action.clone(),
                    },
                );
            }
        }
    }

    ClassificationResult::clean()
}

/// Guardrail confidence labels mapped to numeric scores. Unrecognized labels
/// land in the middle.
fn confidence_score(level: &str) -> f64 {
    match level {
        "HIGH" => 0.9,
        "MEDIUM" => 0.6,
        "LOW" => 0.3,
        _ => 0.5,
    }
}

/// Character-based prefix of `text`, safe on multibyte boundaries.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
