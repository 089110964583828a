//! In-memory fakes for pipeline tests
//!
//! These fakes let the scanning pipeline run without the guardrail service
//! or provider clients. Recorders keep everything they are handed so tests
//! can assert on the exact calls; each recorder can also be armed to fail,
//! for exercising per-action failure isolation.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lazaret_core::models::AuditRecord;

use crate::alerts::{AlertPublisher, ScanAlert};
use crate::audit::AuditStore;
use crate::findings::{FindingsRegistry, SecurityFinding};
use crate::guardrail::{
    ContentFilter, ContentPolicyAssessment, GuardrailApi, GuardrailAssessment, GuardrailVerdict,
    ACTION_INTERVENED, FILTER_PROMPT_ATTACK,
};

/// A detected prompt-attack content filter.
pub fn prompt_attack_filter(
    confidence: Option<&str>,
    filter_strength: Option<&str>,
) -> ContentFilter {
    ContentFilter {
        filter_type: FILTER_PROMPT_ATTACK.to_string(),
        detected: true,
        confidence: confidence.map(str::to_string),
        filter_strength: filter_strength.map(str::to_string),
    }
}

/// Guardrail fake returning one scripted verdict for every call.
#[derive(Clone)]
pub struct StaticGuardrail {
    verdict: GuardrailVerdict,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StaticGuardrail {
    pub fn new(verdict: GuardrailVerdict) -> Self {
        Self {
            verdict,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Verdict that passes content through unblocked.
    pub fn pass_through() -> Self {
        Self::new(GuardrailVerdict {
            action: "NONE".to_string(),
            assessments: Vec::new(),
        })
    }

    /// Verdict that intervenes with the given content-policy filters.
    pub fn intervened_with(filters: Vec<ContentFilter>) -> Self {
        Self::new(GuardrailVerdict {
            action: ACTION_INTERVENED.to_string(),
            assessments: vec![GuardrailAssessment {
                content_policy: Some(ContentPolicyAssessment { filters }),
            }],
        })
    }

    /// Texts submitted so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GuardrailApi for StaticGuardrail {
    async fn apply(
        &self,
        _guardrail_id: &str,
        _guardrail_version: &str,
        text: &str,
    ) -> anyhow::Result<GuardrailVerdict> {
        self.calls.lock().unwrap().push(text.to_string());
        Ok(self.verdict.clone())
    }
}

/// Guardrail fake failing every call.
pub struct FailingGuardrail {
    message: String,
}

impl FailingGuardrail {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl GuardrailApi for FailingGuardrail {
    async fn apply(
        &self,
        _guardrail_id: &str,
        _guardrail_version: &str,
        _text: &str,
    ) -> anyhow::Result<GuardrailVerdict> {
        Err(anyhow::anyhow!("{}", self.message))
    }
}

/// Findings registry recording raised findings in memory.
#[derive(Clone, Default)]
pub struct MemoryFindings {
    raised: Arc<Mutex<Vec<SecurityFinding>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MemoryFindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raised(&self) -> Vec<SecurityFinding> {
        self.raised.lock().unwrap().clone()
    }

    /// Arm the registry to fail every subsequent call.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }
}

#[async_trait]
impl FindingsRegistry for MemoryFindings {
    async fn raise(&self, finding: &SecurityFinding) -> anyhow::Result<()> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(anyhow::anyhow!("{}", message));
        }
        self.raised.lock().unwrap().push(finding.clone());
        Ok(())
    }
}

/// Alert publisher recording published alerts in memory.
#[derive(Clone, Default)]
pub struct MemoryAlerts {
    published: Arc<Mutex<Vec<ScanAlert>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MemoryAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<ScanAlert> {
        self.published.lock().unwrap().clone()
    }

    /// Arm the publisher to fail every subsequent call.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }
}

#[async_trait]
impl AlertPublisher for MemoryAlerts {
    async fn publish(&self, alert: &ScanAlert) -> anyhow::Result<()> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(anyhow::anyhow!("{}", message));
        }
        self.published.lock().unwrap().push(alert.clone());
        Ok(())
    }
}

/// Audit store recording appended records in memory.
#[derive(Clone, Default)]
pub struct MemoryAudit {
    records: Arc<Mutex<Vec<AuditRecord>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MemoryAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Arm the store to fail every subsequent call.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }
}

#[async_trait]
impl AuditStore for MemoryAudit {
    async fn append(&self, record: &AuditRecord) -> anyhow::Result<()> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(anyhow::anyhow!("{}", message));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
