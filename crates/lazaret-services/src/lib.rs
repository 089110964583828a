//! Lazaret Services Library
//!
//! External collaborators of the scanning pipeline: the guardrail threat
//! classifier, the findings registry, the alert publisher, the audit store,
//! and the provider identity lookup. Each collaborator sits behind a trait so
//! the pipeline can run against the in-memory fakes in `test_helpers`.

pub mod alerts;
pub mod audit;
pub mod findings;
pub mod guardrail;
pub mod identity;
pub mod test_helpers;

pub use alerts::{AlertPublisher, ScanAlert, SnsAlertPublisher};
pub use audit::{AuditStore, DynamoAuditStore};
pub use findings::{FindingsRegistry, SecurityFinding, SecurityHubFindings};
pub use guardrail::{GuardrailApi, GuardrailVerdict, HttpGuardrailApi, ThreatClassifier};
pub use identity::ProviderIdentity;
