//! Application state.
//!
//! Every collaborator client is constructed exactly once at startup and
//! handed to the pipeline by parameter. Nothing here is mutated after
//! `AppState` is built.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use lazaret_core::Config;
use lazaret_scanner::{AuditRecorder, DispositionExecutor, ScanCoordinator};
use lazaret_services::{
    AlertPublisher, AuditStore, DynamoAuditStore, FindingsRegistry, GuardrailApi,
    HttpGuardrailApi, ProviderIdentity, SecurityHubFindings, SnsAlertPublisher, ThreatClassifier,
};
use lazaret_storage::{create_object_store, ObjectStore, StorageError};

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ObjectStore>,
    pub coordinator: ScanCoordinator,
}

impl AppState {
    /// Build the full application state from configuration, constructing the
    /// provider service clients.
    pub async fn from_config(config: Config) -> Result<Arc<Self>> {
        let store = create_object_store(&config)
            .await
            .context("Failed to create object store")?;

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        let identity = ProviderIdentity::resolve(&sdk_config).await;

        let audit: Arc<dyn AuditStore> = Arc::new(DynamoAuditStore::new(
            aws_sdk_dynamodb::Client::new(&sdk_config),
            &config.audit_table_name,
        ));
        let findings: Arc<dyn FindingsRegistry> = Arc::new(SecurityHubFindings::new(
            aws_sdk_securityhub::Client::new(&sdk_config),
            identity.account_id,
            identity.region,
            &config.forensic_bucket_name,
        ));
        // Inert when no topic is configured; the policy never emits SendAlert
        // in that case.
        let alerts: Arc<dyn AlertPublisher> = Arc::new(SnsAlertPublisher::new(
            aws_sdk_sns::Client::new(&sdk_config),
            config.alert_topic_arn.clone().unwrap_or_default(),
        ));

        // Without a guardrail id the classifier never calls out, so the
        // endpoint only matters when one is configured (enforced by
        // Config::validate).
        let endpoint = config
            .classifier_endpoint
            .clone()
            .unwrap_or_else(|| "http://127.0.0.1:0".to_string());
        let guardrail: Arc<dyn GuardrailApi> = Arc::new(
            HttpGuardrailApi::new(
                endpoint,
                Duration::from_secs(config.classifier_timeout_secs),
            )
            .context("Failed to create guardrail client")?,
        );

        Ok(Self::with_collaborators(
            config, store, guardrail, findings, alerts, audit,
        ))
    }

    /// Assemble the pipeline from already-constructed collaborators. Tests
    /// use this with in-memory fakes.
    pub fn with_collaborators(
        config: Config,
        store: Arc<dyn ObjectStore>,
        guardrail: Arc<dyn GuardrailApi>,
        findings: Arc<dyn FindingsRegistry>,
        alerts: Arc<dyn AlertPublisher>,
        audit: Arc<dyn AuditStore>,
    ) -> Arc<Self> {
        let classifier = ThreatClassifier::new(
            guardrail,
            config.guardrail_id.clone(),
            config.guardrail_version.clone(),
        );
        let executor = DispositionExecutor::new(
            store.clone(),
            findings,
            alerts,
            config.forensic_bucket_name.clone(),
            config.ingest_bucket_name.clone(),
            config.deployment_mode,
        );
        let recorder = AuditRecorder::new(audit, config.deployment_mode);
        let coordinator = ScanCoordinator::new(
            store.clone(),
            classifier,
            executor,
            recorder,
            config.ingest_copy_enabled(),
            config.alerts_enabled(),
        );

        Arc::new(Self {
            config,
            store,
            coordinator,
        })
    }

    /// Probe the object store with a sentinel lookup. A missing object is a
    /// healthy answer; any other failure is not.
    pub async fn storage_healthy(&self) -> Result<(), StorageError> {
        match self
            .store
            .get_object(
                &self.config.forensic_bucket_name,
                "health-check-non-existent-key",
            )
            .await
        {
            Ok(_) | Err(StorageError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub fn classifier_configured(&self) -> bool {
        self.config.guardrail_id.is_some()
    }
}
