//! Configuration module
//!
//! Environment-driven configuration for the scanner service: the required
//! audit and forensic store identifiers, optional classifier and alerting
//! settings, and the deployment topology. Resolved once at process start.

use std::env;

use crate::models::DeploymentMode;
use crate::storage_types::StorageBackend;

const CLASSIFIER_TIMEOUT_SECS: u64 = 30;
const DEFAULT_GUARDRAIL_VERSION: &str = "DRAFT";

/// Application configuration (scanner service).
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    // Audit and forensic stores (required)
    pub audit_table_name: String,
    pub forensic_bucket_name: String,
    // Alerting (optional; absence disables alert publishing)
    pub alert_topic_arn: Option<String>,
    // Classifier (optional; absence means content passes through as Clean)
    pub guardrail_id: Option<String>,
    pub guardrail_version: String,
    pub classifier_endpoint: Option<String>,
    pub classifier_timeout_secs: u64,
    // Topology
    pub deployment_mode: DeploymentMode,
    pub ingest_bucket_name: Option<String>,
    // Object storage
    pub storage_backend: Option<StorageBackend>,
    pub aws_region: Option<String>,
    pub s3_endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let deployment_mode = env::var("DEPLOYMENT_MODE")
            .unwrap_or_else(|_| DeploymentMode::SingleBucket.to_string())
            .parse::<DeploymentMode>()?;

        let storage_backend =
            env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|s| match s.to_lowercase().as_str() {
                    "s3" => Some(StorageBackend::S3),
                    "memory" => Some(StorageBackend::Memory),
                    _ => None,
                });

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            audit_table_name: env::var("AUDIT_TABLE_NAME")
                .map_err(|_| anyhow::anyhow!("AUDIT_TABLE_NAME must be set"))?,
            forensic_bucket_name: env::var("FORENSIC_BUCKET_NAME")
                .map_err(|_| anyhow::anyhow!("FORENSIC_BUCKET_NAME must be set"))?,
            alert_topic_arn: env::var("ALERT_TOPIC_ARN").ok().filter(|s| !s.is_empty()),
            guardrail_id: env::var("GUARDRAIL_ID").ok().filter(|s| !s.is_empty()),
            guardrail_version: env::var("GUARDRAIL_VERSION")
                .unwrap_or_else(|_| DEFAULT_GUARDRAIL_VERSION.to_string()),
            classifier_endpoint: env::var("CLASSIFIER_ENDPOINT")
                .ok()
                .filter(|s| !s.is_empty()),
            classifier_timeout_secs: env::var("CLASSIFIER_TIMEOUT_SECS")
                .unwrap_or_else(|_| CLASSIFIER_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CLASSIFIER_TIMEOUT_SECS),
            deployment_mode,
            ingest_bucket_name: env::var("INGEST_BUCKET_NAME").ok().filter(|s| !s.is_empty()),
            storage_backend,
            aws_region: env::var("AWS_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.deployment_mode == DeploymentMode::DualBucket && self.ingest_bucket_name.is_none() {
            return Err(anyhow::anyhow!(
                "INGEST_BUCKET_NAME must be set when DEPLOYMENT_MODE is DualBucket"
            ));
        }

        if self.guardrail_id.is_some() && self.classifier_endpoint.is_none() {
            return Err(anyhow::anyhow!(
                "CLASSIFIER_ENDPOINT must be set when GUARDRAIL_ID is configured"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Whether clean objects are promoted into a separate ingest bucket.
    pub fn ingest_copy_enabled(&self) -> bool {
        self.deployment_mode == DeploymentMode::DualBucket && self.ingest_bucket_name.is_some()
    }

    /// Whether malicious verdicts publish to the alert channel.
    pub fn alerts_enabled(&self) -> bool {
        self.alert_topic_arn.is_some()
    }
}
