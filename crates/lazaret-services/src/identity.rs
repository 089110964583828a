//! Provider identity resolution
//!
//! Findings need the account and region they are raised in. Both are
//! resolved once at startup and passed down by parameter; resolution
//! failures degrade to "unknown" so the scanner still runs where STS is
//! unavailable.

use aws_config::SdkConfig;

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone)]
pub struct ProviderIdentity {
    pub account_id: String,
    pub region: String,
}

impl ProviderIdentity {
    pub async fn resolve(config: &SdkConfig) -> Self {
        let region = config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let sts = aws_sdk_sts::Client::new(config);
        let account_id = match sts.get_caller_identity().send().await {
            Ok(identity) => identity
                .account()
                .map(str::to_string)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "could not resolve caller identity");
                UNKNOWN.to_string()
            }
        };

        tracing::debug!(account_id = %account_id, region = %region, "provider identity resolved");
        Self { account_id, region }
    }

    /// Identity placeholder for environments without a provider account.
    pub fn unknown() -> Self {
        Self {
            account_id: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
        }
    }
}
