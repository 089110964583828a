//! HTTP guardrail client

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;

use super::api::{GuardrailApi, GuardrailVerdict};

// Apply-guardrail request structures
#[derive(Debug, Serialize)]
struct ApplyRequest<'a> {
    source: &'a str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentBlock<'a> {
    text: TextBlock<'a>,
}

#[derive(Debug, Serialize)]
struct TextBlock<'a> {
    text: &'a str,
}

/// Guardrail client over HTTP.
///
/// Built once at startup with the configured endpoint and timeout; the
/// underlying connection pool is reused across invocations.
pub struct HttpGuardrailApi {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpGuardrailApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for guardrail service")?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl GuardrailApi for HttpGuardrailApi {
    async fn apply(
        &self,
        guardrail_id: &str,
        guardrail_version: &str,
        text: &str,
    ) -> Result<GuardrailVerdict> {
        let body = ApplyRequest {
            source: "INPUT",
            content: vec![ContentBlock {
                text: TextBlock { text },
            }],
        };

        let response = self
            .http_client
            .post(format!(
                "{}/guardrail/{}/version/{}/apply",
                self.base_url, guardrail_id, guardrail_version
            ))
            .json(&body)
            .send()
            .await
            .context("Failed to send request to guardrail service")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Guardrail request failed: {} - {}",
                status,
                error_text
            ));
        }

        response
            .json()
            .await
            .context("Failed to parse guardrail response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_in_base_url_is_trimmed() {
        let api = HttpGuardrailApi::new("http://localhost:9300/", Duration::from_secs(5))
            .expect("client");
        assert_eq!(api.base_url, "http://localhost:9300");
    }

    #[test]
    fn test_apply_request_wire_shape() {
        let body = ApplyRequest {
            source: "INPUT",
            content: vec![ContentBlock {
                text: TextBlock { text: "scan me" },
            }],
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["source"], "INPUT");
        assert_eq!(json["content"][0]["text"]["text"], "scan me");
    }
}
