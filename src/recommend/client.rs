use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use super::CompletionService;
use crate::config::ServiceConfig;

const WORKSPACE_HEADER: &str = "x-gradient-workspace-id";
const MAX_GENERATED_TOKENS: u32 = 200;

/// Blocking client for a hosted, fine-tuned completion model.
pub struct HostedCompletionClient {
    client: Client,
    endpoint: String,
}

impl HostedCompletionClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        anyhow::ensure!(
            !config.access_token.trim().is_empty(),
            "missing completion service access token"
        );
        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", config.access_token.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth).context("invalid access token")?,
        );
        headers.insert(
            WORKSPACE_HEADER,
            HeaderValue::from_str(config.workspace_id.trim()).context("invalid workspace id")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .context("failed to build completion HTTP client")?;

        Ok(Self {
            client,
            endpoint: completion_endpoint(&config.base_url, &config.model_id),
        })
    }
}

fn completion_endpoint(base_url: &str, model_id: &str) -> String {
    format!(
        "{}/models/{}/complete",
        base_url.trim_end_matches('/'),
        model_id.trim()
    )
}

impl CompletionService for HostedCompletionClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        let request = CompletionRequest {
            query: prompt,
            max_generated_token_count: MAX_GENERATED_TOKENS,
        };
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .context("sending completion request")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            anyhow::bail!("completion request failed ({status}): {body}");
        }

        let parsed: CompletionResponse = resp
            .json()
            .context("failed to parse completion response")?;
        anyhow::ensure!(
            !parsed.generated_output.trim().is_empty(),
            "completion service returned an empty answer"
        );
        Ok(parsed.generated_output)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest<'a> {
    query: &'a str,
    max_generated_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionResponse {
    generated_output: String,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn service_config() -> ServiceConfig {
        ServiceConfig {
            base_url: "https://example.test/api/".into(),
            access_token: "token".into(),
            workspace_id: "ws_1".into(),
            model_id: "adapter-42".into(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        assert_eq!(
            completion_endpoint("https://example.test/api/", " adapter-42 "),
            "https://example.test/api/models/adapter-42/complete"
        );
    }

    #[test]
    fn request_body_uses_camel_case() {
        let body = serde_json::to_value(CompletionRequest {
            query: "hi",
            max_generated_token_count: 10,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "query": "hi", "maxGeneratedTokenCount": 10 })
        );
    }

    #[test]
    fn response_body_is_parsed() {
        let parsed: CompletionResponse =
            serde_json::from_str(r#"{"generatedOutput": "Cloud Engineer", "finishReason": "stop"}"#)
                .unwrap();
        assert_eq!(parsed.generated_output, "Cloud Engineer");
    }

    #[test]
    fn client_rejects_blank_token() {
        let mut cfg = service_config();
        assert!(HostedCompletionClient::new(&cfg).is_ok());
        cfg.access_token = " ".into();
        assert!(HostedCompletionClient::new(&cfg).is_err());
    }
}
