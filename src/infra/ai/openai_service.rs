use crate::domain::ports::LlmService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{error, info, instrument};

/// Chat-completions client for OpenAI-compatible providers. Failed calls are
/// surfaced immediately; the user retries by resubmitting.
pub struct OpenAiService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiService {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn extract_content(&self, body: &Value) -> Result<String, AppError> {
        if let Some(choices) = body.get("choices").and_then(|c| c.as_array())
            && let Some(first) = choices.first()
            && let Some(content) = first.pointer("/message/content").and_then(|c| c.as_str()) {
            return Ok(content.to_string());
        }

        error!("Unexpected response structure from model provider: {:?}", body);
        Err(AppError::Upstream("Model response missing content".to_string()))
    }
}

#[async_trait]
impl LlmService for OpenAiService {
    #[instrument(skip(self, system_prompt, user_prompt), fields(prompt_len = user_prompt.len()))]
    async fn generate_json(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.base_url);

        let payload = json!({
            "model": model,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt }
            ]
        });

        info!("Sending generation request to model provider...");
        let response = self.client.post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Model provider network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("Model provider error {}: {}", status, text)));
        }

        let body: Value = response.json().await
            .map_err(|e| AppError::Upstream(format!("Model provider returned invalid JSON envelope: {}", e)))?;

        let content = self.extract_content(&body)?;
        info!("Received model response.");
        Ok(content)
    }
}
