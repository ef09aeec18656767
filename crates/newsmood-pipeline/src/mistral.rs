//! Mistral chat-completions client used as the classification model.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::capability::ClassificationCapability;
use crate::error::ClassifyError;

const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/";
const CHAT_PATH: &str = "v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mistral-large-latest";

pub struct MistralClient {
    client: Client,
    api_key: String,
    model: String,
    temperature: f32,
    endpoint: Url,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

impl MistralClient {
    /// Creates a client pointed at the production Mistral API.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::MissingApiKey`] for a blank key or
    /// [`ClassifyError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        api_key: &str,
        model: &str,
        temperature: f32,
        timeout_secs: u64,
    ) -> Result<Self, ClassifyError> {
        Self::with_base_url(api_key, model, temperature, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::MissingApiKey`] for a blank key,
    /// [`ClassifyError::InvalidBaseUrl`] if `base_url` does not parse, or
    /// [`ClassifyError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        temperature: f32,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ClassifyError> {
        if api_key.trim().is_empty() {
            return Err(ClassifyError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("newsmood/0.1 (headline-sentiment)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(CHAT_PATH))
            .map_err(|e| ClassifyError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.trim().to_owned(),
            model: model.to_owned(),
            temperature,
            endpoint,
        })
    }

    /// Builds a client from application config.
    ///
    /// # Errors
    ///
    /// See [`MistralClient::with_base_url`].
    pub fn from_config(config: &newsmood_core::AppConfig) -> Result<Self, ClassifyError> {
        Self::with_base_url(
            &config.mistral_api_key,
            &config.mistral_model,
            config.temperature,
            config.request_timeout_secs,
            config.mistral_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
        )
    }
}

impl ClassificationCapability for MistralClient {
    async fn classify(&self, prompt: &str) -> Result<String, ClassifyError> {
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(model = %self.model, "Mistral chat request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Api { status, body });
        }

        let chat: ChatResponse = response.json().await?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ClassifyError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_api_key_is_rejected() {
        let result = MistralClient::new("", DEFAULT_MODEL, 0.0, 30);
        assert!(matches!(result, Err(ClassifyError::MissingApiKey)));
    }

    #[test]
    fn endpoint_targets_chat_completions() {
        let client =
            MistralClient::with_base_url("key", DEFAULT_MODEL, 0.0, 30, "http://localhost:9999/")
                .unwrap();
        assert_eq!(
            client.endpoint.as_str(),
            "http://localhost:9999/v1/chat/completions"
        );
        assert_eq!(client.model, DEFAULT_MODEL);
    }

    #[test]
    fn request_serializes_single_user_message() {
        let request = ChatRequest {
            model: DEFAULT_MODEL,
            temperature: 0.0,
            messages: [ChatMessage {
                role: "user",
                content: "hello",
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "mistral-large-latest");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
    }
}
