//! OpenAI-compatible chat-completions client.
//!
//! One wire format covers OpenAI, Groq, NVIDIA, Cerebras, and any custom
//! base URL: `POST {base}/chat/completions` with the system instruction as
//! the first message. Inline images are sent as data-URL image parts.

use std::time::Duration;

use serde_json::Value;

use super::config::LlmTimeouts;
use super::types::{ChatResponse, ContentPart, LlmError, Message};

/// Low temperature: DSL output should be near-deterministic.
const TEMPERATURE: f64 = 0.2;

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let wire_messages = build_messages(system, messages);
        let body = ApiRequest {
            model,
            max_tokens,
            temperature: TEMPERATURE,
            messages: &wire_messages,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: &'a [WireMessage],
}

#[derive(serde::Serialize)]
struct WireMessage {
    role: String,
    content: WireContent,
}

#[derive(serde::Serialize)]
#[serde(untagged)]
enum WireContent {
    /// Plain string for text-only messages — maximally compatible.
    Text(String),
    /// Part array, needed once an image is attached.
    Parts(Vec<WirePart>),
}

#[derive(serde::Serialize)]
#[serde(tag = "type")]
enum WirePart {
    #[serde(rename = "text")]
    Text { text: String },

    #[serde(rename = "image_url")]
    ImageUrl { image_url: WireImageUrl },
}

#[derive(serde::Serialize)]
struct WireImageUrl {
    url: String,
}

fn build_messages(system: &str, messages: &[Message]) -> Vec<WireMessage> {
    let mut out = Vec::with_capacity(messages.len() + 1);
    if !system.trim().is_empty() {
        out.push(WireMessage { role: "system".into(), content: WireContent::Text(system.to_owned()) });
    }
    for message in messages {
        out.push(WireMessage { role: message.role.clone(), content: build_content(&message.parts) });
    }
    out
}

fn build_content(parts: &[ContentPart]) -> WireContent {
    let has_image = parts.iter().any(|p| matches!(p, ContentPart::Image { .. }));
    if !has_image {
        let text = parts
            .iter()
            .filter_map(|p| match p {
                ContentPart::Text(t) => Some(t.as_str()),
                ContentPart::Image { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("");
        return WireContent::Text(text);
    }

    let wire_parts = parts
        .iter()
        .map(|part| match part {
            ContentPart::Text(text) => WirePart::Text { text: text.clone() },
            ContentPart::Image { media_type, data } => WirePart::ImageUrl {
                image_url: WireImageUrl { url: format!("data:{media_type};base64,{data}") },
            },
        })
        .collect();
    WireContent::Parts(wire_parts)
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

pub(crate) fn parse_response(json_text: &str) -> Result<ChatResponse, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let model = root
        .get("model")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default();
    let input_tokens = root
        .get("usage")
        .and_then(|u| u.get("prompt_tokens"))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let output_tokens = root
        .get("usage")
        .and_then(|u| u.get("completion_tokens"))
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0]".to_string()));
    };

    let text = choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_owned();
    if text.is_empty() {
        return Err(LlmError::EmptyResponse);
    }

    Ok(ChatResponse { text, model, input_tokens, output_tokens })
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
