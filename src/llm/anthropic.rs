//! Anthropic Messages API client.
//!
//! Thin HTTP wrapper for `/v1/messages`. Pure parsing in `parse_response`
//! for testability. Inline images ride along as base64 source blocks.

use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{ChatResponse, ContentPart, LlmError, Message};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

// =============================================================================
// CLIENT
// =============================================================================

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key })
    }

    pub async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let wire_messages: Vec<WireMessage> = messages.iter().map(WireMessage::from).collect();
        let body = ApiRequest { model, max_tokens, system, messages: &wire_messages };

        let response = self
            .http
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
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
    system: &'a str,
    messages: &'a [WireMessage],
}

#[derive(serde::Serialize)]
struct WireMessage {
    role: String,
    content: Vec<WireBlock>,
}

#[derive(serde::Serialize)]
#[serde(tag = "type")]
enum WireBlock {
    #[serde(rename = "text")]
    Text { text: String },

    #[serde(rename = "image")]
    Image { source: WireImageSource },
}

#[derive(serde::Serialize)]
struct WireImageSource {
    #[serde(rename = "type")]
    source_type: &'static str,
    media_type: String,
    data: String,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        let content = message
            .parts
            .iter()
            .map(|part| match part {
                ContentPart::Text(text) => WireBlock::Text { text: text.clone() },
                ContentPart::Image { media_type, data } => WireBlock::Image {
                    source: WireImageSource {
                        source_type: "base64",
                        media_type: media_type.clone(),
                        data: data.clone(),
                    },
                },
            })
            .collect();
        Self { role: message.role.clone(), content }
    }
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    content: Vec<ResponseBlock>,
    model: String,
    usage: Usage,
}

#[derive(serde::Deserialize)]
struct ResponseBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(serde::Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<ChatResponse, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let text: String = api
        .content
        .iter()
        .filter_map(|block| block.text.as_deref())
        .collect::<Vec<_>>()
        .join("\n");
    if text.is_empty() {
        return Err(LlmError::EmptyResponse);
    }

    Ok(ChatResponse {
        text,
        model: api.model,
        input_tokens: api.usage.input_tokens,
        output_tokens: api.usage.output_tokens,
    })
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
