//! Generation — natural language → DSL text via an LLM, then the pipeline.
//!
//! DESIGN
//! ======
//! The model is prompted with a fixed system instruction describing the DSL
//! grammar, the running conversation history, a compact JSON summary of the
//! live canvas, and optionally an inline image to transcribe. The model's
//! reply is treated as DSL text and handed to [`crate::pipeline::run`]
//! unmodified; envelope stripping and all validation happen there.
//!
//! Upstream failures are fatal for the run. No automatic retry: the caller
//! (a human iterating on a diagram) re-prompts.

use serde_json::json;
use tracing::info;

use crate::canvas::{Canvas, Snapshot};
use crate::error::ErrorCode;
use crate::layout::LayoutEngine;
use crate::llm::{ContentPart, LlmChat, LlmError, Message};
use crate::pipeline::{self, PipelineError, PipelineOptions, PipelineReport};

const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Grammar brief sent as the system prompt on every generation call.
const SYSTEM_INSTRUCTION: &str = r#"You are an assistant that converts plain human language into a flow-diagram DSL.

Your job:
- Read any messy, casual, incomplete, or informal description of a flow.
- If a conversation history is provided, use it to understand the context and refinements requested by the user.
- If an image is provided, analyze the flowchart, diagram, or sketch in the image and convert it into the DSL.
- Infer missing steps when they are obvious.
- Keep node labels short, clear, and human-readable.
- Use correct node types wherever possible; if unsure, default to [process].
- Always output only DSL, nothing else.

Rules you must follow:

1. Always start with a document header: `flow` on the first line, then `direction` (default to TB unless the user implies horizontal).

2. Supported node types: [start], [end], [process], [decision], [system], [note], [section], [browser] (web pages), [mobile] (mobile apps), [button] (UI buttons), [input] (text fields), [icon], [image].

3. Connections: use `->`; use `->|label|` for decision paths.

4. Strict structure: define all nodes first, then all edges. Never mix them. `[start] A -> [end] B` is INVALID; write `[start] A` on one line, `[end] B` on another, then `A -> B`.

5. Use `#` comments only when they add clarity.

6. Do NOT explain the output. Do NOT add prose. Only output DSL.

7. Node IDs: if the label is simple (e.g. "Login"), use it directly: `[process] Login`. If the label is long, use an explicit id: `[process] login_step: User enters credentials`."#;

// =============================================================================
// TYPES
// =============================================================================

/// One turn of the generation conversation, kept by the caller and replayed
/// on each request so the model sees its own prior DSL output.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    /// `"user"` or `"assistant"`.
    pub role: String,
    pub text: String,
}

impl ChatTurn {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: "user".into(), text: text.into() }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: "assistant".into(), text: text.into() }
    }
}

/// An image attached to a generation request, as a browser-style data URL
/// (`data:image/png;base64,...`) or raw base64.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub data_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("upstream generation error: {0}")]
    Upstream(#[from] LlmError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ErrorCode for GenerateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Upstream(_) => "E_UPSTREAM_GENERATION",
            Self::Pipeline(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Upstream(e) => e.retryable(),
            Self::Pipeline(e) => e.retryable(),
        }
    }
}

// =============================================================================
// PROMPT ASSEMBLY
// =============================================================================

/// Compact JSON summary of the live canvas, included in the user message so
/// the model can update the existing diagram instead of inventing a new one.
#[must_use]
pub fn snapshot_summary(snapshot: &Snapshot) -> String {
    let nodes: Vec<_> = snapshot
        .nodes
        .iter()
        .map(|n| {
            json!({
                "id": n.id,
                "type": n.kind,
                "label": n.data.label,
                "description": n.data.sub_label,
                "x": n.position.x,
                "y": n.position.y,
            })
        })
        .collect();
    let edges: Vec<_> = snapshot
        .edges
        .iter()
        .map(|e| json!({ "source": e.source, "target": e.target, "label": e.label }))
        .collect();
    json!({ "nodes": nodes, "edges": edges }).to_string()
}

/// Split a data URL into `(media_type, base64)`. Raw base64 without the
/// `data:` prefix is passed through as PNG.
fn split_data_url(data_url: &str) -> (String, String) {
    if let Some(rest) = data_url.strip_prefix("data:") {
        if let Some((header, payload)) = rest.split_once(";base64,") {
            return (header.to_owned(), payload.to_owned());
        }
    }
    ("image/png".to_owned(), data_url.to_owned())
}

fn build_messages(
    history: &[ChatTurn],
    prompt: &str,
    image: Option<&ImageAttachment>,
    snapshot: &Snapshot,
) -> Vec<Message> {
    let mut messages: Vec<Message> =
        history.iter().map(|turn| Message::text(turn.role.clone(), turn.text.clone())).collect();

    let mut request = format!("User Request: {prompt}\n");
    if !snapshot.nodes.is_empty() {
        let summary = snapshot_summary(snapshot);
        request.push_str("\nCURRENT CONTENT (the user wants to update this):\n");
        request.push_str(&summary);
        request.push('\n');
    }
    request.push_str("\nGenerate or update the DSL based on this request.");

    let mut message = Message::text("user", request);
    if let Some(image) = image {
        let (media_type, data) = split_data_url(&image.data_url);
        message.parts.push(ContentPart::Image { media_type, data });
    }
    messages.push(message);
    messages
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Ask the LLM for DSL text. Returns the raw model reply, which may still be
/// wrapped in a code fence.
///
/// # Errors
///
/// Returns [`GenerateError::Upstream`] when the provider call fails or the
/// reply is empty.
pub async fn generate_dsl(
    llm: &dyn LlmChat,
    history: &[ChatTurn],
    prompt: &str,
    image: Option<&ImageAttachment>,
    snapshot: &Snapshot,
) -> Result<String, GenerateError> {
    let messages = build_messages(history, prompt, image, snapshot);
    let response = llm.chat(DEFAULT_MAX_TOKENS, SYSTEM_INSTRUCTION, &messages).await?;
    info!(
        model = %response.model,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "generation: model reply received"
    );
    Ok(response.text)
}

/// Full prompt-to-canvas run: generate DSL from the prompt, then feed it
/// through the pipeline against `canvas`. Appends the exchange to `history`
/// on success so followup prompts refine the same diagram.
///
/// # Errors
///
/// Returns [`GenerateError`] when the upstream call or any pipeline stage
/// fails; the canvas is unchanged in either case.
pub async fn generate_and_apply(
    canvas: &Canvas,
    engine: &dyn LayoutEngine,
    llm: &dyn LlmChat,
    history: &mut Vec<ChatTurn>,
    prompt: &str,
    image: Option<&ImageAttachment>,
    options: &PipelineOptions,
) -> Result<PipelineReport, GenerateError> {
    let snapshot = canvas.read_snapshot().await;
    let dsl_text = generate_dsl(llm, history, prompt, image, &snapshot).await?;
    let report = pipeline::run(canvas, engine, &dsl_text, options).await?;

    let user_text = if image.is_some() { format!("{prompt} [Image Attached]") } else { prompt.to_owned() };
    history.push(ChatTurn::user(user_text));
    history.push(ChatTurn::assistant(dsl_text));
    Ok(report)
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
