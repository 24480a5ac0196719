
use super::*;

#[test]
fn parse_text_response() {
    let json = serde_json::json!({
        "content": [{ "type": "text", "text": "flow\ndirection TB" }],
        "model": "claude-sonnet-4-5-20250929",
        "stop_reason": "end_turn",
        "usage": { "input_tokens": 12, "output_tokens": 7 }
    })
    .to_string();
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.text, "flow\ndirection TB");
    assert_eq!(resp.input_tokens, 12);
    assert_eq!(resp.output_tokens, 7);
}

#[test]
fn parse_multiple_text_blocks_joined() {
    let json = serde_json::json!({
        "content": [
            { "type": "text", "text": "flow" },
            { "type": "text", "text": "[start] A" }
        ],
        "model": "claude-sonnet-4-5-20250929",
        "usage": { "input_tokens": 1, "output_tokens": 1 }
    })
    .to_string();
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.text, "flow\n[start] A");
}

#[test]
fn parse_empty_content_is_error() {
    let json = serde_json::json!({
        "content": [],
        "model": "claude-sonnet-4-5-20250929",
        "usage": { "input_tokens": 1, "output_tokens": 0 }
    })
    .to_string();
    assert!(matches!(parse_response(&json), Err(LlmError::EmptyResponse)));
}

#[test]
fn image_part_serializes_as_base64_source() {
    let message = Message {
        role: "user".into(),
        parts: vec![ContentPart::Image { media_type: "image/png".into(), data: "QUJD".into() }],
    };
    let wire = WireMessage::from(&message);
    let value = serde_json::to_value(&wire).unwrap();
    assert_eq!(value["content"][0]["type"], "image");
    assert_eq!(value["content"][0]["source"]["media_type"], "image/png");
    assert_eq!(value["content"][0]["source"]["data"], "QUJD");
}
