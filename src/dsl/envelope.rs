//! Code-fence unwrapping for generated text.
//!
//! Upstream text generation often wraps DSL output in a fenced block, with
//! or without a language tag, and sometimes leaves a stray marker before or
//! after the block. Every fence marker is stripped, wherever it appears, so
//! a dangling opener or closer never reaches the grammar parser. Fence
//! stripping lives here, decoupled from the parser, and tolerates fences
//! being absent entirely.

/// Strip every code-fence marker from generated text.
///
/// A marker is a ``` sequence plus any language tag glued to it. Markers
/// are removed globally, not just at the edges, so a marker in the middle of
/// a reply never surfaces as a syntax error.
#[must_use]
pub fn unwrap_envelope(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find("```") {
        out.push_str(&rest[..idx]);
        rest = &rest[idx + 3..];
        // Drop a language tag glued to the marker.
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_' && c != '-')
            .unwrap_or(rest.len());
        rest = &rest[tag_len..];
    }
    out.push_str(rest);

    out.trim().to_owned()
}

#[cfg(test)]
#[path = "envelope_test.rs"]
mod tests;
