
use super::*;

#[test]
fn bare_text_passes_through() {
    assert_eq!(unwrap_envelope("flow\n[start] A"), "flow\n[start] A");
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    assert_eq!(unwrap_envelope("  \nflow\n  "), "flow");
}

#[test]
fn fence_without_language_tag() {
    assert_eq!(unwrap_envelope("```\nflow\n[start] A\n```"), "flow\n[start] A");
}

#[test]
fn fence_with_language_tag() {
    assert_eq!(unwrap_envelope("```flowmind\nflow\n[start] A\n```"), "flow\n[start] A");
}

#[test]
fn unterminated_fence_is_tolerated() {
    assert_eq!(unwrap_envelope("```\nflow\n[start] A"), "flow\n[start] A");
}

#[test]
fn empty_fence_yields_empty_string() {
    assert_eq!(unwrap_envelope("```\n```"), "");
    assert_eq!(unwrap_envelope("```"), "");
}

#[test]
fn trailing_closer_without_opener_is_stripped() {
    assert_eq!(unwrap_envelope("flow\n[start] A\n```"), "flow\n[start] A");
}

#[test]
fn marker_after_the_block_does_not_leak_through() {
    // A stray closer plus trailing whitespace must not reach the parser.
    let input = "```flowmind\nflow\n[start] A\n```\n   ";
    assert_eq!(unwrap_envelope(input), "flow\n[start] A");
}

#[test]
fn every_marker_is_removed_globally() {
    let input = "```\nflow\n```\n```yaml\n[start] A\n```";
    assert_eq!(unwrap_envelope(input), "flow\n\n\n[start] A");
}

#[test]
fn inner_content_is_not_mangled() {
    // A pipe label containing backticks must survive.
    let input = "```\nA ->|use `flow`| B\n```";
    assert_eq!(unwrap_envelope(input), "A ->|use `flow`| B");
}
