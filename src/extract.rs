//! Response extraction: isolate the JSON payload inside a free-form model reply.
//!
//! Backends often wrap structured output in prose or markdown fences. Fences are matched left to
//! right and paired in order; a block without a closing fence runs to the end of the text.

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

const FENCE: &str = "```";

/// A fenced code block found in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FencedBlock<'a> {
    /// Info tag immediately after the opening fence (`json`, `yaml`, or empty)
    pub tag: &'a str,
    /// Raw block content, untrimmed
    pub body: &'a str,
    pub closed: bool,
}

/// All fenced blocks in `text`, in order of appearance.
pub fn fenced_blocks(text: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while let Some(open) = text[cursor..].find(FENCE) {
        let tag_start = cursor + open + FENCE.len();
        let tag_len = text[tag_start..]
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric())
            .count();
        let body_start = tag_start + tag_len;
        let tag = &text[tag_start..body_start];

        match text[body_start..].find(FENCE) {
            Some(close) => {
                let body_end = body_start + close;
                blocks.push(FencedBlock {
                    tag,
                    body: &text[body_start..body_end],
                    closed: true,
                });
                cursor = body_end + FENCE.len();
            }
            None => {
                blocks.push(FencedBlock {
                    tag,
                    body: &text[body_start..],
                    closed: false,
                });
                break;
            }
        }
    }

    blocks
}

/// Candidate JSON text for a raw response.
///
/// First `json`-tagged block, else first block of any tag, else the whole text; always trimmed.
/// Never fails: malformed content is detected by the parser downstream.
pub fn extract_json_payload(text: &str) -> &str {
    let blocks = fenced_blocks(text);
    let chosen = blocks
        .iter()
        .find(|block| block.tag.eq_ignore_ascii_case("json"))
        .or_else(|| blocks.first());

    match chosen {
        Some(block) => block.body.trim(),
        None => text.trim(),
    }
}

/// Parse the extracted payload as an object and read the `items_key` array.
///
/// A missing key is an empty result. A payload that is not an object, or an items value that
/// does not deserialize into `Vec<T>`, is a [`ApiError::ResponseParse`].
pub fn parse_items<T: DeserializeOwned>(payload: &str, items_key: &str) -> Result<Vec<T>, ApiError> {
    let value: Value = serde_json::from_str(payload)?;
    let Value::Object(mut object) = value else {
        return Err(ApiError::ResponseParse(format!(
            "expected a JSON object holding \"{}\"",
            items_key
        )));
    };

    match object.remove(items_key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(items) => serde_json::from_value(items).map_err(|e| {
            ApiError::ResponseParse(format!("\"{}\" does not match item shape: {}", items_key, e))
        }),
    }
}
