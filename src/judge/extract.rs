use log::{ debug, warn };

use crate::models::{ Verdict, VerdictReport };

const FENCE: &str = "```";

type Extractor = fn(&str) -> Option<&str>;

/// Ways to locate the JSON payload in a response, tried in order
const EXTRACTORS: &[(&str, Extractor)] = &[
    ("json fence", json_fence),
    ("bare fence", bare_fence),
    ("raw text", raw_text),
];

fn json_fence(text: &str) -> Option<&str> {
    fenced(text, "```json")
}

fn bare_fence(text: &str) -> Option<&str> {
    fenced(text, FENCE)
}

fn raw_text(text: &str) -> Option<&str> {
    Some(text.trim())
}

/// Content between `opening` and the next fence. An unclosed fence runs to
/// the end of the text.
fn fenced<'a>(text: &'a str, opening: &str) -> Option<&'a str> {
    let start = text.find(opening)? + opening.len();
    let rest = &text[start..];
    let end = rest.find(FENCE).unwrap_or(rest.len());
    Some(rest[..end].trim())
}

/// Locate the JSON payload inside a free-form response
pub fn extract_json(text: &str) -> &str {
    for (name, extractor) in EXTRACTORS {
        if let Some(content) = extractor(text) {
            debug!("Extracted response payload using {}", name);
            return content;
        }
    }
    text
}

/// Normalize a raw service response into a verdict. Never fails: anything
/// that is not a report of the expected shape becomes `Verdict::Unparsed`.
pub fn parse_verdict(text: &str) -> Verdict {
    let payload = extract_json(text);

    match serde_json::from_str::<VerdictReport>(payload) {
        Ok(report) => Verdict::Parsed(report),
        Err(e) => {
            warn!("Failed to parse JSON response: {}", e);
            debug!("Raw response: {}", text);
            Verdict::Unparsed {
                raw_text: text.to_string(),
                error: e.to_string(),
            }
        }
    }
}
