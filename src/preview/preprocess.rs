//! Raw Text Normalisation
//!
//! Document bodies can arrive JSON-quoted, with a stray `[object Object]`
//! prefix, or with literal `\n` escapes instead of line breaks.

const OBJECT_ARTIFACT: &str = "[object Object]";

/// Strip one surrounding pair of double quotes
///
/// A lone `"` both starts and ends the string and becomes empty.
pub fn strip_wrapping_quotes(raw: &str) -> &str {
    if raw.starts_with('"') && raw.ends_with('"') {
        raw.get(1..raw.len() - 1).unwrap_or("")
    } else {
        raw
    }
}

/// Strip a leading `[object Object]` and the whitespace after it
pub fn strip_object_artifact(raw: &str) -> &str {
    match raw.strip_prefix(OBJECT_ARTIFACT) {
        Some(rest) => rest.trim_start(),
        None => raw,
    }
}

/// Turn literal backslash-n pairs into line breaks
pub fn expand_escaped_newlines(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

/// Apply all normalisation steps in order
pub fn preprocess(raw: &str) -> String {
    let text = strip_wrapping_quotes(raw);
    let text = strip_object_artifact(text);
    expand_escaped_newlines(text)
}

/// Split on line breaks, keeping empty lines and a trailing empty entry
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}
