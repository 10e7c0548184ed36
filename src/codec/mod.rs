//! Array-literal text codec.
//!
//! Converts an ordered list of strings to and from the single-column text
//! form `{e1,e2,...}` used by the task tables. Elements that would be
//! ambiguous when comma-joined are double-quoted, and `\` / `"` inside an
//! element are backslash-escaped.

pub mod string_array;

pub use string_array::StringArray;

/// Characters that force an escaped token into double quotes.
const SPECIAL_CHARS: &[char] = &[',', '{', '}', '"', '\\', ' '];

/// Literal for the empty list.
pub const EMPTY_LITERAL: &str = "{}";

/// Encode a list of strings as array-literal text.
///
/// Total over all inputs: an empty iterator yields `{}` and empty elements
/// are always written as `""`.
pub fn encode<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::from("{");
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_token(&mut out, value.as_ref());
    }
    out.push('}');
    out
}

fn push_token(out: &mut String, value: &str) {
    let escaped = escape_element(value);
    if escaped.is_empty() || needs_quoting(&escaped) {
        out.push('"');
        out.push_str(&escaped);
        out.push('"');
    } else {
        out.push_str(&escaped);
    }
}

/// Backslash-escape `\` and `"`. Backslashes go first so the escapes
/// added for quotes are not doubled.
fn escape_element(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// True when an already-escaped token must be wrapped in double quotes.
pub fn needs_quoting(token: &str) -> bool {
    token.contains(SPECIAL_CHARS)
}

/// Decode array-literal text into its list of strings.
///
/// Accepts `&str` or `Option<&str>`; `None` and `""` both mean "never set"
/// and decode to an empty list. Malformed input is decoded permissively.
pub fn decode<'a>(text: impl Into<Option<&'a str>>) -> Vec<String> {
    let Some(text) = text.into() else {
        return Vec::new();
    };

    let body = strip_braces(text);
    if body.is_empty() {
        return Vec::new();
    }

    let mut values = Vec::new();
    let mut current = String::new();
    // Set once the current token has seen a quote, so `""` survives as an
    // empty element while a bare empty trailing token is dropped.
    let mut quoted = false;
    let mut in_quotes = false;
    let mut escaped = false;

    for ch in body.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }

        match ch {
            '\\' => escaped = true,
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            ',' if !in_quotes => {
                values.push(std::mem::take(&mut current));
                quoted = false;
            }
            _ => current.push(ch),
        }
    }

    if in_quotes || escaped {
        tracing::debug!(
            unbalanced_quote = in_quotes,
            dangling_escape = escaped,
            "Decoded malformed array literal"
        );
    }

    if !current.is_empty() || quoted {
        values.push(current);
    }

    values
}

/// Decode raw column bytes. Invalid UTF-8 is replaced with U+FFFD first.
pub fn decode_bytes(bytes: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(bytes);
    decode(&*text)
}

/// True when `text` is exactly what `encode` would write for its contents.
pub fn is_canonical(text: &str) -> bool {
    encode(decode(text)) == text
}

fn strip_braces(text: &str) -> &str {
    if text.len() > 1 && text.starts_with('{') && text.ends_with('}') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
