//! XML entity decoding and escaping.
//!
//! Handles the built-in entities (&lt; &gt; &amp; &quot; &apos;) and numeric
//! character references. Uses Cow for zero-copy when no entities are present.

use memchr::memchr;
use std::borrow::Cow;

/// Decode entity references in text or attribute content.
///
/// Returns Borrowed if no entities are present (zero-copy),
/// Owned if anything was decoded. Unknown entities are kept as-is.
pub fn decode(input: &str) -> Cow<'_, str> {
    if memchr(b'&', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }
    Cow::Owned(decode_slow(input))
}

fn decode_slow(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut result = String::with_capacity(input.len());
    let mut pos = 0;

    while pos < bytes.len() {
        match memchr(b'&', &bytes[pos..]) {
            Some(amp) => {
                result.push_str(&input[pos..pos + amp]);
                pos += amp;

                // Entity body runs to the next ';'
                match memchr(b';', &bytes[pos..]) {
                    Some(semi) => {
                        let entity = &input[pos + 1..pos + semi];
                        match decode_entity(entity) {
                            Some(decoded) => {
                                result.push_str(&decoded);
                                pos += semi + 1;
                            }
                            None => {
                                result.push('&');
                                pos += 1;
                            }
                        }
                    }
                    None => {
                        result.push('&');
                        pos += 1;
                    }
                }
            }
            None => {
                result.push_str(&input[pos..]);
                break;
            }
        }
    }

    result
}

/// Decode a single entity body (the part between '&' and ';').
fn decode_entity(entity: &str) -> Option<String> {
    if let Some(numeric) = entity.strip_prefix('#') {
        return decode_numeric(numeric);
    }
    match entity {
        "lt" => Some("<".to_string()),
        "gt" => Some(">".to_string()),
        "amp" => Some("&".to_string()),
        "quot" => Some("\"".to_string()),
        "apos" => Some("'".to_string()),
        _ => None,
    }
}

/// Decode a numeric character reference body: "123" or "x7B".
fn decode_numeric(body: &str) -> Option<String> {
    let code = if let Some(hex) = body.strip_prefix('x').or_else(|| body.strip_prefix('X')) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        body.parse::<u32>().ok()?
    };
    char::from_u32(code).map(|c| c.to_string())
}

/// Escape XML special characters into the buffer.
#[inline]
pub fn escape_into(s: &str, buf: &mut String) {
    for c in s.chars() {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' => buf.push_str("&quot;"),
            _ => buf.push(c),
        }
    }
}
