//! Tolerant extraction of JSON embedded in free-form model output.
//!
//! Generators wrap structured output in prose, code fences and `//` comments.
//! The helpers here recover the first balanced top-level object or array
//! without a regex: a small scanner tracks nesting depth and skips delimiters
//! that appear inside string literals (including escaped quotes).

/// Return the first balanced `{...}` span in `text`, if any.
///
/// When an opening brace never closes, scanning resumes at the next brace,
/// so stray braces in surrounding prose do not hide a later object.
pub fn extract_first_object(text: &str) -> Option<&str> {
    extract_balanced(text, b'{', b'}')
}

/// Return the first balanced `[...]` span in `text`, if any.
pub fn extract_first_array(text: &str) -> Option<&str> {
    extract_balanced(text, b'[', b']')
}

fn extract_balanced(text: &str, open: u8, close: u8) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut from = 0;

    while let Some(offset) = bytes[from..].iter().position(|&b| b == open) {
        let start = from + offset;
        if let Some(end) = find_closing(bytes, start, open, close) {
            // Delimiters are ASCII, so both ends sit on char boundaries.
            return Some(&text[start..=end]);
        }
        from = start + 1;
    }

    None
}

/// Index of the delimiter closing the one at `start`, skipping string literals.
fn find_closing(bytes: &[u8], start: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            _ if b == open => depth += 1,
            _ if b == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

/// Remove `//` line comments that sit outside string literals.
///
/// URLs inside JSON strings (`"https://..."`) are left untouched.
pub fn strip_line_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for (n, line) in text.lines().enumerate() {
        if n > 0 {
            out.push('\n');
        }
        out.push_str(&line[..comment_start(line).unwrap_or(line.len())]);
    }

    out
}

fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut escaped = false;

    for i in 0..bytes.len() {
        let b = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        if b == b'"' {
            in_string = true;
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            return Some(i);
        }
    }

    None
}

/// Drop commas that directly precede a closing `}` or `]` (outside strings).
pub fn strip_trailing_commas(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut keep = vec![true; bytes.len()];
    let mut in_string = false;
    let mut escaped = false;

    for i in 0..bytes.len() {
        let b = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b',' => {
                let next = bytes[i + 1..]
                    .iter()
                    .find(|c| !c.is_ascii_whitespace());
                if matches!(next, Some(b'}') | Some(b']')) {
                    keep[i] = false;
                }
            }
            _ => {}
        }
    }

    // Only ASCII commas are removed, so the result stays valid UTF-8.
    let filtered: Vec<u8> = bytes
        .iter()
        .zip(keep)
        .filter_map(|(&b, k)| k.then_some(b))
        .collect();
    String::from_utf8_lossy(&filtered).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_object_with_surrounding_prose() {
        let text = "Sure! Here is the graph:\n{\"nodes\": []}\nLet me know.";
        assert_eq!(extract_first_object(text), Some("{\"nodes\": []}"));
    }

    #[test]
    fn test_extract_object_nested() {
        let text = r#"x {"a": {"b": {"c": 1}}, "d": 2} y {"e": 3}"#;
        assert_eq!(
            extract_first_object(text),
            Some(r#"{"a": {"b": {"c": 1}}, "d": 2}"#)
        );
    }

    #[test]
    fn test_extract_object_braces_inside_strings() {
        let text = r#"{"description": "use } and { freely", "n": 1} trailing }"#;
        assert_eq!(
            extract_first_object(text),
            Some(r#"{"description": "use } and { freely", "n": 1}"#)
        );
    }

    #[test]
    fn test_extract_object_escaped_quote_inside_string() {
        let text = r#"{"s": "say \"}\" now", "k": true}"#;
        assert_eq!(extract_first_object(text), Some(text));
    }

    #[test]
    fn test_extract_object_plain_prose_returns_none() {
        assert_eq!(extract_first_object("plain text with no structure"), None);
    }

    #[test]
    fn test_extract_object_unclosed_then_valid() {
        let text = r#"a stray { brace, then {"ok": 1}"#;
        // The stray brace never closes at depth zero, so the scan restarts.
        assert_eq!(extract_first_object(text), Some(r#"{"ok": 1}"#));
    }

    #[test]
    fn test_extract_object_unbalanced_returns_none() {
        assert_eq!(extract_first_object(r#"{"a": {"b": 1}"#), None);
    }

    #[test]
    fn test_extract_object_multibyte_prose() {
        let text = "計画は次の通り → {\"k\": \"値\"} ✓";
        assert_eq!(extract_first_object(text), Some("{\"k\": \"値\"}"));
    }

    #[test]
    fn test_extract_array() {
        let text = "```json\n[{\"variable_name\": \"q1_freq\", \"value\": 4.87e9}]\n```";
        assert_eq!(
            extract_first_array(text),
            Some("[{\"variable_name\": \"q1_freq\", \"value\": 4.87e9}]")
        );
    }

    #[test]
    fn test_strip_line_comments_keeps_urls_in_strings() {
        let text = "{\n  \"url\": \"https://example.com\", // the source\n  \"n\": 1 // count\n}";
        let stripped = strip_line_comments(text);
        assert!(stripped.contains("\"https://example.com\","));
        assert!(!stripped.contains("the source"));
        assert!(!stripped.contains("count"));
        let value: serde_json::Value = serde_json::from_str(&stripped).unwrap();
        assert_eq!(value["n"], 1);
    }

    #[test]
    fn test_strip_trailing_commas() {
        let text = "[\n  {\"a\": 1, \"b\": \"x,]\",},\n]";
        let cleaned = strip_trailing_commas(text);
        let value: serde_json::Value = serde_json::from_str(&cleaned).unwrap();
        assert_eq!(value[0]["b"], "x,]");
    }
}
