use serde_json::Value;

/// Most `{` positions tried before giving up.
pub const MAX_CANDIDATES: usize = 64;

// ============================================================================
// Public API
// ============================================================================

/// Locate the first well-formed JSON object embedded in free-form text.
///
/// Model replies may wrap the object in prose or code fences. Each `{` is
/// tried in order: its matching `}` is found with string and escape
/// awareness, and the span is returned if it parses as a JSON object.
/// At most [`MAX_CANDIDATES`] openings are tried, so the scan is linear in
/// the length of `text`.
///
/// # Example
/// ```rust
/// use inkwell_core::helper_utils::json::extract_json_object;
///
/// let text = "Sure! ```json\n{\"subject\": \"Hi\"}\n``` Hope that helps.";
/// assert_eq!(extract_json_object(text), Some("{\"subject\": \"Hi\"}"));
/// ```
pub fn extract_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut from = 0;
    for _ in 0..MAX_CANDIDATES {
        let Some(offset) = text[from..].find('{') else {
            break;
        };
        let open = from + offset;
        if let Some(close) = matching_brace(bytes, open) {
            let candidate = &text[open..=close];
            if is_json_object(candidate) {
                return Some(candidate);
            }
        }
        from = open + 1;
    }
    None
}

// ============================================================================
// Internal Implementation
// ============================================================================

/// Index of the `}` closing the `{` at `open`, skipping braces inside
/// string literals. Delimiters are ASCII, so byte indices are always on
/// char boundaries.
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(open) {
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
            b'{' => depth += 1,
            b'}' => {
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

fn is_json_object(candidate: &str) -> bool {
    matches!(serde_json::from_str::<Value>(candidate), Ok(Value::Object(_)))
}
