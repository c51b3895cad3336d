//! # Parsing Utils
//!
//! Utilities for parsing LLM responses: extracting the first top-level JSON
//! object from free text, and pulling fenced code blocks out of markdown.

use crate::domain::types::CodeBlock;
use regex::Regex;
use std::sync::OnceLock;

/// Extract the first top-level brace-matched JSON object found anywhere in
/// `text`. The scan is string- and escape-aware so braces inside string
/// literals do not unbalance the match. Returns the raw slice; the caller
/// decides whether it actually parses.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let start = text.find('{')?;

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
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

fn code_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(\w+)?\n(.*?)```").unwrap())
}

/// Extract fenced code blocks from markdown-formatted text. The fence
/// delimiters themselves are never part of the returned code.
pub fn extract_code_blocks(text: &str) -> Vec<CodeBlock> {
    code_block_regex()
        .captures_iter(text)
        .map(|caps| CodeBlock {
            language: caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "text".to_string()),
            code: caps
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_json_embedded_in_prose() {
        let text = "Sure! Here is the plan:\n{\"intent\": \"greet\", \"actions\": []}\nDone.";
        assert_eq!(
            extract_json_object(text),
            Some("{\"intent\": \"greet\", \"actions\": []}")
        );
    }

    #[test]
    fn test_braces_inside_strings_do_not_unbalance() {
        let text = r#"{"response": "use {braces} like } this", "actions": []}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_nested_objects_are_matched_whole() {
        let text = r#"noise {"a": {"b": {"c": 1}}} trailing"#;
        assert_eq!(extract_json_object(text), Some(r#"{"a": {"b": {"c": 1}}}"#));
    }

    #[test]
    fn test_no_json_returns_none() {
        assert_eq!(extract_json_object("just a plain sentence"), None);
        assert_eq!(extract_json_object("unterminated { here"), None);
    }

    #[test]
    fn test_escaped_quotes_inside_strings() {
        let text = r#"{"msg": "he said \"hi\" {"}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_extracts_code_blocks_with_language() {
        let text = "Here you go:\n```python\nprint('hi')\n```\nand\n```\nplain\n```";
        let blocks = extract_code_blocks(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].language, "python");
        assert_eq!(blocks[0].code, "print('hi')");
        assert_eq!(blocks[1].language, "text");
        assert_eq!(blocks[1].code, "plain");
    }

    #[test]
    fn test_code_blocks_never_contain_fences() {
        let text = "```python\nx = 1\n```";
        let blocks = extract_code_blocks(text);
        assert!(!blocks[0].code.contains("```"));
    }
}
