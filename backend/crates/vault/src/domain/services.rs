//! Domain Services
//!
//! Template variables: `{{ name }}` placeholders inside prompt content.
//! A name is ASCII word characters and whitespace, trimmed.

use std::collections::HashMap;

/// A placeholder found in the content
struct Placeholder<'a> {
    start: usize,
    end: usize,
    name: &'a str,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace()
}

/// Try to read a placeholder starting at `start` (which points at `{{`)
fn placeholder_at(content: &str, start: usize) -> Option<Placeholder<'_>> {
    let inner_start = start + 2;
    let rest = &content[inner_start..];
    let inner_len = rest
        .char_indices()
        .find(|&(_, c)| !is_name_char(c))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());

    if inner_len == 0 || !rest[inner_len..].starts_with("}}") {
        return None;
    }

    Some(Placeholder {
        start,
        end: inner_start + inner_len + 2,
        name: rest[..inner_len].trim(),
    })
}

fn placeholders(content: &str) -> Vec<Placeholder<'_>> {
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(offset) = content[pos..].find("{{") {
        let start = pos + offset;
        match placeholder_at(content, start) {
            Some(p) => {
                pos = p.end;
                found.push(p);
            }
            // `{` is one byte, so this stays on a char boundary
            None => pos = start + 1,
        }
    }

    found
}

/// Variable names in order of first appearance, without duplicates
pub fn template_variables(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for p in placeholders(content) {
        if !p.name.is_empty() && !names.iter().any(|n| n == p.name) {
            names.push(p.name.to_string());
        }
    }
    names
}

/// Replace placeholders with the supplied values.
///
/// Missing or empty values leave a normalized `{{name}}` in place.
pub fn render_template(content: &str, values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(content.len());
    let mut last = 0;

    for p in placeholders(content) {
        out.push_str(&content[last..p.start]);
        match values.get(p.name).filter(|v| !v.is_empty()) {
            Some(value) => out.push_str(value),
            None => {
                out.push_str("{{");
                out.push_str(p.name);
                out.push_str("}}");
            }
        }
        last = p.end;
    }

    out.push_str(&content[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variables_in_first_appearance_order() {
        let content = "Write a {{ tone }} post about {{topic}} in a {{tone}} voice";
        assert_eq!(template_variables(content), vec!["tone", "topic"]);
    }

    #[test]
    fn test_multi_word_names_are_trimmed() {
        assert_eq!(
            template_variables("Hello {{  target audience }}!"),
            vec!["target audience"]
        );
    }

    #[test]
    fn test_ignores_malformed_placeholders() {
        assert!(template_variables("{{}} {{a-b}} {{ open").is_empty());
        assert!(template_variables("no variables here").is_empty());
        assert_eq!(template_variables("{{{name}}}"), vec!["name"]);
    }

    #[test]
    fn test_render_fills_known_values() {
        let mut values = HashMap::new();
        values.insert("topic".to_string(), "Rust".to_string());
        values.insert("tone".to_string(), String::new());

        assert_eq!(
            render_template("A {{ tone }} post about {{topic}}.", &values),
            "A {{tone}} post about Rust."
        );
    }

    #[test]
    fn test_render_handles_multibyte_text() {
        let mut values = HashMap::new();
        values.insert("名前".to_string(), "x".to_string());
        values.insert("who".to_string(), "世界".to_string());
        assert_eq!(
            render_template("こんにちは {{who}} {{名前}}", &values),
            "こんにちは 世界 {{名前}}"
        );
    }
}
