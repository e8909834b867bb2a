//! Prompt form validation
//!
//! 作成・編集フォームの生の入力を検証済みの [`PromptDraft`] に変換します。
//! エラーはフィールドごとにまとめて返します。

use kernel::form::FieldErrors;

use crate::domain::value_objects::{AiModel, Category};

pub const TITLE_MIN_LENGTH: usize = 3;
pub const TITLE_MAX_LENGTH: usize = 120;
pub const CONTENT_MIN_LENGTH: usize = 10;
pub const CONTENT_MAX_LENGTH: usize = 8000;
pub const DESCRIPTION_MAX_LENGTH: usize = 500;
pub const TAG_MAX_LENGTH: usize = 30;
pub const MAX_TAGS: usize = 10;

/// Raw form values as submitted
#[derive(Debug, Clone, Default)]
pub struct PromptFields {
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub model: String,
    pub category: String,
    /// Comma separated
    pub tags: Option<String>,
    pub is_public: bool,
}

/// Validated prompt values, ready to insert or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptDraft {
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub model: AiModel,
    pub category: Category,
    pub tags: Vec<String>,
    pub is_public: bool,
}

impl PromptDraft {
    pub fn parse(fields: PromptFields) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = errors.check(
            "title",
            bounded(
                fields.title,
                TITLE_MIN_LENGTH,
                TITLE_MAX_LENGTH,
                "Title must be at least 3 characters",
                "Title must be at most 120 characters",
            ),
        );
        let content = errors.check(
            "content",
            bounded(
                fields.content,
                CONTENT_MIN_LENGTH,
                CONTENT_MAX_LENGTH,
                "Content must be at least 10 characters",
                "Content must be at most 8000 characters",
            ),
        );

        let description = fields.description.filter(|d| !d.is_empty());
        if description
            .as_ref()
            .is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_LENGTH)
        {
            errors.add("description", "Description must be at most 500 characters");
        }

        let model = errors.check("model", AiModel::parse(&fields.model));
        let category = errors.check("category", Category::parse(&fields.category));

        let tags = split_tags(fields.tags.as_deref());
        if tags.iter().any(|t| t.chars().count() > TAG_MAX_LENGTH) {
            errors.add("tags", "String must contain at most 30 character(s)");
        }
        if tags.len() > MAX_TAGS {
            errors.add("tags", "Array must contain at most 10 element(s)");
        }

        match (title, content, model, category) {
            (Some(title), Some(content), Some(model), Some(category)) if errors.is_empty() => {
                Ok(Self {
                    title,
                    content,
                    description,
                    model,
                    category,
                    tags,
                    is_public: fields.is_public,
                })
            }
            _ => Err(errors),
        }
    }
}

fn bounded(
    value: String,
    min: usize,
    max: usize,
    too_short: &'static str,
    too_long: &'static str,
) -> Result<String, &'static str> {
    let len = value.chars().count();
    if len < min {
        Err(too_short)
    } else if len > max {
        Err(too_long)
    } else {
        Ok(value)
    }
}

/// `"AI, Writing ,,tips"` -> `["ai", "writing", "tips"]`
pub fn split_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> PromptFields {
        PromptFields {
            title: "Code reviewer".to_string(),
            content: "Review this {{ language }} code carefully".to_string(),
            description: Some(String::new()),
            model: "claude".to_string(),
            category: "coding".to_string(),
            tags: Some(" Rust, Review ,, ".to_string()),
            is_public: true,
        }
    }

    #[test]
    fn test_valid_draft() {
        let draft = PromptDraft::parse(fields()).unwrap();
        assert_eq!(draft.title, "Code reviewer");
        assert_eq!(draft.description, None);
        assert_eq!(draft.model, AiModel::Claude);
        assert_eq!(draft.category, Category::Coding);
        assert_eq!(draft.tags, vec!["rust", "review"]);
    }

    #[test]
    fn test_short_content_is_a_field_error() {
        let errors = PromptDraft::parse(PromptFields {
            content: "too short".to_string(),
            ..fields()
        })
        .unwrap_err();

        assert_eq!(
            errors.get("content"),
            Some(&["Content must be at least 10 characters".to_string()][..])
        );
        assert!(errors.get("title").is_none());
    }

    #[test]
    fn test_collects_every_failing_field() {
        let errors = PromptDraft::parse(PromptFields {
            title: "ab".to_string(),
            description: Some("d".repeat(501)),
            model: "gpt".to_string(),
            category: "cooking".to_string(),
            ..fields()
        })
        .unwrap_err();

        for field in ["title", "description", "model", "category"] {
            assert!(errors.get(field).is_some(), "missing error for {field}");
        }
    }

    #[test]
    fn test_tag_limits() {
        let many = (0..11).map(|i| format!("t{i}")).collect::<Vec<_>>().join(",");
        let errors = PromptDraft::parse(PromptFields {
            tags: Some(many),
            ..fields()
        })
        .unwrap_err();
        assert!(errors.get("tags").is_some());

        let errors = PromptDraft::parse(PromptFields {
            tags: Some("x".repeat(31)),
            ..fields()
        })
        .unwrap_err();
        assert!(errors.get("tags").is_some());
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags(Some("AI, Writing ,,tips")), vec!["ai", "writing", "tips"]);
        assert!(split_tags(Some(" , ")).is_empty());
        assert!(split_tags(None).is_empty());
    }
}
