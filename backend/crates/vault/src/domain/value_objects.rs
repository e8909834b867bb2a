//! Domain Value Objects
//!
//! Closed vocabularies stored as lowercase text columns.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A value that is not a member of one of the closed vocabularies
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid enum value. Expected {expected}, received '{received}'")]
pub struct InvalidChoice {
    expected: String,
    received: String,
}

impl InvalidChoice {
    fn new(choices: &[&str], received: &str) -> Self {
        let expected = choices
            .iter()
            .map(|c| format!("'{c}'"))
            .collect::<Vec<_>>()
            .join(" | ");
        Self {
            expected,
            received: received.to_string(),
        }
    }
}

/// Declares a lowercase text enum with `ALL`, `as_str` and `parse`.
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            pub fn parse(value: &str) -> Result<Self, InvalidChoice> {
                match value {
                    $($text => Ok($name::$variant),)+
                    other => Err(InvalidChoice::new(&[$($text),+], other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum! {
    /// Model a prompt was written for
    AiModel {
        ChatGpt => "chatgpt",
        Claude => "claude",
        Gemini => "gemini",
        Grok => "grok",
        Llama => "llama",
        Mistral => "mistral",
        Other => "other",
    }
}

text_enum! {
    Category {
        Coding => "coding",
        Writing => "writing",
        Marketing => "marketing",
        Design => "design",
        Business => "business",
        Education => "education",
        Productivity => "productivity",
        Creative => "creative",
        Research => "research",
        Other => "other",
    }
}

text_enum! {
    NotificationKind {
        Like => "like",
        Follow => "follow",
    }
}

impl Category {
    /// Listing filter: `all`, unknown values and absence mean no filter
    pub fn filter(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| Self::parse(v).ok())
    }
}

/// Named ordering/filter preset over the prompt listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedTab {
    #[default]
    Latest,
    Trending,
    Following,
}

impl FeedTab {
    /// Unknown or missing tabs fall back to `latest`
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("trending") => FeedTab::Trending,
            Some("following") => FeedTab::Following,
            _ => FeedTab::Latest,
        }
    }
}

/// Toggle relationships between a user and a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interaction {
    Like,
    Bookmark,
}

impl Interaction {
    pub fn table(&self) -> &'static str {
        match self {
            Interaction::Like => "likes",
            Interaction::Bookmark => "bookmarks",
        }
    }

    /// Denormalized counter on `prompts` kept in sync by triggers
    pub fn counter_column(&self) -> &'static str {
        match self {
            Interaction::Like => "like_count",
            Interaction::Bookmark => "bookmark_count",
        }
    }
}

pub const COMMENT_MAX_LENGTH: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Comment must be between 1 and 500 characters.")]
pub struct InvalidComment;

/// Trimmed comment text, 1..=500 characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBody(String);

impl CommentBody {
    pub fn new(raw: &str) -> Result<Self, InvalidComment> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len == 0 || len > COMMENT_MAX_LENGTH {
            return Err(InvalidComment);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!(AiModel::parse("claude"), Ok(AiModel::Claude));
        assert_eq!(Category::parse("research"), Ok(Category::Research));
        assert_eq!(AiModel::ChatGpt.as_str(), "chatgpt");
        assert_eq!(Category::ALL.len(), 10);
    }

    #[test]
    fn test_invalid_choice_lists_members() {
        let err = AiModel::parse("gpt5").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid enum value. Expected 'chatgpt' | 'claude' | 'gemini' | 'grok' | 'llama' | 'mistral' | 'other', received 'gpt5'"
        );
    }

    #[test]
    fn test_category_filter() {
        assert_eq!(Category::filter(Some("coding")), Some(Category::Coding));
        assert_eq!(Category::filter(Some("all")), None);
        assert_eq!(Category::filter(Some("cooking")), None);
        assert_eq!(Category::filter(None), None);
    }

    #[test]
    fn test_feed_tab_defaults_to_latest() {
        assert_eq!(FeedTab::from_query(Some("trending")), FeedTab::Trending);
        assert_eq!(FeedTab::from_query(Some("following")), FeedTab::Following);
        assert_eq!(FeedTab::from_query(Some("hot")), FeedTab::Latest);
        assert_eq!(FeedTab::from_query(None), FeedTab::Latest);
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Category::Productivity).unwrap(),
            "\"productivity\""
        );
        assert_eq!(serde_json::to_string(&FeedTab::Following).unwrap(), "\"following\"");
    }

    #[test]
    fn test_comment_body_bounds() {
        assert_eq!(CommentBody::new("  nice  ").unwrap().as_str(), "nice");
        assert_eq!(CommentBody::new("   "), Err(InvalidComment));
        assert!(CommentBody::new(&"a".repeat(500)).is_ok());
        assert_eq!(CommentBody::new(&"a".repeat(501)), Err(InvalidComment));
        // trimmed before measuring
        assert!(CommentBody::new(&format!("  {}  ", "a".repeat(500))).is_ok());
    }
}
