//! User Name Value Object
//!
//! ユーザー名はプロフィール URL (`/profile/{username}`) に使われる公開ハンドル。
//!
//! ## 不変条件
//! - 長さ: 3〜30文字
//! - 使用可能文字: `a-z`, `0-9`, `_` のみ（大文字は受け付けない）

use serde::{Deserialize, Serialize};
use std::fmt;

pub const USER_NAME_MIN_LENGTH: usize = 3;
pub const USER_NAME_MAX_LENGTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserNameError {
    #[error("Username must be at least {USER_NAME_MIN_LENGTH} characters")]
    TooShort,
    #[error("Username must be at most {USER_NAME_MAX_LENGTH} characters")]
    TooLong,
    #[error("Username can only contain lowercase letters, numbers, and underscores")]
    InvalidCharacter,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserNameError> {
        let raw = raw.as_ref();
        let len = raw.chars().count();

        if len < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort);
        }
        if len > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong);
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(UserNameError::InvalidCharacter);
        }

        Ok(Self(raw.to_string()))
    }

    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_names() {
        assert!(UserName::new("ada").is_ok());
        assert!(UserName::new("prompt_smith_42").is_ok());
        assert!(UserName::new("a".repeat(30)).is_ok());
    }

    #[test]
    fn test_length_limits() {
        assert_eq!(UserName::new("ab"), Err(UserNameError::TooShort));
        assert_eq!(UserName::new("a".repeat(31)), Err(UserNameError::TooLong));
    }

    #[test]
    fn test_rejects_characters_outside_pattern() {
        for bad in ["Alice", "dot.name", "dash-name", "space name", "名前です"] {
            assert_eq!(
                UserName::new(bad),
                Err(UserNameError::InvalidCharacter),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            UserNameError::TooShort.to_string(),
            "Username must be at least 3 characters"
        );
    }
}
