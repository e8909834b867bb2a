//! One-time token purpose

use std::fmt;

/// What a one-time token may be redeemed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Email confirmation sent after sign-up
    Signup,
    /// Authorization code redeemed at `/auth/callback`
    Code,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Signup => "signup",
            TokenKind::Code => "code",
        }
    }

    /// `type` query value of a confirmation link; `email` is an alias of `signup`
    pub fn from_otp_type(value: &str) -> Option<Self> {
        match value {
            "signup" | "email" => Some(TokenKind::Signup),
            _ => None,
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "signup" => Some(TokenKind::Signup),
            "code" => Some(TokenKind::Code),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_type_parsing() {
        assert_eq!(TokenKind::from_otp_type("signup"), Some(TokenKind::Signup));
        assert_eq!(TokenKind::from_otp_type("email"), Some(TokenKind::Signup));
        // codes are only redeemed through the callback route
        assert_eq!(TokenKind::from_otp_type("code"), None);
        assert_eq!(TokenKind::from_otp_type("recovery"), None);
    }

    #[test]
    fn test_db_roundtrip() {
        for kind in [TokenKind::Signup, TokenKind::Code] {
            assert_eq!(TokenKind::from_db(kind.as_str()), Some(kind));
        }
    }
}
