//! Profile settings validation

use kernel::form::FieldErrors;
use url::Url;

pub const DISPLAY_NAME_MAX_LENGTH: usize = 50;
pub const BIO_MAX_LENGTH: usize = 300;

/// Raw settings form values
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub display_name: String,
    pub bio: Option<String>,
    pub website_url: Option<String>,
}

/// Validated settings; an empty `website_url` clears the link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSettings {
    pub display_name: String,
    pub bio: Option<String>,
    pub website_url: String,
}

impl ProfileSettings {
    pub fn parse(fields: ProfileFields) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name_len = fields.display_name.chars().count();
        if name_len == 0 {
            errors.add("display_name", "Display name is required");
        } else if name_len > DISPLAY_NAME_MAX_LENGTH {
            errors.add("display_name", "Display name must be at most 50 characters");
        }

        let bio = fields.bio.filter(|b| !b.is_empty());
        if bio.as_ref().is_some_and(|b| b.chars().count() > BIO_MAX_LENGTH) {
            errors.add("bio", "Bio must be at most 300 characters");
        }

        let website_url = errors.check(
            "website_url",
            normalize_website(fields.website_url.as_deref()),
        );

        match website_url {
            Some(website_url) if errors.is_empty() => Ok(Self {
                display_name: fields.display_name,
                bio,
                website_url,
            }),
            _ => Err(errors),
        }
    }
}

/// Blank stays blank; a bare host gets `https://`; the result must parse
pub fn normalize_website(raw: Option<&str>) -> Result<String, &'static str> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    let lower = trimmed.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    Url::parse(&candidate)
        .map(|_| candidate)
        .map_err(|_| "Must be a valid URL")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_website_normalization() {
        assert_eq!(normalize_website(None), Ok(String::new()));
        assert_eq!(normalize_website(Some("   ")), Ok(String::new()));
        assert_eq!(
            normalize_website(Some(" example.com ")),
            Ok("https://example.com".to_string())
        );
        assert_eq!(
            normalize_website(Some("HTTP://example.com/me")),
            Ok("HTTP://example.com/me".to_string())
        );
        assert_eq!(
            normalize_website(Some("not a url")),
            Err("Must be a valid URL")
        );
    }

    #[test]
    fn test_display_name_required() {
        let errors = ProfileSettings::parse(ProfileFields::default()).unwrap_err();
        assert_eq!(
            errors.get("display_name"),
            Some(&["Display name is required".to_string()][..])
        );
    }

    #[test]
    fn test_valid_settings() {
        let settings = ProfileSettings::parse(ProfileFields {
            display_name: "Ada".to_string(),
            bio: Some(String::new()),
            website_url: Some("ada.dev".to_string()),
        })
        .unwrap();

        assert_eq!(settings.bio, None);
        assert_eq!(settings.website_url, "https://ada.dev");
    }

    #[test]
    fn test_long_bio_rejected() {
        let errors = ProfileSettings::parse(ProfileFields {
            display_name: "Ada".to_string(),
            bio: Some("b".repeat(301)),
            website_url: None,
        })
        .unwrap_err();
        assert!(errors.get("bio").is_some());
    }
}
