//! Application Configuration
//!
//! Page sizes and public URLs for the vault application layer.

/// Vault application configuration
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Absolute origin for sitemap entries, robots.txt and avatar URLs
    pub site_url: String,
    /// URL path the avatar directory is served under
    pub avatar_url_prefix: String,
    /// Feed page size
    pub page_size: i64,
    /// Creators suggested on an empty following tab
    pub suggestion_limit: i64,
    /// Explore result cap
    pub explore_limit: i64,
    /// Notifications per page
    pub notifications_page_size: i64,
    /// Creators page size
    pub creators_limit: i64,
    /// Rows fetched per sitemap query
    pub sitemap_batch_size: i64,
    /// Largest accepted avatar upload (bytes)
    pub avatar_max_bytes: usize,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            site_url: "https://promptvaultt.netlify.app".to_string(),
            avatar_url_prefix: "/avatars".to_string(),
            page_size: 20,
            suggestion_limit: 6,
            explore_limit: 30,
            notifications_page_size: 50,
            creators_limit: 20,
            sitemap_batch_size: 1000,
            avatar_max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl VaultConfig {
    /// Create config for development (local site URL)
    pub fn development() -> Self {
        Self {
            site_url: "http://localhost:3000".to_string(),
            ..Default::default()
        }
    }

    /// `site_url` joined with an absolute path
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.site_url.trim_end_matches('/'), path)
    }

    /// Public URL of a stored avatar, cache-busted with `t=<unix ms>`
    pub fn avatar_url(&self, object_path: &str, now_ms: i64) -> String {
        let prefix = self.avatar_url_prefix.trim_end_matches('/');
        self.absolute_url(&format!("{prefix}/{object_path}?t={now_ms}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VaultConfig::default();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.suggestion_limit, 6);
        assert_eq!(config.avatar_max_bytes, 5_242_880);
    }

    #[test]
    fn test_avatar_url() {
        let config = VaultConfig {
            site_url: "http://localhost:3000/".to_string(),
            ..VaultConfig::development()
        };
        assert_eq!(
            config.avatar_url("abc/avatar.png", 1700000000000),
            "http://localhost:3000/avatars/abc/avatar.png?t=1700000000000"
        );
    }
}
