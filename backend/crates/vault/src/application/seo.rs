//! Search engine endpoints: sitemap.xml and robots.txt

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::application::config::VaultConfig;
use crate::domain::repository::{ProfileRepository, PromptRepository};
use crate::error::VaultResult;

/// `(path, changefreq, priority)`
const STATIC_ROUTES: &[(&str, &str, &str)] = &[
    ("", "daily", "1.0"),
    ("/feed", "always", "0.9"),
    ("/explore", "always", "0.8"),
    ("/creators", "daily", "0.7"),
];

const ROBOTS_DISALLOW: &[&str] = &["/api/", "/profile/settings", "/prompts/new", "/prompts/*/edit"];

pub fn robots_txt(config: &VaultConfig) -> String {
    let mut out = String::from("User-Agent: *\nAllow: /\n");
    for path in ROBOTS_DISALLOW {
        let _ = writeln!(out, "Disallow: {path}");
    }
    let _ = write!(out, "\nSitemap: {}\n", config.absolute_url("/sitemap.xml"));
    out
}

/// Escape text for XML content and attribute values
pub(crate) fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn push_url(
    out: &mut String,
    loc: &str,
    last_modified: Option<DateTime<Utc>>,
    change_frequency: &str,
    priority: &str,
) {
    out.push_str("  <url>\n");
    let _ = writeln!(out, "    <loc>{}</loc>", xml_escape(loc));
    if let Some(ts) = last_modified {
        let _ = writeln!(
            out,
            "    <lastmod>{}</lastmod>",
            ts.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }
    let _ = writeln!(out, "    <changefreq>{change_frequency}</changefreq>");
    let _ = writeln!(out, "    <priority>{priority}</priority>");
    out.push_str("  </url>\n");
}

pub struct SitemapUseCase<P, R>
where
    P: PromptRepository,
    R: ProfileRepository,
{
    prompts: Arc<P>,
    profiles: Arc<R>,
    config: Arc<VaultConfig>,
}

impl<P, R> SitemapUseCase<P, R>
where
    P: PromptRepository,
    R: ProfileRepository,
{
    pub fn new(prompts: Arc<P>, profiles: Arc<R>, config: Arc<VaultConfig>) -> Self {
        Self {
            prompts,
            profiles,
            config,
        }
    }

    /// Static routes, then every public prompt, then every profile
    pub async fn execute(&self) -> VaultResult<String> {
        let batch = self.config.sitemap_batch_size;
        let mut out = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );

        for (path, freq, priority) in STATIC_ROUTES {
            push_url(&mut out, &self.config.absolute_url(path), None, freq, priority);
        }

        let mut offset = 0;
        loop {
            let stamps = self.prompts.public_stamps(offset, batch).await?;
            for stamp in &stamps {
                let loc = self.config.absolute_url(&format!("/prompts/{}", stamp.id));
                push_url(&mut out, &loc, Some(stamp.updated_at), "weekly", "0.6");
            }
            if (stamps.len() as i64) < batch {
                break;
            }
            offset += batch;
        }

        let mut offset = 0;
        loop {
            let stamps = self.profiles.stamps(offset, batch).await?;
            for stamp in &stamps {
                let loc = self
                    .config
                    .absolute_url(&format!("/profile/{}", stamp.username));
                push_url(&mut out, &loc, Some(stamp.updated_at), "weekly", "0.5");
            }
            if (stamps.len() as i64) < batch {
                break;
            }
            offset += batch;
        }

        out.push_str("</urlset>\n");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots_txt() {
        let robots = robots_txt(&VaultConfig::development());
        assert!(robots.starts_with("User-Agent: *\nAllow: /\n"));
        assert!(robots.contains("Disallow: /api/\n"));
        assert!(robots.contains("Disallow: /prompts/*/edit\n"));
        assert!(robots.ends_with("Sitemap: http://localhost:3000/sitemap.xml\n"));
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(
            xml_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;"
        );
    }
}
