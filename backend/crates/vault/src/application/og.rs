//! Social cards
//!
//! 1200x630 SVG images for link previews of prompts and profiles.

use std::fmt::Write as _;

use crate::application::seo::xml_escape;
use crate::domain::value_objects::Category;

pub const OG_WIDTH: u32 = 1200;
pub const OG_HEIGHT: u32 = 630;

const BG: &str = "#0f0f11";
const CARD: &str = "#1a1a1f";
const ACCENT: &str = "#7c3aed";
const MUTED: &str = "#6b7280";
const WHITE: &str = "#f9fafb";

const TITLE_MAX_CHARS: usize = 90;
const LINE_MAX_CHARS: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OgCard {
    Profile {
        name: String,
        username: String,
        followers: String,
    },
    Prompt {
        title: String,
        author: String,
        category: String,
        model: String,
    },
}

fn category_color(category: &str) -> &'static str {
    match Category::parse(category) {
        Ok(Category::Coding) => "#3b82f6",
        Ok(Category::Writing) => "#10b981",
        Ok(Category::Marketing) => "#f59e0b",
        Ok(Category::Design) => "#ec4899",
        Ok(Category::Business) => "#6366f1",
        Ok(Category::Education) => "#14b8a6",
        Ok(Category::Productivity) => "#8b5cf6",
        Ok(Category::Creative) => "#f97316",
        Ok(Category::Research) => "#06b6d4",
        Ok(Category::Other) => MUTED,
        Err(_) => ACCENT,
    }
}

/// Cut to `max` characters, ending with an ellipsis when shortened
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// `12345` -> `12,345`; anything unparsable counts as zero
fn group_digits(raw: &str) -> String {
    let digits = raw.trim().parse::<u64>().unwrap_or(0).to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Greedy word wrap for the title, at most two lines
fn wrap_title(title: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in title.split_whitespace() {
        let needed = current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
        if needed > LINE_MAX_CHARS && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > 2 {
        let rest = lines[1..].join(" ");
        lines.truncate(1);
        lines.push(truncate(&rest, LINE_MAX_CHARS));
    }
    lines
}

fn header(out: &mut String) {
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{OG_WIDTH}" height="{OG_HEIGHT}" viewBox="0 0 {OG_WIDTH} {OG_HEIGHT}">"#
    );
    let _ = write!(
        out,
        r#"<rect width="{OG_WIDTH}" height="{OG_HEIGHT}" fill="{BG}"/>"#
    );
    let _ = write!(
        out,
        r#"<text x="56" y="80" font-family="sans-serif" font-size="24" fill="{ACCENT}">✦</text><text x="90" y="80" font-family="sans-serif" font-size="22" font-weight="700" fill="{WHITE}">PromptVault</text>"#
    );
}

impl OgCard {
    pub fn render(&self) -> String {
        let mut out = String::new();
        header(&mut out);

        match self {
            OgCard::Profile {
                name,
                username,
                followers,
            } => {
                let initials: String = name.chars().take(2).collect::<String>().to_uppercase();
                let _ = write!(
                    out,
                    r#"<circle cx="116" cy="300" r="60" fill="{ACCENT}"/><text x="116" y="313" text-anchor="middle" font-family="sans-serif" font-size="36" font-weight="700" fill="{WHITE}">{}</text>"#,
                    xml_escape(&initials)
                );
                let _ = write!(
                    out,
                    r#"<text x="208" y="295" font-family="sans-serif" font-size="40" font-weight="800" fill="{WHITE}">{}</text>"#,
                    xml_escape(&truncate(name, LINE_MAX_CHARS))
                );
                let _ = write!(
                    out,
                    r#"<text x="208" y="335" font-family="sans-serif" font-size="20" fill="{MUTED}">@{}</text>"#,
                    xml_escape(&truncate(username, LINE_MAX_CHARS))
                );
                let _ = write!(
                    out,
                    r#"<rect x="56" y="440" width="220" height="110" rx="16" fill="{CARD}"/><text x="80" y="495" font-family="sans-serif" font-size="28" font-weight="700" fill="{WHITE}">{}</text><text x="80" y="525" font-family="sans-serif" font-size="14" fill="{MUTED}">followers</text>"#,
                    group_digits(followers)
                );
            }
            OgCard::Prompt {
                title,
                author,
                category,
                model,
            } => {
                let title = truncate(title, TITLE_MAX_CHARS);
                let font_size = if title.chars().count() > 60 { 36 } else { 48 };

                if !category.is_empty() {
                    let color = category_color(category);
                    let _ = write!(
                        out,
                        r#"<rect x="56" y="120" width="200" height="36" rx="18" fill="{color}" fill-opacity="0.13"/><text x="76" y="144" font-family="sans-serif" font-size="16" fill="{color}">{}</text>"#,
                        xml_escape(category)
                    );
                }

                for (i, line) in wrap_title(&title).iter().enumerate() {
                    let y = 280 + i as u32 * (font_size + 12);
                    let _ = write!(
                        out,
                        r#"<text x="56" y="{y}" font-family="sans-serif" font-size="{font_size}" font-weight="800" fill="{WHITE}">{}</text>"#,
                        xml_escape(line)
                    );
                }

                let _ = write!(
                    out,
                    r#"<circle cx="76" cy="540" r="20" fill="{ACCENT}"/><text x="108" y="547" font-family="sans-serif" font-size="18" fill="{MUTED}">{}</text>"#,
                    xml_escape(&truncate(author, LINE_MAX_CHARS))
                );

                if !model.is_empty() {
                    let _ = write!(
                        out,
                        r#"<rect x="980" y="520" width="164" height="40" rx="8" fill="{CARD}"/><text x="1062" y="546" text-anchor="middle" font-family="sans-serif" font-size="16" fill="{WHITE}">{}</text>"#,
                        xml_escape(&truncate(model, 16))
                    );
                }
            }
        }

        out.push_str("</svg>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("日本語のタイトル", 4), "日本語…");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("0"), "0");
        assert_eq!(group_digits("999"), "999");
        assert_eq!(group_digits("1234"), "1,234");
        assert_eq!(group_digits("1234567"), "1,234,567");
        assert_eq!(group_digits("lots"), "0");
    }

    #[test]
    fn test_wrap_title_two_lines_max() {
        let lines = wrap_title(&"word ".repeat(30));
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.chars().count() <= LINE_MAX_CHARS));
    }

    #[test]
    fn test_prompt_card_escapes_text() {
        let svg = OgCard::Prompt {
            title: "<script>alert(1)</script>".to_string(),
            author: "Tom & Jerry".to_string(),
            category: "coding".to_string(),
            model: "claude".to_string(),
        }
        .render();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"width="1200" height="630""#));
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("Tom &amp; Jerry"));
        assert!(svg.contains("#3b82f6"));
    }

    #[test]
    fn test_profile_card() {
        let svg = OgCard::Profile {
            name: "ada".to_string(),
            username: "ada_l".to_string(),
            followers: "1500".to_string(),
        }
        .render();

        assert!(svg.contains(">AD<"));
        assert!(svg.contains("@ada_l"));
        assert!(svg.contains(">1,500<"));
    }
}
