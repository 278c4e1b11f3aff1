//! HTML body of the email digest.
//!
//! Mail clients drop `<style>` blocks, so every element carries inline styles.

use super::{escape, safe_href};
use crate::models::Digest;
use crate::utils::display_stamp;
use std::fmt::Write;

/// Render the email digest body.
pub fn render_email(digest: &Digest) -> String {
    let mut out = String::new();

    let _ = write!(
        out,
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; background: #1a1a1a; color: #ffffff; padding: 20px;">
    <div style="text-align: center; margin-bottom: 30px;">
        <h1 style="color: #00ffff; font-size: 28px; margin-bottom: 10px;">📰 News Digest</h1>
        <p style="color: #a0a0a0; font-size: 16px;">Generated on {generated}</p>
    </div>
    <div style="background: rgba(255,255,255,0.05); padding: 20px; border-radius: 10px; margin-bottom: 20px; text-align: center;">
        <span style="color: #00ffff; font-size: 24px; font-weight: bold;">{count}</span>
        <span style="color: #a0a0a0; margin-left: 10px;">Articles Summarized</span>
    </div>
"#,
        generated = display_stamp(&digest.generated_at),
        count = digest.article_count(),
    );

    for (i, item) in digest.items.iter().enumerate() {
        let _ = write!(
            out,
            r#"    <div style="background: rgba(255,255,255,0.05); border-radius: 15px; padding: 25px; margin-bottom: 20px; border-left: 4px solid #00ffff;">
        <div style="margin-bottom: 15px;">
            <span style="background: #ff6b6b; color: white; padding: 4px 10px; border-radius: 50%; font-weight: bold;">{number}</span>
            <span style="background: rgba(0,255,255,0.2); color: #00ffff; padding: 5px 15px; border-radius: 10px; font-size: 12px;">{source}</span>
        </div>
        <h3 style="color: #ffffff; font-size: 18px; margin-bottom: 15px; line-height: 1.4;">{title}</h3>
        <p style="color: #b0b0b0; line-height: 1.6; margin-bottom: 15px; font-size: 14px;">{summary}</p>
        <a href="{href}" style="color: #00ffff; text-decoration: none; font-weight: 600; font-size: 14px;" target="_blank">📖 Read Full Article →</a>
    </div>
"#,
            number = i + 1,
            source = escape(&item.source),
            title = escape(&item.title),
            summary = escape(&item.summary),
            href = safe_href(&item.url),
        );
    }

    out.push_str(
        r#"    <div style="text-align: center; margin-top: 30px; padding: 20px; border-top: 1px solid rgba(255,255,255,0.1);">
        <p style="color: #888;">Stay informed, stay ahead</p>
    </div>
</div>
"#,
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleSummary;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_email_lists_every_article() {
        let at = Local.with_ymd_and_hms(2025, 5, 6, 18, 5, 0).unwrap();
        let items = (1..=3)
            .map(|n| ArticleSummary {
                title: format!("Headline{n}"),
                summary: format!("Summary{n}"),
                url: format!("https://example.com/{n}"),
                source: "Wire".to_string(),
            })
            .collect();
        let html = render_email(&Digest::new(at, items));

        assert!(html.contains("Generated on 2025-05-06 18:05"));
        assert!(html.contains(">3</span>"));
        for n in 1..=3 {
            assert!(html.contains(&format!("Headline{n}")));
            assert!(html.contains(&format!("Summary{n}")));
        }
        assert_eq!(html.matches("Read Full Article").count(), 3);
        assert!(html.trim_end().ends_with("</div>"));
    }

    #[test]
    fn test_email_escapes_text() {
        let item = ArticleSummary {
            title: "A & B".to_string(),
            summary: "<b>bold</b>".to_string(),
            url: "ftp://example.com/file".to_string(),
            source: "S".to_string(),
        };
        let html = render_email(&Digest::new(Local::now(), vec![item]));
        assert!(html.contains("A&#32;&amp;&#32;B"));
        assert!(!html.contains("<b>bold</b>"));
        assert!(html.contains(r##"<a href="#""##));
    }
}
