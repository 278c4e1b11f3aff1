//! Standalone HTML report.
//!
//! One page with a header, three counters (articles, sources, minutes of
//! reading), and a card per summarized article linking to the full story.

use super::{escape, safe_href};
use crate::models::{ArticleSummary, Digest};
use crate::utils::file_stamp;
use std::error::Error;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

const STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: linear-gradient(135deg, #0c0c0c 0%, #1a1a2e 50%, #16213e 100%);
            color: #ffffff;
            min-height: 100vh;
        }
        .container { max-width: 1200px; margin: 0 auto; padding: 20px; }
        .header { text-align: center; margin-bottom: 40px; }
        h1 {
            font-size: 3rem;
            font-weight: 700;
            background: linear-gradient(45deg, #00ffff, #ff00ff, #ffff00);
            -webkit-background-clip: text;
            -webkit-text-fill-color: transparent;
            margin-bottom: 10px;
        }
        .subtitle { font-size: 1.2rem; color: #a0a0a0; margin-bottom: 10px; }
        .stats { display: flex; justify-content: center; gap: 40px; margin-bottom: 40px; }
        .stat { text-align: center; }
        .stat-number { display: block; font-size: 2.5rem; font-weight: 700; color: #00ffff; }
        .stat-label { color: #a0a0a0; text-transform: uppercase; letter-spacing: 1px; }
        .news-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(400px, 1fr));
            gap: 30px;
        }
        .news-card {
            background: rgba(255, 255, 255, 0.05);
            border: 1px solid rgba(0, 255, 255, 0.2);
            border-radius: 20px;
            padding: 30px;
        }
        .news-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 20px; }
        .news-number {
            background: #ff6b6b;
            width: 40px;
            height: 40px;
            border-radius: 50%;
            display: flex;
            align-items: center;
            justify-content: center;
            font-weight: 700;
        }
        .news-source {
            background: rgba(0, 255, 255, 0.2);
            color: #00ffff;
            padding: 5px 15px;
            border-radius: 15px;
            font-size: 0.9rem;
        }
        .news-title { font-size: 1.4rem; margin-bottom: 15px; line-height: 1.4; }
        .news-summary { color: #b0b0b0; line-height: 1.7; margin-bottom: 20px; }
        .news-link { color: #00ffff; text-decoration: none; font-weight: 600; }
        .footer { text-align: center; margin-top: 60px; padding: 30px; color: #888; }
"#;

/// Render the full HTML report page for `digest`.
pub fn render_report(digest: &Digest) -> String {
    let generated = digest.generated_at.format("%Y-%m-%d %H:%M:%S").to_string();
    let mut cards = String::new();
    for (i, item) in digest.items.iter().enumerate() {
        render_card(&mut cards, i + 1, item);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>News Digest - {generated}</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>News Digest</h1>
            <p class="subtitle">Your personalized daily news summary</p>
            <p class="subtitle">Generated on {generated}</p>
        </div>

        <div class="stats">
            <div class="stat">
                <span class="stat-number">{articles}</span>
                <span class="stat-label">Articles</span>
            </div>
            <div class="stat">
                <span class="stat-number">{sources}</span>
                <span class="stat-label">Sources</span>
            </div>
            <div class="stat">
                <span class="stat-number">{minutes}</span>
                <span class="stat-label">Min Read</span>
            </div>
        </div>

        <div class="news-grid">{cards}
        </div>

        <div class="footer">
            <p>News Summarization</p>
            <p>Stay informed, stay ahead</p>
        </div>
    </div>
</body>
</html>
"#,
        articles = digest.article_count(),
        sources = digest.source_count(),
        minutes = digest.read_minutes(),
    )
}

fn render_card(out: &mut String, number: usize, item: &ArticleSummary) {
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        r#"
            <div class="news-card">
                <div class="news-header">
                    <div class="news-number">{number}</div>
                    <div class="news-source">{source}</div>
                </div>
                <h3 class="news-title">{title}</h3>
                <p class="news-summary">{summary}</p>
                <a href="{href}" target="_blank" rel="noopener" class="news-link">Read Full Article</a>
            </div>"#,
        source = escape(&item.source),
        title = escape(&item.title),
        summary = escape(&item.summary),
        href = safe_href(&item.url),
    );
}

/// Write the report to `{output_dir}/news_digest_{YYYYMMDD_HHMM}.html`.
///
/// # Returns
///
/// The path of the written file.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn write_report(digest: &Digest, output_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let path = output_dir.join(format!(
        "news_digest_{}.html",
        file_stamp(&digest.generated_at)
    ));
    fs::write(&path, render_report(digest)).await?;
    info!(path = %path.display(), "Wrote HTML report");
    Ok(path)
}
