//! Plain-text backup of the digest.

use crate::models::Digest;
use crate::utils::{display_stamp, file_stamp};
use std::error::Error;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Render the digest as numbered plain-text entries.
pub fn render_text(digest: &Digest) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "AI NEWS DIGEST - {}", display_stamp(&digest.generated_at));
    let _ = writeln!(out, "{}\n", "=".repeat(60));

    for (i, item) in digest.items.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, item.title);
        let _ = writeln!(out, "Source: {}", item.source);
        let _ = writeln!(out, "Summary: {}", item.summary);
        let _ = writeln!(out, "URL: {}", item.url);
        let _ = writeln!(out, "{}\n", "-".repeat(50));
    }
    out
}

/// Write the backup to `{output_dir}/news_digest_{YYYYMMDD_HHMM}.txt`.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn write_text_backup(
    digest: &Digest,
    output_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = output_dir.join(format!(
        "news_digest_{}.txt",
        file_stamp(&digest.generated_at)
    ));
    fs::write(&path, render_text(digest)).await?;
    info!(path = %path.display(), "Saved text backup");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleSummary;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_render_text_layout() {
        let at = Local.with_ymd_and_hms(2025, 5, 6, 9, 0, 0).unwrap();
        let digest = Digest::new(
            at,
            vec![ArticleSummary {
                title: "Rates hold".to_string(),
                summary: "The bank kept rates steady.".to_string(),
                url: "https://example.com/rates".to_string(),
                source: "Wire".to_string(),
            }],
        );

        let expected = format!(
            "AI NEWS DIGEST - 2025-05-06 09:00\n{}\n\n\
             1. Rates hold\n\
             Source: Wire\n\
             Summary: The bank kept rates steady.\n\
             URL: https://example.com/rates\n\
             {}\n\n",
            "=".repeat(60),
            "-".repeat(50)
        );
        assert_eq!(render_text(&digest), expected);
    }

    #[tokio::test]
    async fn test_write_text_backup() {
        let dir = std::env::temp_dir().join(format!("news_digest_text_{}", std::process::id()));
        fs::create_dir_all(&dir).await.unwrap();
        let at = Local.with_ymd_and_hms(2025, 12, 31, 23, 59, 0).unwrap();

        let path = write_text_backup(&Digest::new(at, vec![]), &dir).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "news_digest_20251231_2359.txt");
        let written = fs::read_to_string(&path).await.unwrap();
        assert!(written.starts_with("AI NEWS DIGEST - 2025-12-31 23:59\n"));

        let _ = fs::remove_dir_all(&dir).await;
    }
}
