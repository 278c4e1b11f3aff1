//! Output generation for the digest.
//!
//! # Submodules
//!
//! - [`html`]: standalone HTML report page
//! - [`email`]: inline-styled HTML fragment for the email digest
//! - [`text`]: plain-text backup
//! - [`json`]: optional JSON export
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── news_digest_20250506_0800.html
//! └── news_digest_20250506_0800.txt
//!
//! json_output_dir/
//! └── 2025-05-06/
//!     └── 0800.json
//! ```
//!
//! Every piece of article text is HTML-escaped before it is interpolated, and
//! links are only emitted for `http`/`https` URLs.

pub mod email;
pub mod html;
pub mod json;
pub mod text;

use url::Url;

/// Escape text for use in HTML element content or a quoted attribute.
pub(crate) fn escape(text: &str) -> String {
    ammonia::clean_text(text)
}

/// An escaped `href` value for `url`, or `#` when it is not a web link.
pub(crate) fn safe_href(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => escape(parsed.as_str()),
        _ => "#".to_string(),
    }
}
