//! Job description fetching.
//!
//! Fetches a page via HTTP GET and crudely strips markup down to plain text.
//! The cleanup is intentionally best-effort regex removal; robust HTML
//! parsing is out of scope.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::GenerateError;

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[\s\S]*?</script>").expect("valid regex"));
static STYLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[\s\S]*?</style>").expect("valid regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Fetch a job description from a public URL and reduce it to plain text.
///
/// A non-2xx status is a typed upstream error; connection failures and
/// timeouts surface as transport errors. No retries.
pub async fn fetch_job_description(url: &str, timeout: Duration) -> Result<String, GenerateError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(GenerateError::UpstreamStatus {
            status: status.as_u16(),
            message: format!("HTTP {status} from {url}"),
        });
    }

    let body = response.text().await?;
    Ok(clean_html(&body))
}

/// Strip script and style blocks, then all remaining tags, then collapse
/// whitespace runs to single spaces and trim.
pub fn clean_html(text: &str) -> String {
    let text = SCRIPT_RE.replace_all(text, " ");
    let text = STYLE_RE.replace_all(&text, " ");
    let text = TAG_RE.replace_all(&text, " ");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_html_scripts_and_tags() {
        let html = "<html><body><script>x</script><p>Hello  World</p></body></html>";
        assert_eq!(clean_html(html), "Hello World");
    }

    #[test]
    fn test_clean_html_style_blocks_span_newlines() {
        let html = "<style>\n.a { color: red; }\n</style><div>Job posting</div>";
        assert_eq!(clean_html(html), "Job posting");
    }

    #[test]
    fn test_clean_html_case_insensitive() {
        let html = "<SCRIPT>alert(1)</SCRIPT><P>Engineer wanted</P>";
        assert_eq!(clean_html(html), "Engineer wanted");
    }

    #[test]
    fn test_clean_html_plain_text_passthrough() {
        assert_eq!(clean_html("  already   plain\ttext \n"), "already plain text");
    }

    #[test]
    fn test_clean_html_empty_page() {
        assert_eq!(clean_html("<html><body></body></html>"), "");
    }
}
