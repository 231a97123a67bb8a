//! Slug generation utilities.
//!
//! Converts human-readable project names into directory-safe slugs.

/// Fallback slug when the input yields no usable characters
const DEFAULT_SLUG: &str = "portfolio-project";

/// Convert a project name to a URL- and filesystem-friendly slug.
///
/// Rules:
/// - lowercase, alphanumeric and hyphens only
/// - underscores and spaces become hyphens
/// - runs of hyphens/periods collapse to a single hyphen
/// - all other characters are dropped silently
/// - leading/trailing hyphens are stripped
///
/// Total function: an empty or fully-stripped input maps to
/// `"portfolio-project"`.
pub fn slugify(name: &str) -> String {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return DEFAULT_SLUG.to_string();
    }

    let mut result = String::new();
    let mut prev_dash = false;
    for c in name.chars() {
        let c = match c {
            '_' | ' ' => '-',
            other => other,
        };
        if c.is_alphanumeric() {
            result.push(c);
            prev_dash = false;
        } else if c == '-' || c == '.' {
            if !prev_dash {
                result.push('-');
                prev_dash = true;
            }
        }
        // ignore other characters
    }

    let result = result.trim_matches('-').to_string();
    if result.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        result
    }
}
