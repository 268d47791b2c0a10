//! Content Sanitizer
//!
//! Strips markdown fences and document-level wrapper markup that models add
//! around HTML fragments. Does not validate or repair HTML; the editor's
//! parser is tolerant of what remains.

use regex::Regex;
use std::sync::LazyLock;

static WRAPPER_TAGS: LazyLock<[Regex; 6]> = LazyLock::new(|| {
    [
        r"(?i)<!DOCTYPE[^>]*>",
        r"(?i)<html\b[^>]*>",
        r"(?i)</html\s*>",
        r"(?is)<head\b[^>]*>.*?</head\s*>",
        r"(?i)<body\b[^>]*>",
        r"(?i)</body\s*>",
    ]
    .map(|pattern| Regex::new(pattern).expect("wrapper tag pattern is valid"))
});

/// Remove ```` ```lang ```` openers and bare ```` ``` ```` markers
fn strip_fences(raw: &str, lang: &str) -> String {
    raw.replace(&format!("```{}", lang), "").replace("```", "")
}

/// Remove the ```` ```json ```` / ```` ``` ```` wrapper around a JSON reply
pub fn strip_json_fences(raw: &str) -> String {
    strip_fences(raw, "json")
}

/// Make model output safe to hand to the editor as an HTML fragment.
///
/// Removes ```` ```html ```` and ```` ``` ```` markers, `<!DOCTYPE>`,
/// `<html>`, `</html>`, `<head>…</head>`, `<body>` and `</body>`. Everything
/// else, whitespace included, is left untouched. Idempotent.
pub fn sanitize_html(raw: &str) -> String {
    let mut current = raw.to_string();
    // Removing one marker can splice together another (`<<body>html>`),
    // so repeat until nothing changes.
    loop {
        let mut next = strip_fences(&current, "html");
        for pattern in WRAPPER_TAGS.iter() {
            next = pattern.replace_all(&next, "").into_owned();
        }
        if next == current {
            return next;
        }
        current = next;
    }
}
