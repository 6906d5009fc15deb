//! Extractor: turns fetched HTML into the bounded plain-text excerpt sent to the model.

use scraper::{ElementRef, Html};

/// Maximum excerpt length, in characters.
pub const MAX_EXCERPT_CHARS: usize = 3000;

/// Extracts visible text from `html`, normalizes whitespace, and cuts it to
/// [`MAX_EXCERPT_CHARS`]. Malformed markup is parsed tolerantly; this never fails.
pub fn extract_excerpt(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut raw = String::new();
    collect_visible_text(document.root_element(), &mut raw);

    truncate_chars(&normalize_whitespace(&raw), MAX_EXCERPT_CHARS)
}

/// Appends every text node under `element` in document order, skipping
/// `script` and `style` subtrees. Adjacent nodes are joined without a separator.
fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !matches!(child_element.value().name(), "script" | "style") {
                collect_visible_text(child_element, out);
            }
        }
    }
}

/// Line boundaries recognised when splitting text into lines.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Trims each line, splits lines into phrases on double spaces, drops blank
/// phrases, and joins the rest with single spaces. Single spaces inside a
/// phrase are kept as-is.
fn normalize_whitespace(text: &str) -> String {
    text.split(is_line_break)
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|phrase| !phrase.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keeps the first `max_chars` characters. Counts chars, not bytes.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
