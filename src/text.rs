//! Caption text extraction
//!
//! WordPress playlist captions are HTML fragments (`<em>Live</em> at ...`).
//! Only the visible text is usable in a file name.
use scraper::Html;

/// Return the visible text of an HTML fragment.
///
/// Entities are decoded by the parser. Whitespace runs collapse to a single
/// space and the result is trimmed. html5ever recovers from malformed markup,
/// so there is no failure case: broken fragments yield the recovered text.
pub fn html_text(fragment: &str) -> String {
    if !fragment.contains('<') && !fragment.contains('&') {
        return collapse_whitespace(fragment);
    }

    let document = Html::parse_fragment(fragment);
    let text: String = document.root_element().text().collect();
    collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
