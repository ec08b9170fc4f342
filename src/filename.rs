//! File name derivation for downloaded tracks
//!
//! Names have the shape `{index}-{caption}{extension}`, with the index
//! zero-padded to the width of the track count. All lengths here are counted
//! in `char`s, never bytes, so multi-byte captions are never split.
use url::Url;

/// Default maximum file name length, in characters
pub const DEFAULT_NAME_LIMIT: usize = 255;

const ELLIPSIS: char = '…';

/// Shorten `name` to at most `limit` characters.
///
/// Names that fit are returned unchanged. Longer names keep their first
/// `limit / 2` characters and enough trailing characters to reach exactly
/// `limit`, joined by a single ellipsis.
pub fn limit_file_name(name: &str, limit: usize) -> String {
    let len = name.chars().count();
    if len <= limit {
        return name.to_string();
    }
    if limit == 0 {
        return String::new();
    }

    let head = limit / 2;
    let tail = limit - head - 1;

    let mut limited = String::with_capacity(name.len().min(limit * 4));
    limited.extend(name.chars().take(head));
    limited.push(ELLIPSIS);
    limited.extend(name.chars().skip(len - tail));
    limited
}

/// Number of decimal digits needed to print `count`
pub fn index_width(count: usize) -> usize {
    count.to_string().len()
}

/// Extension (with the leading dot) of the last element of the URL path.
///
/// The path is percent-decoded and trailing slashes are ignored, so
/// `/a.b/` yields `.b`. The extension runs from the last dot of the element,
/// even when that dot starts it (`.hidden`). Returns an empty string when the
/// element has no dot.
pub fn url_extension(url: &Url) -> String {
    let path = urlencoding::decode(url.path())
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| url.path().to_string());
    let base = path.trim_end_matches('/').rsplit('/').next().unwrap_or("");

    match base.rfind('.') {
        Some(pos) => base[pos..].to_string(),
        None => String::new(),
    }
}

/// Replace characters that cannot appear inside a single path component.
pub fn sanitize_component(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Assemble `{index:0width}-{caption}{extension}` and limit it to `limit` chars.
pub fn build_file_name(
    index: usize,
    width: usize,
    caption: &str,
    extension: &str,
    limit: usize,
) -> String {
    let name = format!("{index:0width$}-{caption}{extension}");
    limit_file_name(&name, limit)
}
