//! Result excerpts shown under each hit.
//!
//! All slicing is done on `char`s so multi-byte text (`⊢`, `≈`, `ẋ` are common
//! in docstrings) is never cut mid-character.

const ELLIPSIS: char = '…';

/// Up to `width` characters of `text` centred on the first hit of `query`.
///
/// Falls back to the first query word that occurs. Whitespace runs in both
/// the text and the query are collapsed to one space. Returns `None` when nothing in the text matches.
pub fn excerpt(text: &str, query: &str, width: usize) -> Option<String> {
    if width == 0 {
        return None;
    }
    let flat = collapse_whitespace(text);
    if flat.is_empty() {
        return None;
    }
    let haystack: Vec<char> = flat.iter().map(|&c| fold(c)).collect();

    let phrase = query.split_whitespace().collect::<Vec<_>>().join(" ");
    let (hit, len) = std::iter::once(phrase.as_str())
        .chain(query.split_whitespace())
        .filter(|needle| !needle.is_empty())
        .find_map(|needle| {
            let needle: Vec<char> = needle.chars().map(fold).collect();
            find(&haystack, &needle).map(|pos| (pos, needle.len()))
        })?;

    let lead = width.saturating_sub(len) / 2;
    let mut start = hit.saturating_sub(lead);
    let end = (start + width).min(flat.len());
    if end - start < width {
        start = end.saturating_sub(width);
    }
    Some(frame(&flat[start..end], start > 0, end < flat.len()))
}

/// First non-blank line of `text`, cut to `width` characters.
pub fn first_line(text: &str, width: usize) -> Option<String> {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    let chars: Vec<char> = line.chars().collect();
    if chars.len() <= width {
        return Some(line.to_string());
    }
    Some(frame(&chars[..width], false, true))
}

fn frame(body: &[char], cut_left: bool, cut_right: bool) -> String {
    let mut out = String::with_capacity(body.len() + 2);
    if cut_left {
        out.push(ELLIPSIS);
    }
    out.extend(body);
    if cut_right {
        out.push(ELLIPSIS);
    }
    out
}

fn collapse_whitespace(text: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars());
    }
    out
}

/// One-to-one case fold so positions in the folded text map back 1:1.
///
/// Folding per character keeps it context-free: a final `Σ` folds to `σ`
/// like any other, so search and excerpts agree on what matches.
pub(crate) fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

pub(crate) fn fold_str(s: &str) -> String {
    s.chars().map(fold).collect()
}

fn find(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
