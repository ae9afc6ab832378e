//! Case-insensitive matching, context windows and highlighting.

/// Location of a match inside the searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMatch {
    /// Byte offsets of the matched text.
    pub start: usize,
    pub end: usize,
    /// Character offset of `start`, used for proximity scoring.
    pub char_index: usize,
}

/// Length in bytes of the prefix of `haystack` that equals `needle`
/// ignoring case, if any.
fn match_len(haystack: &str, needle: &str) -> Option<usize> {
    let mut hay = haystack.char_indices();
    for expected in needle.chars() {
        let (_, c) = hay.next()?;
        if !c.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(hay.next().map_or(haystack.len(), |(i, _)| i))
}

pub fn find_case_insensitive(text: &str, query: &str) -> Option<TextMatch> {
    find_from(text, query, 0)
}

fn find_from(text: &str, query: &str, from: usize) -> Option<TextMatch> {
    if query.is_empty() {
        return None;
    }
    text[from..]
        .char_indices()
        .enumerate()
        .find_map(|(char_offset, (offset, _))| {
            let start = from + offset;
            match_len(&text[start..], query).map(|len| TextMatch {
                start,
                end: start + len,
                char_index: text[..from].chars().count() + char_offset,
            })
        })
}

/// Up to `context` characters either side of `m`, newlines flattened and
/// `…` marking truncated ends.
pub fn snippet(text: &str, m: &TextMatch, context: usize) -> String {
    let match_chars = text[m.start..m.end].chars().count();
    let total = text.chars().count();
    let first = m.char_index.saturating_sub(context);
    let last = (m.char_index + match_chars + context).min(total);

    let byte_at = |char_pos: usize| {
        text.char_indices()
            .nth(char_pos)
            .map_or(text.len(), |(i, _)| i)
    };
    let window = text[byte_at(first)..byte_at(last)].replace(['\r', '\n'], " ");

    let mut out = String::with_capacity(window.len() + 6);
    if first > 0 {
        out.push('…');
    }
    out.push_str(window.trim());
    if last < total {
        out.push('…');
    }
    out
}

/// Wrap every case-insensitive occurrence of `query` in `marker`, keeping
/// the original casing of the matched text.
pub fn highlight(text: &str, query: &str, marker: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(m) = find_from(text, query, cursor) {
        out.push_str(&text[cursor..m.start]);
        out.push_str(marker);
        out.push_str(&text[m.start..m.end]);
        out.push_str(marker);
        cursor = m.end;
    }
    out.push_str(&text[cursor..]);
    out
}
