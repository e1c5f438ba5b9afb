//! Positional snippet extraction with match highlighting.
//!
//! The stored content keeps its diacritics, so matching runs on a folded
//! shadow of the text (diacritics removed, ASCII lowercased) while marks
//! are emitted by original byte offsets. A mark therefore carries the
//! pointing of the matched word, e.g. `<mark>בָּרָא</mark>` for the query
//! word `ברא`.

use otzar_hebrew::is_diacritic;

/// Total snippet budget in characters of source content.
const SNIPPET_MAX_CHARS: usize = 240;

/// Characters kept on each side of the first match.
const SNIPPET_FLANK_CHARS: usize = 120;

/// Folded copy of the content plus a byte map back to the original.
///
/// `map[i]` is the original byte offset of the character that produced
/// folded byte `i`; one trailing sentinel maps the end of the folded text
/// to the end of the original. Only diacritics are dropped and only ASCII
/// is case-folded, so every folded byte comes from exactly one original
/// character.
struct Shadow {
    folded: String,
    map: Vec<usize>,
}

impl Shadow {
    fn build(content: &str) -> Self {
        let mut folded = String::with_capacity(content.len());
        let mut map = Vec::with_capacity(content.len() + 1);
        for (offset, c) in content.char_indices() {
            if is_diacritic(c) {
                continue;
            }
            let fc = c.to_ascii_lowercase();
            for _ in 0..fc.len_utf8() {
                map.push(offset);
            }
            folded.push(fc);
        }
        map.push(content.len());
        Self { folded, map }
    }

    /// Original-offset spans of every occurrence of any word, sorted and
    /// non-overlapping (earliest occurrence wins).
    ///
    /// A span ends at the next retained character, so diacritics trailing
    /// the last matched letter stay inside the span.
    fn match_spans(&self, words: &[String]) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        for word in words {
            if word.is_empty() {
                continue;
            }
            for (start, matched) in self.folded.match_indices(word.as_str()) {
                spans.push((self.map[start], self.map[start + matched.len()]));
            }
        }
        spans.sort_unstable();

        let mut taken: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
        for (start, end) in spans {
            if taken.last().map_or(true, |&(_, prev_end)| start >= prev_end) {
                taken.push((start, end));
            }
        }
        taken
    }
}

/// Builds a bounded excerpt of `content` with every occurrence of any
/// highlight word wrapped in `<mark>...</mark>`.
///
/// The window is anchored on the earliest occurrence of any word and
/// holds at most 240 characters of content; `...` is added on truncated
/// edges. Without a match the excerpt is the content prefix. Marks never
/// nest and never cover non-matching characters.
pub fn build_snippet(content: &str, words: &[String]) -> String {
    let shadow = Shadow::build(content);
    let spans = shadow.match_spans(words);

    let Some(&(anchor, _)) = spans.first() else {
        return prefix_snippet(content);
    };

    let (start, end) = window_around(content, anchor);

    let mut snippet = String::with_capacity(end - start + spans.len() * 13 + 6);
    if start > 0 {
        snippet.push_str("...");
    }
    let mut cursor = start;
    for &(span_start, span_end) in &spans {
        if span_start < cursor || span_end > end {
            continue;
        }
        snippet.push_str(&content[cursor..span_start]);
        snippet.push_str("<mark>");
        snippet.push_str(&content[span_start..span_end]);
        snippet.push_str("</mark>");
        cursor = span_end;
    }
    snippet.push_str(&content[cursor..end]);
    if end < content.len() {
        snippet.push_str("...");
    }
    snippet
}

/// Byte range of up to 120 chars on each side of `anchor`, clamped to
/// char boundaries.
fn window_around(content: &str, anchor: usize) -> (usize, usize) {
    let mut start = anchor;
    for (taken, (i, _)) in content[..anchor].char_indices().rev().enumerate() {
        start = i;
        if taken + 1 == SNIPPET_FLANK_CHARS {
            break;
        }
    }

    let mut end = anchor;
    for (taken, (i, c)) in content[anchor..].char_indices().enumerate() {
        end = anchor + i + c.len_utf8();
        if taken + 1 == SNIPPET_FLANK_CHARS {
            break;
        }
    }

    (start, end)
}

fn prefix_snippet(content: &str) -> String {
    match content.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((end, _)) => format!("{}...", &content[..end]),
        None => content.to_string(),
    }
}
