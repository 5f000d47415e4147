use serde::Serialize;

/// A run of step content, flagged when it matches a highlight term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSegment {
    pub text: String,
    pub highlighted: bool,
}

impl TextSegment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: false,
        }
    }

    fn marked(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: true,
        }
    }
}

/// Split `content` into plain and highlighted segments.
///
/// Matching is ASCII case-insensitive. When two terms match at the same
/// offset the one listed first wins.
pub fn highlight_segments(content: &str, terms: &[String]) -> Vec<TextSegment> {
    let haystack = content.to_ascii_lowercase();
    let needles: Vec<String> = terms
        .iter()
        .filter(|term| !term.is_empty())
        .map(|term| term.to_ascii_lowercase())
        .collect();

    let mut segments = Vec::new();
    let mut cursor = 0;
    while cursor < content.len() {
        let next_match = needles
            .iter()
            .filter_map(|needle| {
                haystack[cursor..]
                    .find(needle.as_str())
                    .map(|offset| (cursor + offset, needle.len()))
            })
            .min_by_key(|(start, _)| *start);

        match next_match {
            Some((start, len)) => {
                if start > cursor {
                    segments.push(TextSegment::plain(&content[cursor..start]));
                }
                segments.push(TextSegment::marked(&content[start..start + len]));
                cursor = start + len;
            }
            None => {
                segments.push(TextSegment::plain(&content[cursor..]));
                break;
            }
        }
    }
    segments
}
