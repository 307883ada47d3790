use podsift_core::types::MatchSpan;

/// Copy `text`, wrapping every span in `open`/`close`.
///
/// Spans are char offsets as produced by the matcher. An end past the text is
/// clamped; empty spans and spans that start inside an already wrapped region
/// are skipped.
pub fn highlight(text: &str, spans: &[MatchSpan], open: &str, close: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + spans.len() * (open.len() + close.len()));
    let mut cursor = 0;
    for span in spans {
        let end = span.end.min(chars.len());
        if span.start < cursor || span.start >= end {
            continue;
        }
        out.extend(&chars[cursor..span.start]);
        out.push_str(open);
        out.extend(&chars[span.start..end]);
        out.push_str(close);
        cursor = end;
    }
    out.extend(&chars[cursor..]);
    out
}
