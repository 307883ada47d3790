//! Case-insensitive literal substring matching with character offsets.

use podsift_core::types::MatchSpan;

/// Map a char to one canonical char for case-insensitive comparison.
///
/// Uses the simple (first char) lowercase mapping, then folds lowercase
/// variants that share an uppercase form (`ς`/`σ`, `ſ`/`s`, `ı`/`i`) onto
/// one char. Always one char in, one char out, so offsets stay aligned with
/// the source text.
fn fold(c: char) -> char {
    let lower = simple_lower(c);
    let mut upper = lower.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => simple_lower(u),
        _ => lower,
    }
}

fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// A query folded once and reused across every field of a search call.
#[derive(Debug, Clone)]
pub struct QueryMatcher {
    needle: Vec<char>,
}

impl QueryMatcher {
    pub fn new(query: &str) -> Self {
        Self { needle: query.chars().map(fold).collect() }
    }

    pub fn is_empty(&self) -> bool { self.needle.is_empty() }

    /// All non-overlapping matches in `field`, left to right. Scanning
    /// resumes at the end of each match.
    pub fn find_in(&self, field: &str) -> Vec<MatchSpan> {
        let n = self.needle.len();
        if n == 0 || field.is_empty() {
            return Vec::new();
        }
        let haystack: Vec<char> = field.chars().map(fold).collect();
        let mut spans = Vec::new();
        let mut start = 0;
        while start + n <= haystack.len() {
            if haystack[start..start + n] == self.needle[..] {
                spans.push(MatchSpan::new(start, start + n));
                start += n;
            } else {
                start += 1;
            }
        }
        spans
    }
}

/// Every match of `query` in `field`. Uncapped.
pub fn find_matches(query: &str, field: &str) -> Vec<MatchSpan> {
    QueryMatcher::new(query).find_in(field)
}
