//! Word-anchored, case-insensitive substring matching over a candidate list.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Same notion of a word character as the `\b` anchor uses.
static WORD_START: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\w").ok());

/// A candidate that matched a query.
///
/// `ranges` holds every matched occurrence as half-open char ranges into
/// `text`, in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub index: usize,
    pub text: String,
    pub ranges: Vec<(usize, usize)>,
}

/// Compiled form of one query.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: Pattern,
}

#[derive(Debug, Clone)]
enum Pattern {
    Everything,
    Regex(Regex),
    Nothing,
}

impl Matcher {
    /// Builds a matcher for `query`.
    ///
    /// The query is escaped, so characters such as `(`, `*` or `+` are taken
    /// literally. A query starting with a word character must start at a word
    /// boundary inside the candidate; any other query is a plain substring.
    pub fn new(query: &str) -> Self {
        if query.is_empty() {
            return Self {
                pattern: Pattern::Everything,
            };
        }

        let anchor = if starts_with_word_char(query) {
            r"\b"
        } else {
            ""
        };
        let source = format!("{anchor}{}", regex::escape(query));
        let pattern = match RegexBuilder::new(&source).case_insensitive(true).build() {
            Ok(regex) => Pattern::Regex(regex),
            Err(err) => {
                tracing::warn!(query, error = %err, "query pattern rejected; no suggestions");
                Pattern::Nothing
            }
        };

        Self { pattern }
    }

    /// Returns the matched char ranges in `candidate`, or `None` when it does
    /// not match. An empty query matches everything with no ranges.
    pub fn ranges(&self, candidate: &str) -> Option<Vec<(usize, usize)>> {
        let pattern = match &self.pattern {
            Pattern::Everything => return Some(Vec::new()),
            Pattern::Nothing => return None,
            Pattern::Regex(regex) => regex,
        };

        let ranges: Vec<(usize, usize)> = pattern
            .find_iter(candidate)
            .filter(|found| !found.is_empty())
            .map(|found| {
                let start = char_offset(candidate, found.start());
                let len = found.as_str().chars().count();
                (start, start + len)
            })
            .collect();

        if ranges.is_empty() { None } else { Some(ranges) }
    }
}

/// Filters `source` down to the candidates matching `query`, in source order.
///
/// Returns nothing when the query is shorter than `min_length` (in chars).
/// Scanning stops once `max_results` matches have been collected.
pub fn find_matches(
    source: &[String],
    query: &str,
    min_length: usize,
    max_results: usize,
) -> Vec<Match> {
    if query.chars().count() < min_length || max_results == 0 {
        return Vec::new();
    }

    let matcher = Matcher::new(query);
    let mut matches = Vec::new();
    for (index, candidate) in source.iter().enumerate() {
        if matches.len() >= max_results {
            break;
        }
        if let Some(ranges) = matcher.ranges(candidate) {
            matches.push(Match {
                index,
                text: candidate.clone(),
                ranges,
            });
        }
    }
    matches
}

fn starts_with_word_char(query: &str) -> bool {
    WORD_START
        .as_ref()
        .is_some_and(|word_start| word_start.is_match(query))
}

fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

#[cfg(test)]
mod tests {
    use super::{Matcher, find_matches};

    fn source(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    fn texts(matches: &[super::Match]) -> Vec<&str> {
        matches.iter().map(|m| m.text.as_str()).collect()
    }

    #[test]
    fn prefix_query_keeps_source_order() {
        let list = source(&["Canada", "Cameroon", "Chad"]);
        let matches = find_matches(&list, "Ca", 1, 10);
        assert_eq!(texts(&matches), vec!["Canada", "Cameroon"]);
        assert_eq!(matches[0].index, 0);
        assert_eq!(matches[1].index, 1);
    }

    #[test]
    fn query_shorter_than_min_length_yields_nothing() {
        let list = source(&["Canada", "Cameroon"]);
        assert!(find_matches(&list, "C", 2, 10).is_empty());
        assert!(find_matches(&list, "", 1, 10).is_empty());
    }

    #[test]
    fn min_length_counts_chars_not_bytes() {
        let list = source(&["Åland Islands"]);
        assert_eq!(find_matches(&list, "å", 2, 10).len(), 0);
        assert_eq!(find_matches(&list, "ål", 2, 10).len(), 1);
    }

    #[test]
    fn empty_query_with_zero_min_length_returns_first_max_results() {
        let list = source(&["a", "b", "c", "d"]);
        let matches = find_matches(&list, "", 0, 3);
        assert_eq!(texts(&matches), vec!["a", "b", "c"]);
        assert!(matches.iter().all(|m| m.ranges.is_empty()));
    }

    #[test]
    fn never_exceeds_max_results() {
        let list: Vec<String> = (0..50).map(|i| format!("Item {i}")).collect();
        assert_eq!(find_matches(&list, "item", 1, 10).len(), 10);
        assert!(find_matches(&list, "item", 1, 0).is_empty());
    }

    #[test]
    fn match_must_start_at_word_boundary() {
        let list = source(&["Canada", "Equatorial Guinea", "Guinea-Bissau", "Papua New Guinea"]);
        assert!(find_matches(&list, "ana", 1, 10).is_empty());
        assert_eq!(
            texts(&find_matches(&list, "guinea", 1, 10)),
            vec!["Equatorial Guinea", "Guinea-Bissau", "Papua New Guinea"]
        );
        assert_eq!(texts(&find_matches(&list, "bis", 1, 10)), vec!["Guinea-Bissau"]);
    }

    #[test]
    fn matching_ignores_case() {
        let list = source(&["United States", "united kingdom"]);
        assert_eq!(find_matches(&list, "UNITED", 1, 10).len(), 2);
    }

    #[test]
    fn special_characters_are_literal() {
        let list = source(&["Holy See (Vatican City State)", "C++", "Chad"]);
        let parens = find_matches(&list, "(", 1, 10);
        assert_eq!(texts(&parens), vec!["Holy See (Vatican City State)"]);
        assert_eq!(parens[0].ranges, vec![(9, 10)]);

        assert_eq!(texts(&find_matches(&list, "c++", 1, 10)), vec!["C++"]);
        assert!(find_matches(&list, "*", 1, 10).is_empty());
        assert!(find_matches(&list, "[", 1, 10).is_empty());
        assert!(find_matches(&list, ".", 1, 10).is_empty());
    }

    #[test]
    fn numeric_symbols_outside_word_class_match_as_substrings() {
        let list = source(&["Size ½ inch", "Size 1½ inch"]);
        let matches = find_matches(&list, "½", 1, 10);
        assert_eq!(texts(&matches), vec!["Size ½ inch", "Size 1½ inch"]);
        assert_eq!(matches[0].ranges, vec![(5, 6)]);
        assert_eq!(matches[1].ranges, vec![(6, 7)]);
    }

    #[test]
    fn ranges_cover_every_occurrence_in_chars() {
        let matcher = Matcher::new("is");
        assert_eq!(
            matcher.ranges("Cocos Islands is"),
            Some(vec![(6, 8), (14, 16)])
        );
        let matcher = Matcher::new("réu");
        assert_eq!(matcher.ranges("La Réunion"), Some(vec![(3, 6)]));
    }

    #[test]
    fn duplicates_pass_through() {
        let list = source(&["Chad", "Chad"]);
        let matches = find_matches(&list, "ch", 1, 10);
        assert_eq!(texts(&matches), vec!["Chad", "Chad"]);
        assert_eq!(matches[1].index, 1);
    }

    #[test]
    fn every_match_contains_query_at_word_start() {
        let list = source(&["Saint Lucia", "Sao Tome and Principe", "San Marino", "Oman"]);
        for query in ["s", "sa", "an", "ma", "o"] {
            for m in find_matches(&list, query, 1, 10) {
                let lower = m.text.to_lowercase();
                let found = lower.match_indices(query).any(|(pos, _)| {
                    lower[..pos]
                        .chars()
                        .last()
                        .is_none_or(|prev| !prev.is_alphanumeric())
                });
                assert!(found, "{query} should start a word in {}", m.text);
            }
        }
    }
}
