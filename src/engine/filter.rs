// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::types::term::Term;
use crate::types::term::strip_modifiers;

/// The user's current search and toggle settings.
///
/// `repeats_only` implies `weekly_only`. The setters maintain this: turning
/// repeats on turns weekly on, and turning weekly off turns repeats off.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    search_text: String,
    weekly_only: bool,
    repeats_only: bool,
}

impl FilterState {
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn weekly_only(&self) -> bool {
        self.weekly_only
    }

    pub fn repeats_only(&self) -> bool {
        self.repeats_only
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn set_weekly(&mut self, on: bool) {
        self.weekly_only = on;
        if !on {
            self.repeats_only = false;
        }
    }

    pub fn set_repeats(&mut self, on: bool) {
        self.repeats_only = on;
        if on {
            self.weekly_only = true;
        }
    }

    /// The view is sorted alphabetically only when no toggle is active.
    pub fn sorts_alphabetically(&self) -> bool {
        !self.weekly_only && !self.repeats_only
    }
}

/// The location of the search text within a term's display text, in
/// characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub length: usize,
}

impl MatchSpan {
    /// Splits `text` into the parts before, inside, and after the span.
    pub fn split<'a>(&self, text: &'a str) -> (&'a str, &'a str, &'a str) {
        let start = byte_offset(text, self.start);
        let end = byte_offset(text, self.start + self.length);
        (&text[..start], &text[start..end], &text[end..])
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Finds the first case-insensitive occurrence of `needle` in `text`. An
/// empty needle never produces a span.
///
/// Both sides are case-folded before comparing. The span is reported in
/// characters of `text`, and covers every character that contributed to the
/// match, even when its folded form is longer than one character.
pub fn find_match(text: &str, needle: &str) -> Option<MatchSpan> {
    let mut haystack: Vec<char> = Vec::new();
    // For each folded character, the index of the character in `text` it
    // came from.
    let mut owners: Vec<usize> = Vec::new();
    for (index, c) in text.chars().enumerate() {
        for folded in fold_case(c) {
            haystack.push(folded);
            owners.push(index);
        }
    }
    let needle: Vec<char> = needle.chars().flat_map(fold_case).collect();
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    let start = (0..=haystack.len() - needle.len())
        .find(|&start| haystack[start..start + needle.len()] == needle[..])?;
    let first = owners[start];
    let last = owners[start + needle.len() - 1];
    Some(MatchSpan {
        start: first,
        length: last - first + 1,
    })
}

/// Lowercases a character for matching. Final sigma folds to `σ`, and
/// dotted capital I folds to a plain `i` rather than `i` plus a combining
/// dot, so that `istanbul` finds `İstanbul`.
fn fold_case(c: char) -> Vec<char> {
    match c {
        'ς' => vec!['σ'],
        'İ' => vec!['i'],
        _ => c.to_lowercase().collect(),
    }
}

/// An entry in the filtered view: a position in the catalog, plus where the
/// search text matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewEntry {
    pub index: usize,
    pub span: Option<MatchSpan>,
}

/// Computes the filtered view of `terms` under `filter`.
pub fn filter_terms(terms: &[Term], filter: &FilterState) -> Vec<ViewEntry> {
    let needle = strip_modifiers(filter.search_text());
    let mut entries: Vec<ViewEntry> = Vec::new();
    for (index, term) in terms.iter().enumerate() {
        if filter.weekly_only() && !term.is_weekly() {
            continue;
        }
        if filter.repeats_only() && !term.is_repeat() {
            continue;
        }
        let span = if needle.is_empty() {
            None
        } else {
            match find_match(term.front(), &needle) {
                Some(span) => Some(span),
                None => continue,
            }
        };
        entries.push(ViewEntry { index, span });
    }
    if filter.sorts_alphabetically() {
        entries.sort_by_cached_key(|entry| terms[entry.index].front().to_lowercase());
    }
    entries
}

/// Badge counts over the whole catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub weekly: usize,
    pub repeat: usize,
}

pub fn count_modifiers(terms: &[Term]) -> Counts {
    Counts {
        weekly: terms.iter().filter(|term| term.is_weekly()).count(),
        repeat: terms.iter().filter(|term| term.is_repeat()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Term> {
        vec![
            Term::new(0, "cat", "a feline"),
            Term::new(1, "dog!", "a canine"),
            Term::new(2, "fox!R", "a vulpine"),
        ]
    }

    fn fronts(terms: &[Term], entries: &[ViewEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|entry| terms[entry.index].front().to_string())
            .collect()
    }

    #[test]
    fn test_toggle_coupling() {
        let mut filter = FilterState::default();
        filter.set_repeats(true);
        assert!(filter.weekly_only());
        assert!(filter.repeats_only());
        filter.set_weekly(false);
        assert!(!filter.weekly_only());
        assert!(!filter.repeats_only());
        filter.set_weekly(true);
        assert!(!filter.repeats_only());
        filter.set_repeats(false);
        assert!(filter.weekly_only());
    }

    #[test]
    fn test_find_match() {
        assert_eq!(
            find_match("cat", "at"),
            Some(MatchSpan {
                start: 1,
                length: 2
            })
        );
        assert_eq!(
            find_match("Photosynthesis", "SYNTH"),
            Some(MatchSpan {
                start: 5,
                length: 5
            })
        );
        assert_eq!(find_match("cat", ""), None);
        assert_eq!(find_match("cat", "dog"), None);
        assert_eq!(find_match("at", "cat"), None);
    }

    #[test]
    fn test_find_match_counts_characters() {
        let span = find_match("Äpfel und Öl", "öl");
        assert_eq!(
            span,
            Some(MatchSpan {
                start: 10,
                length: 2
            })
        );
    }

    #[test]
    fn test_find_match_folds_special_cases() {
        assert_eq!(
            find_match("İstanbul", "i"),
            Some(MatchSpan {
                start: 0,
                length: 1
            })
        );
        assert_eq!(
            find_match("İstanbul", "istanbul"),
            Some(MatchSpan {
                start: 0,
                length: 8
            })
        );
        assert_eq!(
            find_match("ΟΔΟΣ", "ς"),
            Some(MatchSpan {
                start: 3,
                length: 1
            })
        );
        assert_eq!(
            find_match("ΟΔΟΣ", "οδος"),
            Some(MatchSpan {
                start: 0,
                length: 4
            })
        );
    }

    #[test]
    fn test_find_match_offsets_after_folded_chars() {
        assert_eq!(
            find_match("İİx", "x"),
            Some(MatchSpan {
                start: 2,
                length: 1
            })
        );
    }

    #[test]
    fn test_split() {
        let span = MatchSpan {
            start: 1,
            length: 2,
        };
        assert_eq!(span.split("cat"), ("c", "at", ""));
        let span = MatchSpan {
            start: 0,
            length: 2,
        };
        assert_eq!(span.split("Äpfel"), ("", "Äp", "fel"));
    }

    #[test]
    fn test_no_filter_sorts_alphabetically() {
        let terms = vec![
            Term::new(0, "zebra", "z"),
            Term::new(1, "Apple!", "a"),
            Term::new(2, "mango", "m"),
        ];
        let entries = filter_terms(&terms, &FilterState::default());
        assert_eq!(fronts(&terms, &entries), vec!["Apple", "mango", "zebra"]);
        assert!(entries.iter().all(|entry| entry.span.is_none()));
    }

    #[test]
    fn test_weekly_keeps_catalog_order() {
        let terms = vec![
            Term::new(0, "zebra!", "z"),
            Term::new(1, "apple!", "a"),
            Term::new(2, "mango", "m"),
        ];
        let mut filter = FilterState::default();
        filter.set_weekly(true);
        let entries = filter_terms(&terms, &filter);
        assert_eq!(fronts(&terms, &entries), vec!["zebra", "apple"]);
    }

    #[test]
    fn test_weekly_and_repeats() {
        let terms = catalog();
        let mut filter = FilterState::default();
        filter.set_weekly(true);
        let entries = filter_terms(&terms, &filter);
        assert_eq!(fronts(&terms, &entries), vec!["dog", "fox"]);
        filter.set_repeats(true);
        let entries = filter_terms(&terms, &filter);
        assert_eq!(fronts(&terms, &entries), vec!["fox"]);
    }

    #[test]
    fn test_search_reports_span() {
        let terms = catalog();
        let mut filter = FilterState::default();
        filter.set_search_text("at");
        let entries = filter_terms(&terms, &filter);
        assert_eq!(entries.len(), 1);
        assert_eq!(terms[entries[0].index].front(), "cat");
        assert_eq!(
            entries[0].span,
            Some(MatchSpan {
                start: 1,
                length: 2
            })
        );
    }

    #[test]
    fn test_search_ignores_markers() {
        let terms = catalog();
        let mut filter = FilterState::default();
        filter.set_search_text("FOX!");
        let entries = filter_terms(&terms, &filter);
        assert_eq!(fronts(&terms, &entries), vec!["fox"]);
        // The marker itself never matches anything.
        filter.set_search_text("!");
        let entries = filter_terms(&terms, &filter);
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_every_entry_contains_search_text() {
        let terms = vec![
            Term::new(0, "Transcription!", "DNA to RNA"),
            Term::new(1, "translation!R", "RNA to protein"),
            Term::new(2, "Ribosome", "site of translation"),
            Term::new(3, "tRNA", "carries amino acids"),
        ];
        for query in ["t", "RAN", "tion", "rna", "x", "Ri"] {
            let mut filter = FilterState::default();
            filter.set_search_text(query);
            for entry in filter_terms(&terms, &filter) {
                let front = terms[entry.index].front().to_lowercase();
                assert!(front.contains(&query.to_lowercase()));
            }
        }
    }

    #[test]
    fn test_counts() {
        let counts = count_modifiers(&catalog());
        assert_eq!(
            counts,
            Counts {
                weekly: 2,
                repeat: 1
            }
        );
        assert_eq!(count_modifiers(&[]), Counts::default());
    }
}
