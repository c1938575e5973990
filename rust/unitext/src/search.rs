//! Search, replace and split.
//!
//! Binary modes run a Knuth-Morris-Pratt scan over code points, folding both sides
//! for the case-insensitive variant. Canonical modes normalize the pattern to NFD and
//! compare it with candidate windows of the haystack through the collator. Windows
//! start and end on extended grapheme cluster boundaries.
//!
//! The haystack itself is never normalized. A haystack whose combining marks are not
//! in canonical order may therefore miss a canonically equivalent occurrence.

use std::cmp::Ordering;

use unitext_common::{Result, error::Error, verify_precondition};
use unitext_unicode::code_points::Utf16PosUtils;
use unitext_unicode::collation::{self, CollationStrength};
use unitext_unicode::comparison;
use unitext_unicode::graphemes::{self, Boundary};
use unitext_unicode::kmp::KMPSearch;
use unitext_unicode::normalization::{self, NormalizationForm};

use crate::compare::{Collation, ComparisonMode};
use crate::position::{Position, PositionIndex};
use crate::text::UnicodeText;

impl UnicodeText {
    /// Code point index of the first occurrence of `pattern`, or `None`.
    pub fn index_of(&self, pattern: &UnicodeText, mode: ComparisonMode) -> Option<u32> {
        self.index_of_from(pattern, 0, mode)
    }

    /// First occurrence of `pattern` starting at or after code point `start`.
    /// `start >= length()` finds nothing.
    pub fn index_of_from(
        &self,
        pattern: &UnicodeText,
        start: u32,
        mode: ComparisonMode,
    ) -> Option<u32> {
        self.index_of_with(pattern, start, mode.into())
    }

    pub fn index_of_with(
        &self,
        pattern: &UnicodeText,
        start: u32,
        collation: Collation,
    ) -> Option<u32> {
        if pattern.is_empty() || start >= self.length() {
            return None;
        }
        let haystack = Haystack::new(self, collation.mode);
        Matcher::new(pattern, collation)
            .search(&haystack, start as usize)
            .map(|(start, _)| start as u32)
    }

    /// Code point index of the last occurrence of `pattern`, or `None`.
    pub fn last_index_of(&self, pattern: &UnicodeText, mode: ComparisonMode) -> Option<u32> {
        self.last_index_of_from(pattern, u32::MAX, mode)
    }

    /// Last occurrence of `pattern` that starts at or before code point `start`.
    /// A `start` beyond the text is clamped to the last code point, and an
    /// occurrence that `start` falls into is still found.
    pub fn last_index_of_from(
        &self,
        pattern: &UnicodeText,
        start: u32,
        mode: ComparisonMode,
    ) -> Option<u32> {
        self.last_index_of_with(pattern, start, mode.into())
    }

    pub fn last_index_of_with(
        &self,
        pattern: &UnicodeText,
        start: u32,
        collation: Collation,
    ) -> Option<u32> {
        if pattern.is_empty() || self.is_empty() {
            return None;
        }
        let start = start.min(self.length() - 1);
        let haystack = Haystack::new(self, collation.mode);
        Matcher::new(pattern, collation)
            .rsearch(&haystack, start as usize)
            .map(|(start, _)| start as u32)
    }

    pub fn contains(&self, pattern: &UnicodeText, mode: ComparisonMode) -> bool {
        self.index_of(pattern, mode).is_some()
    }

    /// Whether the text begins with `pattern`. An empty pattern never matches.
    pub fn starts_with(&self, pattern: &UnicodeText, mode: ComparisonMode) -> bool {
        if pattern.is_empty() {
            return false;
        }
        match mode {
            ComparisonMode::BinaryCaseSensitive => {
                self.as_code_units().starts_with(pattern.as_code_units())
            }
            ComparisonMode::BinaryCaseInsensitive => {
                comparison::utf16_folded_is_prefix(pattern.as_code_units(), self.as_code_units())
            }
            _ => {
                let haystack = Haystack::new(self, mode);
                let matcher = CanonicalMatcher::new(pattern, mode.into());
                matcher.match_at(&haystack, 0).is_some()
            }
        }
    }

    /// Whether the text ends with `pattern`. An empty pattern never matches.
    pub fn ends_with(&self, pattern: &UnicodeText, mode: ComparisonMode) -> bool {
        if pattern.is_empty() {
            return false;
        }
        match mode {
            ComparisonMode::BinaryCaseSensitive => {
                self.as_code_units().ends_with(pattern.as_code_units())
            }
            ComparisonMode::BinaryCaseInsensitive => {
                comparison::utf16_folded_is_suffix(pattern.as_code_units(), self.as_code_units())
            }
            _ => {
                let haystack = Haystack::new(self, mode);
                let matcher = CanonicalMatcher::new(pattern, mode.into());
                matcher.match_ending_at_end(&haystack)
            }
        }
    }

    /// Position of the first occurrence of `pattern`; `AfterLast` when there is none.
    pub fn position_of(&self, pattern: &UnicodeText, mode: ComparisonMode) -> Position<'_> {
        match self.index_of(pattern, mode) {
            Some(index) => Position::at(self, index),
            None => Position::after_last(self),
        }
    }

    /// Position of the first occurrence of `pattern` at or after `from`.
    ///
    /// `from` must be a valid interior position of this text.
    pub fn position_of_from(
        &self,
        pattern: &UnicodeText,
        from: &Position<'_>,
        mode: ComparisonMode,
    ) -> Result<Position<'_>> {
        verify_precondition!("position_of_from", std::ptr::eq(from.text(), self));
        verify_precondition!("position_of_from", from.is_valid());
        let PositionIndex::At(start) = from.index() else {
            return Err(Error::precondition(
                "position_of_from",
                "the start position is at an end sentinel",
            ));
        };
        Ok(match self.index_of_from(pattern, start, mode) {
            Some(index) => Position::at(self, index),
            None => Position::after_last(self),
        })
    }

    /// Replaces every non-overlapping occurrence of `pattern` with `replacement`,
    /// scanning left to right. An empty pattern or text leaves the text unchanged.
    pub fn replace(
        &mut self,
        pattern: &UnicodeText,
        replacement: &UnicodeText,
        mode: ComparisonMode,
    ) {
        if pattern.is_empty() || self.is_empty() {
            return;
        }
        let matches = {
            let haystack = Haystack::new(self, mode);
            let mut matches = Vec::new();
            Matcher::new(pattern, mode.into()).search_all(&haystack, 0, |start, end| {
                matches.push((start, end));
                false
            });
            matches
        };
        if matches.is_empty() {
            return;
        }

        let units = self.as_code_units();
        let offsets = units.utf16_offsets();
        let mut result = Vec::with_capacity(units.len());
        let mut copied = 0;
        for (start, end) in matches {
            result.extend_from_slice(&units[offsets[copied]..offsets[start]]);
            result.extend_from_slice(replacement.as_code_units());
            copied = end;
        }
        result.extend_from_slice(&units[offsets[copied]..]);
        self.set_units(result);
    }

    /// Splits on every binary, case-sensitive occurrence of `separator`.
    ///
    /// The result always holds at least one part: an empty text yields one empty
    /// part and an empty separator yields the whole text. Adjacent separators
    /// produce empty parts.
    pub fn split(&self, separator: &UnicodeText) -> Vec<UnicodeText> {
        if self.is_empty() {
            return vec![UnicodeText::new()];
        }
        if separator.is_empty() {
            return vec![self.clone()];
        }

        let units = self.as_code_units();
        let offsets = units.utf16_offsets();
        let haystack = Haystack::new(self, ComparisonMode::BinaryCaseSensitive);
        let mut parts = Vec::new();
        let mut part_start = 0;
        Matcher::new(separator, ComparisonMode::BinaryCaseSensitive.into()).search_all(
            &haystack,
            0,
            |start, end| {
                parts.push(UnicodeText::from_units(
                    units[offsets[part_start]..offsets[start]].to_vec(),
                ));
                part_start = end;
                false
            },
        );
        parts.push(UnicodeText::from_units(units[offsets[part_start]..].to_vec()));
        parts
    }
}

/// The searched text in the shape the matcher needs: code points for binary scans,
/// a string with its grapheme boundaries for canonical ones.
enum Haystack {
    Chars(Vec<char>),
    Graphemes { text: String, boundaries: Vec<Boundary> },
}

impl Haystack {
    fn new(text: &UnicodeText, mode: ComparisonMode) -> Self {
        if mode.is_canonical() {
            let text = text.to_std_string();
            let boundaries = graphemes::grapheme_boundaries(&text);
            Haystack::Graphemes { text, boundaries }
        } else {
            Haystack::Chars(text.chars().collect())
        }
    }
}

enum Matcher {
    Binary(KMPSearch),
    Canonical(CanonicalMatcher),
}

impl Matcher {
    fn new(pattern: &UnicodeText, collation: Collation) -> Self {
        if collation.mode.is_canonical() {
            Matcher::Canonical(CanonicalMatcher::new(pattern, collation))
        } else {
            Matcher::Binary(KMPSearch::new_with_pattern(
                pattern.chars(),
                collation.mode.is_case_sensitive(),
            ))
        }
    }

    /// First match starting at or after code point `from`, as a code point range.
    fn search(&self, haystack: &Haystack, from: usize) -> Option<(usize, usize)> {
        let mut result = None;
        self.search_all(haystack, from, |start, end| {
            result = Some((start, end));
            true
        });
        result
    }

    /// Reports non-overlapping matches at or after `from` until `collector` returns true.
    fn search_all<F>(&self, haystack: &Haystack, from: usize, collector: F)
    where
        F: FnMut(usize, usize) -> bool,
    {
        match (self, haystack) {
            (Matcher::Binary(kmp), Haystack::Chars(chars)) => {
                kmp.search_all(chars, from, collector)
            }
            (Matcher::Canonical(matcher), Haystack::Graphemes { .. }) => {
                matcher.search_all(haystack, from, collector)
            }
            _ => log::debug!("search_all: matcher and haystack kinds differ"),
        }
    }

    /// Last match whose start is at or before code point `start`.
    fn rsearch(&self, haystack: &Haystack, start: usize) -> Option<(usize, usize)> {
        match (self, haystack) {
            (Matcher::Binary(kmp), Haystack::Chars(chars)) => {
                let end = chars.len().min(start + kmp.get_pattern_len());
                kmp.rsearch(chars, end)
            }
            (Matcher::Canonical(matcher), Haystack::Graphemes { .. }) => {
                matcher.rsearch(haystack, start)
            }
            _ => None,
        }
    }
}

/// Collation-based matcher over grapheme-aligned windows.
struct CanonicalMatcher {
    /// The pattern in NFD.
    pattern: String,
    /// Upper bound on the code point length of a matching window.
    max_window: usize,
    collation: Collation,
}

impl CanonicalMatcher {
    fn new(pattern: &UnicodeText, collation: Collation) -> Self {
        let pattern = normalization::normalize(&pattern.to_std_string(), NormalizationForm::Nfd);
        let max_window = pattern.chars().count() * 2 + 4;
        CanonicalMatcher {
            pattern,
            max_window,
            collation,
        }
    }

    fn matches(&self, window: &str) -> bool {
        collation::collate(
            window,
            &self.pattern,
            self.collation.locale,
            self.collation.mode.strength(),
        ) == Ordering::Equal
    }

    /// Primary-level test that a window beginning with the grapheme `first` can match:
    /// the primary weights of `first` must be a prefix of the pattern's. U+FFFF has the
    /// highest primary weight, so such a prefix satisfies
    /// `first <= pattern < first + U+FFFF`.
    fn may_start_with(&self, first: &str) -> bool {
        let primary = |a: &str, b: &str| {
            collation::collate(a, b, self.collation.locale, CollationStrength::Primary)
        };
        if primary(first, &self.pattern) == Ordering::Greater {
            return false;
        }
        let mut upper = String::with_capacity(first.len() + 3);
        upper.push_str(first);
        upper.push('\u{FFFF}');
        primary(&self.pattern, &upper) == Ordering::Less
    }

    /// Index into the boundary list of the end of the shortest matching window that
    /// starts at boundary `i`.
    fn match_at(&self, haystack: &Haystack, i: usize) -> Option<usize> {
        let Haystack::Graphemes { text, boundaries } = haystack else {
            return None;
        };
        let start = boundaries.get(i)?;
        let first = boundaries.get(i + 1)?;
        if !self.may_start_with(&text[start.byte..first.byte]) {
            return None;
        }
        boundaries
            .iter()
            .enumerate()
            .skip(i + 1)
            .take_while(|(_, end)| end.index - start.index <= self.max_window)
            .find(|(_, end)| self.matches(&text[start.byte..end.byte]))
            .map(|(j, _)| j)
    }

    fn match_ending_at_end(&self, haystack: &Haystack) -> bool {
        let Haystack::Graphemes { text, boundaries } = haystack else {
            return false;
        };
        let Some(end) = boundaries.last() else {
            return false;
        };
        boundaries
            .windows(2)
            .rev()
            .take_while(|pair| end.index - pair[0].index <= self.max_window)
            .any(|pair| {
                self.may_start_with(&text[pair[0].byte..pair[1].byte])
                    && self.matches(&text[pair[0].byte..end.byte])
            })
    }

    fn search_all<F>(&self, haystack: &Haystack, from: usize, mut collector: F)
    where
        F: FnMut(usize, usize) -> bool,
    {
        let Haystack::Graphemes { boundaries, .. } = haystack else {
            return;
        };
        let mut i = boundaries.partition_point(|b| b.index < from);
        while i + 1 < boundaries.len() {
            match self.match_at(haystack, i) {
                Some(j) => {
                    if collector(boundaries[i].index, boundaries[j].index) {
                        return;
                    }
                    i = j;
                }
                None => i += 1,
            }
        }
    }

    fn rsearch(&self, haystack: &Haystack, start: usize) -> Option<(usize, usize)> {
        let Haystack::Graphemes { boundaries, .. } = haystack else {
            return None;
        };
        let last = boundaries.partition_point(|b| b.index <= start);
        (0..last.min(boundaries.len().saturating_sub(1)))
            .rev()
            .find_map(|i| {
                self.match_at(haystack, i)
                    .map(|j| (boundaries[i].index, boundaries[j].index))
            })
    }
}
