//! The text value: UTF-16 storage plus a cached code point count.

use std::cmp::Ordering;
use std::fmt::{self, Write};
use std::ops::Range;
use std::str::FromStr;

use unitext_common::{Result, verify_precondition};
use unitext_unicode::case_conversions::StringCaseMapper;
use unitext_unicode::code_points::{self, Utf16PosUtils};

/// A Unicode scalar value, or [`NON_CHARACTER`] when no code point is available.
pub type CodePoint = u32;

/// Reserved non-character returned where no code point exists (end positions,
/// out-of-range indices).
pub const NON_CHARACTER: CodePoint = 0xFFFF;

/// U+FFFD, substituted for ill-formed input.
pub const REPLACEMENT_CHARACTER: CodePoint = code_points::REPLACEMENT_CHAR;

/// Owned, growable Unicode text indexed by code points.
///
/// The content is kept as well-formed UTF-16: every constructor and mutator repairs
/// ill-formed input with U+FFFD, so unpaired surrogates never reach the buffer. The
/// code point count is cached and re-derived on every mutation, making
/// [`length`](Self::length) O(1) while indexed access is linear.
///
/// Cloning performs a deep copy.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct UnicodeText {
    units: Vec<u16>,
    length: u32,
}

impl UnicodeText {
    /// Creates an empty text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a text holding the single code point `cp`. Surrogates and values
    /// above U+10FFFF are replaced with U+FFFD.
    pub fn from_code_point(cp: CodePoint) -> Self {
        let mut text = Self::new();
        text.push(cp);
        text
    }

    /// Builds a text from code units that are known to be well-formed UTF-16.
    pub(crate) fn from_units(units: Vec<u16>) -> Self {
        let mut text = UnicodeText { units, length: 0 };
        text.sync_length();
        text
    }

    /// Number of code points. O(1).
    #[inline]
    pub fn length(&self) -> u32 {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Number of UTF-16 code units in the internal storage.
    #[inline]
    pub fn code_units_len(&self) -> usize {
        self.units.len()
    }

    #[inline]
    pub fn as_code_units(&self) -> &[u16] {
        &self.units
    }

    /// Returns the code point at logical `index`.
    ///
    /// `index >= length()` violates the precondition; the call then returns
    /// [`NON_CHARACTER`] instead of failing.
    pub fn code_point_at(&self, index: u32) -> CodePoint {
        if index >= self.length {
            log::debug!(
                "code_point_at: index {index} is out of range (length {})",
                self.length
            );
            return NON_CHARACTER;
        }
        match self.units.utf16_offset_of(index as usize) {
            Some(offset) => code_points::utf16_code_point_at(&self.units, offset).0,
            None => NON_CHARACTER,
        }
    }

    /// Iterates over the code points as `char`s.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        std::char::decode_utf16(self.units.iter().copied())
            .map(|ch| ch.unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    /// Appends a copy of `other`.
    pub fn append(&mut self, other: &UnicodeText) {
        self.units.extend_from_slice(&other.units);
        // Both sides are well-formed, so no surrogate pair can form at the seam.
        self.length = self.length.saturating_add(other.length);
    }

    pub fn append_str(&mut self, s: &str) {
        self.units.extend(s.encode_utf16());
        self.sync_length();
    }

    /// Appends the code point `cp`; invalid scalars are appended as U+FFFD.
    pub fn push(&mut self, cp: CodePoint) {
        if !code_points::is_scalar_value(cp) {
            log::debug!("push: {cp:#X} is not a scalar value, appending U+FFFD");
        }
        let mut buf = [0u16; 2];
        self.units
            .extend_from_slice(code_points::encode_code_point(cp, &mut buf));
        self.length = self.length.saturating_add(1);
    }

    /// Replaces the content with a deep copy of `other`.
    pub fn assign(&mut self, other: &UnicodeText) {
        self.clone_from(other);
    }

    pub fn clear(&mut self) {
        self.units.clear();
        self.length = 0;
    }

    /// Returns a copy of the code points in the half-open range `start..end`.
    ///
    /// `start > end` violates the precondition. Bounds beyond the length are
    /// clamped to it.
    pub fn substring(&self, start: u32, end: u32) -> Result<UnicodeText> {
        verify_precondition!("substring", start <= end);
        let end = end.min(self.length);
        let start = start.min(end);
        let range = self.unit_range(start, end);
        Ok(UnicodeText::from_units(self.units[range].to_vec()))
    }

    /// Returns the text with every code point mapped to upper case. The mapping is
    /// one-to-one, so the length is preserved.
    pub fn to_uppercase(&self) -> UnicodeText {
        UnicodeText::from(self.to_std_string().to_uppercase_ignore_special())
    }

    /// Returns the text with every code point mapped to lower case. The mapping is
    /// one-to-one, so the length is preserved.
    pub fn to_lowercase(&self) -> UnicodeText {
        UnicodeText::from(self.to_std_string().to_lowercase_ignore_special())
    }

    /// Returns the text after default simple case folding.
    pub fn fold_case(&self) -> UnicodeText {
        UnicodeText::from(self.to_std_string().fold_simple())
    }

    /// Code unit range covering the code points `start..end`.
    pub(crate) fn unit_range(&self, start: u32, end: u32) -> Range<usize> {
        let offsets = self.units.utf16_offsets();
        let at = |index: u32| offsets[(index as usize).min(offsets.len() - 1)];
        at(start)..at(end)
    }

    /// Replaces the code units in `range` with `replacement` and re-derives the length.
    pub(crate) fn splice_units(&mut self, range: Range<usize>, replacement: &[u16]) {
        self.units.splice(range, replacement.iter().copied());
        self.sync_length();
    }

    /// Replaces the whole content with well-formed `units`.
    pub(crate) fn set_units(&mut self, units: Vec<u16>) {
        self.units = units;
        self.sync_length();
    }

    pub(crate) fn to_std_string(&self) -> String {
        String::from_utf16_lossy(&self.units)
    }

    fn sync_length(&mut self) {
        self.length = u32::try_from(self.units.utf16_len()).unwrap_or(u32::MAX);
    }
}

impl From<&str> for UnicodeText {
    fn from(s: &str) -> Self {
        UnicodeText {
            units: s.encode_utf16().collect(),
            length: u32::try_from(s.chars().count()).unwrap_or(u32::MAX),
        }
    }
}

impl From<String> for UnicodeText {
    fn from(s: String) -> Self {
        UnicodeText::from(s.as_str())
    }
}

impl From<char> for UnicodeText {
    fn from(ch: char) -> Self {
        UnicodeText::from_code_point(ch as CodePoint)
    }
}

impl FromStr for UnicodeText {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(UnicodeText::from(s))
    }
}

/// Binary (code unit) order, matching `ComparisonMode::BinaryCaseSensitive`.
impl PartialOrd for UnicodeText {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UnicodeText {
    fn cmp(&self, other: &Self) -> Ordering {
        self.units.cmp(&other.units)
    }
}

impl fmt::Display for UnicodeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.chars() {
            f.write_char(ch)?;
        }
        Ok(())
    }
}

impl fmt::Debug for UnicodeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_std_string(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_is_code_points() {
        assert_eq!(0, UnicodeText::new().length());
        assert!(UnicodeText::new().is_empty());
        let text = UnicodeText::from("a🐓b");
        assert_eq!(3, text.length());
        assert_eq!(4, text.code_units_len());
        assert_eq!(6, UnicodeText::from("Straße").length());
    }

    #[test]
    fn test_code_point_at() {
        let text = UnicodeText::from("a🐓b");
        assert_eq!('a' as u32, text.code_point_at(0));
        assert_eq!(0x1F413, text.code_point_at(1));
        assert_eq!('b' as u32, text.code_point_at(2));
        assert_eq!(NON_CHARACTER, text.code_point_at(3));
        assert_eq!(NON_CHARACTER, UnicodeText::new().code_point_at(0));
    }

    #[test]
    fn test_from_code_point() {
        assert_eq!("ñ", UnicodeText::from_code_point(0xF1).to_string());
        assert_eq!(2, UnicodeText::from_code_point(0x1F413).code_units_len());
        assert_eq!(
            REPLACEMENT_CHARACTER,
            UnicodeText::from_code_point(0xD800).code_point_at(0)
        );
        assert_eq!(
            REPLACEMENT_CHARACTER,
            UnicodeText::from_code_point(0x110000).code_point_at(0)
        );
    }

    #[test]
    fn test_append_and_assign() {
        let mut text = UnicodeText::from("ab");
        text.append(&UnicodeText::from("🐓"));
        assert_eq!(3, text.length());
        text.append_str("cd");
        text.push('e' as u32);
        assert_eq!("ab🐓cde", text.to_string());
        assert_eq!(6, text.length());

        let mut other = UnicodeText::from("xyz");
        other.assign(&text);
        assert_eq!(text, other);
        other.push('!' as u32);
        assert_ne!(text, other);

        other.clear();
        assert!(other.is_empty());
        assert_eq!(0, other.length());
    }

    #[test]
    fn test_substring() {
        let text = UnicodeText::from("a🐓bcd");
        assert_eq!("🐓b", text.substring(1, 3).unwrap().to_string());
        assert_eq!("", text.substring(2, 2).unwrap().to_string());
        assert_eq!("cd", text.substring(3, 100).unwrap().to_string());
        assert_eq!("", text.substring(50, 100).unwrap().to_string());
        assert!(
            text.substring(3, 1)
                .unwrap_err()
                .is_precondition_violation()
        );
    }

    #[test]
    fn test_case_mapping() {
        let text = UnicodeText::from("Straße ñ");
        assert_eq!("STRAẞE Ñ", text.to_uppercase().to_string());
        assert_eq!("straße ñ", text.to_lowercase().to_string());
        assert_eq!(text.length(), text.to_uppercase().length());
        assert_eq!("straße", UnicodeText::from("STRAẞE").fold_case().to_string());
    }

    #[test]
    fn test_ordering_and_debug() {
        let a = UnicodeText::from("abc");
        let b = UnicodeText::from("abd");
        assert!(a < b);
        assert_eq!("\"abc\"", format!("{a:?}"));
        assert_eq!(vec!['a', 'b', 'c'], a.chars().collect::<Vec<_>>());
        let parsed: UnicodeText = "abc".parse().unwrap();
        assert_eq!(a, parsed);
    }
}
