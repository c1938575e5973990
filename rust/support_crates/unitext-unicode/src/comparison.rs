use crate::case_conversions::CharCaseMapper;
use itertools::{EitherOrBoth, Itertools};
use std::cmp::Ordering;

/// Yields the UTF-16 code units of `units` after simple case folding of every
/// code point. Unpaired surrogates are passed through unchanged.
pub fn utf16_folded_units(units: &[u16]) -> impl Iterator<Item = u16> + '_ {
    std::char::decode_utf16(units.iter().copied()).flat_map(|ch| {
        let mut buf = [0u16; 2];
        let n = match ch {
            Ok(ch) => ch.fold_simple().encode_utf16(&mut buf).len(),
            Err(e) => {
                buf[0] = e.unpaired_surrogate();
                1
            }
        };
        buf.into_iter().take(n)
    })
}

/// Ordinal comparison of two UTF-16 sequences after simple case folding of both.
pub fn utf16_folded_cmp(s1: &[u16], s2: &[u16]) -> Ordering {
    for eob in utf16_folded_units(s1).zip_longest(utf16_folded_units(s2)) {
        match eob {
            EitherOrBoth::Both(u1, u2) => {
                if u1 != u2 {
                    return u1.cmp(&u2);
                }
            }
            EitherOrBoth::Left(_) => return Ordering::Greater, // s2 is exhausted
            EitherOrBoth::Right(_) => return Ordering::Less,   // s1 is exhausted
        }
    }
    Ordering::Equal
}

/// States whether the case-folded `s1` is a prefix of the case-folded `s2`.
pub fn utf16_folded_is_prefix(s1: &[u16], s2: &[u16]) -> bool {
    for eob in utf16_folded_units(s1).zip_longest(utf16_folded_units(s2)) {
        match eob {
            EitherOrBoth::Both(u1, u2) => {
                if u1 != u2 {
                    return false;
                }
            }
            EitherOrBoth::Left(_) => return false, // s2 is shorter than s1
            EitherOrBoth::Right(_) => return true,
        }
    }
    true
}

/// States whether the case-folded `s1` is a suffix of the case-folded `s2`.
pub fn utf16_folded_is_suffix(s1: &[u16], s2: &[u16]) -> bool {
    let s1 = utf16_folded_units(s1).collect::<Vec<_>>();
    let s2 = utf16_folded_units(s2).collect::<Vec<_>>();
    s2.ends_with(&s1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_folded_cmp() {
        assert_eq!(
            Ordering::Equal,
            utf16_folded_cmp(&units("Straße"), &units("STRAẞE"))
        );
        assert_eq!(Ordering::Equal, utf16_folded_cmp(&units(""), &units("")));
        assert_eq!(Ordering::Less, utf16_folded_cmp(&units("abc"), &units("ABD")));
        assert_eq!(
            Ordering::Greater,
            utf16_folded_cmp(&units("abcd"), &units("ABC"))
        );
        assert_eq!(Ordering::Less, utf16_folded_cmp(&units("ab"), &units("ABC")));
        // Folding does not make canonically equivalent forms equal.
        assert_ne!(
            Ordering::Equal,
            utf16_folded_cmp(&units("\u{00C5}"), &units("A\u{030A}"))
        );
    }

    #[test]
    fn test_folded_prefix_suffix() {
        assert!(utf16_folded_is_prefix(&units("STR"), &units("straße")));
        assert!(utf16_folded_is_prefix(&units(""), &units("straße")));
        assert!(!utf16_folded_is_prefix(&units("straßen"), &units("straße")));
        assert!(utf16_folded_is_suffix(&units("SSE"), &units("strasse")));
        assert!(utf16_folded_is_suffix(&units("ẞE"), &units("straße")));
        assert!(!utf16_folded_is_suffix(&units("xE"), &units("straße")));
    }
}
