//! Locale-based collation backed by ICU4X.
//!
//! Collators are expensive to build, so one collator per (locale, strength) pair is
//! created lazily on first use and shared process-wide afterwards. Variable
//! (whitespace and punctuation) collation elements are non-ignorable, so they take
//! part in the comparison at the primary level.

use icu_collator::options::{AlternateHandling, CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed};
use icu_locale_core::locale;
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Reference locale of the collation tables. `EnUs` is the only supported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollationLocale {
    #[default]
    EnUs,
}

impl CollationLocale {
    pub const fn tag(&self) -> &'static str {
        match self {
            CollationLocale::EnUs => "en-US",
        }
    }
}

/// Number of collation levels taken into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollationStrength {
    /// Base letters only.
    Primary,
    /// Base letters and accents; case differences are ignored.
    Secondary,
    /// Base letters, accents and case.
    Tertiary,
}

fn build_collator(
    locale: CollationLocale,
    strength: CollationStrength,
) -> Option<CollatorBorrowed<'static>> {
    let mut options = CollatorOptions::default();
    options.strength = Some(match strength {
        CollationStrength::Primary => Strength::Primary,
        CollationStrength::Secondary => Strength::Secondary,
        CollationStrength::Tertiary => Strength::Tertiary,
    });
    options.alternate_handling = Some(AlternateHandling::NonIgnorable);

    let prefs = match locale {
        CollationLocale::EnUs => locale!("en-US").into(),
    };
    match Collator::try_new(prefs, options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            log::warn!(
                "failed to create {} collator ({strength:?}): {e}; falling back to binary order",
                locale.tag()
            );
            None
        }
    }
}

fn collator(
    locale: CollationLocale,
    strength: CollationStrength,
) -> Option<&'static CollatorBorrowed<'static>> {
    static EN_US_PRIMARY: OnceLock<Option<CollatorBorrowed<'static>>> = OnceLock::new();
    static EN_US_SECONDARY: OnceLock<Option<CollatorBorrowed<'static>>> = OnceLock::new();
    static EN_US_TERTIARY: OnceLock<Option<CollatorBorrowed<'static>>> = OnceLock::new();

    let cell = match (locale, strength) {
        (CollationLocale::EnUs, CollationStrength::Primary) => &EN_US_PRIMARY,
        (CollationLocale::EnUs, CollationStrength::Secondary) => &EN_US_SECONDARY,
        (CollationLocale::EnUs, CollationStrength::Tertiary) => &EN_US_TERTIARY,
    };
    cell.get_or_init(|| build_collator(locale, strength)).as_ref()
}

/// Compares `s1` and `s2` by collation weights of `locale` at the given `strength`.
/// Both operands are canonically decomposed by the collation algorithm, so
/// canonically equivalent strings compare equal.
pub fn collate(
    s1: &str,
    s2: &str,
    locale: CollationLocale,
    strength: CollationStrength,
) -> Ordering {
    match collator(locale, strength) {
        Some(collator) => collator.compare(s1, s2),
        None => s1.encode_utf16().cmp(s2.encode_utf16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(s1: &str, s2: &str, strength: CollationStrength) -> Ordering {
        collate(s1, s2, CollationLocale::EnUs, strength)
    }

    #[test]
    fn test_canonical_equivalence() {
        for strength in [CollationStrength::Secondary, CollationStrength::Tertiary] {
            assert_eq!(Ordering::Equal, cmp("\u{212B}", "\u{00C5}", strength));
            assert_eq!(Ordering::Equal, cmp("A\u{030A}", "\u{00C5}", strength));
        }
    }

    #[test]
    fn test_strength() {
        assert_eq!(Ordering::Equal, cmp("abc", "ABC", CollationStrength::Secondary));
        assert_ne!(Ordering::Equal, cmp("abc", "ABC", CollationStrength::Tertiary));
        assert_ne!(Ordering::Equal, cmp("a", "á", CollationStrength::Secondary));
        assert_eq!(Ordering::Equal, cmp("a", "Á", CollationStrength::Primary));
        assert_ne!(Ordering::Equal, cmp("a", "b", CollationStrength::Primary));
    }

    #[test]
    fn test_reference_order() {
        // whitespace < punctuation < digits < letters
        let ordered = [" ", "_", "-", ",", "!", "1", "9", "a", "A", "á", "b"];
        for pair in ordered.windows(2) {
            assert_eq!(
                Ordering::Less,
                cmp(pair[0], pair[1], CollationStrength::Tertiary),
                "{:?} < {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}
