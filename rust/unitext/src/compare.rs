//! Binary and collation-based comparison.

use std::cmp::Ordering;
use std::str::FromStr;

use unitext_common::{Result, error::Error};
use unitext_unicode::collation::{self, CollationLocale, CollationStrength};
use unitext_unicode::comparison;

use crate::text::UnicodeText;

/// How two texts are compared or matched.
///
/// Binary modes compare UTF-16 code units ordinally (after default simple case
/// folding for the case-insensitive variant). Canonical modes compare collation
/// weights of the reference locale, so canonically equivalent texts are equal.
/// Compatibility modes are reserved and not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComparisonMode {
    #[default]
    BinaryCaseSensitive,
    BinaryCaseInsensitive,
    /// Primary, secondary and tertiary collation levels.
    CanonicalCaseSensitive,
    /// Primary and secondary collation levels.
    CanonicalCaseInsensitive,
}

impl ComparisonMode {
    pub const fn name(&self) -> &'static str {
        match self {
            ComparisonMode::BinaryCaseSensitive => "binary",
            ComparisonMode::BinaryCaseInsensitive => "binary-case-insensitive",
            ComparisonMode::CanonicalCaseSensitive => "canonical",
            ComparisonMode::CanonicalCaseInsensitive => "canonical-case-insensitive",
        }
    }

    pub const fn is_canonical(&self) -> bool {
        matches!(
            self,
            ComparisonMode::CanonicalCaseSensitive | ComparisonMode::CanonicalCaseInsensitive
        )
    }

    pub const fn is_case_sensitive(&self) -> bool {
        matches!(
            self,
            ComparisonMode::BinaryCaseSensitive | ComparisonMode::CanonicalCaseSensitive
        )
    }

    pub(crate) const fn strength(&self) -> CollationStrength {
        if self.is_case_sensitive() {
            CollationStrength::Tertiary
        } else {
            CollationStrength::Secondary
        }
    }
}

impl FromStr for ComparisonMode {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "binary" => Ok(ComparisonMode::BinaryCaseSensitive),
            "binary-case-insensitive" => Ok(ComparisonMode::BinaryCaseInsensitive),
            "canonical" => Ok(ComparisonMode::CanonicalCaseSensitive),
            "canonical-case-insensitive" => Ok(ComparisonMode::CanonicalCaseInsensitive),
            "compatibility" | "compatibility-case-insensitive" => Err(Error::not_supported(
                format!("comparison mode {name}"),
            )),
            _ => Err(Error::invalid_arg(
                "name",
                format!("Unrecognized comparison mode: {name}"),
            )),
        }
    }
}

/// A comparison mode together with the collation locale used by canonical modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Collation {
    pub mode: ComparisonMode,
    pub locale: CollationLocale,
}

impl Collation {
    pub const fn new(mode: ComparisonMode, locale: CollationLocale) -> Self {
        Collation { mode, locale }
    }
}

impl From<ComparisonMode> for Collation {
    fn from(mode: ComparisonMode) -> Self {
        Collation {
            mode,
            locale: CollationLocale::default(),
        }
    }
}

impl UnicodeText {
    /// Compares with `other` under `mode`, using the default collation locale.
    pub fn compare_to(&self, other: &UnicodeText, mode: ComparisonMode) -> Ordering {
        self.compare_with(other, mode.into())
    }

    pub fn compare_with(&self, other: &UnicodeText, collation: Collation) -> Ordering {
        match collation.mode {
            ComparisonMode::BinaryCaseSensitive => self.as_code_units().cmp(other.as_code_units()),
            ComparisonMode::BinaryCaseInsensitive => {
                comparison::utf16_folded_cmp(self.as_code_units(), other.as_code_units())
            }
            mode => collation::collate(
                &self.to_std_string(),
                &other.to_std_string(),
                collation.locale,
                mode.strength(),
            ),
        }
    }

    pub fn equals(&self, other: &UnicodeText, mode: ComparisonMode) -> bool {
        self.compare_to(other, mode) == Ordering::Equal
    }
}
