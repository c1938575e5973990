//! Canonical normalization (NFC/NFD) backed by ICU4X compiled data.
//!
//! Compatibility forms (NFKC/NFKD) are reserved: they are not representable as a
//! [`NormalizationForm`] and requesting them by name fails with `NotSupported`.

use icu_normalizer::{ComposingNormalizerBorrowed, DecomposingNormalizerBorrowed};
use std::str::FromStr;
use unitext_common::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizationForm {
    /// Canonical decomposition followed by canonical composition.
    Nfc,
    /// Canonical decomposition.
    Nfd,
}

impl NormalizationForm {
    pub const fn name(&self) -> &'static str {
        match self {
            NormalizationForm::Nfc => "NFC",
            NormalizationForm::Nfd => "NFD",
        }
    }
}

impl FromStr for NormalizationForm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_uppercase().as_str() {
            "NFC" => Ok(NormalizationForm::Nfc),
            "NFD" => Ok(NormalizationForm::Nfd),
            "NFKC" | "NFKD" => Err(Error::not_supported(format!(
                "compatibility normalization form {name}"
            ))),
            _ => Err(Error::invalid_arg(
                "name",
                format!("Unrecognized normalization form: {name}"),
            )),
        }
    }
}

/// Quick check whether `s` is already in the normalization form `form`.
pub fn is_normalized(s: &str, form: NormalizationForm) -> bool {
    match form {
        NormalizationForm::Nfc => ComposingNormalizerBorrowed::new_nfc().is_normalized(s),
        NormalizationForm::Nfd => DecomposingNormalizerBorrowed::new_nfd().is_normalized(s),
    }
}

/// Returns `s` converted to the normalization form `form`.
pub fn normalize(s: &str, form: NormalizationForm) -> String {
    match form {
        NormalizationForm::Nfc => {
            String::from(ComposingNormalizerBorrowed::new_nfc().normalize(s))
        }
        NormalizationForm::Nfd => {
            String::from(DecomposingNormalizerBorrowed::new_nfd().normalize(s))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitext_common::error::ErrorKind;

    #[test]
    fn test_normalize() {
        assert_eq!("\u{00C5}", normalize("A\u{030A}", NormalizationForm::Nfc));
        assert_eq!("\u{00C5}", normalize("\u{212B}", NormalizationForm::Nfc));
        assert_eq!("A\u{030A}", normalize("\u{00C5}", NormalizationForm::Nfd));
        assert_eq!("A\u{030A}", normalize("\u{212B}", NormalizationForm::Nfd));
        assert_eq!("", normalize("", NormalizationForm::Nfd));
        // Canonical reordering of combining marks.
        assert_eq!(
            "a\u{0323}\u{0302}",
            normalize("a\u{0302}\u{0323}", NormalizationForm::Nfd)
        );
    }

    #[test]
    fn test_is_normalized() {
        assert!(is_normalized("abc", NormalizationForm::Nfc));
        assert!(is_normalized("abc", NormalizationForm::Nfd));
        assert!(is_normalized("\u{00C5}", NormalizationForm::Nfc));
        assert!(!is_normalized("\u{00C5}", NormalizationForm::Nfd));
        assert!(!is_normalized("A\u{030A}", NormalizationForm::Nfc));
        assert!(!is_normalized("\u{212B}", NormalizationForm::Nfc));
    }

    #[test]
    fn test_form_from_str() {
        assert_eq!(NormalizationForm::Nfc, "nfc".parse().unwrap());
        assert_eq!(NormalizationForm::Nfd, "NFD".parse().unwrap());
        let err = "NFKC".parse::<NormalizationForm>().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::NotSupported { .. }));
        let err = "NFX".parse::<NormalizationForm>().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
    }
}
