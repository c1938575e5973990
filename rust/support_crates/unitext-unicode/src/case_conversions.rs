use icu_casemap::CaseMapper;

/// Single code point case mapping, which in addition converts 'ß' (lower Eszett) into
/// 'ẞ' (upper Eszett, which officially exists since 2017) and vice versa.
///
/// Unlike `char::to_lowercase()` and `char::to_uppercase()`, every mapping returns
/// exactly one character, so mapped text keeps its code point length: special
/// casing (e.g. 'ß' -> "SS", 'ŉ' -> "ʼN") is not applied and such characters are
/// left unchanged.
///
/// `fold_simple` applies the default (locale-independent) simple case folding,
/// which is the mapping used for case-insensitive comparison and search.
pub trait CharCaseMapper {
    fn to_lowercase_ignore_special(&self) -> Self;
    fn to_uppercase_ignore_special(&self) -> Self;
    fn fold_simple(&self) -> Self;
}

impl CharCaseMapper for char {
    fn to_lowercase_ignore_special(&self) -> Self {
        if self.is_ascii() {
            return self.to_ascii_lowercase();
        }
        CaseMapper::new().simple_lowercase(*self)
    }

    fn to_uppercase_ignore_special(&self) -> Self {
        if self.is_ascii() {
            return self.to_ascii_uppercase();
        }
        if *self == 'ß' {
            return 'ẞ';
        }
        CaseMapper::new().simple_uppercase(*self)
    }

    fn fold_simple(&self) -> Self {
        if self.is_ascii() {
            return self.to_ascii_lowercase();
        }
        CaseMapper::new().simple_fold(*self)
    }
}

/// Custom implementation of `str::to_lowercase` and `str::to_uppercase`, which
/// is consistent with behavior of applying the `CharCaseMapper` mappings over
/// iterator of chars.
pub trait StringCaseMapper {
    fn to_lowercase_ignore_special(&self) -> String;
    fn to_uppercase_ignore_special(&self) -> String;
    fn fold_simple(&self) -> String;
}

impl StringCaseMapper for str {
    fn to_lowercase_ignore_special(&self) -> String {
        self.chars().map(|ch| ch.to_lowercase_ignore_special()).collect()
    }

    fn to_uppercase_ignore_special(&self) -> String {
        self.chars().map(|ch| ch.to_uppercase_ignore_special()).collect()
    }

    fn fold_simple(&self) -> String {
        self.chars().map(|ch| ch.fold_simple()).collect()
    }
}
