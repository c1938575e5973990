use crate::case_conversions::CharCaseMapper;

/// Implementation of Knuth-Morris-Pratt algorithm for sub-text search over code points.
/// https://en.wikipedia.org/wiki/Knuth%E2%80%93Morris%E2%80%93Pratt_algorithm
///
/// Positions are code point indices into the searched `&[char]` slice. The
/// case-insensitive variant applies simple case folding to both the pattern and the
/// text, which keeps the folded text aligned with the original one.
pub struct KMPSearch {
    pattern: Vec<char>,
    case_sensitive: bool,
    lps: Vec<usize>,
    reversed: Vec<char>,
    reversed_lps: Vec<usize>,
}

impl KMPSearch {
    pub fn new(case_sensitive: bool) -> Self {
        KMPSearch {
            pattern: Vec::new(),
            case_sensitive,
            lps: Vec::new(),
            reversed: Vec::new(),
            reversed_lps: Vec::new(),
        }
    }

    pub fn new_with_pattern<I>(pattern: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut kmp = Self::new(case_sensitive);
        kmp.set_pattern(pattern);
        kmp
    }

    pub fn set_pattern<I>(&mut self, pattern: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.pattern.clear();
        if self.case_sensitive {
            self.pattern.extend(pattern);
        } else {
            self.pattern
                .extend(pattern.into_iter().map(|ch| ch.fold_simple()));
        }
        self.reversed.clear();
        self.reversed.extend(self.pattern.iter().rev());

        build_lps_table(&self.pattern, &mut self.lps);
        build_lps_table(&self.reversed, &mut self.reversed_lps);
    }

    pub fn get_pattern_len(&self) -> usize {
        self.pattern.len()
    }

    #[inline]
    fn map_char(&self, ch: char) -> char {
        if self.case_sensitive {
            ch
        } else {
            ch.fold_simple()
        }
    }

    /// Searches for the first pattern appearance in `text` that starts at or after
    /// `from`. If found, the match's start/end code point index is returned.
    pub fn search(&self, text: &[char], from: usize) -> Option<(usize, usize)> {
        let mut result = None;
        self.search_all(text, from, |start, end| {
            result = Some((start, end));
            true
        });
        result
    }

    /// Searches for all non-overlapping pattern appearances in `text`, starting at
    /// code point index `from`. The passed collector is called on every entrance found
    /// with the match's start and end index. The search continues until the collector
    /// signals to stop by returning true, or until the end of the text.
    ///
    /// An empty pattern never matches.
    pub fn search_all<F>(&self, text: &[char], from: usize, mut collector: F)
    where
        F: FnMut(usize, usize) -> bool,
    {
        if self.pattern.is_empty() || from >= text.len() {
            return;
        }
        let chars = text[from..].iter().map(|&ch| self.map_char(ch));
        scan(&self.pattern, &self.lps, chars, |end| {
            let end = from + end;
            collector(end - self.pattern.len(), end)
        });
    }

    /// Searches backwards for the last pattern appearance that lies entirely within
    /// `text[..end]`. If found, the match's start/end code point index is returned.
    pub fn rsearch(&self, text: &[char], end: usize) -> Option<(usize, usize)> {
        let end = end.min(text.len());
        if self.pattern.is_empty() || end == 0 {
            return None;
        }
        let chars = text[..end].iter().rev().map(|&ch| self.map_char(ch));
        let mut result = None;
        scan(&self.reversed, &self.reversed_lps, chars, |rev_end| {
            let start = end - rev_end;
            result = Some((start, start + self.pattern.len()));
            true
        });
        result
    }
}

/// Pre-builds the longest proper suffix table for `pattern`.
fn build_lps_table(pattern: &[char], lps: &mut Vec<usize>) {
    lps.clear();
    if pattern.is_empty() {
        return;
    }
    lps.resize(pattern.len(), 0);

    let mut i = 1usize;
    let mut j = 0usize;
    while i < pattern.len() {
        if pattern[i] == pattern[j] {
            lps[i] = j + 1;
            i += 1;
            j += 1;
        } else if j != 0 {
            j = lps[j - 1];
        } else {
            lps[i] = 0;
            i += 1;
        }
    }
}

/// Runs the matcher over `chars`. `on_match` receives the exclusive end index (relative
/// to the start of `chars`) of every non-overlapping match and returns true to stop.
fn scan<C, F>(pattern: &[char], lps: &[usize], chars: C, mut on_match: F)
where
    C: Iterator<Item = char>,
    F: FnMut(usize) -> bool,
{
    let mut chars = chars.enumerate();
    let mut next = chars.next();
    let mut i = 0usize;
    while let Some((pos, ch)) = next {
        if pattern[i] != ch {
            if i == 0 {
                next = chars.next();
            } else {
                i = lps[i - 1];
            }
        } else {
            i += 1;
            if i == pattern.len() {
                if on_match(pos + 1) {
                    return;
                }
                i = 0;
            }
            next = chars.next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_kmp_search() {
        let mut kmp = KMPSearch::new_with_pattern("abc".chars(), true);
        assert_eq!(Some((4, 7)), kmp.search(&chars("abababcabab"), 0));
        assert_eq!(None, kmp.search(&chars("ababd"), 0));
        assert_eq!(None, kmp.search(&chars("abCdef"), 0));
        assert_eq!(None, kmp.search(&chars("abababcabab"), 5));
        kmp.set_pattern("שלום".chars());
        assert_eq!(Some((0, 4)), kmp.search(&chars("שלום לכם"), 0));
        assert_eq!(Some((5, 9)), kmp.search(&chars("הסכם שלום"), 0));

        let mut kmp = KMPSearch::new_with_pattern("Abc".chars(), false);
        assert_eq!(Some((4, 7)), kmp.search(&chars("abababcabab"), 0));
        assert_eq!(None, kmp.search(&chars("abAbd"), 0));
        kmp.set_pattern("Trüben".chars());
        assert_eq!(
            Some((24, 30)),
            kmp.search(&chars("Die früh sich einst dem trüben Blick gezeigt."), 0)
        );

        let mut kmp = KMPSearch::new(true);
        assert_eq!(None, kmp.search(&chars("any text"), 0));
        kmp.set_pattern("👌".chars());
        assert_eq!(Some((10, 11)), kmp.search(&chars("все будет 👌"), 0));
    }

    #[test]
    fn test_kmp_search_all() {
        for cs in [false, true] {
            let mut results = Vec::new();
            let mut kmp = KMPSearch::new(cs);
            kmp.search_all(&chars("any text"), 0, |start, end| {
                results.push((start, end));
                false
            });
            assert!(results.is_empty());

            kmp.set_pattern("abc".chars());
            kmp.search_all(&chars("abcabc.abc.abc"), 0, |start, end| {
                results.push((start, end));
                false
            });
            assert_eq!(vec![(0, 3), (3, 6), (7, 10), (11, 14)], results);

            kmp.set_pattern("🐓".chars());
            results.clear();
            kmp.search_all(&chars("🐓  🐥  🐥🐓🐥🐥  🐥🐓"), 0, |start, end| {
                results.push((start, end));
                false
            });
            assert_eq!(vec![(0, 1), (7, 8), (13, 14)], results);
        }

        // Matches never overlap.
        let kmp = KMPSearch::new_with_pattern("aa".chars(), true);
        let mut results = Vec::new();
        kmp.search_all(&chars("aaaaa"), 0, |start, end| {
            results.push((start, end));
            false
        });
        assert_eq!(vec![(0, 2), (2, 4)], results);

        for pattern in ["ß", "ẞ"] {
            let mut results = Vec::new();
            let kmp = KMPSearch::new_with_pattern(pattern.chars(), false);
            kmp.search_all(&chars("ẞamm-ßamm"), 0, |start, end| {
                results.push((start, end));
                false
            });
            assert_eq!(vec![(0, 1), (5, 6)], results);
        }
    }

    #[test]
    fn test_kmp_rsearch() {
        let kmp = KMPSearch::new_with_pattern("abc".chars(), true);
        let text = chars("abcabc.abc");
        assert_eq!(Some((7, 10)), kmp.rsearch(&text, text.len()));
        assert_eq!(Some((3, 6)), kmp.rsearch(&text, 9));
        assert_eq!(Some((0, 3)), kmp.rsearch(&text, 5));
        assert_eq!(None, kmp.rsearch(&text, 2));
        assert_eq!(Some((7, 10)), kmp.rsearch(&text, 100));

        let kmp = KMPSearch::new_with_pattern("ABA".chars(), false);
        assert_eq!(Some((2, 5)), kmp.rsearch(&chars("ababa"), 5));
    }
}
