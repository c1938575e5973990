use unicode_segmentation::UnicodeSegmentation;

/// Extended grapheme cluster boundary, expressed both as a UTF-8 byte offset and as
/// a code point index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub byte: usize,
    pub index: usize,
}

/// Calculates all extended grapheme cluster boundaries of `s`, including the
/// start (0) and the end of the string. The result always has at least one entry.
pub fn grapheme_boundaries(s: &str) -> Vec<Boundary> {
    let mut boundaries = Vec::with_capacity(s.len() + 1);
    let mut index = 0usize;
    for (byte, grapheme) in s.grapheme_indices(true) {
        boundaries.push(Boundary { byte, index });
        index += grapheme.chars().count();
    }
    boundaries.push(Boundary {
        byte: s.len(),
        index,
    });
    boundaries
}
