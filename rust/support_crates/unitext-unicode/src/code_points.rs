/// Unicode replacement character, substituted for ill-formed input.
pub const REPLACEMENT_CHAR: u32 = 0xFFFD;

#[inline]
pub fn is_lead_surrogate(unit: u16) -> bool {
    (unit & 0xFC00) == 0xD800
}

#[inline]
pub fn is_trail_surrogate(unit: u16) -> bool {
    (unit & 0xFC00) == 0xDC00
}

/// Returns `true` if `cp` is a Unicode scalar value (not a surrogate, not above U+10FFFF).
#[inline]
pub fn is_scalar_value(cp: u32) -> bool {
    cp < 0xD800 || (0xE000..=0x10FFFF).contains(&cp)
}

/// Number of code units taken by the code point starting at `pos`.
/// A lone surrogate counts as a single-unit code point.
///
/// NOTE: `pos` must be below `units.len()`.
#[inline]
fn utf16_char_width_relaxed(units: &[u16], pos: usize) -> usize {
    if is_lead_surrogate(units[pos])
        && units.get(pos + 1).copied().is_some_and(is_trail_surrogate)
    {
        2
    } else {
        1
    }
}

/// Number of code units taken by the code point ending right before `end`.
///
/// NOTE: `end` must be above zero.
#[inline]
fn utf16_prev_char_width_relaxed(units: &[u16], end: usize) -> usize {
    if end >= 2 && is_trail_surrogate(units[end - 1]) && is_lead_surrogate(units[end - 2]) {
        2
    } else {
        1
    }
}

/// Decodes the code point starting at code unit offset `pos`, returning it together
/// with its width in code units. Lone surrogates are returned as-is.
#[inline]
pub fn utf16_code_point_at(units: &[u16], pos: usize) -> (u32, usize) {
    let lead = units[pos] as u32;
    if utf16_char_width_relaxed(units, pos) == 2 {
        let trail = units[pos + 1] as u32;
        (0x10000 + ((lead - 0xD800) << 10) + (trail - 0xDC00), 2)
    } else {
        (lead, 1)
    }
}

/// Encodes `cp` into `dst` and returns the written code units. Values which are
/// not Unicode scalar values are encoded as U+FFFD.
#[inline]
pub fn encode_code_point(cp: u32, dst: &mut [u16; 2]) -> &[u16] {
    let ch = char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER);
    ch.encode_utf16(dst)
}

#[derive(Clone)]
pub struct Utf16PosIter<'a> {
    pos: usize,
    end: usize,
    units: &'a [u16],
}

impl Iterator for Utf16PosIter<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        let pos = self.pos;
        if pos >= self.end {
            return None;
        }
        self.pos = (pos + utf16_char_width_relaxed(self.units, pos)).min(self.end);
        Some(pos)
    }
}

impl DoubleEndedIterator for Utf16PosIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let mut end = self.end;
        if end <= self.pos {
            return None;
        }
        end -= utf16_prev_char_width_relaxed(self.units, end);
        // A surrogate pair straddling the front cursor is reported as its trailing half.
        end = end.max(self.pos);
        self.end = end;
        Some(end)
    }
}

pub trait Utf16PosUtils {
    /// Iterates over code unit offsets of every code point.
    fn utf16_positions(&self) -> Utf16PosIter<'_>;

    /// Counts code points in the UTF-16 sequence.
    fn utf16_len(&self) -> usize;

    /// Returns the code unit offset of the code point with logical `index`.
    /// `index == utf16_len()` yields the sequence length; anything above yields `None`.
    fn utf16_offset_of(&self, index: usize) -> Option<usize>;

    /// Returns code unit offsets of all code points followed by the sequence length,
    /// so that entry `i` is the offset of code point `i`.
    fn utf16_offsets(&self) -> Vec<usize>;
}

impl Utf16PosUtils for [u16] {
    fn utf16_positions(&self) -> Utf16PosIter<'_> {
        Utf16PosIter {
            pos: 0,
            end: self.len(),
            units: self,
        }
    }

    fn utf16_len(&self) -> usize {
        // Every unit starts a code point except the trailing half of a pair.
        let pairs = self
            .windows(2)
            .filter(|w| is_lead_surrogate(w[0]) && is_trail_surrogate(w[1]))
            .count();
        self.len() - pairs
    }

    fn utf16_offset_of(&self, index: usize) -> Option<usize> {
        self.utf16_positions()
            .chain(std::iter::once(self.len()))
            .nth(index)
    }

    fn utf16_offsets(&self) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(self.len() + 1);
        offsets.extend(self.utf16_positions());
        offsets.push(self.len());
        offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_pos_iter() {
        let empty: [u16; 0] = [];
        assert_eq!(empty.utf16_positions().collect::<Vec<_>>(), &[0usize; 0]);
        assert_eq!(
            empty.utf16_positions().rev().collect::<Vec<_>>(),
            &[0usize; 0]
        );
        assert_eq!(units("ab").utf16_positions().collect::<Vec<_>>(), &[0, 1]);
        assert_eq!(
            units("ab").utf16_positions().rev().collect::<Vec<_>>(),
            &[1, 0]
        );
        assert_eq!(
            units("a\u{1F413}b").utf16_positions().collect::<Vec<_>>(),
            &[0, 1, 3]
        );
        assert_eq!(
            units("a\u{1F413}b")
                .utf16_positions()
                .rev()
                .collect::<Vec<_>>(),
            &[3, 1, 0]
        );
        // Lone surrogates
        assert_eq!(
            [0x61u16, 0xD800].utf16_positions().collect::<Vec<_>>(),
            &[0, 1]
        );
        assert_eq!(
            [0xDC00u16, 0x61].utf16_positions().rev().collect::<Vec<_>>(),
            &[1, 0]
        );
    }

    #[test]
    fn test_utf16_len() {
        assert_eq!(0, units("").utf16_len());
        assert_eq!(4, units("אבגד").utf16_len());
        assert_eq!(6, units("Straße").utf16_len());
        assert_eq!(3, units("🐥a🐓").utf16_len());
        assert_eq!(2, [0xD800u16, 0xD800].utf16_len());
    }

    #[test]
    fn test_offsets() {
        let u = units("a🐓b");
        assert_eq!(u.utf16_offset_of(0), Some(0));
        assert_eq!(u.utf16_offset_of(1), Some(1));
        assert_eq!(u.utf16_offset_of(2), Some(3));
        assert_eq!(u.utf16_offset_of(3), Some(4));
        assert_eq!(u.utf16_offset_of(4), None);
        assert_eq!(u.utf16_offsets(), vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_code_point_at() {
        let u = units("a🐓");
        assert_eq!(utf16_code_point_at(&u, 0), (0x61, 1));
        assert_eq!(utf16_code_point_at(&u, 1), (0x1F413, 2));
        assert_eq!(utf16_code_point_at(&[0xD800u16], 0), (0xD800, 1));

        let mut buf = [0u16; 2];
        assert_eq!(encode_code_point(0x1F413, &mut buf), &u[1..]);
        assert_eq!(encode_code_point(0xDFFF, &mut buf), &[0xFFFD]);
        assert_eq!(encode_code_point(0x110000, &mut buf), &[0xFFFD]);
        assert!(is_scalar_value(0xFFFF));
        assert!(!is_scalar_value(0xD801));
    }
}
