//! Bidirectional code point cursors over a [`UnicodeText`].
//!
//! A position is in one of three states: [`PositionIndex::BeforeFirst`], an interior
//! [`PositionIndex::At`] index in `0..length`, or [`PositionIndex::AfterLast`]. The
//! states are ordered `BeforeFirst < At(0) < ... < At(length - 1) < AfterLast`.
//!
//! Internally a cursor also tracks the UTF-16 code unit offset of its code point;
//! that bookkeeping never leaks into the public API.

use std::cmp::Ordering;

use unitext_common::{Result, error::Error};
use unitext_unicode::code_points::{self, Utf16PosUtils};

use crate::text::{CodePoint, NON_CHARACTER, UnicodeText};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PositionIndex {
    BeforeFirst,
    At(u32),
    AfterLast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    index: PositionIndex,
    /// Code unit offset of the code point at `index`; the storage length for
    /// `AfterLast`, zero for `BeforeFirst`.
    offset: usize,
}

impl Cursor {
    fn before_first() -> Self {
        Cursor {
            index: PositionIndex::BeforeFirst,
            offset: 0,
        }
    }

    fn after_last(text: &UnicodeText) -> Self {
        Cursor {
            index: PositionIndex::AfterLast,
            offset: text.code_units_len(),
        }
    }

    fn first(text: &UnicodeText) -> Self {
        if text.is_empty() {
            Self::after_last(text)
        } else {
            Cursor {
                index: PositionIndex::At(0),
                offset: 0,
            }
        }
    }

    fn last(text: &UnicodeText) -> Self {
        let units = text.as_code_units();
        match units.utf16_positions().next_back() {
            Some(offset) => Cursor {
                index: PositionIndex::At(text.length() - 1),
                offset,
            },
            None => Self::after_last(text),
        }
    }

    fn at(text: &UnicodeText, index: u32) -> Self {
        if index == text.length() {
            return Self::after_last(text);
        }
        let offset = if index < text.length() {
            text.as_code_units()
                .utf16_offset_of(index as usize)
                .unwrap_or(text.code_units_len())
        } else {
            text.code_units_len()
        };
        Cursor {
            index: PositionIndex::At(index),
            offset,
        }
    }

    fn is_valid(&self, text: &UnicodeText) -> bool {
        match self.index {
            PositionIndex::At(index) => index < text.length(),
            PositionIndex::BeforeFirst | PositionIndex::AfterLast => true,
        }
    }

    fn increment(&mut self, text: &UnicodeText) -> Result<()> {
        match self.index {
            PositionIndex::BeforeFirst => {
                *self = Self::first(text);
                Ok(())
            }
            PositionIndex::At(index) if index < text.length() => {
                let (_, width) =
                    code_points::utf16_code_point_at(text.as_code_units(), self.offset);
                if index + 1 == text.length() {
                    *self = Self::after_last(text);
                } else {
                    self.index = PositionIndex::At(index + 1);
                    self.offset += width;
                }
                Ok(())
            }
            PositionIndex::At(index) => Err(invalid_position("increment", index, text)),
            PositionIndex::AfterLast => Err(Error::precondition(
                "increment",
                "cannot move past the AfterLast position",
            )),
        }
    }

    fn decrement(&mut self, text: &UnicodeText) -> Result<()> {
        match self.index {
            PositionIndex::AfterLast => {
                *self = if text.is_empty() {
                    Self::before_first()
                } else {
                    Self::last(text)
                };
                Ok(())
            }
            PositionIndex::At(0) if !text.is_empty() => {
                *self = Self::before_first();
                Ok(())
            }
            PositionIndex::At(index) if index < text.length() => {
                let units = &text.as_code_units()[..self.offset];
                self.offset = units.utf16_positions().next_back().unwrap_or(0);
                self.index = PositionIndex::At(index - 1);
                Ok(())
            }
            PositionIndex::At(index) => Err(invalid_position("decrement", index, text)),
            PositionIndex::BeforeFirst => Err(Error::precondition(
                "decrement",
                "cannot move before the BeforeFirst position",
            )),
        }
    }

    fn get_char(&self, text: &UnicodeText) -> CodePoint {
        match self.index {
            PositionIndex::At(index) if index < text.length() => {
                code_points::utf16_code_point_at(text.as_code_units(), self.offset).0
            }
            PositionIndex::At(index) => {
                log::debug!(
                    "get_char: position {index} is invalid for a text of length {}",
                    text.length()
                );
                NON_CHARACTER
            }
            PositionIndex::BeforeFirst | PositionIndex::AfterLast => NON_CHARACTER,
        }
    }
}

#[cold]
fn invalid_position(operation: &str, index: u32, text: &UnicodeText) -> Error {
    Error::precondition(
        operation,
        format!(
            "position {index} is invalid for a text of length {}",
            text.length()
        ),
    )
}

/// Read-only cursor over the code points of a [`UnicodeText`].
///
/// Positions over different texts are unordered: `partial_cmp` returns `None` and
/// `==` returns `false` for them.
#[derive(Debug, Clone, Copy)]
pub struct Position<'a> {
    text: &'a UnicodeText,
    cursor: Cursor,
}

impl<'a> Position<'a> {
    /// Position at the first code point, or `AfterLast` for an empty text.
    pub fn new(text: &'a UnicodeText) -> Self {
        Position {
            text,
            cursor: Cursor::first(text),
        }
    }

    /// Position at code point `index`. `index == length` yields `AfterLast`; a larger
    /// index yields an invalid position.
    pub fn at(text: &'a UnicodeText, index: u32) -> Self {
        Position {
            text,
            cursor: Cursor::at(text, index),
        }
    }

    pub fn before_first(text: &'a UnicodeText) -> Self {
        Position {
            text,
            cursor: Cursor::before_first(),
        }
    }

    pub fn after_last(text: &'a UnicodeText) -> Self {
        Position {
            text,
            cursor: Cursor::after_last(text),
        }
    }

    pub fn text(&self) -> &'a UnicodeText {
        self.text
    }

    pub fn index(&self) -> PositionIndex {
        self.cursor.index
    }

    /// An interior position is valid while its index is below the text length; the
    /// end positions are always valid.
    pub fn is_valid(&self) -> bool {
        self.cursor.is_valid(self.text)
    }

    /// Whether the position is at either end sentinel.
    pub fn is_end(&self) -> bool {
        self.is_before_first() || self.is_after_last()
    }

    pub fn is_before_first(&self) -> bool {
        self.cursor.index == PositionIndex::BeforeFirst
    }

    pub fn is_after_last(&self) -> bool {
        self.cursor.index == PositionIndex::AfterLast
    }

    /// Moves to the next code point. Fails at `AfterLast` or when invalid.
    pub fn increment(&mut self) -> Result<()> {
        self.cursor.increment(self.text)
    }

    /// Moves to the previous code point. Fails at `BeforeFirst` or when invalid.
    pub fn decrement(&mut self) -> Result<()> {
        self.cursor.decrement(self.text)
    }

    pub fn move_first(&mut self) {
        self.cursor = Cursor::first(self.text);
    }

    pub fn move_last(&mut self) {
        self.cursor = Cursor::last(self.text);
    }

    /// Code point at the position, or [`NON_CHARACTER`] at an end sentinel.
    pub fn get_char(&self) -> CodePoint {
        self.cursor.get_char(self.text)
    }
}

impl PartialEq for Position<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.text, other.text) && self.cursor.index == other.cursor.index
    }
}

impl PartialOrd for Position<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if std::ptr::eq(self.text, other.text) {
            Some(self.cursor.index.cmp(&other.cursor.index))
        } else {
            None
        }
    }
}

/// Cursor that can also overwrite the code point it points at.
#[derive(Debug)]
pub struct PositionMut<'a> {
    text: &'a mut UnicodeText,
    cursor: Cursor,
}

impl<'a> PositionMut<'a> {
    /// Position at the first code point, or `AfterLast` for an empty text.
    pub fn new(text: &'a mut UnicodeText) -> Self {
        let cursor = Cursor::first(text);
        PositionMut { text, cursor }
    }

    /// Mutable position at code point `index`; see [`Position::at`].
    pub fn at(text: &'a mut UnicodeText, index: u32) -> Self {
        let cursor = Cursor::at(text, index);
        PositionMut { text, cursor }
    }

    pub fn text(&self) -> &UnicodeText {
        &*self.text
    }

    pub fn index(&self) -> PositionIndex {
        self.cursor.index
    }

    pub fn is_valid(&self) -> bool {
        self.cursor.is_valid(&*self.text)
    }

    pub fn is_end(&self) -> bool {
        matches!(
            self.cursor.index,
            PositionIndex::BeforeFirst | PositionIndex::AfterLast
        )
    }

    pub fn increment(&mut self) -> Result<()> {
        self.cursor.increment(&*self.text)
    }

    pub fn decrement(&mut self) -> Result<()> {
        self.cursor.decrement(&*self.text)
    }

    pub fn move_first(&mut self) {
        self.cursor = Cursor::first(&*self.text);
    }

    pub fn move_last(&mut self) {
        self.cursor = Cursor::last(&*self.text);
    }

    pub fn get_char(&self) -> CodePoint {
        self.cursor.get_char(&*self.text)
    }

    /// Replaces the code point at the position with `new_char` (U+FFFD if it is not
    /// a Unicode scalar value). The replacement may occupy a different number of code
    /// units than the original; the cursor stays on the replaced code point.
    ///
    /// Does nothing at an end sentinel; fails if the position is invalid.
    pub fn set_char(&mut self, new_char: CodePoint) -> Result<()> {
        match self.cursor.index {
            PositionIndex::BeforeFirst | PositionIndex::AfterLast => Ok(()),
            PositionIndex::At(index) if index < self.text.length() => {
                let offset = self.cursor.offset;
                let (_, width) =
                    code_points::utf16_code_point_at(self.text.as_code_units(), offset);
                let mut buf = [0u16; 2];
                let encoded = code_points::encode_code_point(new_char, &mut buf);
                self.text.splice_units(offset..offset + width, encoded);
                Ok(())
            }
            PositionIndex::At(index) => Err(invalid_position("set_char", index, &*self.text)),
        }
    }

    /// Read-only view of this position.
    pub fn as_position(&self) -> Position<'_> {
        Position {
            text: &*self.text,
            cursor: self.cursor,
        }
    }
}

impl UnicodeText {
    /// Cursor at the first code point (`AfterLast` when empty).
    pub fn position(&self) -> Position<'_> {
        Position::new(self)
    }

    /// Mutable cursor at the first code point (`AfterLast` when empty).
    pub fn position_mut(&mut self) -> PositionMut<'_> {
        PositionMut::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let text = UnicodeText::from("ABC");
        assert_eq!(PositionIndex::At(0), text.position().index());
        let empty = UnicodeText::new();
        assert_eq!(PositionIndex::AfterLast, empty.position().index());
        assert!(empty.position().is_end());
    }

    #[test]
    fn test_forward_traversal() {
        let text = UnicodeText::from("a🐓b");
        let mut pos = text.position();
        let mut seen = Vec::new();
        while !pos.is_after_last() {
            seen.push(pos.get_char());
            pos.increment().unwrap();
        }
        assert_eq!(vec![0x61, 0x1F413, 0x62], seen);
        assert_eq!(NON_CHARACTER, pos.get_char());
        assert!(pos.increment().unwrap_err().is_precondition_violation());
    }

    #[test]
    fn test_backward_traversal() {
        let text = UnicodeText::from("a🐓b");
        let mut pos = Position::after_last(&text);
        let mut seen = Vec::new();
        pos.decrement().unwrap();
        while !pos.is_before_first() {
            seen.push(pos.get_char());
            pos.decrement().unwrap();
        }
        assert_eq!(vec![0x62, 0x1F413, 0x61], seen);
        assert_eq!(NON_CHARACTER, pos.get_char());
        assert!(pos.decrement().unwrap_err().is_precondition_violation());
        pos.increment().unwrap();
        assert_eq!(PositionIndex::At(0), pos.index());
    }

    #[test]
    fn test_decrement_before_first() {
        let text = UnicodeText::from("ABC");
        let mut pos = text.position();
        pos.decrement().unwrap();
        assert_eq!(PositionIndex::BeforeFirst, pos.index());
        let err = pos.decrement().unwrap_err();
        assert!(err.is_precondition_violation());
        assert_eq!(PositionIndex::BeforeFirst, pos.index());
    }

    #[test]
    fn test_empty_text_transitions() {
        let text = UnicodeText::new();
        let mut pos = text.position();
        pos.decrement().unwrap();
        assert!(pos.is_before_first());
        pos.increment().unwrap();
        assert!(pos.is_after_last());
        pos.move_last();
        assert!(pos.is_after_last());
    }

    #[test]
    fn test_move_first_last() {
        let text = UnicodeText::from("xy🐓");
        let mut pos = text.position();
        pos.move_last();
        assert_eq!(PositionIndex::At(2), pos.index());
        assert_eq!(0x1F413, pos.get_char());
        pos.move_first();
        assert_eq!('x' as u32, pos.get_char());
    }

    #[test]
    fn test_ordering() {
        let text = UnicodeText::from("ABC");
        let before = Position::before_first(&text);
        let first = Position::at(&text, 0);
        let last = Position::at(&text, 2);
        let after = Position::at(&text, 3);
        assert!(after.is_after_last());
        assert!(before < first);
        assert!(first < last);
        assert!(last < after);
        assert_eq!(first, text.position());

        let other = UnicodeText::from("ABC");
        assert_eq!(None, first.partial_cmp(&Position::at(&other, 0)));
        assert_ne!(first, Position::at(&other, 0));
    }

    #[test]
    fn test_invalid_position() {
        let text = UnicodeText::from("AB");
        let mut pos = Position::at(&text, 7);
        assert!(!pos.is_valid());
        assert_eq!(NON_CHARACTER, pos.get_char());
        assert!(pos.increment().unwrap_err().is_precondition_violation());
        assert!(pos.decrement().unwrap_err().is_precondition_violation());
        assert!(Position::before_first(&text).is_valid());
        assert!(Position::after_last(&text).is_valid());
    }

    #[test]
    fn test_set_char_changes_width() {
        let mut text = UnicodeText::from("abc");
        {
            let mut pos = text.position_mut();
            pos.increment().unwrap();
            pos.set_char(0x1F413).unwrap();
            assert_eq!(0x1F413, pos.get_char());
            pos.increment().unwrap();
            assert_eq!('c' as u32, pos.get_char());
            pos.decrement().unwrap();
            pos.set_char('B' as u32).unwrap();
            pos.increment().unwrap();
            assert_eq!('c' as u32, pos.get_char());
        }
        assert_eq!("aBc", text.to_string());
        assert_eq!(3, text.length());

        let mut pos = PositionMut::at(&mut text, 0);
        pos.set_char(0x1F425).unwrap();
        pos.move_last();
        pos.increment().unwrap();
        pos.set_char('z' as u32).unwrap();
        assert_eq!("🐥Bc", pos.text().to_string());
        assert_eq!(3, pos.text().length());

        let mut pos = PositionMut::at(&mut text, 9);
        assert!(pos.set_char('z' as u32).unwrap_err().is_precondition_violation());
    }
}
