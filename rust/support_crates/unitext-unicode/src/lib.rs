//! Unicode algorithms used by the `unitext` text type: UTF-16 code point
//! navigation, codec helpers, case mapping, normalization, collation,
//! grapheme boundaries and pattern matching.

pub mod case_conversions;
pub mod code_points;
pub mod collation;
pub mod comparison;
pub mod conversion;
pub mod graphemes;
pub mod kmp;
pub mod normalization;

extern crate unicode_segmentation;
extern crate widestring;
