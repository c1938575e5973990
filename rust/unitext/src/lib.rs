//! Unicode-correct text value type.
//!
//! [`UnicodeText`] stores UTF-16 code units together with a cached code point count
//! and exposes every operation at code point granularity:
//!
//! - construction from nine byte encodings ([`Encoding`]) with U+FFFD repair, and
//!   re-encoding through [`UnicodeText::to_bytes`];
//! - bidirectional cursors ([`Position`], [`PositionMut`]) with explicit
//!   `BeforeFirst`/`AfterLast` states;
//! - NFC/NFD normalization;
//! - binary and collation-based comparison ([`ComparisonMode`]);
//! - search, replace and split;
//! - conversions between text and numbers/booleans.
//!
//! Precondition violations are reported as `Err` values carrying
//! `ErrorKind::PreconditionViolation`; ill-formed input and unparseable numbers
//! degrade to documented defaults and are only reported through `log::debug!`.

pub mod compare;
pub mod encoding;
pub mod normalize;
pub mod numeric;
pub mod position;
pub mod search;
pub mod text;

pub use compare::{Collation, ComparisonMode};
pub use encoding::{ByteLength, Encoding, WideChar};
pub use position::{Position, PositionIndex, PositionMut};
pub use text::{CodePoint, NON_CHARACTER, REPLACEMENT_CHARACTER, UnicodeText};
pub use unitext_common::error::{Error, ErrorKind};
pub use unitext_common::Result;
pub use unitext_unicode::collation::CollationLocale;
pub use unitext_unicode::normalization::NormalizationForm;
