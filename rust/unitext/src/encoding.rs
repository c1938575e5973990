//! Conversion between external byte encodings and the internal UTF-16 storage.
//!
//! Decoding never fails: ill-formed sequences are replaced with U+FFFD. Encoding to
//! the narrow ASCII and ISO-8859-1 targets substitutes SUB (0x1A) for unmappable
//! code points. Implicit-endian UTF-16/UTF-32 input is byte-order detected from a
//! leading BOM (stripped; big-endian without one), and implicit-endian output always
//! starts with a BOM in host byte order. The explicit-endian variants never strip
//! nor emit a BOM.

use std::str::FromStr;

use byteorder::{BigEndian, ByteOrder, LittleEndian, NativeEndian};
use unitext_common::{Result, error::Error, verify_arg, verify_precondition};
use unitext_unicode::conversion;

use crate::text::UnicodeText;

/// Platform wide character: UTF-16 code unit on Windows, UTF-32 code point elsewhere.
pub use widestring::WideChar;

/// Substitute character written for code points a narrow target cannot represent.
pub const SUB: u8 = 0x1A;

const BOM: u32 = 0xFEFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Ascii,
    Iso8859_1,
    Utf8,
    /// UTF-16 with byte order taken from a BOM.
    Utf16,
    Utf16Be,
    Utf16Le,
    /// UTF-32 with byte order taken from a BOM.
    Utf32,
    Utf32Be,
    Utf32Le,
}

impl Encoding {
    pub const ALL: [Encoding; 9] = [
        Encoding::Ascii,
        Encoding::Iso8859_1,
        Encoding::Utf8,
        Encoding::Utf16,
        Encoding::Utf16Be,
        Encoding::Utf16Le,
        Encoding::Utf32,
        Encoding::Utf32Be,
        Encoding::Utf32Le,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Encoding::Ascii => "ASCII",
            Encoding::Iso8859_1 => "ISO-8859-1",
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf16 => "UTF-16",
            Encoding::Utf16Be => "UTF-16BE",
            Encoding::Utf16Le => "UTF-16LE",
            Encoding::Utf32 => "UTF-32",
            Encoding::Utf32Be => "UTF-32BE",
            Encoding::Utf32Le => "UTF-32LE",
        }
    }

    /// Single-byte encodings that cannot represent every code point.
    pub const fn is_narrow(&self) -> bool {
        matches!(self, Encoding::Ascii | Encoding::Iso8859_1)
    }

    /// Whether the byte order comes from a BOM rather than from the encoding itself.
    pub const fn has_implicit_byte_order(&self) -> bool {
        matches!(self, Encoding::Utf16 | Encoding::Utf32)
    }

    /// Size in bytes of the null terminator appended by [`UnicodeText::to_bytes`].
    pub const fn terminator_len(&self) -> usize {
        match self {
            Encoding::Ascii | Encoding::Iso8859_1 | Encoding::Utf8 => 1,
            Encoding::Utf16 | Encoding::Utf16Be | Encoding::Utf16Le => 2,
            Encoding::Utf32 | Encoding::Utf32Be | Encoding::Utf32Le => 4,
        }
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_uppercase().as_str() {
            "ASCII" | "US-ASCII" => Ok(Encoding::Ascii),
            "ISO-8859-1" | "LATIN1" => Ok(Encoding::Iso8859_1),
            "UTF-8" | "UTF8" => Ok(Encoding::Utf8),
            "UTF-16" | "UTF16" => Ok(Encoding::Utf16),
            "UTF-16BE" => Ok(Encoding::Utf16Be),
            "UTF-16LE" => Ok(Encoding::Utf16Le),
            "UTF-32" | "UTF32" => Ok(Encoding::Utf32),
            "UTF-32BE" => Ok(Encoding::Utf32Be),
            "UTF-32LE" => Ok(Encoding::Utf32Le),
            _ => Err(Error::invalid_arg(
                "name",
                format!("Unrecognized encoding: {name}"),
            )),
        }
    }
}

/// Length of a raw byte input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteLength {
    /// Exactly this many bytes.
    Exact(usize),
    /// Up to the first zero byte. Only valid with the narrow encodings.
    NullTerminated,
}

fn decode_narrow(bytes: &[u8], limit: u16, target: &mut Vec<u16>) -> bool {
    let mut repaired = false;
    target.extend(bytes.iter().map(|&b| {
        let unit = b as u16;
        if unit < limit {
            unit
        } else {
            repaired = true;
            0xFFFD
        }
    }));
    repaired
}

fn decode_utf16<B: ByteOrder>(bytes: &[u8], target: &mut Vec<u16>) -> bool {
    let chunks = bytes.chunks_exact(2);
    let truncated = !chunks.remainder().is_empty();
    let mut repaired = conversion::utf16_to_utf16_lossy(chunks.map(B::read_u16), target);
    if truncated {
        target.push(0xFFFD);
        repaired = true;
    }
    repaired
}

fn decode_utf32<B: ByteOrder>(bytes: &[u8], target: &mut Vec<u16>) -> bool {
    let chunks = bytes.chunks_exact(4);
    let truncated = !chunks.remainder().is_empty();
    let mut repaired = conversion::utf32_to_utf16_lossy(chunks.map(B::read_u32), target);
    if truncated {
        target.push(0xFFFD);
        repaired = true;
    }
    repaired
}

/// Decodes `bytes` into well-formed UTF-16 code units.
fn decode(bytes: &[u8], encoding: Encoding) -> Vec<u16> {
    let mut units = Vec::with_capacity(bytes.len());
    let repaired = match encoding {
        Encoding::Ascii => decode_narrow(bytes, 0x80, &mut units),
        Encoding::Iso8859_1 => decode_narrow(bytes, 0x100, &mut units),
        Encoding::Utf8 => conversion::utf8_to_utf16_lossy(bytes, &mut units),
        Encoding::Utf16 => match bytes {
            [0xFE, 0xFF, rest @ ..] => decode_utf16::<BigEndian>(rest, &mut units),
            [0xFF, 0xFE, rest @ ..] => decode_utf16::<LittleEndian>(rest, &mut units),
            _ => decode_utf16::<BigEndian>(bytes, &mut units),
        },
        Encoding::Utf16Be => decode_utf16::<BigEndian>(bytes, &mut units),
        Encoding::Utf16Le => decode_utf16::<LittleEndian>(bytes, &mut units),
        Encoding::Utf32 => match bytes {
            [0x00, 0x00, 0xFE, 0xFF, rest @ ..] => decode_utf32::<BigEndian>(rest, &mut units),
            [0xFF, 0xFE, 0x00, 0x00, rest @ ..] => {
                decode_utf32::<LittleEndian>(rest, &mut units)
            }
            _ => decode_utf32::<BigEndian>(bytes, &mut units),
        },
        Encoding::Utf32Be => decode_utf32::<BigEndian>(bytes, &mut units),
        Encoding::Utf32Le => decode_utf32::<LittleEndian>(bytes, &mut units),
    };
    if repaired {
        log::debug!(
            "ill-formed {} input ({} bytes) repaired with U+FFFD",
            encoding.name(),
            bytes.len()
        );
    }
    units
}

fn push_u16<B: ByteOrder>(out: &mut Vec<u8>, value: u16) {
    let mut buf = [0u8; 2];
    B::write_u16(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn push_u32<B: ByteOrder>(out: &mut Vec<u8>, value: u32) {
    let mut buf = [0u8; 4];
    B::write_u32(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn encode_narrow(text: &UnicodeText, limit: u32, out: &mut Vec<u8>) {
    let mut substituted = 0usize;
    out.extend(text.chars().map(|ch| {
        let cp = ch as u32;
        if cp < limit {
            cp as u8
        } else {
            substituted += 1;
            SUB
        }
    }));
    if substituted > 0 {
        log::debug!("{substituted} unmappable code points replaced with SUB");
    }
    out.push(0);
}

fn encode_utf16<B: ByteOrder>(text: &UnicodeText, bom: bool, out: &mut Vec<u8>) {
    if bom {
        push_u16::<B>(out, BOM as u16);
    }
    for &unit in text.as_code_units() {
        push_u16::<B>(out, unit);
    }
    push_u16::<B>(out, 0);
}

fn encode_utf32<B: ByteOrder>(text: &UnicodeText, bom: bool, out: &mut Vec<u8>) {
    if bom {
        push_u32::<B>(out, BOM);
    }
    for ch in text.chars() {
        push_u32::<B>(out, ch as u32);
    }
    push_u32::<B>(out, 0);
}

impl UnicodeText {
    /// Decodes the whole of `bytes` from `encoding`.
    pub fn from_bytes(bytes: &[u8], encoding: Encoding) -> Self {
        UnicodeText::from_units(decode(bytes, encoding))
    }

    /// Decodes a raw byte input whose extent is given by `length`.
    ///
    /// Preconditions: `bytes` may only be absent together with `Exact(0)` (which
    /// yields an empty text); `NullTerminated` is only legal for ASCII and
    /// ISO-8859-1. An `Exact` length beyond the slice is an invalid argument.
    /// Without a zero byte, a null-terminated input extends to the end of the slice.
    pub fn from_raw_bytes(
        bytes: Option<&[u8]>,
        length: ByteLength,
        encoding: Encoding,
    ) -> Result<Self> {
        let bytes = match (bytes, length) {
            (None, ByteLength::Exact(0)) => return Ok(UnicodeText::new()),
            (None, _) => {
                return Err(Error::precondition(
                    "from_raw_bytes",
                    "bytes must be present for a non-zero length",
                ));
            }
            (Some(bytes), ByteLength::Exact(len)) => {
                verify_arg!(length, len <= bytes.len());
                &bytes[..len]
            }
            (Some(bytes), ByteLength::NullTerminated) => {
                verify_precondition!("from_raw_bytes", encoding.is_narrow());
                let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
                &bytes[..end]
            }
        };
        Ok(UnicodeText::from_bytes(bytes, encoding))
    }

    /// Re-encodes the text into `encoding`.
    ///
    /// The output is always null-terminated and its length includes the terminator
    /// ([`Encoding::terminator_len`] bytes). An empty text yields an empty vector.
    pub fn to_bytes(&self, encoding: Encoding) -> Vec<u8> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(self.code_units_len() * 4 + 8);
        let bom = encoding.has_implicit_byte_order();
        match encoding {
            Encoding::Ascii => encode_narrow(self, 0x80, &mut out),
            Encoding::Iso8859_1 => encode_narrow(self, 0x100, &mut out),
            Encoding::Utf8 => {
                let units = self.as_code_units().iter().copied();
                if conversion::utf16_to_utf8_lossy(units, &mut out) {
                    log::debug!("ill-formed UTF-16 repaired with U+FFFD while encoding UTF-8");
                }
                out.push(0);
            }
            Encoding::Utf16 => encode_utf16::<NativeEndian>(self, bom, &mut out),
            Encoding::Utf16Be => encode_utf16::<BigEndian>(self, bom, &mut out),
            Encoding::Utf16Le => encode_utf16::<LittleEndian>(self, bom, &mut out),
            Encoding::Utf32 => encode_utf32::<NativeEndian>(self, bom, &mut out),
            Encoding::Utf32Be => encode_utf32::<BigEndian>(self, bom, &mut out),
            Encoding::Utf32Le => encode_utf32::<LittleEndian>(self, bom, &mut out),
        }
        out
    }

    /// Decodes a platform wide string up to its first NUL (or the end of the slice).
    pub fn from_wide_chars(wide: &[WideChar]) -> Self {
        let end = wide.iter().position(|&w| w == 0).unwrap_or(wide.len());
        let mut units = Vec::with_capacity(end);
        #[cfg(windows)]
        let repaired = conversion::utf16_to_utf16_lossy(wide[..end].iter().copied(), &mut units);
        #[cfg(not(windows))]
        let repaired = conversion::utf32_to_utf16_lossy(
            wide[..end].iter().map(|&w| w as u32),
            &mut units,
        );
        if repaired {
            log::debug!("ill-formed wide string repaired with U+FFFD");
        }
        UnicodeText::from_units(units)
    }

    /// Returns the text as a NUL-terminated platform wide string.
    pub fn to_wide_chars(&self) -> Vec<WideChar> {
        #[cfg(windows)]
        let mut wide: Vec<WideChar> = self.as_code_units().to_vec();
        #[cfg(not(windows))]
        let mut wide: Vec<WideChar> = self.chars().map(|ch| ch as WideChar).collect();
        wide.push(0);
        wide
    }
}
