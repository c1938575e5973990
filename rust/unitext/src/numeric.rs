//! Conversions between text and numbers or booleans.
//!
//! Parsing never skips whitespace. The infallible accessors fall back to zero (or
//! `false`) on unparseable input and report the failure with `log::debug!`; the
//! `try_` variants return `ErrorKind::ParseFailure` instead.

use std::str::FromStr;

use num_traits::{Float, NumCast, PrimInt};
use unitext_common::{Result, error::Error};

use crate::text::UnicodeText;

const TRUE_NAMES: [&str; 4] = ["true", "t", "y", "1"];
const FALSE_NAMES: [&str; 4] = ["false", "f", "n", "0"];

impl UnicodeText {
    /// Parses `[+-]?digits(.digits*)?`. The fractional part is ignored, and a
    /// magnitude outside the range of `T` saturates to its minimum or maximum.
    pub fn try_to_integer<T: PrimInt>(&self) -> Result<T> {
        let s = self.to_std_string();
        let (negative, rest) = split_sign(&s);
        let int_len = digits_len(rest);
        let fraction = &rest[int_len..];
        let valid = int_len > 0
            && (fraction.is_empty()
                || (fraction.starts_with('.') && digits_len(&fraction[1..]) == fraction.len() - 1));
        if !valid {
            return Err(Error::parse_failure(s, std::any::type_name::<T>()));
        }

        let magnitude = rest[..int_len].bytes().fold(0u128, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(<u128 as From<u8>>::from(digit - b'0'))
        });
        let value: Option<T> = if negative {
            i128::try_from(magnitude)
                .ok()
                .and_then(|m| <T as NumCast>::from(-m))
        } else {
            <T as NumCast>::from(magnitude)
        };
        Ok(value.unwrap_or_else(|| {
            if negative {
                T::min_value()
            } else {
                T::max_value()
            }
        }))
    }

    /// Like [`try_to_integer`](Self::try_to_integer), returning zero on failure.
    pub fn to_integer<T: PrimInt>(&self) -> T {
        self.try_to_integer().unwrap_or_else(|e| {
            log::debug!("to_integer: {e}");
            T::zero()
        })
    }

    /// Parses decimal or scientific notation. Overflow yields a signed infinity and
    /// underflow yields zero; `inf` and `nan` spellings are rejected.
    pub fn try_to_float<T: Float + FromStr>(&self) -> Result<T> {
        let s = self.to_std_string();
        if !is_decimal_float(&s) {
            return Err(Error::parse_failure(s, std::any::type_name::<T>()));
        }
        s.parse::<T>()
            .map_err(|_| Error::parse_failure(s.as_str(), std::any::type_name::<T>()))
    }

    pub fn to_float<T: Float + FromStr>(&self) -> T {
        self.try_to_float().unwrap_or_else(|e| {
            log::debug!("to_float: {e}");
            T::zero()
        })
    }

    /// Case-insensitive: `true`, `t`, `y`, `1` and `false`, `f`, `n`, `0`.
    pub fn try_to_boolean(&self) -> Result<bool> {
        let s = self.to_std_string();
        if TRUE_NAMES.iter().any(|name| name.eq_ignore_ascii_case(&s)) {
            Ok(true)
        } else if FALSE_NAMES.iter().any(|name| name.eq_ignore_ascii_case(&s)) {
            Ok(false)
        } else {
            Err(Error::parse_failure(s, "bool"))
        }
    }

    pub fn to_boolean(&self) -> bool {
        self.try_to_boolean().unwrap_or_else(|e| {
            log::debug!("to_boolean: {e}");
            false
        })
    }

    pub fn from_integer<T: itoa::Integer>(value: T) -> UnicodeText {
        let mut buffer = itoa::Buffer::new();
        UnicodeText::from(buffer.format(value))
    }

    /// Shortest representation that parses back to `value`, always with `.` as the
    /// decimal separator.
    pub fn from_float<T: dtoa::Float>(value: T) -> UnicodeText {
        let mut buffer = dtoa::Buffer::new();
        UnicodeText::from(buffer.format(value))
    }

    pub fn from_boolean(value: bool) -> UnicodeText {
        UnicodeText::from(if value { "true" } else { "false" })
    }

    /// Upper-case hex with exactly two digits per byte of `T`, most significant
    /// first. Negative values are rendered in two's complement.
    pub fn from_integer_to_hexadecimal<T: PrimInt>(value: T) -> UnicodeText {
        let bytes = std::mem::size_of::<T>();
        let bits = value
            .to_i128()
            .map(|v| v as u128)
            .or_else(|| value.to_u128())
            .unwrap_or(0);
        let bits = if bytes < 16 {
            bits & ((1u128 << (bytes * 8)) - 1)
        } else {
            bits
        };
        UnicodeText::from(format!("{bits:0width$X}", width = bytes * 2))
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

fn digits_len(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// `[+-]?digits*(.digits*)?([eE][+-]?digits+)?` with at least one mantissa digit.
fn is_decimal_float(s: &str) -> bool {
    let (_, rest) = split_sign(s);
    let int_len = digits_len(rest);
    let mut rest = &rest[int_len..];
    let mut mantissa_digits = int_len;
    if let Some(fraction) = rest.strip_prefix('.') {
        let frac_len = digits_len(fraction);
        mantissa_digits += frac_len;
        rest = &fraction[frac_len..];
    }
    if mantissa_digits == 0 {
        return false;
    }
    match rest.strip_prefix(['e', 'E']) {
        Some(exponent) => {
            let (_, exponent) = split_sign(exponent);
            let exp_len = digits_len(exponent);
            exp_len > 0 && exp_len == exponent.len()
        }
        None => rest.is_empty(),
    }
}
