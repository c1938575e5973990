const REPLACEMENT_CHAR_BYTES: [u8; 3] = [0xEF, 0xBF, 0xBD];
const REPLACEMENT_UNIT: u16 = 0xFFFD;

/// Converts UTF-16 code units into UTF-8 bytes appended to `target`, replacing
/// unpaired surrogates with U+FFFD.
///
/// Returns `true` if any replacement took place.
pub fn utf16_to_utf8_lossy<I: Iterator<Item = u16>>(input: I, target: &mut Vec<u8>) -> bool {
    let mut repaired = false;
    let mut dst = [0u8; 4];
    for ch in std::char::decode_utf16(input) {
        match ch {
            Ok(ch) => target.extend_from_slice(ch.encode_utf8(&mut dst).as_bytes()),
            Err(_) => {
                target.extend_from_slice(&REPLACEMENT_CHAR_BYTES);
                repaired = true;
            }
        }
    }
    repaired
}

/// Converts UTF-8 bytes into UTF-16 code units appended to `target`, replacing every
/// maximal ill-formed subsequence with U+FFFD.
///
/// Returns `true` if any replacement took place.
pub fn utf8_to_utf16_lossy(input: &[u8], target: &mut Vec<u16>) -> bool {
    match simdutf8::basic::from_utf8(input) {
        Ok(valid) => {
            target.extend(valid.encode_utf16());
            false
        }
        Err(_) => {
            target.extend(String::from_utf8_lossy(input).encode_utf16());
            true
        }
    }
}

/// Copies UTF-16 code units into `target`, replacing unpaired surrogates with U+FFFD.
///
/// Returns `true` if any replacement took place.
pub fn utf16_to_utf16_lossy<I: Iterator<Item = u16>>(input: I, target: &mut Vec<u16>) -> bool {
    let mut repaired = false;
    let mut dst = [0u16; 2];
    for ch in std::char::decode_utf16(input) {
        match ch {
            Ok(ch) => target.extend_from_slice(ch.encode_utf16(&mut dst)),
            Err(_) => {
                target.push(REPLACEMENT_UNIT);
                repaired = true;
            }
        }
    }
    repaired
}

/// Converts UTF-32 code points into UTF-16 code units appended to `target`, replacing
/// values that are not Unicode scalar values with U+FFFD.
///
/// Returns `true` if any replacement took place.
pub fn utf32_to_utf16_lossy<I: Iterator<Item = u32>>(input: I, target: &mut Vec<u16>) -> bool {
    let mut repaired = false;
    let mut dst = [0u16; 2];
    for ch in widestring::decode_utf32(input) {
        match ch {
            Ok(ch) => target.extend_from_slice(ch.encode_utf16(&mut dst)),
            Err(_) => {
                target.push(REPLACEMENT_UNIT);
                repaired = true;
            }
        }
    }
    repaired
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf16_to_utf8_lossy() {
        let mut out = Vec::new();
        assert!(!utf16_to_utf8_lossy("ñB🐓".encode_utf16(), &mut out));
        assert_eq!(out, "ñB🐓".as_bytes());

        out.clear();
        assert!(utf16_to_utf8_lossy([0x61u16, 0xD800].into_iter(), &mut out));
        assert_eq!(out, b"a\xEF\xBF\xBD");

        out.clear();
        assert!(utf16_to_utf8_lossy([0xDC00u16, 0x62].into_iter(), &mut out));
        assert_eq!(out, b"\xEF\xBF\xBDb");
    }

    #[test]
    fn test_utf8_to_utf16_lossy() {
        let mut out = Vec::new();
        assert!(!utf8_to_utf16_lossy("שלום".as_bytes(), &mut out));
        assert_eq!(out, "שלום".encode_utf16().collect::<Vec<_>>());

        out.clear();
        assert!(utf8_to_utf16_lossy(b"a\xd7b", &mut out));
        assert_eq!(out, vec![0x61, 0xFFFD, 0x62]);
    }

    #[test]
    fn test_utf16_and_utf32_repair() {
        let mut out = Vec::new();
        assert!(utf16_to_utf16_lossy(
            [0x61u16, 0xDC00, 0xD83D, 0xDC13].into_iter(),
            &mut out
        ));
        assert_eq!(out, vec![0x61, 0xFFFD, 0xD83D, 0xDC13]);

        out.clear();
        assert!(!utf32_to_utf16_lossy([0x1F413u32].into_iter(), &mut out));
        assert_eq!(out, vec![0xD83D, 0xDC13]);

        out.clear();
        assert!(utf32_to_utf16_lossy(
            [0xD800u32, 0x110000, 0x41].into_iter(),
            &mut out
        ));
        assert_eq!(out, vec![0xFFFD, 0xFFFD, 0x41]);
    }
}
