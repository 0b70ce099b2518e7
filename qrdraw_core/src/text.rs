/// Re-encode UTF-16 code units into bytes, one unit at a time.
///
/// Surrogate halves are not paired up, so characters outside the basic plane come out as two 3-byte sequences
/// rather than one 4-byte sequence.
///
/// * `0x0001..=0x007F` is copied as a single byte.
/// * `0x0800..=0xFFFF` becomes three bytes.
/// * Everything else, which includes `0x0000`, becomes two bytes.
///
/// # Example
/// ```
/// use qrdraw_core::text::utf16_to_utf8;
/// assert_eq!(utf16_to_utf8(&[0x41]), vec![0x41]);
/// assert_eq!(utf16_to_utf8(&[0x00E9]), vec![0xC3, 0xA9]);
/// assert_eq!(utf16_to_utf8(&[0x4F60]), vec![0xE4, 0xBD, 0xA0]);
/// assert_eq!(utf16_to_utf8(&[0x0000]), vec![0xC0, 0x80]);
/// ```
pub fn utf16_to_utf8(units: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(units.len() * 3);
    for &unit in units {
        push_unit(&mut out, unit);
    }
    out
}

/// Re-encode `text` through its UTF-16 representation.
///
/// For text without supplementary-plane characters this matches `text.as_bytes()`.
/// # Example
/// ```
/// use qrdraw_core::text::encode_text;
/// assert_eq!(encode_text("你好"), "你好".as_bytes());
/// ```
pub fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for unit in text.encode_utf16() {
        push_unit(&mut out, unit);
    }
    out
}

#[inline]
fn push_unit(out: &mut Vec<u8>, c: u16) {
    match c {
        0x0001..=0x007F => out.push(c as u8),
        0x0800..=0xFFFF => out.extend_from_slice(&[
            0xE0 | ((c >> 12) & 0x0F) as u8,
            0x80 | ((c >> 6) & 0x3F) as u8,
            0x80 | (c & 0x3F) as u8,
        ]),
        _ => out.extend_from_slice(&[0xC0 | ((c >> 6) & 0x1F) as u8, 0x80 | (c & 0x3F) as u8]),
    }
}
