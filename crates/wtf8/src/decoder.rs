//! Bytes to UTF-16 code units.
//!
//! The decoder is total: every byte sequence produces some code-unit
//! sequence. It walks the input once, looking for a lead byte whose top
//! nibble is `1111` with at least three bytes after it. Each such window is
//! decoded as a 4-byte UTF-8 scalar and written as a surrogate pair. The
//! bytes between windows form unmatched runs that are handed to the
//! configured [`PassthroughMode`] in bulk.
//!
//! The window test looks at the lead nibble only. Lead bytes `F8..=FF` match
//! as well, and continuation bytes are masked without being checked, so
//! degenerate input still decodes to a (possibly meaningless) pair.

use alloc::vec::Vec;

use crate::{
    CONT_MASK, DecodeOptions, HIGH_SURROGATE_START, LOW_SURROGATE_START, PassthroughMode,
    SUPPLEMENTARY_START, SURROGATE_OFFSET_MASK, TAG_CONT, TAG_FOUR,
};

/// Decodes `bytes` with default options.
///
/// # Examples
///
/// ```rust
/// assert_eq!(wtf8::decode(b"AB"), [0x41, 0x42]);
/// assert_eq!(wtf8::decode(b"\xF0\x9F\x98\x80"), [0xD83D, 0xDE00]);
/// assert!(wtf8::decode(b"").is_empty());
/// ```
#[must_use]
pub fn decode(bytes: &[u8]) -> Vec<u16> {
    decode_with(bytes, DecodeOptions::default())
}

/// Decodes `bytes` into a fresh buffer.
#[must_use]
pub fn decode_with(bytes: &[u8], options: DecodeOptions) -> Vec<u16> {
    // Every byte yields at most one unit.
    let mut out = Vec::with_capacity(bytes.len());
    decode_into(bytes, options, &mut out);
    out
}

/// Decodes `bytes`, appending the code units to `out`.
///
/// Existing contents of `out` are left untouched.
pub fn decode_into(bytes: &[u8], options: DecodeOptions, out: &mut Vec<u16>) {
    out.reserve(bytes.len());

    let mut run_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] & TAG_FOUR == TAG_FOUR && i + 4 <= bytes.len() {
            passthrough(&bytes[run_start..i], options.passthrough, out);
            let [high, low] = split_four_byte(&bytes[i..i + 4]);
            out.push(high);
            out.push(low);
            i += 4;
            run_start = i;
        } else {
            i += 1;
        }
    }
    passthrough(&bytes[run_start..], options.passthrough, out);
}

/// Recombines a 4-byte window into a surrogate pair.
///
/// The offset arithmetic wraps so that malformed windows (lead byte
/// `F0` with a value below `0x10000`) still yield two units.
#[inline]
fn split_four_byte(window: &[u8]) -> [u16; 2] {
    let scalar = (u32::from(window[0] & 0x07) << 18)
        | (u32::from(window[1] & CONT_MASK) << 12)
        | (u32::from(window[2] & CONT_MASK) << 6)
        | u32::from(window[3] & CONT_MASK);
    let offset = scalar.wrapping_sub(SUPPLEMENTARY_START);

    #[allow(clippy::cast_possible_truncation)]
    let high = HIGH_SURROGATE_START | (offset >> 10) as u16;
    #[allow(clippy::cast_possible_truncation)]
    let low = LOW_SURROGATE_START | (offset as u16 & SURROGATE_OFFSET_MASK);
    [high, low]
}

fn passthrough(run: &[u8], mode: PassthroughMode, out: &mut Vec<u16>) {
    if run.is_empty() {
        return;
    }
    match mode {
        PassthroughMode::Latin1 => out.extend(run.iter().copied().map(u16::from)),
        PassthroughMode::Utf8 => decode_run(run, out),
    }
}

/// Decodes an unmatched run as generalized UTF-8.
///
/// A run never contains a usable 4-byte window, so every scalar found here
/// fits in one code unit.
fn decode_run(run: &[u8], out: &mut Vec<u16>) {
    let mut rest = run;
    while let Some(&lead) = rest.first() {
        if lead.is_ascii() {
            let ascii = rest.iter().take_while(|b| b.is_ascii()).count();
            out.extend(rest[..ascii].iter().copied().map(u16::from));
            rest = &rest[ascii..];
            continue;
        }

        if let Some(surrogate) = encoded_surrogate(rest) {
            out.push(surrogate);
            rest = &rest[3..];
            continue;
        }

        let (ch, len) = bstr::decode_utf8(rest);
        match ch {
            Some(ch) => {
                let mut buf = [0u16; 2];
                out.extend_from_slice(ch.encode_utf16(&mut buf));
            }
            None => out.extend(rest[..len].iter().copied().map(u16::from)),
        }
        rest = &rest[len..];
    }
}

/// Matches the 3-byte form of a lone surrogate, `ED A0..=BF 80..=BF`.
#[inline]
fn encoded_surrogate(bytes: &[u8]) -> Option<u16> {
    match *bytes {
        [0xED, second @ 0xA0..=0xBF, third, ..] if third & !CONT_MASK == TAG_CONT => {
            Some(0xD000 | (u16::from(second & CONT_MASK) << 6) | u16::from(third & CONT_MASK))
        }
        _ => None,
    }
}
