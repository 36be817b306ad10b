//! UTF-16 code units to bytes.

use alloc::{string::String, vec::Vec};
use core::convert::Infallible;

use crate::{
    CONT_MASK, EncodeError, EncodeOptions, HIGH_SURROGATE_START, LoneSurrogateMode,
    SUPPLEMENTARY_START, SURROGATE_END, SURROGATE_OFFSET_MASK, TAG_CONT, TAG_FOUR, TAG_THREE,
    TAG_TWO, is_high_surrogate, is_low_surrogate, push_replacement,
};

/// Encodes `units` with default options.
///
/// Surrogate pairs become 4-byte UTF-8 and every unpaired surrogate becomes
/// [`REPLACEMENT_SEQUENCE`](crate::REPLACEMENT_SEQUENCE).
///
/// # Examples
///
/// ```rust
/// assert_eq!(wtf8::encode(&[0xD83D, 0xDE00]), [0xF0, 0x9F, 0x98, 0x80]);
/// assert_eq!(wtf8::encode(&[0xD800]), wtf8::REPLACEMENT_SEQUENCE);
/// ```
#[must_use]
pub fn encode(units: &[u16]) -> Vec<u8> {
    encode_with(units, EncodeOptions::default())
}

/// Encodes `units` into a fresh buffer.
#[must_use]
pub fn encode_with(units: &[u16], options: EncodeOptions) -> Vec<u8> {
    // Sized for ASCII; longer sequences grow the buffer.
    let mut out = Vec::with_capacity(units.len());
    encode_into(units, options, &mut out);
    out
}

/// Encodes `units`, appending the bytes to `out`.
pub fn encode_into(units: &[u16], options: EncodeOptions, out: &mut Vec<u8>) {
    let Ok(()) = walk(units, out, |unit, _, out| {
        match options.lone_surrogates {
            LoneSurrogateMode::Replace => push_replacement(out),
            LoneSurrogateMode::Preserve => push_three(unit, out),
        }
        Ok::<(), Infallible>(())
    });
}

/// Encodes `units` with default options into a `String`.
///
/// The default encoder only writes well-formed scalars, so its output is
/// always valid UTF-8.
///
/// ```rust
/// assert_eq!(wtf8::encode_to_string(&[0x68, 0x69, 0xD83D, 0xDE00]), "hi😀");
/// ```
#[must_use]
pub fn encode_to_string(units: &[u16]) -> String {
    let bytes = encode(units);
    debug_assert!(
        core::str::from_utf8(&bytes).is_ok(),
        "replacing encoder wrote ill-formed UTF-8"
    );
    String::from_utf8(bytes)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

/// Encodes `units`, rejecting the first unpaired surrogate.
///
/// # Errors
///
/// Returns [`EncodeError::UnpairedSurrogate`] with the position of the first
/// surrogate that is not part of a high/low pair.
///
/// ```rust
/// use wtf8::EncodeError;
///
/// assert_eq!(wtf8::try_encode(&[0x41, 0x42]), Ok(b"AB".to_vec()));
/// assert_eq!(
///     wtf8::try_encode(&[0x41, 0xDC00]),
///     Err(EncodeError::UnpairedSurrogate { index: 1, unit: 0xDC00 })
/// );
/// ```
pub fn try_encode(units: &[u16]) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(units.len());
    walk(units, &mut out, |unit, index, _| {
        Err(EncodeError::UnpairedSurrogate { index, unit })
    })?;
    Ok(out)
}

/// Shared scan over `units`. `on_lone` is called with the unit and its index
/// for every surrogate that is not half of a valid pair.
fn walk<E, F>(units: &[u16], out: &mut Vec<u8>, mut on_lone: F) -> Result<(), E>
where
    F: FnMut(u16, usize, &mut Vec<u8>) -> Result<(), E>,
{
    let mut i = 0;
    while i < units.len() {
        let unit = units[i];
        if unit < 0x80 {
            #[allow(clippy::cast_possible_truncation)]
            out.push(unit as u8);
        } else if unit < 0x800 {
            push_two(unit, out);
        } else if !(HIGH_SURROGATE_START..=SURROGATE_END).contains(&unit) {
            push_three(unit, out);
        } else if is_high_surrogate(unit) && i + 1 < units.len() {
            let next = units[i + 1];
            if !is_low_surrogate(next) {
                // `next` is looked at again on the following iteration.
                on_lone(unit, i, out)?;
                i += 1;
                continue;
            }
            let scalar = ((u32::from(unit & SURROGATE_OFFSET_MASK) << 10)
                | u32::from(next & SURROGATE_OFFSET_MASK))
                + SUPPLEMENTARY_START;
            push_four(scalar, out);
            i += 1;
        } else {
            on_lone(unit, i, out)?;
        }
        i += 1;
    }
    Ok(())
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn push_two(unit: u16, out: &mut Vec<u8>) {
    out.extend_from_slice(&[
        TAG_TWO | (unit >> 6) as u8,
        TAG_CONT | (unit as u8 & CONT_MASK),
    ]);
}

/// Also used for lone surrogates in [`LoneSurrogateMode::Preserve`].
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn push_three(unit: u16, out: &mut Vec<u8>) {
    out.extend_from_slice(&[
        TAG_THREE | (unit >> 12) as u8,
        TAG_CONT | ((unit >> 6) as u8 & CONT_MASK),
        TAG_CONT | (unit as u8 & CONT_MASK),
    ]);
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn push_four(scalar: u32, out: &mut Vec<u8>) {
    out.extend_from_slice(&[
        TAG_FOUR | (scalar >> 18) as u8,
        TAG_CONT | ((scalar >> 12) as u8 & CONT_MASK),
        TAG_CONT | ((scalar >> 6) as u8 & CONT_MASK),
        TAG_CONT | (scalar as u8 & CONT_MASK),
    ]);
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec, vec::Vec};

    use rstest::rstest;

    use super::*;
    use crate::REPLACEMENT_SEQUENCE;

    const PRESERVE: EncodeOptions = EncodeOptions {
        lone_surrogates: LoneSurrogateMode::Preserve,
    };

    fn std_utf8(units: &[u16]) -> Vec<u8> {
        std::string::String::from_utf16(units)
            .unwrap()
            .into_bytes()
    }

    #[test]
    fn empty_input() {
        assert!(encode(&[]).is_empty());
        assert!(encode_with(&[], PRESERVE).is_empty());
        assert_eq!(try_encode(&[]), Ok(Vec::new()));
        assert_eq!(encode_to_string(&[]), "");
    }

    #[rstest]
    #[case(&[0x00])]
    #[case(&[0x7F])]
    #[case(&[0x80])]
    #[case(&[0x07FF])]
    #[case(&[0x0800])]
    #[case(&[0xD7FF])]
    #[case(&[0xE000])]
    #[case(&[0xFFFF])]
    #[case(&[0xD800, 0xDC00])]
    #[case(&[0xD835, 0xDEE2])]
    #[case(&[0xDBFF, 0xDFFF])]
    fn well_formed_units_match_std(#[case] units: &[u16]) {
        assert_eq!(encode(units), std_utf8(units));
    }

    #[test]
    fn pair_is_four_bytes() {
        assert_eq!(encode(&[0xD83D, 0xDE00]), vec![0xF0, 0x9F, 0x98, 0x80]);
    }

    #[rstest]
    #[case::lone_high(&[0xD800], &REPLACEMENT_SEQUENCE)]
    #[case::lone_low(&[0xDC00], &REPLACEMENT_SEQUENCE)]
    #[case::reversed_pair(&[0xDC00, 0xD800], &[0xEF, 0xBB, 0xBF, 0xEF, 0xBB, 0xBF])]
    #[case::high_then_ascii(&[0xD800, 0x68, 0x69], &[0xEF, 0xBB, 0xBF, 0x68, 0x69])]
    #[case::ascii_then_low(&[0x68, 0x69, 0xDC00], &[0x68, 0x69, 0xEF, 0xBB, 0xBF])]
    #[case::high_high_low(&[0xD83D, 0xD83D, 0xDE00], &[0xEF, 0xBB, 0xBF, 0xF0, 0x9F, 0x98, 0x80])]
    fn lone_surrogates_are_replaced(#[case] units: &[u16], #[case] expected: &[u8]) {
        assert_eq!(encode(units), expected);
    }

    #[test]
    fn high_surrogate_does_not_swallow_next_unit() {
        // The unit after a failed pairing is encoded on its own.
        assert_eq!(encode(&[0xD800, 0x00E9]), vec![0xEF, 0xBB, 0xBF, 0xC3, 0xA9]);
    }

    #[rstest]
    #[case(0xD800, [0xED, 0xA0, 0x80])]
    #[case(0xDBFF, [0xED, 0xAF, 0xBF])]
    #[case(0xDC00, [0xED, 0xB0, 0x80])]
    #[case(0xDFFF, [0xED, 0xBF, 0xBF])]
    fn preserve_writes_generalized_utf8(#[case] unit: u16, #[case] expected: [u8; 3]) {
        assert_eq!(encode_with(&[unit], PRESERVE), expected);
    }

    #[test]
    fn preserve_still_pairs() {
        assert_eq!(
            encode_with(&[0xD83D, 0xDE00], PRESERVE),
            vec![0xF0, 0x9F, 0x98, 0x80]
        );
    }

    #[test]
    fn try_encode_reports_first_lone_surrogate() {
        let err = try_encode(&[0x61, 0xD83D, 0xDE00, 0xD800, 0x62, 0xDC00]).unwrap_err();
        assert_eq!(err, EncodeError::UnpairedSurrogate { index: 3, unit: 0xD800 });
        assert_eq!(err.index(), 3);
        assert_eq!(err.to_string(), "unpaired surrogate 0xD800 at index 3");
    }

    #[test]
    fn try_encode_accepts_well_formed_input() {
        let units: Vec<u16> = "añ日😀".encode_utf16().collect();
        assert_eq!(try_encode(&units), Ok("añ日😀".as_bytes().to_vec()));
    }

    #[test]
    fn to_string_replaces_with_bom() {
        assert_eq!(encode_to_string(&[0x61, 0xDC00]), "a\u{FEFF}");
    }

    #[test]
    fn to_string_covers_every_single_unit() {
        for unit in 0u16..=0xFFFF {
            let expected = char::from_u32(u32::from(unit)).unwrap_or('\u{FEFF}');
            let text = encode_to_string(&[unit]);
            assert_eq!(text.chars().collect::<Vec<_>>(), [expected], "unit {unit:#06X}");
            assert_eq!(text.as_bytes(), encode(&[unit]).as_slice());
        }
    }

    #[test]
    fn encode_into_appends() {
        let mut out = b"x".to_vec();
        encode_into(&[0x79], EncodeOptions::default(), &mut out);
        assert_eq!(out, b"xy");
    }
}
