//! Lossless transcoding between UTF-16 code units and [WTF-8].
//!
//! A managed host runtime stores strings as arrays of 16-bit code units that
//! are allowed to contain unpaired surrogates. This crate moves such strings
//! through 8-bit buffers and back:
//!
//! - [`encode`] turns code units into bytes. Surrogate pairs become regular
//!   4-byte UTF-8; an unpaired surrogate becomes [`REPLACEMENT_SEQUENCE`]
//!   unless [`LoneSurrogateMode::Preserve`] is selected.
//! - [`decode`] turns bytes into code units. Any byte sequence is accepted;
//!   4-byte sequences are split back into surrogate pairs.
//!
//! ```rust
//! let units = [0x0048, 0x0069, 0xD83D, 0xDE00];
//! let bytes = wtf8::encode(&units);
//! assert_eq!(bytes, b"Hi\xF0\x9F\x98\x80");
//! assert_eq!(wtf8::decode(&bytes), units);
//! ```
//!
//! # Asymmetry
//!
//! With default options the two directions are not exact inverses. The
//! decoder never loses information, but the encoder substitutes every
//! unpaired surrogate, so only input made of non-surrogate units and proper
//! pairs survives `decode(encode(u))` unchanged. Pick
//! [`LoneSurrogateMode::Preserve`] to get a lossless round-trip for any input.
//!
//! [WTF-8]: https://simonsapin.github.io/wtf-8/

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod decoder;
mod encoder;
mod error;
mod options;


pub use decoder::{decode, decode_into, decode_with};
pub use encoder::{encode, encode_into, encode_to_string, encode_with, try_encode};
pub use error::EncodeError;
pub use options::{DecodeOptions, EncodeOptions, LoneSurrogateMode, PassthroughMode};

/// Bytes written in place of an unpaired surrogate by the default encoder.
///
/// These are the UTF-8 bytes of U+FEFF. Hosts that exchanged data with
/// earlier releases expect exactly this sequence, so it is kept as is.
pub const REPLACEMENT_SEQUENCE: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Mask of the value bits of a continuation byte.
pub(crate) const CONT_MASK: u8 = 0b0011_1111;
/// Tag bits of a continuation byte.
pub(crate) const TAG_CONT: u8 = 0b1000_0000;
/// Tag bits of the lead byte of a 2-byte sequence.
pub(crate) const TAG_TWO: u8 = 0b1100_0000;
/// Tag bits of the lead byte of a 3-byte sequence.
pub(crate) const TAG_THREE: u8 = 0b1110_0000;
/// Tag bits of the lead byte of a 4-byte sequence.
pub(crate) const TAG_FOUR: u8 = 0b1111_0000;

pub(crate) const HIGH_SURROGATE_START: u16 = 0xD800;
pub(crate) const LOW_SURROGATE_START: u16 = 0xDC00;
pub(crate) const SURROGATE_END: u16 = 0xDFFF;
pub(crate) const SURROGATE_OFFSET_MASK: u16 = 0x3FF;
pub(crate) const SUPPLEMENTARY_START: u32 = 0x1_0000;

/// Returns `true` for a leading (high) surrogate, `0xD800..=0xDBFF`.
#[inline]
#[must_use]
pub const fn is_high_surrogate(unit: u16) -> bool {
    unit >= HIGH_SURROGATE_START && unit < LOW_SURROGATE_START
}

/// Returns `true` for a trailing (low) surrogate, `0xDC00..=0xDFFF`.
#[inline]
#[must_use]
pub const fn is_low_surrogate(unit: u16) -> bool {
    unit >= LOW_SURROGATE_START && unit <= SURROGATE_END
}

#[inline]
pub(crate) fn push_replacement(out: &mut alloc::vec::Vec<u8>) {
    out.extend_from_slice(&REPLACEMENT_SEQUENCE);
}
