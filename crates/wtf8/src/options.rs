/// How the decoder turns bytes outside a 4-byte sequence into code units.
///
/// Only bytes whose top nibble is `1111` followed by three more bytes are
/// always recombined into a surrogate pair. Everything in between those
/// sequences is an unmatched run, and this mode decides what happens to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(rename_all = "snake_case"))]
pub enum PassthroughMode {
    /// Decode well-formed 1, 2 and 3-byte sequences (including the 3-byte
    /// form of a lone surrogate) to the code unit they encode. Bytes that do
    /// not start a well-formed sequence are zero-extended.
    ///
    /// This is what makes `decode(encode(u)) == u` hold for text outside
    /// ASCII.
    #[default]
    Utf8,

    /// Zero-extend every byte of the run, like reading it as Latin-1.
    ///
    /// Multi-byte sequences shorter than four bytes are left un-decoded.
    Latin1,
}

/// What the encoder writes for a surrogate that is not part of a valid pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(rename_all = "snake_case"))]
pub enum LoneSurrogateMode {
    /// Write [`REPLACEMENT_SEQUENCE`](crate::REPLACEMENT_SEQUENCE).
    ///
    /// The output is always valid UTF-8.
    #[default]
    Replace,

    /// Write the 3-byte generalized UTF-8 form of the surrogate itself, e.g.
    /// `ED A0 80` for `0xD800`.
    ///
    /// The output is WTF-8 and may not be valid UTF-8, but decoding it with
    /// [`PassthroughMode::Utf8`] reproduces the input exactly.
    Preserve,
}

/// Configuration for [`decode_with`](crate::decode_with).
///
/// # Examples
///
/// ```rust
/// use wtf8::{DecodeOptions, PassthroughMode};
///
/// let options = DecodeOptions {
///     passthrough: PassthroughMode::Latin1,
/// };
/// assert_eq!(wtf8::decode_with(b"\xC3\xA9", options), [0xC3, 0xA9]);
/// assert_eq!(wtf8::decode(b"\xC3\xA9"), [0xE9]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(default))]
pub struct DecodeOptions {
    /// Handling of bytes outside 4-byte sequences.
    ///
    /// # Default
    ///
    /// [`PassthroughMode::Utf8`]
    pub passthrough: PassthroughMode,
}

/// Configuration for [`encode_with`](crate::encode_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(default))]
pub struct EncodeOptions {
    /// Output for unpaired surrogates.
    ///
    /// # Default
    ///
    /// [`LoneSurrogateMode::Replace`]
    pub lone_surrogates: LoneSurrogateMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_host_behavior() {
        assert_eq!(DecodeOptions::default().passthrough, PassthroughMode::Utf8);
        assert_eq!(
            EncodeOptions::default().lone_surrogates,
            LoneSurrogateMode::Replace
        );
    }

    #[test]
    fn options_deserialize_from_partial_json() {
        let decode: DecodeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(decode, DecodeOptions::default());

        let decode: DecodeOptions = serde_json::from_str(r#"{"passthrough":"latin1"}"#).unwrap();
        assert_eq!(decode.passthrough, PassthroughMode::Latin1);

        let encode: EncodeOptions =
            serde_json::from_str(r#"{"lone_surrogates":"preserve"}"#).unwrap();
        assert_eq!(encode.lone_surrogates, LoneSurrogateMode::Preserve);
    }

    #[test]
    fn options_serialize_snake_case() {
        let json = serde_json::to_string(&EncodeOptions {
            lone_surrogates: LoneSurrogateMode::Preserve,
        })
        .unwrap();
        assert_eq!(json, r#"{"lone_surrogates":"preserve"}"#);
    }
}
