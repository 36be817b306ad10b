use thiserror::Error;

/// Error returned by [`try_encode`](crate::try_encode).
///
/// The lenient encoders never fail; this exists for callers that would rather
/// reject ill-formed UTF-16 than substitute it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// A surrogate that is not part of a high/low pair.
    #[error("unpaired surrogate {unit:#06X} at index {index}")]
    UnpairedSurrogate {
        /// Position of the offending unit in the input.
        index: usize,
        /// The offending unit.
        unit: u16,
    },
}

impl EncodeError {
    /// Index of the offending code unit in the input.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::UnpairedSurrogate { index, .. } => *index,
        }
    }
}
