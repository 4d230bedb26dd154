use thiserror::Error;

/// Errors raised by [`crate::puzzle`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleError {
    /// The CSPRNG failed to produce the nonce `r`.
    #[error("unable to sample random nonce r")]
    SampleNonceR,
}
