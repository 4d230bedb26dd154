use thiserror::Error;

use crate::utils::UtilsError;

/// Errors raised by [`crate::proofs::prove`] and [`crate::proofs::verify`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofsError {
    /// The number of puzzles did not match the number of witnesses.
    #[error("number of puzzles is not equal to number of witnesses")]
    NumPuzzlesAndWitnesses,
    /// The number of puzzles did not match the number of proof values.
    #[error("number of puzzles is not equal to number of values")]
    NumPuzzlesAndValues,
    /// The CSPRNG failed to produce a drowning term `y_i`.
    #[error("unable to sample drowning term y")]
    SampleY,
    /// `D_i` could not be computed.
    #[error("unable to compute D")]
    ComputeD,
    /// `F_i'` could not be computed.
    #[error("unable to compute Fi'")]
    ComputeFiPrime,
    /// The Fiat–Shamir randomness could not be generated.
    #[error("unable to generate randomness")]
    GenerateRandomness,
    /// A challenge byte decoded to something other than 0 or 1; defensively
    /// unreachable, since [`crate::utils::bytes_to_bit`] can only ever
    /// return 0 or 1.
    #[error("bit is neither 0 nor 1")]
    InvalidBit,
}

impl From<UtilsError> for ProofsError {
    fn from(_: UtilsError) -> Self {
        ProofsError::GenerateRandomness
    }
}
