use thiserror::Error;

/// Errors raised by [`crate::utils`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilsError {
    /// AES could not be initialized from the derived key.
    #[error("unable to initialize AES")]
    InitializeAes,
    /// The seeded keystream could not be generated.
    #[error("unable to generate random bytes")]
    GenerateRandomBytes,
}
