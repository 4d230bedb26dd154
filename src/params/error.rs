use thiserror::Error;

/// Errors raised by [`crate::params::generate_params`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamsError {
    /// The CSPRNG failed to produce prime `p`.
    #[error("unable to generate prime p")]
    GeneratePrimeP,
    /// The CSPRNG failed to produce prime `q`.
    #[error("unable to generate prime q")]
    GeneratePrimeQ,
    /// The sampled primes `p` and `q` were equal; the caller should retry.
    #[error("equal prime numbers")]
    EqualPrimeNumbers,
    /// The CSPRNG failed to produce `g'`.
    #[error("unable to sample random g'")]
    SampleGPrime,
}
