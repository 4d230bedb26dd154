//! Generates and owns the immutable [`Params`] bundle: the RSA-style
//! modulus, the generator pair `g`/`h`, and the exponents `y`, `t` that size
//! the plaintext space and the puzzle difficulty.

mod error;

pub use error::ParamsError;

use num_bigint::BigUint;
use num_traits::One;
use tracing::{debug, error};

use crate::ext::ModInverse;
use crate::primes;
use crate::utils;

/// Immutable protocol parameters shared by every other component.
///
/// Created once by [`generate_params`] and never mutated afterwards; freely
/// cloned and shared by value across threads.
#[derive(Debug, Clone)]
pub struct Params {
    /// The exponent controlling the plaintext capacity (plaintexts live
    /// modulo `n^y`).
    pub y: usize,
    /// The difficulty: the number of sequential squarings required to
    /// solve a puzzle.
    pub t: u64,
    /// The RSA-style modulus `n = p * q`.
    pub n: BigUint,
    /// The generator `g`.
    pub g: BigUint,
    /// `h = g^(2^t) mod n`, pre-computed via the `phi(n)/2` trapdoor.
    pub h: BigUint,
    /// `n^y`.
    pub n_exp_y: BigUint,
    /// `n^(y - 1)`.
    pub n_exp_y_minus_one: BigUint,
}

/// Generates protocol parameters for the given security level, plaintext
/// exponent, and difficulty.
///
/// `bits` is the total modulus security: each of the two sampled primes has
/// `bits / 2` bits. `y` must be at least 2. `difficulty` is the number of
/// sequential squarings `solve_puzzle` must perform.
///
/// The two primes are sampled on two scoped threads joined before
/// construction proceeds, per the concurrency model: the only parallelism
/// this crate performs anywhere.
pub fn generate_params(bits: usize, y: usize, difficulty: u64) -> Result<Params, ParamsError> {
    debug!(bits, y, difficulty, "generating params");

    let prime_bits = bits / 2;

    let (p, q) = std::thread::scope(|scope| {
        let p_handle = scope.spawn(|| primes::random_prime(prime_bits));
        let q_handle = scope.spawn(|| primes::random_prime(prime_bits));

        let p = p_handle.join().map_err(|_| {
            error!("prime p generation panicked");
            ParamsError::GeneratePrimeP
        })?;
        let q = q_handle.join().map_err(|_| {
            error!("prime q generation panicked");
            ParamsError::GeneratePrimeQ
        })?;

        Ok::<_, ParamsError>((p, q))
    })?;

    if p == q {
        error!("sampled equal primes p and q");
        return Err(ParamsError::EqualPrimeNumbers);
    }

    let n = &p * &q;
    let n_minus_one = &n - BigUint::one();

    let (n_exp_y_minus_one, n_exp_y, _) = utils::exponentiate(&n, y);

    let phi_n = (&p - BigUint::one()) * (&q - BigUint::one());
    let phi_n_half = &phi_n / BigUint::from(2u32);

    let g_prime = primes::uniform_below(&n_minus_one);

    let g_prime_sq = g_prime.modpow(&BigUint::from(2u32), &n);
    let g = g_prime_sq.mod_inverse(&n).ok_or_else(|| {
        error!("unable to invert g'^2 mod n");
        ParamsError::SampleGPrime
    })?;

    let h_exponent = BigUint::from(2u32).modpow(&BigUint::from(difficulty), &phi_n_half);
    let h = g.modpow(&h_exponent, &n);

    debug!("params generated");

    Ok(Params {
        y,
        t: difficulty,
        n,
        g,
        h,
        n_exp_y,
        n_exp_y_minus_one,
    })
}
