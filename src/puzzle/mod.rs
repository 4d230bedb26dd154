//! Encrypts plaintexts into [`Puzzle`]s and solves them back via sequential
//! squaring plus a generalised-Paillier discrete-log recovery step
//! (Damgård–Jurik, BRICS-RS-00-45 §3).

mod error;

pub use error::PuzzleError;

use num_bigint::BigUint;
use num_traits::One;
use tracing::debug;

use crate::ext::ModInverse;
use crate::params::Params;
use crate::primes;
use crate::utils;

/// A time-lock puzzle: a pair `(u, v)` with `0 <= u < n` and
/// `0 <= v < n^y`.
///
/// Conceptually an ElGamal-style ciphertext lifted into `Z_{n^y}*`, with
/// `h = g^(2^t)` acting as a time-locked public key. Puzzles carry no
/// identity; equality is purely structural (both components equal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    /// The puzzle's `u` component.
    pub u: BigUint,
    /// The puzzle's `v` component.
    pub v: BigUint,
}

impl Puzzle {
    /// Creates a puzzle from its two components.
    pub fn new(u: BigUint, v: BigUint) -> Self {
        Puzzle { u, v }
    }
}

/// Generates a puzzle hiding `plaintext`, discarding the nonce used.
///
/// Fails only if the CSPRNG cannot sample a nonce.
pub fn generate_puzzle(params: &Params, plaintext: &BigUint) -> Result<Puzzle, PuzzleError> {
    let (puzzle, _nonce) = generate_puzzle_and_return_nonce(params, plaintext)?;
    Ok(puzzle)
}

/// Generates a puzzle hiding `plaintext` while also returning the nonce
/// used, so higher layers (the range proof) can retain it as witness
/// material.
///
/// The `Result` mirrors the reference's fallible CSPRNG call
/// ([`PuzzleError::SampleNonceR`]); sampling here cannot itself fail since
/// it draws from an in-process RNG rather than a fallible I/O source, but
/// the signature is kept so a future CSPRNG backed by a fallible entropy
/// source slots in without a breaking change.
pub fn generate_puzzle_and_return_nonce(
    params: &Params,
    plaintext: &BigUint,
) -> Result<(Puzzle, BigUint), PuzzleError> {
    let n_exp_y_minus_one = &params.n_exp_y - BigUint::one();
    let nonce = primes::uniform_below(&n_exp_y_minus_one);
    let puzzle = generate_puzzle_with_custom_nonce(params, &nonce, plaintext);

    Ok((puzzle, nonce))
}

/// Generates a puzzle hiding `plaintext` using the given `nonce`.
///
/// Preconditions (unchecked, caller's responsibility): `0 <= nonce < n^y -
/// 1` and `0 <= plaintext < n^y`.
pub fn generate_puzzle_with_custom_nonce(
    params: &Params,
    nonce: &BigUint,
    plaintext: &BigUint,
) -> Puzzle {
    let u = params.g.modpow(nonce, &params.n);

    let exponent = nonce * &params.n_exp_y_minus_one;
    let h_term = params.h.modpow(&exponent, &params.n_exp_y);
    let one_plus_n = BigUint::one() + &params.n;
    let cipher_term = one_plus_n.modpow(plaintext, &params.n_exp_y);
    let v = (h_term * cipher_term) % &params.n_exp_y;

    Puzzle::new(u, v)
}

/// Solves `puzzle`, recovering the plaintext it hides.
///
/// Phase 1 performs `t` sequential squarings of `u` modulo `n` — this is
/// the intentionally non-parallelizable time-lock step. Phase 2 recovers
/// the plaintext from `v` via the Damgård–Jurik generalisation of
/// Paillier's discrete-log recovery.
pub fn solve_puzzle(params: &Params, puzzle: &Puzzle) -> BigUint {
    debug!(t = params.t, "solving puzzle via sequential squaring");

    let mut w = puzzle.u.clone();
    for _ in 0..params.t {
        w = (&w * &w) % &params.n;
    }

    let w_term = w.modpow(&params.n_exp_y_minus_one, &params.n_exp_y);
    let w_term_inv = w_term
        .mod_inverse(&params.n_exp_y)
        .expect("w^(n^(y-1)) is always invertible mod n^y for honestly generated params");
    let a = (&puzzle.v * &w_term_inv) % &params.n_exp_y;

    let mut s = BigUint::from(0u32);
    for j in 1..params.y {
        let (_, n_j, n_j_plus_one) = utils::exponentiate(&params.n, j);

        let t1_num = (&a % &n_j_plus_one) - BigUint::one();
        let mut t1 = &t1_num / &params.n;
        let mut t2 = s.clone();

        for k in 2..=j {
            s -= BigUint::one();

            t2 = (&t2 * &s) % &n_j;

            let (k_minus_one_exp, _, _) = utils::exponentiate(&params.n, k);
            let term = (&t2 * &k_minus_one_exp) / utils::factorial(k as u64);
            t1 = sub_mod(&t1, &term, &n_j);
        }

        s = t1;
    }

    s
}

/// Computes `(a - b) mod m`, keeping the result in `[0, m)` even when `b >
/// a` in ordinary integer arithmetic (`BigUint` has no negative values, so
/// this mirrors the mathematical-convention `mod` the reference relies on).
fn sub_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    let a_mod = a % m;
    let b_mod = b % m;
    if a_mod >= b_mod {
        (&a_mod - &b_mod) % m
    } else {
        (m + &a_mod - &b_mod) % m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::generate_params;

    #[test]
    fn generate_and_solve_round_trips() {
        let message = BigUint::from(42u32);
        let params = generate_params(128, 2, 1).unwrap();
        let puzzle = generate_puzzle(&params, &message).unwrap();
        let solved = solve_puzzle(&params, &puzzle);
        assert_eq!(solved, message);
    }

    #[test]
    fn generate_and_solve_large_message() {
        let params = generate_params(128, 4, 1).unwrap();
        let message = &params.n * &params.n;
        let puzzle = generate_puzzle(&params, &message).unwrap();
        let solved = solve_puzzle(&params, &puzzle);
        assert_eq!(solved, message);
    }

    #[test]
    fn generate_with_custom_nonce_round_trips() {
        let nonce = BigUint::from(11u32);
        let message = BigUint::from(42u32);
        let params = generate_params(128, 2, 1).unwrap();
        let puzzle = generate_puzzle_with_custom_nonce(&params, &nonce, &message);
        let solved = solve_puzzle(&params, &puzzle);
        assert_eq!(solved, message);
    }

    #[test]
    fn generate_and_return_nonce_round_trips() {
        let message = BigUint::from(42u32);
        let params = generate_params(128, 2, 1).unwrap();
        let (puzzle, _nonce) = generate_puzzle_and_return_nonce(&params, &message).unwrap();
        let solved = solve_puzzle(&params, &puzzle);
        assert_eq!(solved, message);
    }

    #[test]
    fn puzzles_with_same_nonce_and_plaintext_are_equal() {
        let message = BigUint::from(42u32);
        let params = generate_params(128, 2, 1).unwrap();
        let (p1, nonce) = generate_puzzle_and_return_nonce(&params, &message).unwrap();
        let p2 = generate_puzzle_with_custom_nonce(&params, &nonce, &message);
        assert_eq!(p1, p2);
    }
}
