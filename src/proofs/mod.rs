//! A non-interactive, Fiat–Shamir batched range proof: convinces a
//! verifier that every plaintext hidden in a vector of puzzles lies in
//! `[0, q]` without revealing any plaintext or nonce.
//!
//! The prover's sampling bound for the per-challenge drowning term and the
//! verifier's acceptance bound differ by a factor of two (`L/2` vs `L`).
//! This asymmetry is preserved exactly as found in the reference — it may
//! be deliberate slack to absorb honest noise, or a transcription artefact
//! of the source paper; see the crate-level documentation.

mod error;

pub use error::ProofsError;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};
use tracing::debug;

use crate::params::Params;
use crate::primes;
use crate::puzzle::{generate_puzzle_and_return_nonce, generate_puzzle_with_custom_nonce, Puzzle};
use crate::utils;

/// A puzzle's underlying values.
///
/// Serves two roles, matching the reference: as the prover's secret
/// witness `(x, r)` = (plaintext, nonce) passed into [`prove`], and as a
/// proof's masked opening `(v, w)` for each challenge row. `x`/`v` are
/// signed: the witness plaintext and the masked sum are combined by
/// ordinary (non-modular) integer addition, and an out-of-range witness can
/// legitimately drive the masked sum negative, which is exactly what lets
/// the verifier catch it.
#[derive(Debug, Clone)]
pub struct PuzzleValues {
    /// The plaintext `x` (witness role) or the masked sum `v` (opening
    /// role).
    pub x: BigInt,
    /// The nonce `r` (witness role) or the masked nonce sum `w` (opening
    /// role).
    pub r: BigInt,
}

impl PuzzleValues {
    /// Creates a new puzzle-values pair.
    pub fn new(x: BigInt, r: BigInt) -> Self {
        PuzzleValues { x, r }
    }
}

/// A batched range proof: one blinding puzzle `D_i` and one masked opening
/// per challenge bit, `i in [0, k)`.
#[derive(Debug, Clone)]
pub struct RangeProof {
    /// The blinding puzzles, one per challenge bit.
    pub d: Vec<Puzzle>,
    /// The masked openings, one per challenge bit.
    pub values: Vec<PuzzleValues>,
}

/// Generates a range proof that every plaintext hidden in `z` lies in
/// `{0, ..., q}` (and, after centring, in `[-(q/2), q/2]`).
///
/// `bits` is the soundness parameter `k` (the number of independent
/// challenge bits); `wit[j]` must be the `(plaintext, nonce)` pair used to
/// generate `z[j]`.
pub fn prove(
    bits: usize,
    params: &Params,
    z: &[Puzzle],
    q: &BigUint,
    wit: &[PuzzleValues],
) -> Result<RangeProof, ProofsError> {
    let k = bits;
    let num_puzzles = z.len();

    if wit.len() != z.len() {
        return Err(ProofsError::NumPuzzlesAndWitnesses);
    }

    let big_l = challenge_scale(q, num_puzzles);
    let prover_bound = &big_l / BigUint::from(2u32); // L / 2

    let mut y = Vec::with_capacity(k);
    let mut r_prime = Vec::with_capacity(k);
    let mut d = Vec::with_capacity(k);

    for _ in 0..k {
        let yi = primes::uniform_below(&prover_bound);
        let (di, ri_prime) = generate_puzzle_and_return_nonce(params, &yi)
            .map_err(|_| ProofsError::ComputeD)?;

        y.push(BigInt::from(yi));
        r_prime.push(BigInt::from(ri_prime));
        d.push(di);
    }

    let t = fiat_shamir_bits(k, num_puzzles, z, &d)?;

    let mut values = Vec::with_capacity(k);
    for i in 0..k {
        let mut xj_sum = BigInt::zero();
        let mut rj_sum = BigInt::zero();

        for j in 0..num_puzzles {
            let index = (i * num_puzzles) + j;
            match utils::bytes_to_bit(&t, index) {
                0 => continue,
                1 => {
                    xj_sum += &wit[j].x;
                    rj_sum += &wit[j].r;
                }
                _ => return Err(ProofsError::InvalidBit),
            }
        }

        let vi = &y[i] + xj_sum;
        let wi = &r_prime[i] + rj_sum;
        values.push(PuzzleValues::new(vi, wi));
    }

    debug!(k, num_puzzles, "range proof generated");

    Ok(RangeProof { d, values })
}

/// Verifies a range proof produced by [`prove`].
///
/// Returns `Ok(false)` for a well-formed but invalid proof, and `Err` only
/// for a structural or environmental failure — this distinction is part of
/// the contract, not an implementation detail.
pub fn verify(
    proof: &RangeProof,
    bits: usize,
    params: &Params,
    z: &[Puzzle],
    q: &BigUint,
) -> Result<bool, ProofsError> {
    let k = bits;
    let num_puzzles = z.len();

    if proof.d.len() != proof.values.len() {
        return Err(ProofsError::NumPuzzlesAndValues);
    }

    let big_l = challenge_scale(q, num_puzzles);
    let verifier_bound = BigInt::from(big_l); // L (not L/2 — see module documentation)

    let t = fiat_shamir_bits(k, num_puzzles, z, &proof.d)?;

    for i in 0..k {
        let vi = &proof.values[i].x;
        let wi = &proof.values[i].r;

        if vi.is_negative() || *vi > verifier_bound {
            debug!(i, "range proof rejected: v_i out of bounds");
            return Ok(false);
        }

        let mut zj_u_product = BigUint::one();
        let mut zj_v_product = BigUint::one();

        for j in 0..num_puzzles {
            let index = (i * num_puzzles) + j;
            match utils::bytes_to_bit(&t, index) {
                0 => continue,
                1 => {
                    zj_u_product = (&zj_u_product * &z[j].u) % &params.n;
                    zj_v_product = (&zj_v_product * &z[j].v) % &params.n_exp_y;
                }
                _ => return Err(ProofsError::InvalidBit),
            }
        }

        let fi_u = (&proof.d[i].u * &zj_u_product) % &params.n;
        let fi_v = (&proof.d[i].v * &zj_v_product) % &params.n_exp_y;
        let fi = Puzzle::new(fi_u, fi_v);

        // wi should always be non-negative on an honest proof (it is a sum
        // of nonces); a malicious proof that makes it negative is simply
        // treated as a rejection rather than a computation error.
        let wi_unsigned = match wi.to_biguint() {
            Some(w) => w,
            None => {
                debug!(i, "range proof rejected: w_i is negative");
                return Ok(false);
            }
        };
        let vi_unsigned = vi
            .to_biguint()
            .expect("vi was just checked to be non-negative");

        let fi_prime = generate_puzzle_with_custom_nonce(params, &wi_unsigned, &vi_unsigned);

        if fi != fi_prime {
            debug!(i, "range proof rejected: opening does not match");
            return Ok(false);
        }
    }

    debug!(k, num_puzzles, "range proof accepted");
    Ok(true)
}

/// Computes `L = (q / 2) * 4 * l`, the shared scale factor the prover's and
/// verifier's bounds are both derived from.
fn challenge_scale(q: &BigUint, num_puzzles: usize) -> BigUint {
    let l = BigUint::from(num_puzzles as u64);
    let l4 = BigUint::from(4u32) * &l;
    let b = q / BigUint::from(2u32);
    b * l4
}

/// Serializes a `BigUint` as an unsigned big-endian magnitude with no length
/// prefix, with the empty byte sequence standing in for zero.
///
/// `BigUint::to_bytes_be` returns `vec![0]` for zero rather than the empty
/// slice; the transcript contract requires the latter, so zero is special-
/// cased here rather than left to the underlying big-integer type.
fn to_transcript_bytes(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

/// Implements the Fiat–Shamir transform: serializes the transcript (every
/// input puzzle's `u` then `v`, followed by every commitment's `u` then
/// `v`, all as unsigned big-endian magnitude bytes with no length prefix)
/// and derives `k * l` pseudorandom bits from it.
fn fiat_shamir_bits(
    k: usize,
    num_puzzles: usize,
    z: &[Puzzle],
    d: &[Puzzle],
) -> Result<Vec<u8>, ProofsError> {
    let mut transcript = Vec::new();
    for puzzle in z {
        transcript.extend_from_slice(&to_transcript_bytes(&puzzle.u));
        transcript.extend_from_slice(&to_transcript_bytes(&puzzle.v));
    }
    for puzzle in d {
        transcript.extend_from_slice(&to_transcript_bytes(&puzzle.u));
        transcript.extend_from_slice(&to_transcript_bytes(&puzzle.v));
    }

    let num_bits = k * num_puzzles;
    let bytes = utils::generate_random_bytes_seeded(&transcript, num_bits)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::generate_params;
    use crate::puzzle::generate_puzzle_and_return_nonce;

    /// Splits a test plaintext into the canonical non-negative value the
    /// puzzle actually encrypts and the raw signed value the witness
    /// carries. Only the witness sees out-of-range values as negative or
    /// oversized; the puzzle's plaintext domain is `[0, n^y)`.
    fn split_plaintext(value: i64, n_exp_y: &BigUint) -> (BigUint, BigInt) {
        let raw = BigInt::from(value);
        let canonical = if value >= 0 {
            BigUint::from(value as u64)
        } else {
            let magnitude = BigUint::from((-value) as u64);
            n_exp_y - (magnitude % n_exp_y)
        };
        (canonical, raw)
    }

    fn prove_and_verify_single(bits: usize, q: u64, m: i64) -> bool {
        let params = generate_params(bits, 2, 1).unwrap();
        let q = BigUint::from(q);

        let (canonical, raw) = split_plaintext(m, &params.n_exp_y);
        let (puzzle, nonce) = generate_puzzle_and_return_nonce(&params, &canonical).unwrap();
        let witness = PuzzleValues::new(raw, BigInt::from(nonce));

        let puzzles = vec![puzzle];
        let witnesses = vec![witness];

        let proof = prove(bits, &params, &puzzles, &q, &witnesses).unwrap();
        verify(&proof, bits, &params, &puzzles, &q).unwrap()
    }

    #[test]
    fn single_puzzle_accepts_at_m_equals_zero() {
        assert!(prove_and_verify_single(128, 1000, 0));
    }

    #[test]
    fn single_puzzle_accepts_at_m_equals_q() {
        assert!(prove_and_verify_single(128, 1000, 1000));
    }

    #[test]
    fn single_puzzle_rejects_m_below_range() {
        assert!(!prove_and_verify_single(128, 1000, -2000));
    }

    #[test]
    fn single_puzzle_rejects_m_above_range() {
        assert!(!prove_and_verify_single(128, 1000, 2000));
    }

    fn prove_and_verify_multi(bits: usize, q: u64, ms: &[i64]) -> bool {
        let params = generate_params(bits, 2, 1).unwrap();
        let q_big = BigUint::from(q);

        let mut puzzles = Vec::new();
        let mut witnesses = Vec::new();
        for &m in ms {
            let (canonical, raw) = split_plaintext(m, &params.n_exp_y);
            let (puzzle, nonce) = generate_puzzle_and_return_nonce(&params, &canonical).unwrap();
            witnesses.push(PuzzleValues::new(raw, BigInt::from(nonce)));
            puzzles.push(puzzle);
        }

        let proof = prove(bits, &params, &puzzles, &q_big, &witnesses).unwrap();
        verify(&proof, bits, &params, &puzzles, &q_big).unwrap()
    }

    #[test]
    fn multiple_puzzles_accept_at_m_equals_zero() {
        assert!(prove_and_verify_multi(128, 1000, &[0, 0, 0]));
    }

    #[test]
    fn multiple_puzzles_accept_at_m_equals_q() {
        assert!(prove_and_verify_multi(128, 1000, &[1000, 1000, 1000]));
    }

    #[test]
    fn multiple_puzzles_reject_below_range() {
        assert!(!prove_and_verify_multi(128, 1000, &[-2000, -2000, -2000]));
    }

    #[test]
    fn multiple_puzzles_reject_above_range() {
        assert!(!prove_and_verify_multi(128, 1000, &[2000, 2000, 2000]));
    }

    #[test]
    fn structural_mismatch_is_an_error_not_a_rejection() {
        let params = generate_params(128, 2, 1).unwrap();
        let q = BigUint::from(1000u32);
        let (canonical, raw) = split_plaintext(0, &params.n_exp_y);
        let (puzzle, nonce) = generate_puzzle_and_return_nonce(&params, &canonical).unwrap();
        let witnesses = vec![
            PuzzleValues::new(raw, BigInt::from(nonce)),
            PuzzleValues::new(BigInt::zero(), BigInt::zero()),
        ];

        let err = prove(128, &params, &[puzzle], &q, &witnesses).unwrap_err();
        assert_eq!(err, ProofsError::NumPuzzlesAndWitnesses);
    }
}
