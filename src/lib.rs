//! A linearly homomorphic time-lock puzzle (LHTLP) scheme, after Thyagarajan,
//! Bhat, Malavolta, Döttling, Kate and Schröder, "Verifiable Timed Linkable
//! Ring Signatures for Scalable Payments for Monero" (<https://eprint.iacr.org/2019/635.pdf>),
//! §4.1 and §5.1, plus a batched Fiat–Shamir range proof over puzzle
//! plaintexts.
//!
//! A time-lock puzzle hides a plaintext so that recovering it requires `t`
//! sequential modular squarings — work that cannot be parallelized away —
//! while still letting anyone, without solving anything, add or scale the
//! hidden plaintexts homomorphically. The pieces:
//!
//! - [`params`] generates the RSA-style modulus and generator pair shared by
//!   every other component.
//! - [`puzzle`] encrypts plaintexts into puzzles and solves them back.
//! - [`homomorphic`] combines puzzles without solving them.
//! - [`proofs`] proves, without revealing any plaintext, that every
//!   plaintext in a batch of puzzles lies within a public range.
//!
//! `primes`, `ext` and `utils` are internal collaborators (prime sampling,
//! a modular-inverse extension over [`num_bigint`], and the Damgård–Jurik
//! recovery / Fiat–Shamir keystream helpers respectively) and are not part
//! of the public surface.

mod ext;
mod primes;
mod utils;

pub mod homomorphic;
pub mod params;
pub mod proofs;
pub mod puzzle;

pub use params::{generate_params, Params, ParamsError};
pub use proofs::{prove, verify, ProofsError, PuzzleValues, RangeProof};
pub use puzzle::{
    generate_puzzle, generate_puzzle_and_return_nonce, generate_puzzle_with_custom_nonce,
    solve_puzzle, Puzzle, PuzzleError,
};
