//! Closed operations on [`Puzzle`]s: every combiner here is total and
//! assumes its inputs were generated under the same [`Params`].

use num_bigint::BigUint;
use num_traits::One;

use crate::params::Params;
use crate::puzzle::{generate_puzzle_with_custom_nonce, Puzzle};

/// Adds the plaintext values hidden in `puzzles`, componentwise.
///
/// Solving the result yields `sum(s_i) mod n^y`. The caller must supply at
/// least one puzzle; the result of an empty slice is undefined by the
/// protocol and this function panics rather than fabricate an identity
/// puzzle under the wrong modulus.
pub fn add_plaintext_values(params: &Params, puzzles: &[Puzzle]) -> Puzzle {
    assert!(
        !puzzles.is_empty(),
        "add_plaintext_values requires at least one puzzle"
    );

    let mut u = BigUint::one();
    let mut v = BigUint::one();
    for puzzle in puzzles {
        u = (&u * &puzzle.u) % &params.n;
        v = (&v * &puzzle.v) % &params.n_exp_y;
    }

    Puzzle::new(u, v)
}

/// Adds the cleartext scalar `p` to the plaintext hidden in `z`.
///
/// Solving the result yields `s + p mod n^y`. This combiner encrypts `p`
/// deterministically, using `p` itself both as the nonce and as the
/// plaintext exponent — it therefore does **not** re-randomise the
/// resulting puzzle. Callers who need re-randomisation should instead
/// compose [`add_plaintext_values`] against a fresh encryption of zero.
pub fn add_plaintext_value(params: &Params, z: &Puzzle, p: &BigUint) -> Puzzle {
    let blinding = generate_puzzle_with_custom_nonce(params, p, p);

    let u = (&z.u * &blinding.u) % &params.n;
    let v = (&z.v * &blinding.v) % &params.n_exp_y;

    Puzzle::new(u, v)
}

/// Multiplies the plaintext hidden in `z` by the cleartext scalar `p`.
///
/// Solving the result yields `s * p mod n^y`.
pub fn multiply_plaintext_value(params: &Params, z: &Puzzle, p: &BigUint) -> Puzzle {
    let u = z.u.modpow(p, &params.n);
    let v = z.v.modpow(p, &params.n_exp_y);

    Puzzle::new(u, v)
}
