//! Prime sampling and uniform random sampling over [`BigUint`].
//!
//! `primefactor-io/lhtlp`'s Go `params` package draws primes and nonces
//! through `crypto/rand.Prime`/`crypto/rand.Int`; this module rebuilds that
//! surface directly on top of `rand` and `num-bigint`/`num-integer`.
//!
//! Primality testing is trial division against a small-prime table followed
//! by Miller–Rabin with a fixed round count, per Rabin's probabilistic
//! primality test (M. O. Rabin, "Probabilistic algorithm for testing
//! primality", J. Number Theory 12 (1980)) and G. L. Miller's deterministic
//! variant it generalizes ("Riemann's Hypothesis and Tests for Primality",
//! J. Comput. System Sci. 13 (1976)).

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::RngCore;

/// Number of Miller–Rabin rounds. At this round count the false-positive
/// probability is bounded by 4^-64, far below what any of the bit sizes this
/// crate is used at could ever be expected to matter at.
const MILLER_RABIN_ROUNDS: u32 = 64;

const SMALL_PRIMES: &[u32] = &[
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Samples a uniformly random value in `[0, bound)`.
///
/// Uses rejection sampling over the minimal byte-width containing `bound`,
/// the same approach Go's `crypto/rand.Int` takes. Panics if `bound` is
/// zero — callers never pass a zero bound on any path reachable from this
/// crate's public API.
pub fn uniform_below(bound: &BigUint) -> BigUint {
    assert!(!bound.is_zero(), "uniform_below requires a positive bound");

    let num_bits = bound.bits();
    let num_bytes = ((num_bits + 7) / 8) as usize;
    let excess_bits = (8 * num_bytes as u64).saturating_sub(num_bits);
    let mask = if excess_bits > 0 && excess_bits < 8 {
        0xFFu8 >> excess_bits
    } else {
        0xFF
    };

    let mut rng = rand::thread_rng();
    let mut buf = vec![0u8; num_bytes];
    loop {
        rng.fill_bytes(&mut buf);
        if !buf.is_empty() {
            buf[0] &= mask;
        }
        let candidate = BigUint::from_bytes_be(&buf);
        if candidate < *bound {
            return candidate;
        }
    }
}

/// Samples a uniformly random prime of exactly `bits` bits.
///
/// The top bit is forced so the product of two such primes has the expected
/// combined bit length, and the bottom bit is forced so the candidate is
/// odd — both match the convention `crypto/rand.Prime` uses.
pub fn random_prime(bits: usize) -> BigUint {
    assert!(bits >= 2, "prime generation requires at least 2 bits");

    let num_bytes = (bits + 7) / 8;
    let excess_bits = 8 * num_bytes - bits;
    let mut rng = rand::thread_rng();
    let mut buf = vec![0u8; num_bytes];

    loop {
        rng.fill_bytes(&mut buf);

        // Clear the excess high bits, then force the top bit of the prime
        // itself and the bottom bit (oddness).
        if excess_bits > 0 {
            buf[0] &= 0xFFu8 >> excess_bits;
        }
        buf[0] |= 0x80u8 >> excess_bits;
        *buf.last_mut().unwrap() |= 1;

        let candidate = BigUint::from_bytes_be(&buf);
        if is_probable_prime(&candidate) {
            return candidate;
        }
    }
}

fn is_probable_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }
    if *n == two {
        return true;
    }
    if n.is_even() {
        return false;
    }

    for &p in SMALL_PRIMES {
        let p = BigUint::from(p);
        if *n == p {
            return true;
        }
        if n.is_multiple_of(&p) {
            return false;
        }
    }

    miller_rabin(n, MILLER_RABIN_ROUNDS)
}

/// Miller–Rabin primality test with `rounds` independently sampled witnesses.
fn miller_rabin(n: &BigUint, rounds: u32) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2u32);
    let n_minus_one = n - &one;

    // Write n - 1 = d * 2^r with d odd.
    let mut d = n_minus_one.clone();
    let mut r: u32 = 0;
    while d.is_even() {
        d /= &two;
        r += 1;
    }

    'witness: for _ in 0..rounds {
        // Witnesses are sampled uniformly in [2, n - 2].
        let range = &n_minus_one - &two;
        let a = &two + uniform_below(&range);

        let mut x = a.modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }

        for _ in 0..r.saturating_sub(1) {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifies_small_primes_and_composites() {
        assert!(is_probable_prime(&BigUint::from(2u32)));
        assert!(is_probable_prime(&BigUint::from(3u32)));
        assert!(is_probable_prime(&BigUint::from(97u32)));
        assert!(!is_probable_prime(&BigUint::from(1u32)));
        assert!(!is_probable_prime(&BigUint::from(91u32))); // 7 * 13
        assert!(!is_probable_prime(&BigUint::from(100u32)));
    }

    #[test]
    fn random_prime_has_requested_bit_length() {
        let p = random_prime(64);
        assert_eq!(p.bits(), 64);
        assert!(is_probable_prime(&p));
    }

    #[test]
    fn uniform_below_stays_in_range() {
        let bound = BigUint::from(1000u32);
        for _ in 0..100 {
            let v = uniform_below(&bound);
            assert!(v < bound);
        }
    }
}
