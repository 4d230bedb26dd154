//! Small extensions over [`num_bigint`] that the rest of the crate treats as
//! part of the `bigint` collaborator: `num-bigint` does not ship a modular
//! inverse, so one is built here on top of `num_integer`'s extended gcd, the
//! same way `modinv` is built by hand over `num-bigint` elsewhere in the
//! wider ecosystem.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Computes a modular inverse.
pub trait ModInverse {
    /// Returns `self^-1 mod modulus`, or `None` if `self` and `modulus` are
    /// not coprime.
    fn mod_inverse(&self, modulus: &BigUint) -> Option<BigUint>;
}

impl ModInverse for BigUint {
    fn mod_inverse(&self, modulus: &BigUint) -> Option<BigUint> {
        if modulus.is_zero() {
            return None;
        }

        let a = BigInt::from(self.clone());
        let m = BigInt::from(modulus.clone());

        let egcd = a.extended_gcd(&m);
        if !egcd.gcd.is_one() {
            return None;
        }

        let mut x = egcd.x % &m;
        if x.is_negative() {
            x += &m;
        }

        // x is in [0, m) and m > 0, so this conversion never fails.
        x.to_biguint()
    }
}
