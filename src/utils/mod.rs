//! Stateless helpers shared by the rest of the crate: factorial and
//! triple-exponentiation for the Damgård–Jurik recovery loop in
//! [`crate::puzzle`], and the seeded keystream / bit-selection primitives
//! that realize the Fiat–Shamir transform in [`crate::proofs`].

mod error;

pub use error::UtilsError;

use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use num_bigint::BigUint;
use num_traits::One;
use sha2::{Digest, Sha256};

type Aes128Ctr = Ctr128BE<Aes128>;

/// Computes `x!`.
///
/// The reference implementation computes this recursively; it is rewritten
/// here as an iterative loop since `x` is an ordinary stack frame in a
/// systems language and unbounded recursion is worth avoiding even though
/// `x` is always small in practice (bounded by `y`).
pub fn factorial(x: u64) -> BigUint {
    let mut acc = BigUint::one();
    for i in 1..=x {
        acc *= i;
    }
    acc
}

/// Computes `(n^(x - 1), n^x, n^(x + 1))` in one pass.
///
/// The caller must ensure `x >= 1`.
pub fn exponentiate(n: &BigUint, x: usize) -> (BigUint, BigUint, BigUint) {
    assert!(x >= 1, "exponentiate requires x >= 1");
    let n_x_minus_one = n.pow((x - 1) as u32);
    let n_x = &n_x_minus_one * n;
    let n_x_plus_one = &n_x * n;
    (n_x_minus_one, n_x, n_x_plus_one)
}

/// Derives a deterministic keystream of exactly `ceil(bits / 8)` bytes from
/// `seed`, with the high bits of the first byte masked to `bits` significant
/// bits.
///
/// Construction: `key = SHA-256(seed)`, truncated to its first 16 bytes;
/// `cipher = AES-128-CTR(key, iv = 0^128)`; output is the raw keystream
/// (XORing a zero buffer with a keystream is the keystream itself). This
/// must stay bit-for-bit reproducible across implementations since the
/// range proof's verifier re-derives it independently — see
/// [`crate::proofs`].
pub fn generate_random_bytes_seeded(seed: &[u8], bits: usize) -> Result<Vec<u8>, UtilsError> {
    let digest = Sha256::digest(seed);
    let key: [u8; 16] = digest[..16]
        .try_into()
        .map_err(|_| UtilsError::InitializeAes)?;
    let iv = [0u8; 16];

    let mut cipher = Aes128Ctr::new(&key.into(), &iv.into());

    let num_bytes = (bits + 7) / 8;
    let mut buf = vec![0u8; num_bytes];
    cipher.apply_keystream(&mut buf);

    let remainder = bits % 8;
    if remainder != 0 && !buf.is_empty() {
        let mask = (1u16 << remainder) - 1;
        buf[0] &= mask as u8;
    }

    Ok(buf)
}

/// Returns bit `i` of `buf`, interpreted as a little-endian-within-byte
/// stream: `selector = i / 8`, `bit = (buf[selector] >> (i % 8)) & 1`.
pub fn bytes_to_bit(buf: &[u8], i: usize) -> u8 {
    let selector = i / 8;
    (buf[selector] >> (i % 8)) & 1
}
