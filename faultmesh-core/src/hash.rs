//! MD5-based primitives shared by the checksum (answer-set alias naming)
//! and the keyed shard-selection hash (simple-signature sharder).
//!
//! **Exactly one place computes these encodings.** Reimplementations must
//! match byte-for-byte or previously provisioned zones drift (see the
//! design notes on checksum stability).

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

/// MD5 digest of `data`.
#[must_use]
pub fn md5_digest(data: &[u8]) -> [u8; 16] {
    md5::compute(data).0
}

/// Interpret an MD5 digest as a signed big-endian big integer and render
/// it in lowercase base 36.
///
/// This is the exact encoding the answer-set checksum relies on: the
/// digest bytes are read as a two's-complement signed integer (so digests
/// with a high bit set produce a negative value and a leading `-`), then
/// rendered the way `BigInteger(bytes).toString(36)` would.
#[must_use]
pub fn checksum_base36(data: &[u8]) -> String {
    let digest = md5_digest(data);
    let n = BigInt::from_signed_bytes_be(&digest);
    bigint_to_base36(&n)
}

fn bigint_to_base36(n: &BigInt) -> String {
    if n.is_zero() {
        return "0".to_string();
    }
    let (sign, magnitude) = n.clone().into_parts();
    let radix = BigUint::from(36u32);
    let mut digits = Vec::new();
    let mut remaining = magnitude;
    while !remaining.is_zero() {
        let rem = &remaining % &radix;
        let digit = rem.to_u32_digits().first().copied().unwrap_or(0);
        digits.push(std::char::from_digit(digit, 36).expect("remainder is < 36"));
        remaining /= &radix;
    }
    if digits.is_empty() {
        digits.push('0');
    }
    let mut rendered: String = digits.into_iter().rev().collect();
    if sign == Sign::Minus {
        rendered.insert(0, '-');
    }
    rendered
}

/// Hash `data` with MD5, interpret the digest as a non-negative big-endian
/// integer, and reduce it modulo `modulus`.
///
/// Used by the simple-signature sharder's salted index selection. Unlike
/// [`checksum_base36`] the digest is treated as unsigned here: the sharder
/// only ever needs an index in `0..modulus`, never a signed value.
///
/// # Panics
///
/// Panics if `modulus` is zero; callers must never invoke this over an
/// empty cell.
#[must_use]
pub fn digest_mod(data: &[u8], modulus: u64) -> u64 {
    assert!(modulus != 0, "digest_mod called with zero modulus");
    let digest = md5_digest(data);
    let n = BigUint::from_bytes_be(&digest);
    let m = BigUint::from(modulus);
    let r = &n % &m;
    r.to_u64_digits().first().copied().unwrap_or(0)
}
