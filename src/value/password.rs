//! Password scrambling for the three authentication plugins this driver
//! speaks (spec §4.1). `mysql_native_password` and `caching_sha2_password`
//! (fast-auth path) both reduce to "XOR the password hash with a hash of
//! the server nonce"; only the digest differs. `old_password` predates
//! both and uses an unrelated, non-cryptographic bit-mixing hash, ported
//! from the reference client rather than derived from either digest.

use digest::Digest;
use sha1::Sha1;
use sha2::Sha256;

fn xor_eq(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

/// `mysql_native_password`: `SHA1(password) XOR SHA1(seed + SHA1(SHA1(password)))`.
///
/// https://mariadb.com/kb/en/connection/#mysql_native_password-plugin
pub fn scramble_native(password: &str, seed: &[u8]) -> [u8; 20] {
    let seed = trim_nul(seed);

    let mut hasher = Sha1::new();
    hasher.update(password.as_bytes());
    let pw_hash = hasher.finalize_reset();

    hasher.update(pw_hash);
    let pw_hash_hash = hasher.finalize_reset();

    hasher.update(seed);
    hasher.update(pw_hash_hash);
    let pw_seed_hash_hash = hasher.finalize();

    let mut out = [0u8; 20];
    out.copy_from_slice(&pw_hash);
    xor_eq(&mut out, &pw_seed_hash_hash);
    out
}

/// `caching_sha2_password` fast-auth response:
/// `SHA256(password) XOR SHA256(seed + SHA256(SHA256(password)))`.
///
/// https://mariadb.com/kb/en/caching_sha2_password-authentication-plugin/#sha-2-encrypted-password
pub fn scramble_caching_sha2(password: &str, seed: &[u8]) -> [u8; 32] {
    let seed = trim_nul(seed);

    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let pw_hash = hasher.finalize_reset();

    hasher.update(pw_hash);
    let pw_hash_hash = hasher.finalize_reset();

    hasher.update(seed);
    hasher.update(pw_hash_hash);
    let pw_seed_hash_hash = hasher.finalize();

    let mut out = [0u8; 32];
    out.copy_from_slice(&pw_hash);
    xor_eq(&mut out, &pw_seed_hash_hash);
    out
}

/// The `caching_sha2_password` nonce is (optionally) NUL-terminated.
fn trim_nul(seed: &[u8]) -> &[u8] {
    match memchr::memchr(0, seed) {
        Some(end) => &seed[..end],
        None => seed,
    }
}

/// Legacy `old_password` (pre-4.1) hash. A non-cryptographic 64-bit
/// bit-mixing algorithm predating SHA — present only so a server that
/// downgrades an `AuthSwitchRequest` to it can still be satisfied.
pub fn scramble_old_password(password: &str, seed: &[u8]) -> [u8; 8] {
    let (hash_pass_n1, hash_pass_n2) = hash_password(password);
    let (seed_hash_n1, seed_hash_n2) = hash_password(std::str::from_utf8(seed).unwrap_or(""));

    let mut seed1: u32 = seed_hash_n1 ^ hash_pass_n1;
    let mut seed2: u32 = seed_hash_n2 ^ hash_pass_n2;

    let mut out = [0u8; 8];
    for byte in out.iter_mut() {
        seed1 = seed1
            .wrapping_mul(3)
            .wrapping_add(seed2)
            .wrapping_rem(0x3FFFFFFF.max(1));
        seed2 = seed1
            .wrapping_add(seed2)
            .wrapping_add(33)
            .wrapping_rem(0x3FFFFFFF.max(1));
        *byte = (((seed1 as f64) / (0x3FFFFFFFu32 as f64)) * 31.0) as u8 + 64;
    }

    out
}

/// Port of `mysql_hash_password`: folds a password into two 32-bit words
/// using the classic MySQL bit-rotation mixing function.
fn hash_password(password: &str) -> (u32, u32) {
    let (mut nr, mut add) = (1345345333u32, 7u32);
    let mut nr2 = 0x12345671u32;

    for &byte in password.as_bytes() {
        if byte == b' ' || byte == b'\t' {
            continue;
        }

        let tmp = byte as u32;
        nr ^= (((nr & 63).wrapping_add(add)).wrapping_mul(tmp)).wrapping_add(nr << 8);
        nr2 = nr2.wrapping_add((nr2 << 8) ^ nr);
        add = add.wrapping_add(tmp);
    }

    (nr & 0x7FFFFFFF, nr2 & 0x7FFFFFFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_scramble_is_deterministic_and_nonce_sensitive() {
        let seed_a = b"01234567890123456789";
        let seed_b = b"abcdefghijklmnopqrst";

        let scrambled_a = scramble_native("hunter2", seed_a);
        let scrambled_a_again = scramble_native("hunter2", seed_a);
        let scrambled_b = scramble_native("hunter2", seed_b);

        assert_eq!(scrambled_a, scrambled_a_again);
        assert_ne!(scrambled_a, scrambled_b);
    }

    #[test]
    fn caching_sha2_scramble_is_deterministic_and_nonce_sensitive() {
        let seed_a = b"01234567890123456789";
        let seed_b = b"abcdefghijklmnopqrst";

        let scrambled_a = scramble_caching_sha2("hunter2", seed_a);
        let scrambled_a_again = scramble_caching_sha2("hunter2", seed_a);
        let scrambled_b = scramble_caching_sha2("hunter2", seed_b);

        assert_eq!(scrambled_a, scrambled_a_again);
        assert_ne!(scrambled_a, scrambled_b);
    }

    #[test]
    fn old_password_scramble_is_stable() {
        let a = scramble_old_password("hunter2", b"01234567");
        let b = scramble_old_password("hunter2", b"01234567");
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }
}
