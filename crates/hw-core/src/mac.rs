//! Keyed-hash computation and fixed-time verification.

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::signature::Algorithm;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Computes the HMAC of `message` under `secret` with the given algorithm.
pub fn compute_mac(algorithm: Algorithm, secret: &[u8], message: &[u8]) -> Vec<u8> {
    match algorithm {
        Algorithm::Sha1 => mac_bytes::<HmacSha1>(secret, message),
        Algorithm::Sha256 => mac_bytes::<HmacSha256>(secret, message),
        Algorithm::Sha512 => mac_bytes::<HmacSha512>(secret, message),
    }
}

/// Reports whether `expected` is a valid MAC for `message` under `secret`.
///
/// The comparison runs in constant time via [`Mac::verify_slice`]; a
/// general-purpose equality check must never be substituted here.
pub fn verify_mac(message: &[u8], expected: &[u8], algorithm: Algorithm, secret: &[u8]) -> bool {
    match algorithm {
        Algorithm::Sha1 => mac_verify::<HmacSha1>(secret, message, expected),
        Algorithm::Sha256 => mac_verify::<HmacSha256>(secret, message, expected),
        Algorithm::Sha512 => mac_verify::<HmacSha512>(secret, message, expected),
    }
}

fn mac_bytes<M: Mac + KeyInit>(secret: &[u8], message: &[u8]) -> Vec<u8> {
    let mut mac = <M as KeyInit>::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

fn mac_verify<M: Mac + KeyInit>(secret: &[u8], message: &[u8], expected: &[u8]) -> bool {
    let Ok(mut mac) = <M as KeyInit>::new_from_slice(secret) else {
        return false;
    };
    mac.update(message);
    mac.verify_slice(expected).is_ok()
}
