//! Signature header parsing.

use std::fmt;

use crate::error::VerifyError;

/// Hash algorithms accepted in the signature header prefix.
///
/// The set is closed: a prefix outside it is rejected with
/// [`VerifyError::UnsupportedAlgorithm`] rather than falling back to a
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl Algorithm {
    /// Resolves a header prefix to an algorithm. Matching is
    /// case-sensitive.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "sha1" => Some(Algorithm::Sha1),
            "sha256" => Some(Algorithm::Sha256),
            "sha512" => Some(Algorithm::Sha512),
            _ => None,
        }
    }

    /// The header prefix naming this algorithm.
    pub fn prefix(&self) -> &'static str {
        match self {
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
        }
    }

    /// Output size of the underlying hash function in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            Algorithm::Sha1 => 20,
            Algorithm::Sha256 => 32,
            Algorithm::Sha512 => 64,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A parsed signature header: the negotiated algorithm and the decoded
/// raw bytes of the MAC the sender claims to have computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSignature {
    pub algorithm: Algorithm,
    pub digest: Vec<u8>,
}

/// Parses a signature header of the form `<algorithm>=<hex-digest>`.
///
/// Splits on the first `=` only, so digests containing `=` padding would
/// still reach the hex decoder intact. No case or whitespace
/// normalization is applied.
pub fn parse_signature(header: &str) -> Result<ParsedSignature, VerifyError> {
    if header.is_empty() {
        return Err(VerifyError::MissingSignature);
    }

    let (prefix, hex_digest) = header.split_once('=').ok_or_else(|| {
        VerifyError::MalformedSignature(format!("no '=' separator in {header:?}"))
    })?;

    let algorithm = Algorithm::from_prefix(prefix)
        .ok_or_else(|| VerifyError::UnsupportedAlgorithm(prefix.to_string()))?;

    let digest = hex::decode(hex_digest)
        .map_err(|e| VerifyError::MalformedSignature(format!("invalid hex digest: {e}")))?;

    Ok(ParsedSignature { algorithm, digest })
}
