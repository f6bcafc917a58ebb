//! Detached JWS signing and verification over BIP340 Schnorr signatures.
//!
//! The wire format is the detached shape `<base64url(header)>..<base64url(signature)>`: the
//! payload segment is empty and the payload bytes travel out-of-band. The protected header
//! declares the unencoded-payload convention of RFC 7797 (`b64: false`, `crit: ["b64"]`), so the
//! signing input is `base64url(header) || '.' || payload` with the payload bytes used as-is.

use base64ct::{Base64UrlUnpadded, Encoding};
use ecdsa::signature::{Signer, Verifier};
use k256::schnorr::{Signature, SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::jwk::{Algorithm, Jwk};
use crate::{error::Err, tracerr, Result};

/// Expected number of members in the protected header: `alg`, `b64` and `crit`.
const HEADER_MEMBERS: usize = 3;

/// Protected header of a detached JWS produced by this suite.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Header {
    /// Signature algorithm label.
    pub alg: String,
    /// Whether the payload segment is base64url-encoded. Always `false` for this suite: the
    /// payload is detached and signed unencoded.
    pub b64: bool,
    /// Header extensions the verifier must understand. Always exactly `["b64"]`.
    pub crit: Vec<String>,
}

impl Header {
    /// The fixed header attached to every signature produced by this suite.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            alg: Algorithm::Schnorr.to_string(),
            b64: false,
            crit: vec!["b64".to_string()],
        }
    }

    /// Validate a decoded protected header against the parameters this suite requires.
    ///
    /// The header must carry `alg: "SchnorrES256K"`, `b64: false` and `crit: ["b64"]`, and
    /// nothing else. The member-count check rejects headers that smuggle extra protected claims
    /// past a verifier that would not act on them.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidHeaderParameters` - One of the required parameters is missing or wrong, or
    ///   the header carries unexpected members.
    pub fn from_protected(protected: &Map<String, Value>) -> Result<Self> {
        let suite = Algorithm::Schnorr.cryptosuite();
        let alg = Algorithm::Schnorr.to_string();
        if protected.get("alg") != Some(&Value::String(alg.clone())) {
            tracerr!(
                Err::InvalidHeaderParameters,
                "Invalid JWS header for {}: alg is not {}",
                suite,
                alg
            );
        }
        if protected.get("b64") != Some(&Value::Bool(false)) {
            tracerr!(
                Err::InvalidHeaderParameters,
                "Invalid JWS header for {}: b64 is not false",
                suite
            );
        }
        if protected.get("crit") != Some(&Value::Array(vec![Value::String("b64".to_string())])) {
            tracerr!(
                Err::InvalidHeaderParameters,
                "Invalid JWS header for {}: crit is not [\"b64\"]",
                suite
            );
        }
        if protected.len() != HEADER_MEMBERS {
            tracerr!(
                Err::InvalidHeaderParameters,
                "Invalid JWS header for {}: unexpected header members",
                suite
            );
        }
        Ok(Self::detached())
    }
}

/// Sign a detached payload.
///
/// Builds the RFC 7797 signing input from the protected header and the raw payload bytes, signs
/// it with the secret key's BIP340 Schnorr key, and returns the detached JWS string.
///
/// # Arguments
///
/// * `payload` - The payload bytes to sign, exactly as supplied.
/// * `secret` - JWK holding the private `d` member.
/// * `header` - The protected header to attach.
///
/// # Errors
///
/// * `Err::InvalidKey` - The secret key is missing `d` or `d` is not a valid scalar.
/// * `Err::SerializationError` - The header could not be serialized.
/// * `Err::SigningError` - The signing operation itself failed.
pub fn sign_detached(payload: &[u8], secret: &Jwk, header: &Header) -> Result<String> {
    let hdr_b = match serde_json::to_vec(header) {
        Ok(b) => b,
        Err(e) => {
            tracerr!(Err::SerializationError, "failed to serialize header: {}", e);
        }
    };
    let hdr_64 = Base64UrlUnpadded::encode_string(&hdr_b);
    let signing_input = [hdr_64.as_bytes(), b".", payload].concat();

    let sk = signing_key(secret)?;
    let sig: Signature = match sk.try_sign(&signing_input) {
        Ok(sig) => sig,
        Err(e) => {
            tracerr!(Err::SigningError, "failed to sign payload: {}", e);
        }
    };
    let sig_64 = Base64UrlUnpadded::encode_string(&sig.to_bytes());

    Ok(format!("{hdr_64}..{sig_64}"))
}

/// Verify a detached JWS against the supplied payload bytes.
///
/// The signing input is rebuilt from the header segment exactly as transmitted, so any
/// tampering with header, payload or signature fails verification. Header parameter checks are
/// the caller's concern; this function only answers whether the signature is cryptographically
/// valid for the payload and key.
///
/// # Errors
///
/// * `Err::FailedSignatureVerification` - The JWS is malformed or the signature does not match.
/// * `Err::InvalidKey` - The public key is missing `x` or `x` is not a valid coordinate.
pub fn verify_detached(signature: &str, payload: &[u8], public: &Jwk) -> Result<()> {
    let Some((hdr_64, sig_64)) = signature.split_once("..") else {
        tracerr!(Err::FailedSignatureVerification, "missing detached payload delimiter");
    };
    let sig_b = match Base64UrlUnpadded::decode_vec(sig_64) {
        Ok(b) => b,
        Err(e) => {
            tracerr!(Err::FailedSignatureVerification, "invalid signature encoding: {}", e);
        }
    };
    let sig = match Signature::try_from(sig_b.as_slice()) {
        Ok(sig) => sig,
        Err(e) => {
            tracerr!(Err::FailedSignatureVerification, "invalid signature bytes: {}", e);
        }
    };

    let signing_input = [hdr_64.as_bytes(), b".", payload].concat();
    let vk = verifying_key(public)?;
    match vk.verify(&signing_input, &sig) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracerr!(Err::FailedSignatureVerification, "Error verifying signature: {}", e)
        }
    }
}

/// Decode the private `d` member into a Schnorr signing key.
fn signing_key(secret: &Jwk) -> Result<SigningKey> {
    secret.infer_algorithm()?;
    let Some(d) = &secret.d else {
        tracerr!(Err::InvalidKey, "Missing secret key member");
    };
    let d_b = match Base64UrlUnpadded::decode_vec(d) {
        Ok(b) => b,
        Err(e) => {
            tracerr!(Err::InvalidKey, "Invalid secret key encoding: {}", e);
        }
    };
    match SigningKey::from_bytes(&d_b) {
        Ok(sk) => Ok(sk),
        Err(e) => {
            tracerr!(Err::InvalidKey, "Invalid secret key: {}", e)
        }
    }
}

/// Decode the `x` coordinate into an x-only Schnorr verifying key.
///
/// BIP340 keys are x-only: the `y` member does not participate. Signing keys with an odd-parity
/// point are normalized by the signer, so verification against the x coordinate is consistent
/// for either parity.
fn verifying_key(public: &Jwk) -> Result<VerifyingKey> {
    public.infer_algorithm()?;
    let Some(x) = &public.x else {
        tracerr!(Err::InvalidKey, "Missing x coordinate");
    };
    let x_b = match Base64UrlUnpadded::decode_vec(x) {
        Ok(b) => b,
        Err(e) => {
            tracerr!(Err::InvalidKey, "Invalid x coordinate encoding: {}", e);
        }
    };
    if x_b.len() != 32 {
        tracerr!(
            Err::InvalidKey,
            "Invalid x coordinate length. Expected 32 bytes, got {}",
            x_b.len()
        );
    }
    match VerifyingKey::from_bytes(&x_b) {
        Ok(vk) => Ok(vk),
        Err(e) => {
            tracerr!(Err::InvalidKey, "Invalid x coordinate: {}", e)
        }
    }
}
