//! The Schnorr secp256k1 verification key: construction from JWK material, key fingerprints, and
//! the signer/verifier factories used by linked-data-signature engines.

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};

use crate::document::VerificationMethod;
use crate::jwk::{Algorithm, Jwk};
use crate::jws::{self, Header};
use crate::{error::Err, tracerr, Result};

/// Options for constructing a [`VerificationKey`].
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyOptions {
    /// Verification method identifier. Defaults to `{controller}#{fingerprint}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The identity (e.g. a DID) that owns this key.
    pub controller: String,
    /// Public key material. Derived from the private key when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_jwk: Option<Jwk>,
    /// Private key material. Absent for public-only keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key_jwk: Option<Jwk>,
}

/// A secp256k1 key pair in JWK form, bound to a controller. Immutable in intended use: the `id`
/// is fixed at construction and the key material is not expected to change afterwards.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationKey {
    /// Verification method identifier.
    pub id: String,
    /// Verification method type.
    #[serde(rename = "type")]
    pub type_: String,
    /// The identity that owns this key.
    pub controller: String,
    /// Public key material. Never contains the private `d` member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_jwk: Option<Jwk>,
    /// Private key material, when the key can sign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key_jwk: Option<Jwk>,
}

impl VerificationKey {
    /// Construct a verification key from JWK material.
    ///
    /// When only private material is supplied the public half is derived by removing the private
    /// `d` member. When no explicit `id` is supplied it defaults to
    /// `{controller}#{fingerprint}` and is fixed for the lifetime of the key.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidKey` - Neither public nor private key material was supplied, or the public
    ///   material is unusable for fingerprinting when an `id` must be derived.
    pub fn new(options: KeyOptions) -> Result<Self> {
        let private_key_jwk = options.private_key_jwk;
        let public_key_jwk = match options.public_key_jwk {
            Some(mut public) => {
                // a public half must never carry the private member
                public.d = None;
                Some(public)
            }
            None => private_key_jwk.as_ref().map(|private| Jwk {
                d: None,
                ..private.clone()
            }),
        };
        if public_key_jwk.is_none() && private_key_jwk.is_none() {
            tracerr!(Err::InvalidKey, "Missing public and private key material");
        }

        let id = match options.id {
            Some(id) => id,
            None => {
                let Some(public) = &public_key_jwk else {
                    tracerr!(Err::InvalidKey, "Cannot derive id without public key material");
                };
                format!("{}#{}", options.controller, Self::fingerprint_from_public_key(public)?)
            }
        };

        Ok(Self {
            id,
            type_: Algorithm::Schnorr.cryptosuite(),
            controller: options.controller,
            public_key_jwk,
            private_key_jwk,
        })
    }

    /// Construct a verification key from JWK material, asynchronously.
    ///
    /// Performs no I/O; this exists for symmetry with asynchronous key-import flows so callers
    /// can treat all key sources uniformly.
    ///
    /// # Errors
    ///
    /// As for [`VerificationKey::new`].
    pub async fn from_options(options: KeyOptions) -> Result<Self> {
        Self::new(options)
    }

    /// Compute the fingerprint of a public key: any `kid` label is stripped before the RFC 7638
    /// thumbprint is taken, so the result is a pure function of the public key bytes.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidKey` - The key is not a supported EC key.
    pub fn fingerprint_from_public_key(public_key_jwk: &Jwk) -> Result<String> {
        let unlabelled = Jwk {
            kid: None,
            ..public_key_jwk.clone()
        };
        unlabelled.thumbprint()
    }

    /// Compute the fingerprint of this key's public material.
    ///
    /// # Errors
    ///
    /// * `Err::NoPublicKey` - The key holds no public material.
    /// * `Err::InvalidKey` - The public material is not a supported EC key.
    pub fn fingerprint(&self) -> Result<String> {
        let Some(public) = &self.public_key_jwk else {
            tracerr!(Err::NoPublicKey, "no public key material for fingerprint");
        };
        Self::fingerprint_from_public_key(public)
    }

    /// Create a signer bound to this key's private material.
    ///
    /// Always returns a signer: when the key holds no private material the signer is returned in
    /// an unavailable state and fails with `Err::NoPrivateKey` when invoked. The deferred failure
    /// lets a public-only key be constructed and handed to a signature engine without erroring
    /// up front.
    #[must_use]
    pub fn signer(&self) -> Signer {
        match &self.private_key_jwk {
            Some(private) => Signer::Ready(private.clone()),
            None => Signer::Unavailable,
        }
    }

    /// Create a verifier bound to this key's public material. As with [`Self::signer`], a key
    /// without public material yields a verifier that fails with `Err::NoPublicKey` at call time.
    #[must_use]
    pub fn verifier(&self) -> Verifier {
        match &self.public_key_jwk {
            Some(public) => Verifier::Ready(public.clone()),
            None => Verifier::Unavailable,
        }
    }

    /// Set this key's public material on the supplied verification method node, returning the
    /// node for chaining.
    ///
    /// # Errors
    ///
    /// * `Err::NoPublicKey` - The key holds no public material.
    pub fn add_encoded_public_key(&self, mut node: VerificationMethod) -> Result<VerificationMethod> {
        let Some(public) = &self.public_key_jwk else {
            tracerr!(Err::NoPublicKey, "no public key material to encode");
        };
        node.public_key_jwk = Some(public.clone());
        Ok(node)
    }

    /// Build the minimal public-key descriptor document for this key: `id`, `type`, the
    /// controller when one is set, and the public key material.
    ///
    /// # Errors
    ///
    /// * `Err::NoPublicKey` - The key holds no public material.
    pub fn public_node(&self) -> Result<VerificationMethod> {
        let node = VerificationMethod {
            id: self.id.clone(),
            type_: self.type_.clone(),
            controller: if self.controller.is_empty() {
                None
            } else {
                Some(self.controller.clone())
            },
            public_key_jwk: None,
        };
        self.add_encoded_public_key(node)
    }
}

/// Message signer bound to one key's private material at creation time. Stateless beyond the
/// captured JWK; recreated on demand via [`VerificationKey::signer`].
#[derive(Clone, Debug)]
pub enum Signer {
    /// Private material is present and signing can proceed.
    Ready(Jwk),
    /// The key was constructed without private material; signing fails at call time.
    Unavailable,
}

impl Signer {
    /// Sign the payload bytes, exactly as supplied, and return the detached JWS.
    ///
    /// The fixed protected header `{alg: "SchnorrES256K", b64: false, crit: ["b64"]}` is always
    /// attached.
    ///
    /// # Errors
    ///
    /// * `Err::NoPrivateKey` - The signer is unavailable. The signing primitive is not invoked.
    /// * Any error raised by the signing primitive.
    pub async fn sign(&self, data: &[u8]) -> Result<String> {
        let Self::Ready(private) = self else {
            tracerr!(Err::NoPrivateKey, "No private key to sign with");
        };
        jws::sign_detached(data, private, &Header::detached())
    }
}

/// Signature verifier bound to one key's public material at creation time.
#[derive(Clone, Debug)]
pub enum Verifier {
    /// Public material is present and verification can proceed.
    Ready(Jwk),
    /// The key was constructed without public material; verification fails at call time.
    Unavailable,
}

impl Verifier {
    /// Verify a detached JWS against the payload bytes.
    ///
    /// The protected header is validated before the cryptographic primitive is consulted: it
    /// must decode to a JSON object carrying exactly the parameters of this suite. Header
    /// problems are raised as errors; a cryptographic mismatch is reported as `Ok(false)`.
    /// Callers rely on the split: `false` means a well-formed signature that does not match,
    /// while an error means the input itself is malformed.
    ///
    /// # Errors
    ///
    /// * `Err::NoPublicKey` - The verifier is unavailable.
    /// * `Err::HeaderParse` - The header segment is not valid base64url-encoded JSON.
    /// * `Err::InvalidHeaderShape` - The decoded header is not a JSON object.
    /// * `Err::InvalidHeaderParameters` - The header fails the suite's parameter checks.
    pub async fn verify(&self, data: &[u8], signature: &str) -> Result<bool> {
        let Self::Ready(public) = self else {
            tracerr!(Err::NoPublicKey, "No public key to verify with");
        };

        let encoded_header = signature.split_once("..").map_or(signature, |(hdr, _)| hdr);
        let decoded = match Base64UrlUnpadded::decode_vec(encoded_header) {
            Ok(b) => b,
            Err(e) => {
                tracerr!(Err::HeaderParse, "Could not parse JWS header: {}", e);
            }
        };
        let value: serde_json::Value = match serde_json::from_slice(&decoded) {
            Ok(v) => v,
            Err(e) => {
                tracerr!(Err::HeaderParse, "Could not parse JWS header: {}", e);
            }
        };
        let Some(protected) = value.as_object() else {
            tracerr!(Err::InvalidHeaderShape, "Invalid JWS header: not an object");
        };
        Header::from_protected(protected)?;

        // cryptographic mismatch is a result, not an error
        Ok(jws::verify_detached(signature, data, public).is_ok())
    }
}
