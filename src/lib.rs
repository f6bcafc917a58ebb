//! # Schnorr secp256k1 Verification Key
//!
//! A verification-key abstraction for a Schnorr-over-secp256k1 signature suite, for use in DID
//! documents and linked-data proof verification.
//!
//! Two loosely related components:
//!
//! * [`VerificationKey`] - a secp256k1 key pair in JWK form. Produces signer and verifier
//!   objects bound to the key material, computes RFC 7638 key fingerprints, and emits the
//!   public-key descriptor embedded in DID documents. Signatures use the detached-JWS
//!   convention (`b64: false`, `crit: ["b64"]`) with the payload carried out-of-band.
//! * [`ContextResolver`] - a static, closed-world lookup serving the JSON-LD contexts the suite
//!   references, for injection into a linked-data proof engine's document loader.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod context;
pub(crate) mod document;
pub mod error;
pub(crate) mod jwk;
pub mod jws;
pub mod test_utils;
pub(crate) mod verification_key;

pub use context::{ContextResolver, ResolvedDocument, EXAMPLE_DID, SCHNORR_2019_CONTEXT};
pub use document::VerificationMethod;
pub use jwk::{Algorithm, Jwk};
pub use verification_key::{KeyOptions, Signer, VerificationKey, Verifier};

/// Result type for the verification key suite.
pub type Result<T, E = error::Error> = core::result::Result<T, E>;
