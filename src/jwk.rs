//! Key material types: a simplified JSON Web Key and the signature algorithm supported by this
//! suite, plus RFC 7638 key thumbprints.

use base64ct::{Base64UrlUnpadded, Encoding};
use olpc_cjson::CanonicalFormatter;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{error::Err, tracerr, Result};

/// Simplified JSON Web Key (JWK) key structure.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Jwk {
    /// Key type.
    pub kty: String,
    /// Cryptographic curve type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    /// X coordinate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// Y coordinate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    /// Secret key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    /// Key identifier label. Never participates in the thumbprint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

/// Required JWK members for an EC key thumbprint, in the canonical member set mandated by
/// RFC 7638 §3.2.
#[derive(Serialize)]
struct ThumbprintMembers<'a> {
    crv: &'a str,
    kty: &'a str,
    x: &'a str,
    y: &'a str,
}

impl Jwk {
    /// Attempt to match the key parameters to the algorithm supported by this suite.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidKey` - The key structure cannot be interpreted to a supported format.
    pub fn infer_algorithm(&self) -> Result<Algorithm> {
        match (self.kty.as_str(), self.crv.as_deref()) {
            ("EC", Some("secp256k1")) => Ok(Algorithm::Schnorr),
            _ => tracerr!(Err::InvalidKey, "Unknown key type and curve combination"),
        }
    }

    /// Compute the RFC 7638 thumbprint of the key: the required members only (`crv`, `kty`, `x`,
    /// `y`), serialized to canonical JSON, hashed with SHA-256 and base64url-encoded. Optional
    /// members such as `kid` and the private `d` member are excluded by construction, so the
    /// thumbprint depends on the public key alone.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidKey` - The key is not a supported EC key or is missing a coordinate.
    /// * `Err::SerializationError` - The canonical form could not be serialized.
    pub fn thumbprint(&self) -> Result<String> {
        self.infer_algorithm()?;
        let (Some(crv), Some(x), Some(y)) = (&self.crv, &self.x, &self.y) else {
            tracerr!(Err::InvalidKey, "Missing EC coordinate for thumbprint");
        };
        let members = ThumbprintMembers {
            crv,
            kty: &self.kty,
            x,
            y,
        };

        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, CanonicalFormatter::new());
        if let Err(e) = members.serialize(&mut ser) {
            tracerr!(Err::SerializationError, "failed to serialize thumbprint members: {}", e);
        }
        let digest: [u8; 32] = Sha256::digest(&buf).into();
        Ok(Base64UrlUnpadded::encode_string(&digest))
    }
}

/// Types of key signature algorithm supported by this suite.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Algorithm {
    /// BIP340 Schnorr over the secp256k1 curve.
    Schnorr,
}

/// JWS `alg` label for the signature algorithm.
impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Schnorr => write!(f, "SchnorrES256K"),
        }
    }
}

impl Algorithm {
    /// Get the verification method type for the key signature type.
    #[must_use]
    pub fn cryptosuite(&self) -> String {
        match self {
            Algorithm::Schnorr => "SchnorrSecp256k1VerificationKey2019".to_string(),
        }
    }
}
