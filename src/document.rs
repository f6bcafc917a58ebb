//! Verification methods allow public keys to be associated with a DID.

use serde::{Deserialize, Serialize};

use crate::jwk::Jwk;

/// A public-key descriptor as embedded in a DID document or emitted to linked-data proof
/// consumers. The value must be a string that conforms to DID URL syntax.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerificationMethod {
    /// Identifier for the verification method.
    pub id: String,
    /// The type of verification method. One that is registered in a DID specification registry.
    /// <https://www.w3.org/TR/did-spec-registries/>
    #[serde(rename = "type")]
    pub type_: String,
    /// Identifier for the controller of the verification method. A DID. Omitted when the key has
    /// no controller set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
    /// The public key material of the verification method, if applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_jwk: Option<Jwk>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_did_registry_terms() {
        let vm = VerificationMethod {
            id: "did:example:123#key-1".to_string(),
            type_: "SchnorrSecp256k1VerificationKey2019".to_string(),
            controller: Some("did:example:123".to_string()),
            public_key_jwk: Some(Jwk {
                kty: "EC".to_string(),
                crv: Some("secp256k1".to_string()),
                x: Some("XFl4fd9n4qp2Gcc2_oqqUsI3uT63o3Jt0f54DiNOijw".to_string()),
                y: Some("IH_q19UKDu_jkIwtehWU7NiaXk7CaGoD-XRcuuqcgQ0".to_string()),
                ..Jwk::default()
            }),
        };

        let json = serde_json::to_value(&vm).expect("failed to serialize");
        assert_eq!(json["type"], "SchnorrSecp256k1VerificationKey2019");
        assert_eq!(json["publicKeyJwk"]["crv"], "secp256k1");
        assert!(json.get("publicKeyMultibase").is_none());
    }
}
