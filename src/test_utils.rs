//! Key material for use in tests. Key generation is deliberately not part of the public key
//! API, so test keys are minted here.

use k256::SecretKey;
use rand::rngs::OsRng;

use crate::jwk::Jwk;

// Hard-coded secp256k1 key for deterministic tests. To arrive at the values you can use:
// let sk = k256::SecretKey::random(&mut OsRng);
// println!("{}", sk.to_jwk_string());
const SIGN_KEY_JSON: &str = r#"{
    "kty": "EC",
    "crv": "secp256k1",
    "d": "CB6W6NKEuI4uiYiyM2CM4YzczOYXdx-ykAe5rlZaB-Q",
    "x": "XFl4fd9n4qp2Gcc2_oqqUsI3uT63o3Jt0f54DiNOijw",
    "y": "IH_q19UKDu_jkIwtehWU7NiaXk7CaGoD-XRcuuqcgQ0"
}"#;

/// A fresh secp256k1 key pair expressed as a JWK, private `d` member included.
///
/// # Panics
///
/// Panics if the generated key cannot be expressed as a JWK.
#[must_use]
pub fn keypair_jwk() -> Jwk {
    let secret_key = SecretKey::random(&mut OsRng);
    serde_json::from_str(&secret_key.to_jwk_string()).expect("generated JWK is valid")
}

/// The hard-coded signing key, for tests that need stable values.
///
/// # Panics
///
/// Panics if the constant JWK fails to parse, which only an edit to it can cause.
#[must_use]
pub fn sign_key_jwk() -> Jwk {
    serde_json::from_str(SIGN_KEY_JSON).expect("hard-coded JWK is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_are_complete_and_distinct() {
        let a = keypair_jwk();
        let b = keypair_jwk();

        assert_eq!(a.kty, "EC");
        assert_eq!(a.crv.as_deref(), Some("secp256k1"));
        assert!(a.d.is_some());
        assert!(a.x.is_some());
        assert!(a.y.is_some());
        assert_ne!(a.d, b.d);
    }

    #[test]
    fn sign_key_parses() {
        let key = sign_key_jwk();
        assert_eq!(key.crv.as_deref(), Some("secp256k1"));
        assert!(key.d.is_some());
    }
}
