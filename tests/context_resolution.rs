//! Closed-world context resolution for the signature suite.

use schnorr_key::context::{
    DID_V1_CONTEXT, SCHNORR_2019_CONTEXT, SECURITY_V1_CONTEXT, SECURITY_V2_CONTEXT,
    W3ID_DID_V1_CONTEXT,
};
use schnorr_key::error::Err;
use schnorr_key::{ContextResolver, EXAMPLE_DID};

#[test]
fn security_v2_resolves() {
    let resolver = ContextResolver::new();
    let resolved = resolver.resolve("https://w3id.org/security/v2").expect("failed to resolve");

    assert_eq!(resolved.context_url, None);
    assert_eq!(resolved.document_url, SECURITY_V2_CONTEXT);
    assert!(resolved.document["@context"].is_array());
}

#[test]
fn suite_context_defines_the_key_type() {
    let resolver = ContextResolver::new();
    let resolved = resolver.resolve(SCHNORR_2019_CONTEXT).expect("failed to resolve");

    assert!(resolved.document["@context"]
        .get("SchnorrSecp256k1VerificationKey2019")
        .is_some());
}

#[test]
fn did_contexts_share_a_document() {
    let resolver = ContextResolver::new();
    let canonical = resolver.resolve(DID_V1_CONTEXT).expect("failed to resolve");
    let legacy = resolver.resolve(W3ID_DID_V1_CONTEXT).expect("failed to resolve");

    assert_eq!(canonical.document, legacy.document);
    assert_ne!(canonical.document_url, legacy.document_url);
}

#[test]
fn security_v1_resolves() {
    let resolver = ContextResolver::new();
    let resolved = resolver.resolve(SECURITY_V1_CONTEXT).expect("failed to resolve");
    assert!(resolved.document["@context"].is_object());
}

#[test]
fn example_did_ignores_fragment() {
    let resolver = ContextResolver::new();

    let with_fragment = resolver.resolve("did:example:123#key-1").expect("failed to resolve");
    assert_eq!(with_fragment.document["id"], EXAMPLE_DID);
    assert_eq!(
        with_fragment.document["verificationMethod"][0]["type"],
        "SchnorrSecp256k1VerificationKey2019"
    );

    let bare = resolver.resolve(EXAMPLE_DID).expect("failed to resolve");
    assert_eq!(bare.document, with_fragment.document);
}

#[test]
fn unknown_urls_are_refused() {
    let resolver = ContextResolver::new();

    for url in [
        "https://unknown.example/ctx",
        "https://www.w3.org/2018/credentials/v1",
        "did:example:456#key-1",
        "",
    ] {
        let err = resolver.resolve(url).expect_err("expected error");
        assert!(err.is(Err::UnsupportedContext), "expected closed-world failure for {url}");
    }
}
