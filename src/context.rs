//! Static JSON-LD context resolution for the signature suite.
//!
//! Linked-data proof engines resolve every `@context` URL referenced by the documents they
//! normalize. This resolver serves a fixed set of known contexts from documents embedded at
//! compile time and fails closed for anything else: no network fallback, no wildcarding. One
//! example DID is also resolved, ignoring any fragment, so proof fixtures can reference a
//! verification method without a live DID resolver.

use std::collections::HashMap;

use serde_json::Value;

use crate::{error::Err, tracerr, Result};

/// The DID core context. <https://www.w3.org/TR/did-core/#context>
pub const DID_V1_CONTEXT: &str = "https://www.w3.org/ns/did/v1";
/// Legacy w3id alias of the DID core context.
pub const W3ID_DID_V1_CONTEXT: &str = "https://w3id.org/did/v1";
/// Security vocabulary, version 1.
pub const SECURITY_V1_CONTEXT: &str = "https://w3id.org/security/v1";
/// Security vocabulary, version 2.
pub const SECURITY_V2_CONTEXT: &str = "https://w3id.org/security/v2";
/// Context for the Schnorr secp256k1 2019 signature suite.
pub const SCHNORR_2019_CONTEXT: &str =
    "https://w3id.org/security/suites/schnorr-secp256k1-2019/v1";
/// The one DID this resolver answers for, fragment or not.
pub const EXAMPLE_DID: &str = "did:example:123";

const DID_V1: &str = include_str!("../contexts/did-v1.jsonld");
const SECURITY_V1: &str = include_str!("../contexts/security-v1.jsonld");
const SECURITY_V2: &str = include_str!("../contexts/security-v2.jsonld");
const SCHNORR_2019: &str = include_str!("../contexts/schnorr-secp256k1-2019-v1.jsonld");
const EXAMPLE_DID_DOC: &str = include_str!("../contexts/did-example-123.json");

/// A resolved document in the shape document loaders hand to JSON-LD processors.
#[derive(Clone, Debug)]
pub struct ResolvedDocument {
    /// Context URL for indirection. Always `None`: documents are served directly.
    pub context_url: Option<String>,
    /// The pre-loaded document.
    pub document: Value,
    /// The URL the document was resolved for.
    pub document_url: String,
}

/// Closed-world context resolver. The table is built once at construction and read-only
/// thereafter; construct one per engine rather than reaching for ambient global state so tests
/// can substitute alternate tables.
#[derive(Clone, Debug)]
pub struct ContextResolver {
    contexts: HashMap<&'static str, Value>,
    example_did_doc: Value,
}

impl ContextResolver {
    /// Build the resolver with the suite's static context table.
    ///
    /// # Panics
    ///
    /// Panics if an embedded context document is not valid JSON, which only a build defect can
    /// cause.
    #[must_use]
    pub fn new() -> Self {
        let did_v1: Value = serde_json::from_str(DID_V1).expect("embedded context is valid JSON");
        let contexts = HashMap::from([
            (DID_V1_CONTEXT, did_v1.clone()),
            (W3ID_DID_V1_CONTEXT, did_v1),
            (
                SECURITY_V1_CONTEXT,
                serde_json::from_str(SECURITY_V1).expect("embedded context is valid JSON"),
            ),
            (
                SECURITY_V2_CONTEXT,
                serde_json::from_str(SECURITY_V2).expect("embedded context is valid JSON"),
            ),
            (
                SCHNORR_2019_CONTEXT,
                serde_json::from_str(SCHNORR_2019).expect("embedded context is valid JSON"),
            ),
        ]);

        Self {
            contexts,
            example_did_doc: serde_json::from_str(EXAMPLE_DID_DOC)
                .expect("embedded document is valid JSON"),
        }
    }

    /// Resolve a context URL against the static table.
    ///
    /// Exact string match against the known context URLs first; failing that, a URL whose
    /// portion before any `#` fragment equals the example DID resolves to the example DID
    /// document.
    ///
    /// # Errors
    ///
    /// * `Err::UnsupportedContext` - The URL is outside the static table.
    pub fn resolve(&self, url: &str) -> Result<ResolvedDocument> {
        if let Some(document) = self.contexts.get(url) {
            return Ok(ResolvedDocument {
                context_url: None,
                document: document.clone(),
                document_url: url.to_string(),
            });
        }

        let without_fragment = url.split('#').next().unwrap_or(url);
        if without_fragment == EXAMPLE_DID {
            return Ok(ResolvedDocument {
                context_url: None,
                document: self.example_did_doc.clone(),
                document_url: url.to_string(),
            });
        }

        tracerr!(Err::UnsupportedContext, "no custom context support for {}", url);
    }
}

impl Default for ContextResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_context_resolves() {
        let resolver = ContextResolver::new();
        let resolved = resolver.resolve(SECURITY_V2_CONTEXT).expect("failed to resolve");

        assert_eq!(resolved.context_url, None);
        assert_eq!(resolved.document_url, SECURITY_V2_CONTEXT);
        assert!(resolved.document.get("@context").is_some());
    }

    #[test]
    fn all_table_entries_resolve() {
        let resolver = ContextResolver::new();
        for url in [
            DID_V1_CONTEXT,
            W3ID_DID_V1_CONTEXT,
            SECURITY_V1_CONTEXT,
            SECURITY_V2_CONTEXT,
            SCHNORR_2019_CONTEXT,
        ] {
            let resolved = resolver.resolve(url).expect("failed to resolve");
            assert_eq!(resolved.document_url, url);
        }
    }

    #[test]
    fn example_did_resolves_with_and_without_fragment() {
        let resolver = ContextResolver::new();

        let bare = resolver.resolve(EXAMPLE_DID).expect("failed to resolve");
        assert_eq!(bare.document["id"], EXAMPLE_DID);

        let fragment = resolver.resolve("did:example:123#key-1").expect("failed to resolve");
        assert_eq!(fragment.document, bare.document);
        assert_eq!(fragment.document_url, "did:example:123#key-1");
    }

    #[test]
    fn unknown_url_fails_closed() {
        let resolver = ContextResolver::new();
        let err = resolver.resolve("https://unknown.example/ctx").expect_err("expected error");
        assert!(err.is(Err::UnsupportedContext));

        // other DIDs are not the example DID
        let err = resolver.resolve("did:example:456").expect_err("expected error");
        assert!(err.is(Err::UnsupportedContext));
    }
}
