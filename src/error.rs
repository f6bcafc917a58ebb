//! # Errors
//!
//! Error types raised by the Schnorr secp256k1 verification key and the static context resolver.
//! Cryptographic signature mismatch is deliberately *not* represented here: the verifier reports
//! it as a `false` result, never as an error.

use std::fmt::Display;

use thiserror::Error;

/// Simplify creation of errors with tracing.
///
/// # Example
/// ```
/// use schnorr_key::error::Err;
/// use schnorr_key::{tracerr, Result};
///
/// fn with_msg() -> Result<()> {
///     tracerr!(Err::InvalidKey, "message: {}", "some message")
/// }
///
/// fn no_msg() -> Result<()> {
///     tracerr!(Err::InvalidKey)
/// }
/// ```
#[macro_export]
macro_rules! tracerr {
    // with context
    ($code:expr, $($msg:tt)*) => {
        {
        use $crate::error::Context as _;
        tracing::error!($($msg)*);
        return Err($code).context(format!($($msg)*));
        }
    };
    // no context
    ($code:expr) => {
        {
        tracing::error!("{}", $code);
        return Err($code.into());
        }
    }
}

/// Public error type for the verification key suite.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct Error(#[from] anyhow::Error);

impl Error {
    /// Express the error in a JSON-compatible format.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.0.root_cause().to_string(),
            "error_description": self.to_string(),
        })
    }

    /// Returns true if `E` is the type held by this error object.
    #[must_use]
    pub fn is(&self, err: Err) -> bool {
        self.0.downcast_ref::<Err>().is_some_and(|e| e == &err)
    }
}

/// Typed errors for the verification key suite.
#[derive(Clone, Copy, Error, Debug, PartialEq, Eq)]
pub enum Err {
    /// A signature was requested from a key constructed without private key material. Raised when
    /// the signer is invoked, not when it is created.
    #[error("no_private_key")]
    NoPrivateKey,

    /// Verification was requested from a key without public key material. Raised when the
    /// verifier is invoked, not when it is created.
    #[error("no_public_key")]
    NoPublicKey,

    /// The protected header segment of a detached JWS is not valid base64url-encoded JSON.
    #[error("header_parse_error")]
    HeaderParse,

    /// The decoded protected header is not a JSON object.
    #[error("invalid_header_shape")]
    InvalidHeaderShape,

    /// The protected header does not carry the exact parameters required by the suite
    /// (`alg`, `b64`, `crit`).
    #[error("invalid_header_parameters")]
    InvalidHeaderParameters,

    /// The context resolver was asked for a URL outside its static table.
    #[error("unsupported_context")]
    UnsupportedContext,

    /// Invalid key is where the format of the key is incorrect or the cryptographic algorithm
    /// specified by the key is not supported.
    #[error("invalid_key")]
    InvalidKey,

    /// An error occurred trying to serialize data.
    #[error("serialization_error")]
    SerializationError,

    /// Failure to sign a message.
    #[error("signing_error")]
    SigningError,

    /// Failure to verify a signature.
    #[error("failed_signature_verification")]
    FailedSignatureVerification,
}

/// Context is used to decorate errors with useful context information.
pub trait Context<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// Adds context to the error.
    ///
    /// # Errors
    ///
    /// * Original error with context appended.
    fn context<C>(self, context: C) -> Result<T, Error>
    where
        C: Display + Send + Sync + 'static;
}

impl<T, E> Context<T, E> for core::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T, Error>
    where
        C: Display + Send + Sync + 'static,
    {
        match self {
            Ok(ok) => Ok(ok),
            Err(e) => Err(Error(anyhow::Error::from(e).context(context))),
        }
    }
}

impl From<Err> for Error {
    fn from(error: Err) -> Self {
        Error(error.into())
    }
}

impl From<base64ct::Error> for Error {
    fn from(err: base64ct::Error) -> Error {
        Error(err.into())
    }
}

impl From<ecdsa::Error> for Error {
    fn from(err: ecdsa::Error) -> Error {
        Error(err.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error(err.into())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Error {
        Error(err.into())
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::Result;

    #[test]
    fn base_err() {
        let err: Error = Err::HeaderParse.into();

        assert_eq!(
            err.to_json(),
            json!({"error":"header_parse_error","error_description":"header_parse_error"})
        );
        assert!(err.is(Err::HeaderParse));
        assert!(!err.is(Err::NoPrivateKey));
    }

    #[test]
    fn context_err() {
        let res: Result<()> = Err(Err::UnsupportedContext).context("no custom context support");
        let err = res.expect_err("expected error");

        assert_eq!(
            err.to_json(),
            json!({"error":"unsupported_context","error_description":"no custom context support"})
        );
    }

    #[test]
    fn macro_err() {
        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::ERROR)
            .finish();
        tracing::subscriber::set_global_default(subscriber).expect("setting subscriber failed");

        fn fail() -> Result<()> {
            tracerr!(Err::NoPrivateKey, "no private key: {}", "did:example:123#key-1");
        }

        let err = fail().expect_err("expected error");
        assert!(err.is(Err::NoPrivateKey));
        assert_eq!(
            err.to_json(),
            json!({
                "error": "no_private_key",
                "error_description": "no private key: did:example:123#key-1"
            })
        );
    }
}
