//! Hand-off to the external signer/transport.
//!
//! This crate does not sign or send anything. It exposes what a signer needs
//! through [`Signable`] and consumes a signer through [`SignAndSend`]. The
//! [`dispatch`] function joins the two and is where a request that is missing
//! its associate tag, key or secret gets stopped.
//!
//! # Examples
//!
//! ```
//! use std::convert::Infallible;
//!
//! use paapi_request::{
//!     RequestConfig,
//!     signable::{SignAndSend, SigningContext, dispatch},
//! };
//!
//! struct EchoSigner;
//!
//! impl SignAndSend for EchoSigner {
//!     type Error = Infallible;
//!     type Response = String;
//!
//!     fn sign_and_send(&self, ctx: SigningContext<'_>) -> Result<String, Infallible> {
//!         Ok(format!("GET {}?AssociateTag={}", ctx.endpoint, ctx.params["AssociateTag"]))
//!     }
//! }
//!
//! # fn example() -> paapi_request::Result<()> {
//! let mut request = RequestConfig::new(Some("CA"))?;
//! request.configure([("key", "AKID"), ("secret", "s3cr3t"), ("tag", "shop-20")])?;
//!
//! let response = dispatch(&request, &EchoSigner)?;
//! assert_eq!(response, "GET http://webservices.amazon.ca/onca/xml?AssociateTag=shop-20");
//! # Ok(())
//! # }
//! ```

use std::{collections::BTreeMap, fmt};

use tracing::{debug, instrument};

use crate::{
    error::{RequestError, Result},
    request::RequestConfig,
};

/// What a signer needs from a request.
///
/// Implemented by [`RequestConfig`]. Signers receive this by composition and
/// never need a concrete request type.
pub trait Signable {
    /// Destination URL for the signed GET request.
    fn endpoint(&self) -> &str;

    /// Parameter set to canonicalize and sign.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::MissingTag`] if the associate tag is not set.
    fn params(&self) -> Result<BTreeMap<String, String>>;

    /// Access key id, if configured.
    fn key(&self) -> Option<&str>;

    /// Secret access key, if configured.
    fn secret(&self) -> Option<&str>;
}

impl Signable for RequestConfig {
    fn endpoint(&self) -> &str {
        Self::endpoint(self)
    }

    fn params(&self) -> Result<BTreeMap<String, String>> {
        Self::params(self)
    }

    fn key(&self) -> Option<&str> {
        Self::key(self)
    }

    fn secret(&self) -> Option<&str> {
        Self::secret(self)
    }
}

/// Everything a signer receives for one dispatch.
///
/// The associate tag has already been checked and the key and secret are
/// guaranteed present.
#[derive(Clone)]
pub struct SigningContext<'a> {
    /// Destination URL.
    pub endpoint: &'a str,
    /// Evaluated parameter set, including the fixed parameters.
    pub params: BTreeMap<String, String>,
    /// Access key id.
    pub key: &'a str,
    /// Secret access key.
    pub secret: &'a str,
}

impl fmt::Debug for SigningContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningContext")
            .field("endpoint", &self.endpoint)
            .field("params", &self.params)
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// The external signing/dispatch capability.
///
/// Implementors add their own parameters (timestamp, signature), sign the
/// canonical query with the secret, and send the request. Retries, timeouts
/// and response parsing are theirs as well.
pub trait SignAndSend {
    /// Response produced by a successful dispatch. Never inspected here.
    type Response;

    /// Failure reported by the signer or the transport.
    type Error: fmt::Display;

    /// Signs and sends one request.
    ///
    /// # Errors
    ///
    /// Returns the implementor's error on signing or transport failure.
    fn sign_and_send(
        &self,
        ctx: SigningContext<'_>,
    ) -> std::result::Result<Self::Response, Self::Error>;
}

/// Validates `request` and hands it to `signer`.
///
/// The parameter set is evaluated first, so a missing associate tag stops the
/// dispatch before the signer is called. The key and secret must be set and
/// non-empty.
///
/// # Errors
///
/// - [`RequestError::MissingTag`] if the associate tag is unset or empty
/// - [`RequestError::MissingCredential`] if the key or secret is unset or empty
/// - [`RequestError::Transport`] wrapping the signer's error
#[instrument(skip_all, fields(endpoint = request.endpoint()))]
pub fn dispatch<S, T>(request: &S, signer: &T) -> Result<T::Response>
where
    S: Signable + ?Sized,
    T: SignAndSend + ?Sized,
{
    let params = request.params()?;
    let key = required(request.key(), "key")?;
    let secret = required(request.secret(), "secret")?;

    debug!(param_count = params.len(), "handing request to signer");

    signer
        .sign_and_send(SigningContext { endpoint: request.endpoint(), params, key, secret })
        .map_err(|e| RequestError::Transport(e.to_string()))
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str> {
    value.filter(|v| !v.is_empty()).ok_or(RequestError::MissingCredential(field))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Debug, Default)]
    struct RecordingSigner {
        calls: RefCell<Vec<(String, BTreeMap<String, String>, String, String)>>,
    }

    impl SignAndSend for RecordingSigner {
        type Error = String;
        type Response = u16;

        fn sign_and_send(&self, ctx: SigningContext<'_>) -> std::result::Result<u16, String> {
            self.calls.borrow_mut().push((
                ctx.endpoint.to_owned(),
                ctx.params,
                ctx.key.to_owned(),
                ctx.secret.to_owned(),
            ));
            Ok(200)
        }
    }

    struct FailingSigner;

    impl SignAndSend for FailingSigner {
        type Error = String;
        type Response = ();

        fn sign_and_send(&self, _ctx: SigningContext<'_>) -> std::result::Result<(), String> {
            Err("connection reset".to_owned())
        }
    }

    fn configured_request() -> RequestConfig {
        let mut request = RequestConfig::new(Some("ES")).unwrap();
        request.configure([("key", "AKID"), ("secret", "S3CR3T"), ("tag", "tienda-21")]).unwrap();
        request
    }

    #[test]
    fn test_dispatch_passes_everything_to_signer() {
        let signer = RecordingSigner::default();
        let mut request = configured_request();
        request.set_param("Operation", "ItemSearch");

        assert_eq!(dispatch(&request, &signer).unwrap(), 200);

        let calls = signer.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (endpoint, params, key, secret) = &calls[0];
        assert_eq!(endpoint, "http://webservices.amazon.es/onca/xml");
        assert_eq!(params["AssociateTag"], "tienda-21");
        assert_eq!(params["Service"], "AWSECommerceService");
        assert_eq!(params["Version"], "2011-08-01");
        assert_eq!(params["Operation"], "ItemSearch");
        assert_eq!(key, "AKID");
        assert_eq!(secret, "S3CR3T");
    }

    #[test]
    fn test_dispatch_without_tag_never_reaches_signer() {
        let signer = RecordingSigner::default();
        let mut request = configured_request();
        request.clear_tag();

        assert_eq!(dispatch(&request, &signer), Err(RequestError::MissingTag));
        assert!(signer.calls.borrow().is_empty());
    }

    #[test]
    fn test_dispatch_without_key() {
        let signer = RecordingSigner::default();
        let mut request = RequestConfig::new(None).unwrap();
        request.configure_with(|r| r.set_tag("T"));

        assert_eq!(dispatch(&request, &signer), Err(RequestError::MissingCredential("key")));
        assert!(signer.calls.borrow().is_empty());
    }

    #[test]
    fn test_dispatch_with_empty_secret() {
        let signer = RecordingSigner::default();
        let mut request = configured_request();
        request.set_secret("");

        assert_eq!(dispatch(&request, &signer), Err(RequestError::MissingCredential("secret")));
    }

    #[test]
    fn test_dispatch_with_empty_key() {
        let signer = RecordingSigner::default();
        let mut request = configured_request();
        request.set_key("");

        assert_eq!(dispatch(&request, &signer), Err(RequestError::MissingCredential("key")));
        assert!(signer.calls.borrow().is_empty());
    }

    #[test]
    fn test_dispatch_without_secret() {
        let signer = RecordingSigner::default();
        let mut request = RequestConfig::new(Some("FR")).unwrap();
        request.configure([("key", "AKID"), ("tag", "boutique-21")]).unwrap();

        assert_eq!(dispatch(&request, &signer), Err(RequestError::MissingCredential("secret")));
        assert!(signer.calls.borrow().is_empty());
    }

    #[test]
    fn test_dispatch_wraps_transport_error() {
        let request = configured_request();
        let err = dispatch(&request, &FailingSigner).unwrap_err();
        assert_eq!(err, RequestError::Transport("connection reset".to_owned()));
    }

    #[test]
    fn test_dispatch_through_trait_object() {
        let signer = RecordingSigner::default();
        let request = configured_request();
        let signable: &dyn Signable = &request;

        assert!(dispatch(signable, &signer).is_ok());
        assert_eq!(signable.endpoint(), request.endpoint());
    }

    #[test]
    fn test_reconfigured_tag_reaches_signer() {
        let signer = RecordingSigner::default();
        let mut request = configured_request();
        dispatch(&request, &signer).unwrap();
        request.set_tag("tienda-22");
        dispatch(&request, &signer).unwrap();

        let calls = signer.calls.borrow();
        assert_eq!(calls[0].1["AssociateTag"], "tienda-21");
        assert_eq!(calls[1].1["AssociateTag"], "tienda-22");
    }

    #[test]
    fn test_signing_context_debug_redacts_secret() {
        let ctx = SigningContext {
            endpoint: "http://webservices.amazon.com/onca/xml",
            params: BTreeMap::new(),
            key: "AKID",
            secret: "S3CR3T",
        };
        let debug = format!("{ctx:?}");
        assert!(!debug.contains("S3CR3T"));
        assert!(debug.contains("[REDACTED]"));
    }
}
