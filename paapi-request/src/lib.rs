//! Product Advertising API request configuration.
//!
//! This crate resolves a locale code to the regional Product Advertising API
//! endpoint, assembles the parameters every request carries, and refuses to
//! hand a request to a signer until its associate tag is set.
//!
//! Signing, HTTP transport, retries and response parsing are not done here.
//! They belong to an external collaborator that implements
//! [`SignAndSend`](signable::SignAndSend).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  locale   ┌──────────────────┐
//! │    caller    │──────────▶│  locale::        │  static locale table,
//! │              │           │  HostResolver    │  optional host overrides
//! └──────┬───────┘           └────────┬─────────┘
//!        │ key / secret / tag         │ host
//! ┌──────▼────────────────────────────▼─────────┐
//! │  request::RequestConfig                     │
//! │  endpoint · credentials · FIXED_PARAMS      │
//! └──────┬──────────────────────────────────────┘
//!        │ Signable
//! ┌──────▼───────┐
//! │ signer /     │  SignAndSend (external)
//! │ transport    │
//! └──────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use paapi_request::{RequestConfig, RequestError};
//!
//! # fn example() -> paapi_request::Result<()> {
//! let mut request = RequestConfig::new(Some("DE"))?;
//! assert_eq!(request.endpoint(), "http://webservices.amazon.de/onca/xml");
//!
//! // The tag is checked when it is read, not when it is set.
//! assert_eq!(request.tag(), Err(RequestError::MissingTag));
//!
//! request.configure([("key", "AKID"), ("secret", "s3cr3t"), ("tag", "laden-21")])?;
//! request.set_param("Operation", "ItemLookup");
//!
//! let params = request.params()?;
//! assert_eq!(params["AssociateTag"], "laden-21");
//! assert_eq!(params["Service"], "AWSECommerceService");
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`locale`]: locale table and host resolvers
//! - [`request`]: [`RequestConfig`], credential field dispatch, fixed parameters
//! - [`signable`]: the [`Signable`](signable::Signable) capability and [`dispatch`](signable::dispatch)
//! - [`settings`]: TOML settings with environment-sourced credentials
//! - [`error`]: error types
//!
//! # Logging
//!
//! The crate emits [`tracing`] events at `debug` level for endpoint
//! resolution, credential assignment (field names only) and dispatch. It never
//! records key or secret values and never installs a subscriber.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod locale;
pub mod request;
pub mod settings;
pub mod signable;

pub use error::{RequestError, Result};
pub use locale::resolve_host;
pub use request::RequestConfig;
pub use settings::Settings;
pub use signable::{SignAndSend, Signable, dispatch};
