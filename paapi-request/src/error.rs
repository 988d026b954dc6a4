//! Error types for request configuration.
//!
//! Every fallible operation in this crate returns [`RequestError`]. Errors are
//! surfaced to the immediate caller and are never logged or swallowed here.
//!
//! # Error Categories
//!
//! - **Construction** ([`RequestError::InvalidLocale`]): the locale code is not
//!   in the locale table
//! - **Identity** ([`RequestError::MissingTag`], [`RequestError::MissingCredential`]):
//!   a required credential has not been set
//! - **Programming errors** ([`RequestError::UnknownCredentialField`]): a
//!   credential map names a field that has no setter
//! - **Settings** ([`RequestError::Config`]): TOML settings failed to load or
//!   validate
//! - **Collaborator** ([`RequestError::Transport`]): the signer/transport
//!   rejected a dispatched request
//!
//! # Examples
//!
//! ```
//! use paapi_request::{RequestConfig, RequestError};
//!
//! let err = RequestConfig::new(Some("ZZ")).unwrap_err();
//! assert!(matches!(err, RequestError::InvalidLocale(ref code) if code == "ZZ"));
//! ```

use thiserror::Error;

/// Result type alias for request configuration operations.
pub type Result<T> = std::result::Result<T, RequestError>;

/// Errors that can occur while configuring a request.
///
/// # Error Recovery
///
/// - [`InvalidLocale`](Self::InvalidLocale): supply a supported locale or omit it
/// - [`MissingTag`](Self::MissingTag): set the associate tag and retry
/// - [`UnknownCredentialField`](Self::UnknownCredentialField): fix the field
///   name in the calling code; retrying will not help
/// - [`MissingCredential`](Self::MissingCredential): configure the key and
///   secret before dispatching
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Locale code is not present in the locale table.
    ///
    /// Lookup is case-sensitive, so `"us"` is rejected just like `"ZZ"`.
    ///
    /// ```
    /// use paapi_request::error::RequestError;
    ///
    /// let err = RequestError::InvalidLocale("ZZ".to_owned());
    /// assert_eq!(err.to_string(), "invalid locale: ZZ");
    /// ```
    #[error("invalid locale: {0}")]
    InvalidLocale(String),

    /// Associate tag was read before being set, or was set to an empty string.
    #[error("associate tag is missing")]
    MissingTag,

    /// A credential map named a field with no corresponding setter.
    ///
    /// Accepted field names are `key`, `secret` and `tag`.
    #[error("unknown credential field: {0}")]
    UnknownCredentialField(String),

    /// A credential needed for signing (`key` or `secret`) is not set.
    #[error("credential '{0}' is not set")]
    MissingCredential(&'static str),

    /// Settings could not be read, parsed, or validated.
    #[error("configuration error: {0}")]
    Config(String),

    /// The signer/transport collaborator reported a failure.
    #[error("transport failed: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_locale_display() {
        let error = RequestError::InvalidLocale("ZZ".to_owned());
        assert_eq!(error.to_string(), "invalid locale: ZZ");
    }

    #[test]
    fn test_missing_tag_display() {
        assert_eq!(RequestError::MissingTag.to_string(), "associate tag is missing");
    }

    #[test]
    fn test_unknown_credential_field_display() {
        let error = RequestError::UnknownCredentialField("bogus".to_owned());
        assert_eq!(error.to_string(), "unknown credential field: bogus");
    }

    #[test]
    fn test_missing_credential_display() {
        let error = RequestError::MissingCredential("secret");
        assert_eq!(error.to_string(), "credential 'secret' is not set");
    }

    #[test]
    fn test_config_error_display() {
        let error = RequestError::Config("bad toml".to_owned());
        assert!(error.to_string().contains("configuration error"));
    }
}
