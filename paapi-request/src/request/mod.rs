//! Request configuration.
//!
//! [`RequestConfig`] owns the endpoint, the caller's credentials and any
//! operation parameters for one outbound request. [`CredentialField`] is the
//! closed set of names the mapping form of `configure` dispatches on, and
//! [`FIXED_PARAMS`] declares the parameters every request carries.

pub mod config;
pub mod credentials;
pub mod params;

pub use config::{ENDPOINT_PATH, RequestConfig};
pub use credentials::CredentialField;
pub use params::{API_VERSION, FIXED_PARAMS, ParamValue, SERVICE};

#[cfg(test)]
mod tests;
