//! Host resolver implementations.
//!
//! [`DefaultHostResolver`] reads the static locale table.
//! [`ConfigurableHostResolver`] layers per-locale host overrides from
//! [`Settings`](crate::settings::Settings) on top of it.

use std::collections::HashMap;

use url::Url;

use crate::{
    error::{RequestError, Result},
    locale::{DEFAULT_LOCALE, LOCALE_TABLE, resolve_host},
};

/// Resolves a locale code to the host requests for that locale are sent to.
///
/// Implementations must reject every code that is not in the locale table,
/// even when they could produce a host for it.
pub trait HostResolver: Send + Sync {
    /// Resolves `locale` (or the default locale when `None`) to a host name.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidLocale`] for codes outside the table.
    fn resolve_host(&self, locale: Option<&str>) -> Result<&str>;
}

/// Resolver backed directly by the static locale table.
#[derive(Debug, Clone, Copy)]
pub struct DefaultHostResolver;

impl Default for DefaultHostResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultHostResolver {
    /// Creates a new default host resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HostResolver for DefaultHostResolver {
    fn resolve_host(&self, locale: Option<&str>) -> Result<&str> {
        resolve_host(locale)
    }
}

/// Resolver that replaces the table host for selected locales.
///
/// Locales without an override fall back to the table. Overrides keyed by a
/// code outside the table are never consulted.
#[derive(Debug, Clone, Default)]
pub struct ConfigurableHostResolver {
    overrides: HashMap<String, String>,
}

impl ConfigurableHostResolver {
    /// Creates a resolver from a locale → host override map.
    #[must_use]
    pub fn new(overrides: &HashMap<String, String>) -> Self {
        Self { overrides: overrides.clone() }
    }

    /// Returns true if any override is configured.
    #[must_use]
    pub fn has_overrides(&self) -> bool {
        !self.overrides.is_empty()
    }
}

impl HostResolver for ConfigurableHostResolver {
    fn resolve_host(&self, locale: Option<&str>) -> Result<&str> {
        let code = locale.unwrap_or(DEFAULT_LOCALE);
        let table_host =
            LOCALE_TABLE.host(code).ok_or_else(|| RequestError::InvalidLocale(code.to_owned()))?;
        Ok(self.overrides.get(code).map_or(table_host, String::as_str))
    }
}

/// Validates that `host` is a bare host name usable in an endpoint.
///
/// The host must parse as the authority of an `http://` URL and carry no
/// port, userinfo, path, query or fragment. Internationalized names are
/// accepted; the `url` crate normalizes them to punycode during the check.
pub(crate) fn validate_host(locale: &str, host: &str) -> Result<()> {
    if host.is_empty() {
        return Err(RequestError::Config(format!("host for {locale} is empty")));
    }

    let url = Url::parse(&format!("http://{host}")).map_err(|e| {
        RequestError::Config(format!("invalid host for {locale} '{host}': {e}"))
    })?;

    let bare = url.host_str().is_some_and(|parsed| !parsed.is_empty())
        && url.port().is_none()
        && url.username().is_empty()
        && url.password().is_none()
        && url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none()
        && !host.contains(['/', '\\'])
        && !host.ends_with(':')
        && !host.chars().any(|ch| ch.is_whitespace() || ch.is_control());

    if !bare {
        return Err(RequestError::Config(format!(
            "host for {locale} must be a bare host name: {host}"
        )));
    }

    Ok(())
}
