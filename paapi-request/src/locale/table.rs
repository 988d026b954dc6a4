//! Static locale table.

use crate::error::{RequestError, Result};

/// Locale used when the caller does not name one.
pub const DEFAULT_LOCALE: &str = "US";

/// Immutable mapping from locale code to Product Advertising API host.
///
/// Several codes may share a host (`GB` and `UK`). Lookups are exact and
/// case-sensitive.
#[derive(Debug, Clone, Copy)]
pub struct LocaleTable {
    entries: &'static [(&'static str, &'static str)],
}

/// The process-wide locale table.
pub static LOCALE_TABLE: LocaleTable = LocaleTable {
    entries: &[
        ("BR", "webservices.amazon.com.br"),
        ("CA", "webservices.amazon.ca"),
        ("CN", "webservices.amazon.cn"),
        ("DE", "webservices.amazon.de"),
        ("ES", "webservices.amazon.es"),
        ("FR", "webservices.amazon.fr"),
        ("GB", "webservices.amazon.co.uk"),
        ("UK", "webservices.amazon.co.uk"),
        ("IN", "webservices.amazon.in"),
        ("IT", "webservices.amazon.it"),
        ("JP", "webservices.amazon.co.jp"),
        ("US", "webservices.amazon.com"),
        ("MX", "webservices.amazon.com.mx"),
    ],
};

impl LocaleTable {
    /// Returns the host for `code`, if the code is in the table.
    #[must_use]
    pub fn host(&self, code: &str) -> Option<&'static str> {
        self.entries.iter().find(|(locale, _)| *locale == code).map(|(_, host)| *host)
    }

    /// Returns true if `code` is a supported locale.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.host(code).is_some()
    }

    /// Iterates over the supported locale codes in table order.
    pub fn codes(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(locale, _)| *locale)
    }

    /// Number of locale codes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves a locale code to its API host.
///
/// `None` resolves the [`DEFAULT_LOCALE`]. The returned host carries no scheme
/// or path.
///
/// # Errors
///
/// Returns [`RequestError::InvalidLocale`] if the code is not in the table.
///
/// # Examples
///
/// ```
/// use paapi_request::locale::resolve_host;
///
/// assert_eq!(resolve_host(Some("JP")).unwrap(), "webservices.amazon.co.jp");
/// assert_eq!(resolve_host(None).unwrap(), "webservices.amazon.com");
/// assert!(resolve_host(Some("jp")).is_err());
/// ```
pub fn resolve_host(locale: Option<&str>) -> Result<&'static str> {
    let code = locale.unwrap_or(DEFAULT_LOCALE);
    LOCALE_TABLE.host(code).ok_or_else(|| RequestError::InvalidLocale(code.to_owned()))
}

/// Returns the supported locale codes in table order.
#[must_use]
pub fn supported_locales() -> Vec<&'static str> {
    LOCALE_TABLE.codes().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENTED_HOSTS: &[(&str, &str)] = &[
        ("BR", "webservices.amazon.com.br"),
        ("CA", "webservices.amazon.ca"),
        ("CN", "webservices.amazon.cn"),
        ("DE", "webservices.amazon.de"),
        ("ES", "webservices.amazon.es"),
        ("FR", "webservices.amazon.fr"),
        ("GB", "webservices.amazon.co.uk"),
        ("UK", "webservices.amazon.co.uk"),
        ("IN", "webservices.amazon.in"),
        ("IT", "webservices.amazon.it"),
        ("JP", "webservices.amazon.co.jp"),
        ("US", "webservices.amazon.com"),
        ("MX", "webservices.amazon.com.mx"),
    ];

    #[test]
    fn test_resolve_every_documented_locale() {
        for (code, host) in DOCUMENTED_HOSTS {
            assert_eq!(resolve_host(Some(*code)).unwrap(), *host, "locale {code}");
        }
        assert_eq!(LOCALE_TABLE.len(), DOCUMENTED_HOSTS.len());
    }

    #[test]
    fn test_gb_and_uk_share_host() {
        assert_eq!(resolve_host(Some("GB")).unwrap(), resolve_host(Some("UK")).unwrap());
    }

    #[test]
    fn test_absent_locale_defaults_to_us() {
        assert_eq!(resolve_host(None).unwrap(), resolve_host(Some("US")).unwrap());
    }

    #[test]
    fn test_unknown_locale_rejected() {
        assert_eq!(resolve_host(Some("ZZ")), Err(RequestError::InvalidLocale("ZZ".to_owned())));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(matches!(resolve_host(Some("us")), Err(RequestError::InvalidLocale(_))));
        assert!(matches!(resolve_host(Some("Gb")), Err(RequestError::InvalidLocale(_))));
    }

    #[test]
    fn test_empty_locale_rejected() {
        assert_eq!(resolve_host(Some("")), Err(RequestError::InvalidLocale(String::new())));
    }

    #[test]
    fn test_hosts_have_no_scheme_or_path() {
        for code in LOCALE_TABLE.codes() {
            let host = resolve_host(Some(code)).unwrap();
            assert!(!host.contains("://"));
            assert!(!host.contains('/'));
        }
    }

    #[test]
    fn test_supported_locales_in_table_order() {
        let codes = supported_locales();
        assert_eq!(codes.first(), Some(&"BR"));
        assert_eq!(codes.last(), Some(&"MX"));
        assert!(LOCALE_TABLE.contains("IN"));
        assert!(!LOCALE_TABLE.is_empty());
    }
}
