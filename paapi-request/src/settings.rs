//! Request settings loaded from TOML.
//!
//! Secrets never appear in the file. The access key and secret are read from
//! environment variables named in the `[credentials]` table, while the
//! associate tag (an identity, not a secret) may be written inline.
//!
//! ```toml
//! locale = "GB"
//!
//! [credentials]
//! key_env = "PAAPI_ACCESS_KEY"
//! secret_env = "PAAPI_SECRET_KEY"
//! tag = "shop-21"
//!
//! [hosts]
//! GB = "paapi-proxy.example.co.uk"
//! ```

use std::{collections::HashMap, env, path::Path};

use serde::Deserialize;

use crate::{
    error::{RequestError, Result},
    locale::{LOCALE_TABLE, validate_host},
};

/// Root settings for building a [`RequestConfig`](crate::RequestConfig).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Locale code (default: `US`).
    #[serde(default)]
    pub locale: Option<String>,

    /// Credential sources.
    #[serde(default)]
    pub credentials: CredentialSettings,

    /// Per-locale host overrides. Keys must be supported locale codes.
    #[serde(default)]
    pub hosts: HashMap<String, String>,
}

/// Where credentials come from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialSettings {
    /// Environment variable holding the access key id.
    pub key_env: Option<String>,

    /// Environment variable holding the secret access key.
    pub secret_env: Option<String>,

    /// Associate tag.
    pub tag: Option<String>,
}

impl Settings {
    /// Parses and validates settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Config`] on malformed TOML, unknown keys, or
    /// failed validation, and [`RequestError::InvalidLocale`] for an
    /// unsupported `locale`.
    ///
    /// # Examples
    ///
    /// ```
    /// use paapi_request::settings::Settings;
    ///
    /// let settings = Settings::from_toml(r#"
    ///     locale = "FR"
    ///
    ///     [credentials]
    ///     tag = "boutique-21"
    /// "#).unwrap();
    ///
    /// assert_eq!(settings.locale.as_deref(), Some("FR"));
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let settings: Self = toml::from_str(toml_str)
            .map_err(|e| RequestError::Config(format!("invalid TOML settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses and validates settings from a file.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Config`] if the file cannot be read, plus every
    /// error [`from_toml`](Self::from_toml) can return.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| RequestError::Config(format!("cannot read settings file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Validates the settings.
    ///
    /// Checks that:
    /// - `locale`, if set, is a supported locale code
    /// - environment variable names are alphanumeric with underscores
    /// - an inline associate tag is not empty
    /// - host override keys are supported locale codes
    /// - host override values are bare host names (no scheme, port or path)
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidLocale`] for an unsupported `locale` and
    /// [`RequestError::Config`] for everything else.
    pub fn validate(&self) -> Result<()> {
        if let Some(locale) = self.locale.as_deref().filter(|code| !LOCALE_TABLE.contains(code)) {
            return Err(RequestError::InvalidLocale(locale.to_owned()));
        }

        self.credentials.validate()?;

        for (locale, host) in &self.hosts {
            if !LOCALE_TABLE.contains(locale) {
                return Err(RequestError::Config(format!(
                    "host override for unsupported locale: {locale}"
                )));
            }
            validate_host(locale, host)?;
        }

        Ok(())
    }
}

impl CredentialSettings {
    /// Validates credential sources.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Config`] if an environment variable name is
    /// malformed or the inline tag is empty.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.key_env {
            validate_env_var_name(name)?;
        }
        if let Some(name) = &self.secret_env {
            validate_env_var_name(name)?;
        }
        if self.tag.as_deref() == Some("") {
            return Err(RequestError::Config("associate tag must not be empty".to_owned()));
        }
        Ok(())
    }

    /// Reads the access key from its environment variable, if one is named.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Config`] if the named variable is not set.
    pub fn key(&self) -> Result<Option<String>> {
        self.key_env.as_deref().map(read_env).transpose()
    }

    /// Reads the secret from its environment variable, if one is named.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Config`] if the named variable is not set.
    pub fn secret(&self) -> Result<Option<String>> {
        self.secret_env.as_deref().map(read_env).transpose()
    }
}

fn read_env(name: &str) -> Result<String> {
    env::var(name).map_err(|e| RequestError::Config(format!("environment variable {name}: {e}")))
}

/// Validates an environment variable name.
fn validate_env_var_name(name: &str) -> Result<()> {
    let Some(first_char) = name.chars().next() else {
        return Err(RequestError::Config("environment variable name cannot be empty".to_owned()));
    };

    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(RequestError::Config(format!(
            "environment variable name must start with letter or underscore: {name}"
        )));
    }

    if let Some(ch) = name.chars().find(|ch| !ch.is_ascii_alphanumeric() && *ch != '_') {
        return Err(RequestError::Config(format!(
            "environment variable name contains invalid character '{ch}': {name}"
        )));
    }

    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unreachable,
    reason = "test code uses unreachable for expected-path assertions"
)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(settings.locale.is_none());
        assert!(settings.hosts.is_empty());
        assert!(settings.credentials.tag.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_valid() {
        let settings = Settings::from_toml("").unwrap();
        assert!(settings.locale.is_none());
    }

    #[test]
    fn test_complete_settings_from_toml() {
        let toml = r#"
            locale = "GB"

            [credentials]
            key_env = "PAAPI_ACCESS_KEY"
            secret_env = "PAAPI_SECRET_KEY"
            tag = "shop-21"

            [hosts]
            GB = "paapi-proxy.example.co.uk"
        "#;

        let settings = Settings::from_toml(toml).unwrap();
        assert_eq!(settings.locale.as_deref(), Some("GB"));
        assert_eq!(settings.credentials.key_env.as_deref(), Some("PAAPI_ACCESS_KEY"));
        assert_eq!(settings.credentials.secret_env.as_deref(), Some("PAAPI_SECRET_KEY"));
        assert_eq!(settings.credentials.tag.as_deref(), Some("shop-21"));
        assert_eq!(&settings.hosts["GB"], "paapi-proxy.example.co.uk");
    }

    #[test]
    fn test_invalid_toml_syntax() {
        let result = Settings::from_toml("locale = unclosed");
        assert!(matches!(result, Err(RequestError::Config(_))));
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let result = Settings::from_toml(r#"region = "US""#);
        let Err(RequestError::Config(msg)) = result else {
            unreachable!("expected configuration error")
        };
        assert!(msg.contains("region"));
    }

    #[test]
    fn test_unknown_credential_key_rejected() {
        let toml = r#"
            [credentials]
            secret = "inline-secrets-are-not-allowed"
        "#;
        assert!(matches!(Settings::from_toml(toml), Err(RequestError::Config(_))));
    }

    #[test]
    fn test_unsupported_locale_rejected() {
        let result = Settings::from_toml(r#"locale = "ZZ""#);
        assert_eq!(result.unwrap_err(), RequestError::InvalidLocale("ZZ".to_owned()));
    }

    #[test]
    fn test_lowercase_locale_rejected() {
        let result = Settings::from_toml(r#"locale = "de""#);
        assert!(matches!(result, Err(RequestError::InvalidLocale(_))));
    }

    #[test]
    fn test_empty_tag_rejected() {
        let toml = r#"
            [credentials]
            tag = ""
        "#;
        let Err(RequestError::Config(msg)) = Settings::from_toml(toml) else {
            unreachable!("expected configuration error")
        };
        assert!(msg.contains("must not be empty"));
    }

    #[test]
    fn test_env_var_name_invalid_chars() {
        let toml = r#"
            [credentials]
            key_env = "MY-KEY"
        "#;
        let Err(RequestError::Config(msg)) = Settings::from_toml(toml) else {
            unreachable!("expected configuration error")
        };
        assert!(msg.contains("invalid character"));
    }

    #[test]
    fn test_env_var_starts_with_number_rejected() {
        let toml = r#"
            [credentials]
            secret_env = "1_SECRET"
        "#;
        let Err(RequestError::Config(msg)) = Settings::from_toml(toml) else {
            unreachable!("expected configuration error")
        };
        assert!(msg.contains("must start with letter"));
    }

    #[test]
    fn test_env_var_empty_name_rejected() {
        let settings = Settings {
            credentials: CredentialSettings { key_env: Some(String::new()), ..Default::default() },
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(RequestError::Config(_))));
    }

    #[test]
    fn test_host_override_unknown_locale_rejected() {
        let toml = r#"
            [hosts]
            ZZ = "zz.example.com"
        "#;
        let Err(RequestError::Config(msg)) = Settings::from_toml(toml) else {
            unreachable!("expected configuration error")
        };
        assert!(msg.contains("unsupported locale"));
    }

    #[test]
    fn test_host_override_with_scheme_rejected() {
        let toml = r#"
            [hosts]
            US = "https://proxy.example.com"
        "#;
        assert!(matches!(Settings::from_toml(toml), Err(RequestError::Config(_))));
    }

    #[test]
    fn test_host_override_with_path_rejected() {
        let toml = r#"
            [hosts]
            US = "proxy.example.com/onca/xml"
        "#;
        let Err(RequestError::Config(msg)) = Settings::from_toml(toml) else {
            unreachable!("expected configuration error")
        };
        assert!(msg.contains("bare host name"));
    }

    #[test]
    fn test_host_override_internationalized_name_accepted() {
        let toml = r#"
            [hosts]
            DE = "bücher.example"
        "#;
        let settings = Settings::from_toml(toml).unwrap();
        assert_eq!(settings.hosts["DE"], "bücher.example");
    }

    #[test]
    fn test_host_override_with_port_rejected() {
        let toml = r#"
            [hosts]
            US = "proxy.example.com:8080"
        "#;
        assert!(matches!(Settings::from_toml(toml), Err(RequestError::Config(_))));
    }

    #[test]
    fn test_host_override_empty_rejected() {
        let toml = r#"
            [hosts]
            US = ""
        "#;
        assert!(matches!(Settings::from_toml(toml), Err(RequestError::Config(_))));
    }

    #[test]
    fn test_valid_host_overrides() {
        let toml = r#"
            [hosts]
            US = "proxy.example.com"
            JP = "jp-proxy.internal"
        "#;
        let settings = Settings::from_toml(toml).unwrap();
        assert_eq!(settings.hosts.len(), 2);
    }

    #[test]
    fn test_credentials_read_from_env() {
        let credentials = CredentialSettings {
            key_env: Some("PAAPI_SETTINGS_TEST_KEY".to_owned()),
            secret_env: Some("PAAPI_SETTINGS_TEST_SECRET".to_owned()),
            tag: None,
        };

        temp_env::with_vars(
            [("PAAPI_SETTINGS_TEST_KEY", Some("AKID")), ("PAAPI_SETTINGS_TEST_SECRET", Some("S"))],
            || {
                assert_eq!(credentials.key().unwrap().as_deref(), Some("AKID"));
                assert_eq!(credentials.secret().unwrap().as_deref(), Some("S"));
            },
        );
    }

    #[test]
    fn test_credentials_missing_env_var() {
        let credentials = CredentialSettings {
            key_env: Some("PAAPI_SETTINGS_TEST_UNSET".to_owned()),
            ..Default::default()
        };

        temp_env::with_var_unset("PAAPI_SETTINGS_TEST_UNSET", || {
            let Err(RequestError::Config(msg)) = credentials.key() else {
                unreachable!("expected configuration error")
            };
            assert!(msg.contains("PAAPI_SETTINGS_TEST_UNSET"));
        });
    }

    #[test]
    fn test_credentials_without_env_names() {
        let credentials = CredentialSettings::default();
        assert_eq!(credentials.key().unwrap(), None);
        assert_eq!(credentials.secret().unwrap(), None);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "locale = \"IT\"").unwrap();
        writeln!(file, "[credentials]").unwrap();
        writeln!(file, "tag = \"negozio-21\"").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.locale.as_deref(), Some("IT"));
        assert_eq!(settings.credentials.tag.as_deref(), Some("negozio-21"));
    }

    #[test]
    fn test_from_missing_file() {
        let result = Settings::from_file("/nonexistent/paapi-settings.toml");
        let Err(RequestError::Config(msg)) = result else {
            unreachable!("expected configuration error")
        };
        assert!(msg.contains("cannot read settings file"));
    }
}
