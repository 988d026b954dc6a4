//! Per-request configuration.

use std::{collections::BTreeMap, fmt};

use tracing::debug;
use zeroize::Zeroizing;

use crate::{
    error::{RequestError, Result},
    locale::{
        ConfigurableHostResolver, DEFAULT_LOCALE, DefaultHostResolver, HostResolver, LOCALE_TABLE,
        validate_host,
    },
    request::{CredentialField, FIXED_PARAMS},
    settings::Settings,
};

/// Path appended to the regional host to form the endpoint.
pub const ENDPOINT_PATH: &str = "/onca/xml";

/// Configuration of one outbound Product Advertising API request.
///
/// The endpoint is fixed at construction. Credentials and the associate tag
/// start unset and are filled in through [`configure`](Self::configure),
/// [`configure_with`](Self::configure_with) or the individual setters. The
/// request can be reused for any number of dispatches that share the same
/// locale and credentials.
///
/// Mutation takes `&mut self`, so concurrent callers must synchronize
/// externally or give each flow its own instance.
///
/// # Examples
///
/// ```
/// use paapi_request::RequestConfig;
///
/// # fn example() -> paapi_request::Result<()> {
/// let mut request = RequestConfig::new(Some("GB"))?;
/// assert_eq!(request.endpoint(), "http://webservices.amazon.co.uk/onca/xml");
///
/// request.configure([("key", "AKID"), ("secret", "s3cr3t"), ("tag", "shop-21")])?;
/// assert_eq!(request.tag()?, "shop-21");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RequestConfig {
    locale: String,
    endpoint: String,
    key: Option<String>,
    secret: Option<Zeroizing<String>>,
    tag: Option<String>,
    extra_params: BTreeMap<String, String>,
}

impl RequestConfig {
    /// Creates a request for `locale` using the static locale table.
    ///
    /// `None` selects the default locale (`US`).
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidLocale`] if the locale is not supported.
    pub fn new(locale: Option<&str>) -> Result<Self> {
        Self::with_resolver(locale, &DefaultHostResolver::new())
    }

    /// Creates a request for `locale`, resolving the host through `resolver`.
    ///
    /// The resolved host must be a bare host name. Resolvers are not trusted
    /// to enforce the locale table or to return usable hosts.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidLocale`] if the locale is not in the
    /// table or the resolver rejects it, and [`RequestError::Config`] if the
    /// resolved host is empty or carries anything besides a host name.
    pub fn with_resolver(locale: Option<&str>, resolver: &dyn HostResolver) -> Result<Self> {
        let code = locale.unwrap_or(DEFAULT_LOCALE);
        if !LOCALE_TABLE.contains(code) {
            return Err(RequestError::InvalidLocale(code.to_owned()));
        }
        let host = resolver.resolve_host(Some(code))?;
        validate_host(code, host)?;
        let endpoint = format!("http://{host}{ENDPOINT_PATH}");

        debug!(locale = code, endpoint = %endpoint, "request endpoint resolved");

        Ok(Self {
            locale: code.to_owned(),
            endpoint,
            key: None,
            secret: None,
            tag: None,
            extra_params: BTreeMap::new(),
        })
    }

    /// Creates a request from loaded [`Settings`].
    ///
    /// Validates the settings, resolves the locale with any configured host
    /// overrides, reads the key and secret from the named environment
    /// variables and applies the associate tag.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Config`] if validation fails or a named
    /// environment variable is not set, and [`RequestError::InvalidLocale`]
    /// if the locale is unsupported.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let resolver = ConfigurableHostResolver::new(&settings.hosts);
        debug!(host_overrides = resolver.has_overrides(), "building request from settings");
        let mut request = Self::with_resolver(settings.locale.as_deref(), &resolver)?;

        let credentials = &settings.credentials;
        if let Some(key) = credentials.key()? {
            request.set_key(key);
        }
        if let Some(secret) = credentials.secret()? {
            request.set_secret(secret);
        }
        if let Some(tag) = &credentials.tag {
            request.set_tag(tag.clone());
        }

        Ok(request)
    }

    /// Locale code this request was built for.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Fully qualified endpoint URL, e.g. `http://webservices.amazon.com/onca/xml`.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Assigns credential fields from a name → value mapping.
    ///
    /// Accepted names are `key`, `secret` and `tag`. All names are checked
    /// before anything is assigned: if one is unknown the call fails and the
    /// request is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::UnknownCredentialField`] for the first name
    /// without a setter.
    ///
    /// # Examples
    ///
    /// ```
    /// use paapi_request::{RequestConfig, RequestError};
    ///
    /// let mut request = RequestConfig::new(None).unwrap();
    /// let err = request.configure([("tag", "shop-20"), ("bogus", "x")]).unwrap_err();
    ///
    /// assert_eq!(err, RequestError::UnknownCredentialField("bogus".to_owned()));
    /// assert!(request.tag().is_err());
    /// ```
    pub fn configure<I, K, V>(&mut self, credentials: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let assignments = credentials
            .into_iter()
            .map(|(name, value)| Ok((name.as_ref().parse::<CredentialField>()?, value.into())))
            .collect::<Result<Vec<(CredentialField, String)>>>()?;

        for (field, value) in assignments {
            debug!(field = %field, "credential field assigned");
            self.set_field(field, value);
        }

        Ok(())
    }

    /// Adjusts the request in place through `adjust`.
    ///
    /// The closure receives the request and may call any setter.
    ///
    /// # Examples
    ///
    /// ```
    /// use paapi_request::RequestConfig;
    ///
    /// let mut request = RequestConfig::new(Some("DE")).unwrap();
    /// request.configure_with(|r| r.set_tag("shop-21"));
    ///
    /// assert_eq!(request.tag().unwrap(), "shop-21");
    /// assert!(request.key().is_none());
    /// ```
    pub fn configure_with<F>(&mut self, adjust: F)
    where
        F: FnOnce(&mut Self),
    {
        adjust(self);
    }

    /// Assigns one credential field.
    pub fn set_field(&mut self, field: CredentialField, value: impl Into<String>) {
        match field {
            CredentialField::Key => self.set_key(value),
            CredentialField::Secret => self.set_secret(value),
            CredentialField::Tag => self.set_tag(value),
        }
    }

    /// Returns the associate tag.
    ///
    /// This is the single place the associate tag invariant is enforced: an
    /// unset tag and an empty tag are both rejected.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::MissingTag`] if the tag is unset or empty.
    pub fn tag(&self) -> Result<&str> {
        match self.tag.as_deref() {
            Some(tag) if !tag.is_empty() => Ok(tag),
            _ => Err(RequestError::MissingTag),
        }
    }

    /// Sets the associate tag, replacing any previous value.
    ///
    /// No validation happens here; [`tag`](Self::tag) checks on read.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = Some(tag.into());
    }

    /// Unsets the associate tag.
    pub fn clear_tag(&mut self) {
        self.tag = None;
    }

    /// Access key id, if set.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Sets the access key id.
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = Some(key.into());
    }

    /// Secret access key, if set.
    #[must_use]
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_ref().map(|secret| secret.as_str())
    }

    /// Sets the secret access key. The previous secret is zeroed on drop.
    pub fn set_secret(&mut self, secret: impl Into<String>) {
        self.secret = Some(Zeroizing::new(secret.into()));
    }

    /// Adds an operation parameter (e.g. `Operation`, `ItemId`).
    ///
    /// Fixed parameters take precedence: an extra with the name of a fixed
    /// parameter is shadowed when the parameter set is evaluated.
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.extra_params.insert(name.into(), value.into());
    }

    /// Removes an operation parameter, returning its value.
    pub fn remove_param(&mut self, name: &str) -> Option<String> {
        self.extra_params.remove(name)
    }

    /// Evaluates the full parameter set handed to the signer.
    ///
    /// Fixed parameters are evaluated now, not at construction, so the
    /// `AssociateTag` entry reflects the current tag.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::MissingTag`] if the associate tag is unset or empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use paapi_request::RequestConfig;
    ///
    /// let mut request = RequestConfig::new(None).unwrap();
    /// request.set_tag("A");
    /// request.set_tag("B");
    ///
    /// let params = request.params().unwrap();
    /// assert_eq!(params["AssociateTag"], "B");
    /// assert_eq!(params["Service"], "AWSECommerceService");
    /// assert_eq!(params["Version"], "2011-08-01");
    /// ```
    pub fn params(&self) -> Result<BTreeMap<String, String>> {
        let mut params = self.extra_params.clone();
        for (name, value) in FIXED_PARAMS {
            params.insert((*name).to_owned(), value.evaluate(self)?);
        }
        Ok(params)
    }
}

impl fmt::Debug for RequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestConfig")
            .field("locale", &self.locale)
            .field("endpoint", &self.endpoint)
            .field("key", &self.key)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("tag", &self.tag)
            .field("extra_params", &self.extra_params)
            .finish()
    }
}
