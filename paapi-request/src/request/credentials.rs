//! Credential field names accepted by the mapping form of
//! [`RequestConfig::configure`](crate::RequestConfig::configure).

use std::{fmt, str::FromStr};

use crate::error::RequestError;

/// A credential field with a dedicated setter on [`RequestConfig`](crate::RequestConfig).
///
/// The set is closed. Parsing any other name fails with
/// [`RequestError::UnknownCredentialField`] instead of being ignored.
///
/// # Examples
///
/// ```
/// use paapi_request::request::CredentialField;
///
/// assert_eq!("tag".parse::<CredentialField>().unwrap(), CredentialField::Tag);
/// assert!("secert".parse::<CredentialField>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialField {
    /// Access key id.
    Key,
    /// Secret access key.
    Secret,
    /// Associate tag.
    Tag,
}

impl CredentialField {
    /// All credential fields.
    pub const ALL: [Self; 3] = [Self::Key, Self::Secret, Self::Tag];

    /// Returns the field name used in credential maps.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Key => "key",
            Self::Secret => "secret",
            Self::Tag => "tag",
        }
    }
}

impl FromStr for CredentialField {
    type Err = RequestError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "key" => Ok(Self::Key),
            "secret" => Ok(Self::Secret),
            "tag" => Ok(Self::Tag),
            other => Err(RequestError::UnknownCredentialField(other.to_owned())),
        }
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_fields() {
        for field in CredentialField::ALL {
            assert_eq!(field.as_str().parse::<CredentialField>().unwrap(), field);
        }
    }

    #[test]
    fn test_parse_unknown_field() {
        assert_eq!(
            "bogus".parse::<CredentialField>(),
            Err(RequestError::UnknownCredentialField("bogus".to_owned()))
        );
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Key".parse::<CredentialField>().is_err());
        assert!("TAG".parse::<CredentialField>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(CredentialField::Secret.to_string(), "secret");
    }
}
