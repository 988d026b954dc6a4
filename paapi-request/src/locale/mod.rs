//! Locale to host resolution.
//!
//! This module holds the static locale table and the resolvers that turn a
//! locale code into the regional API host.

pub mod resolver;
pub mod table;

pub use resolver::{ConfigurableHostResolver, DefaultHostResolver, HostResolver};
pub use table::{DEFAULT_LOCALE, LOCALE_TABLE, LocaleTable, resolve_host, supported_locales};
pub(crate) use resolver::validate_host;
