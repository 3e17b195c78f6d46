//! Locale parameters: currency display settings and date formats.
//!
//! - [`currency`]: [`CurrencyParams`], the [`CurrencyCatalog`] lookup
//!   interface and the built-in catalog.
//! - [`date_format`]: the fixed [`DateFormat`] set and [`DateFormatSpec`].
//! - [`resolver`]: [`ConversationContext`] and the [`LocaleResolver`] that
//!   derives [`LocaleParams`] from it.

pub mod currency;
pub mod date_format;
pub mod resolver;

pub use currency::{BuiltinCurrencyCatalog, CurrencyCatalog, CurrencyParams, InMemoryCurrencyCatalog};
pub use date_format::{DateFormat, DateFormatSpec};
pub use resolver::{
    CatalogLocaleResolver, ConversationContext, Household, LocaleParams, LocaleResolver, User,
};
