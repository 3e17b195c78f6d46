//! Locale parameter resolution for a conversation.
//!
//! [`LocaleResolver`] turns a [`ConversationContext`] into the currency and
//! date display settings the instructions are rendered with. Resolution is a
//! pure lookup: no clock, no I/O beyond the catalog, identical output for an
//! identical context.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::currency::{BuiltinCurrencyCatalog, CurrencyCatalog, CurrencyParams};
use super::date_format::{DateFormat, DateFormatSpec};
use crate::error::ConfigError;

/// The user taking part in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Personal date display preference. `None` defers to the household.
    #[serde(default)]
    pub date_format: Option<DateFormat>,
}

/// The household (account group) a conversation's data belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    pub id: String,
    /// ISO 4217 code of the household's preferred currency.
    pub currency: String,
    #[serde(default)]
    pub date_format: DateFormat,
}

/// One chat session, already resolved to its user and household records by
/// the data-access layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationContext {
    pub chat_id: String,
    pub user: User,
    pub household: Household,
}

impl ConversationContext {
    pub fn new(chat_id: impl Into<String>, user: User, household: Household) -> Self {
        Self {
            chat_id: chat_id.into(),
            user,
            household,
        }
    }

    /// The date format in effect: the user's own preference, falling back to
    /// the household default.
    pub fn effective_date_format(&self) -> DateFormat {
        self.user.date_format.unwrap_or(self.household.date_format)
    }
}

/// Currency and date settings resolved for one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleParams {
    pub currency: CurrencyParams,
    pub date_format: DateFormatSpec,
}

/// Derives locale parameters from a conversation context.
pub trait LocaleResolver: Send + Sync {
    fn resolve(&self, ctx: &ConversationContext) -> Result<LocaleParams, ConfigError>;
}

/// Resolves currencies through a [`CurrencyCatalog`].
#[derive(Debug, Clone, Default)]
pub struct CatalogLocaleResolver<C = BuiltinCurrencyCatalog> {
    catalog: C,
}

impl CatalogLocaleResolver {
    /// A resolver over the [`BuiltinCurrencyCatalog`].
    pub fn builtin() -> Self {
        Self::new(BuiltinCurrencyCatalog)
    }
}

impl<C: CurrencyCatalog> CatalogLocaleResolver<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }
}

impl<C: CurrencyCatalog> LocaleResolver for CatalogLocaleResolver<C> {
    fn resolve(&self, ctx: &ConversationContext) -> Result<LocaleParams, ConfigError> {
        let code = &ctx.household.currency;
        let currency =
            self.catalog
                .lookup_currency(code)
                .ok_or_else(|| ConfigError::UnknownCurrency {
                    code: code.clone(),
                })?;

        let date_format = DateFormatSpec::new(ctx.effective_date_format());
        debug!(
            "Resolved locale for chat {}: currency={}, date_format={}{}",
            ctx.chat_id,
            currency.iso_code,
            date_format.pattern(),
            if ctx.user.date_format.is_none() {
                " (household default)"
            } else {
                ""
            },
        );

        Ok(LocaleParams {
            currency,
            date_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(currency: &str, user_format: Option<DateFormat>) -> ConversationContext {
        ConversationContext::new(
            "chat-1",
            User {
                id: "user-1".into(),
                date_format: user_format,
            },
            Household {
                id: "household-1".into(),
                currency: currency.into(),
                date_format: DateFormat::DayMonthYearDot,
            },
        )
    }

    #[test]
    fn resolves_currency_from_catalog() {
        let params = CatalogLocaleResolver::builtin()
            .resolve(&context("EUR", None))
            .unwrap();
        assert_eq!(params.currency.iso_code, "EUR");
        assert_eq!(params.currency.symbol, "€");
    }

    #[test]
    fn unknown_currency_fails() {
        let err = CatalogLocaleResolver::builtin()
            .resolve(&context("ZZZ", None))
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownCurrency { code: "ZZZ".into() });
    }

    #[test]
    fn unset_user_preference_falls_back_to_household() {
        let params = CatalogLocaleResolver::builtin()
            .resolve(&context("USD", None))
            .unwrap();
        assert_eq!(params.date_format.format, DateFormat::DayMonthYearDot);
    }

    #[test]
    fn user_preference_wins_over_household() {
        let params = CatalogLocaleResolver::builtin()
            .resolve(&context("USD", Some(DateFormat::Iso)))
            .unwrap();
        assert_eq!(params.date_format.pattern(), "%Y-%m-%d");
    }

    #[test]
    fn resolution_is_repeatable() {
        let resolver = CatalogLocaleResolver::builtin();
        let ctx = context("GBP", Some(DateFormat::MonthDayYearSlash));
        assert_eq!(resolver.resolve(&ctx).unwrap(), resolver.resolve(&ctx).unwrap());
    }

    #[test]
    fn context_deserializes_with_optional_preferences() {
        let ctx: ConversationContext = serde_json::from_str(
            r#"{
                "chat_id": "c",
                "user": { "id": "u" },
                "household": { "id": "h", "currency": "CAD" }
            }"#,
        )
        .unwrap();
        assert_eq!(ctx.user.date_format, None);
        assert_eq!(ctx.effective_date_format(), DateFormat::default());
    }
}
