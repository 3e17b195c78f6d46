//! Configuration composition: the single entry point of the crate.
//!
//! [`Composer::compose_configuration`] runs resolve → render → list →
//! validate for one conversation and returns a [`ConfigurationBundle`], or
//! the first error unchanged. There is no partial success: a bundle is
//! either complete and valid or not returned at all.
//!
//! # Example
//!
//! ```
//! use impause_assistant::{Composer, ConversationContext, DateFormat, Household, User};
//! use impause_assistant::clock::FixedClock;
//! use chrono::NaiveDate;
//!
//! let ctx = ConversationContext::new(
//!     "chat-42",
//!     User { id: "u-1".into(), date_format: None },
//!     Household { id: "h-1".into(), currency: "EUR".into(), date_format: DateFormat::DayMonthYearDot },
//! );
//! let composer = Composer::new()
//!     .with_clock(FixedClock(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
//!
//! let bundle = composer.compose_configuration(&ctx).unwrap();
//! assert!(bundle.instructions().contains("ISO code: EUR"));
//! assert_eq!(bundle.capability_names()[0], "get_transactions");
//! ```

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::ToolDef;
use crate::capabilities::{
    CapabilityDescriptor, CapabilitySet, DefaultCapabilities, RestrictedCapabilities,
    validate_capabilities,
};
use crate::clock::{Clock, SystemClock};
use crate::config::AssistantConfig;
use crate::error::ConfigError;
use crate::locale::{CatalogLocaleResolver, ConversationContext, LocaleResolver};
use crate::prompt::InstructionRenderer;

/// The immutable output of a composition.
///
/// Cloning is cheap: the capability list is shared. A bundle can be handed
/// to any number of concurrent agent runtimes. The instructions embed the
/// composition date, so a bundle should not be reused on a later day.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationBundle {
    instructions: String,
    capabilities: Arc<[CapabilityDescriptor]>,
}

impl ConfigurationBundle {
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Capabilities in registry order.
    pub fn capabilities(&self) -> &[CapabilityDescriptor] {
        &self.capabilities
    }

    pub fn capability_names(&self) -> Vec<&str> {
        self.capabilities.iter().map(CapabilityDescriptor::name).collect()
    }

    /// Function-calling definitions for the LLM API, in registry order.
    pub fn tool_defs(&self) -> Vec<ToolDef> {
        self.capabilities
            .iter()
            .map(|c| c.definition().clone())
            .collect()
    }
}

impl Serialize for ConfigurationBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ConfigurationBundle", 2)?;
        state.serialize_field("instructions", &self.instructions)?;
        state.serialize_field("capabilities", self.capabilities())?;
        state.end()
    }
}

/// Composes configuration bundles from conversation contexts.
///
/// Holds no per-call state; one composer can serve any number of
/// conversations concurrently.
pub struct Composer {
    resolver: Box<dyn LocaleResolver>,
    renderer: InstructionRenderer,
    capabilities: Box<dyn CapabilitySet>,
    clock: Box<dyn Clock>,
}

impl fmt::Debug for Composer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer")
            .field("renderer", &self.renderer)
            .field(
                "capabilities",
                &self
                    .capabilities
                    .capabilities()
                    .iter()
                    .map(CapabilityDescriptor::name)
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    /// A composer over the built-in currency catalog, the default
    /// capabilities, default naming and the system clock.
    pub fn new() -> Self {
        Self {
            resolver: Box::new(CatalogLocaleResolver::builtin()),
            renderer: InstructionRenderer::default(),
            capabilities: Box::new(DefaultCapabilities),
            clock: Box::new(SystemClock),
        }
    }

    /// A default composer adjusted by `config`: naming goes to the renderer,
    /// and an allow-list swaps in a [`RestrictedCapabilities`] registry.
    pub fn from_config(config: &AssistantConfig) -> Self {
        let composer = Self::new().with_renderer(InstructionRenderer::from_config(config));
        match &config.allowed_capabilities {
            Some(allowed) => {
                let restricted = RestrictedCapabilities::new(&DefaultCapabilities, allowed);
                composer.with_capabilities(restricted)
            }
            None => composer,
        }
    }

    pub fn with_resolver(mut self, resolver: impl LocaleResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_renderer(mut self, renderer: InstructionRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_capabilities(mut self, capabilities: impl CapabilitySet + 'static) -> Self {
        self.capabilities = Box::new(capabilities);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Compose the bundle for `ctx` as of the clock's current date.
    pub fn compose_configuration(
        &self,
        ctx: &ConversationContext,
    ) -> Result<ConfigurationBundle, ConfigError> {
        self.compose_configuration_on(ctx, self.clock.today())
    }

    /// Compose the bundle for `ctx` as of `date`.
    pub fn compose_configuration_on(
        &self,
        ctx: &ConversationContext,
        date: NaiveDate,
    ) -> Result<ConfigurationBundle, ConfigError> {
        let locale = self.resolver.resolve(ctx)?;
        let instructions = self
            .renderer
            .render(&locale.currency, &locale.date_format, date)?;

        let capabilities = self.capabilities.capabilities();
        validate_capabilities(&capabilities)?;

        info!(
            "Composed configuration for chat {}: {} capabilities, {} instruction bytes",
            ctx.chat_id,
            capabilities.len(),
            instructions.len(),
        );
        Ok(ConfigurationBundle {
            instructions,
            capabilities,
        })
    }
}

/// Compose with the default [`Composer`].
pub fn compose_configuration(
    ctx: &ConversationContext,
) -> Result<ConfigurationBundle, ConfigError> {
    Composer::new().compose_configuration(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::names::{DEFAULT_ORDER, GET_ACCOUNTS};
    use crate::clock::FixedClock;
    use crate::locale::{DateFormat, Household, LocaleParams, User};
    use crate::prompt::has_slot_marker;

    fn ctx(currency: &str) -> ConversationContext {
        ConversationContext::new(
            "chat-1",
            User {
                id: "u".into(),
                date_format: None,
            },
            Household {
                id: "h".into(),
                currency: currency.into(),
                date_format: DateFormat::Iso,
            },
        )
    }

    fn march_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    struct EmptyCapabilities;

    impl CapabilitySet for EmptyCapabilities {
        fn capabilities(&self) -> Arc<[CapabilityDescriptor]> {
            Arc::from(Vec::new())
        }
    }

    struct FailingResolver;

    impl LocaleResolver for FailingResolver {
        fn resolve(&self, _ctx: &ConversationContext) -> Result<LocaleParams, ConfigError> {
            Err(ConfigError::template("currency_symbol", "injected"))
        }
    }

    #[test]
    fn composes_default_bundle() {
        let bundle = Composer::new()
            .compose_configuration_on(&ctx("USD"), march_15())
            .unwrap();
        assert!(!bundle.instructions().is_empty());
        assert!(!has_slot_marker(bundle.instructions()));
        assert_eq!(bundle.capability_names(), DEFAULT_ORDER);
    }

    #[test]
    fn clock_supplies_the_date() {
        let bundle = Composer::new()
            .with_clock(FixedClock(march_15()))
            .compose_configuration(&ctx("USD"))
            .unwrap();
        assert!(bundle.instructions().contains("reference point: 2024-03-15"));
    }

    #[test]
    fn unknown_currency_aborts() {
        let err = Composer::new()
            .compose_configuration_on(&ctx("ZZZ"), march_15())
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownCurrency { code: "ZZZ".into() });
    }

    #[test]
    fn resolver_errors_pass_through_unchanged() {
        let err = Composer::new()
            .with_resolver(FailingResolver)
            .compose_configuration_on(&ctx("USD"), march_15())
            .unwrap_err();
        assert_eq!(err, ConfigError::template("currency_symbol", "injected"));
    }

    #[test]
    fn empty_registry_is_rejected() {
        let err = Composer::new()
            .with_capabilities(EmptyCapabilities)
            .compose_configuration_on(&ctx("USD"), march_15())
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptyCapabilityList);
        assert!(err.is_programming_error());
    }

    #[test]
    fn from_config_applies_allow_list_and_names() {
        let config = AssistantConfig::default()
            .with_assistant_name("Penny")
            .with_allowed_capabilities([GET_ACCOUNTS]);
        let bundle = Composer::from_config(&config)
            .compose_configuration_on(&ctx("USD"), march_15())
            .unwrap();
        assert_eq!(bundle.capability_names(), vec![GET_ACCOUNTS]);
        assert!(bundle.instructions().contains("You are Penny,"));
    }

    #[test]
    fn bundle_serializes_instructions_and_capabilities() {
        let bundle = Composer::new()
            .compose_configuration_on(&ctx("USD"), march_15())
            .unwrap();
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["instructions"], bundle.instructions());
        assert_eq!(json["capabilities"].as_array().unwrap().len(), 4);
        assert_eq!(json["capabilities"][0]["name"], "get_transactions");
    }

    #[test]
    fn tool_defs_follow_registry_order() {
        let bundle = Composer::new()
            .compose_configuration_on(&ctx("USD"), march_15())
            .unwrap();
        let names: Vec<String> = bundle
            .tool_defs()
            .into_iter()
            .map(|d| d.function.name)
            .collect();
        assert_eq!(names, DEFAULT_ORDER);
    }
}
