//! Assistant configuration provider for the Impause behavioral-finance coach.
//!
//! For one conversation (a chat session tied to a user and a household) the
//! crate produces a [`ConfigurationBundle`]: the coach's operating
//! instructions, rendered with the household's currency conventions, the
//! user's date format and today's date, plus the ordered list of
//! capabilities (function-calling tools) the agent may invoke.
//!
//! Composition is a synchronous, CPU-only call chain with no I/O:
//!
//! ```text
//! Composer ─▶ LocaleResolver ─▶ InstructionRenderer
//!          └▶ CapabilitySet
//! ```
//!
//! # Getting started
//!
//! ```ignore
//! use impause_assistant::{Composer, ConversationContext};
//!
//! let ctx: ConversationContext = load_context(chat_id)?;
//! let bundle = Composer::new().compose_configuration(&ctx)?;
//!
//! runtime.start(bundle.instructions(), bundle.tool_defs());
//! ```
//!
//! # Where to find things
//!
//! - **Currency and date settings:** [`locale`]: [`CurrencyCatalog`] for
//!   currency lookup, [`DateFormat`] for the supported date patterns,
//!   [`LocaleResolver`] to derive both from a context.
//! - **Instruction text:** [`prompt`]: the static template, the `{{slot}}`
//!   engine, and [`InstructionRenderer`].
//! - **Capabilities:** [`capabilities`]: [`CapabilitySet`] registries,
//!   [`CapabilityDescriptor`], and the [`HandlerTable`](capabilities::HandlerTable)
//!   implementers bind handlers in.
//! - **Composition:** [`composer`]: [`Composer`] and [`ConfigurationBundle`].
//! - **Settings:** [`AssistantConfig`].
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`locale`] | Currency catalog, date formats, locale resolution |
//! | [`prompt`] | Section builder, slot templates, instruction renderer |
//! | [`capabilities`] | Capability specs, descriptors, registries, handler binding |
//! | [`composer`] | Bundle composition |
//! | [`config`] | Assistant naming and capability allow-list |
//! | [`clock`] | Source of the current date |
//! | [`error`] | [`ConfigError`] |

pub mod capabilities;
pub mod clock;
pub mod composer;
pub mod config;
pub mod error;
pub mod locale;
pub mod prompt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use capabilities::{CapabilityDescriptor, CapabilitySet, list_default_capabilities};
pub use composer::{Composer, ConfigurationBundle, compose_configuration};
pub use config::AssistantConfig;
pub use error::ConfigError;
pub use locale::{
    ConversationContext, CurrencyCatalog, CurrencyParams, DateFormat, DateFormatSpec, Household,
    LocaleResolver, User,
};
pub use prompt::InstructionRenderer;

// Re-export schemars for crates implementing capability handlers.
pub use schemars;

// ── Schema generation ──────────────────────────────────────────────

/// Generate a JSON Schema `serde_json::Value` from a type that implements
/// `schemars::JsonSchema`. This is the bridge between capability argument
/// types and the `parameters` object the function-calling API expects.
///
/// # Example
///
/// ```
/// use impause_assistant::json_schema_for;
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct PeriodArgs {
///     start_date: String,
///     #[serde(default)]
///     end_date: Option<String>,
/// }
///
/// let schema = json_schema_for::<PeriodArgs>();
/// assert_eq!(schema["type"], "object");
/// assert!(schema["required"].as_array().unwrap().contains(&"start_date".into()));
/// ```
pub fn json_schema_for<T: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema)
        .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}}))
}

// ── Tool types ─────────────────────────────────────────────────────

/// The type of a tool definition. Currently always `Function`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum ToolType {
    #[serde(rename = "function")]
    Function,
}

/// Tool definition in the OpenAI function-calling format.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ToolDef {
    #[serde(rename = "type")]
    pub tool_type: ToolType,
    pub function: FunctionDef,
}

impl ToolDef {
    /// Create a function-calling tool definition.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            tool_type: ToolType::Function,
            function: FunctionDef {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_def_serializes_in_function_calling_shape() {
        let def = ToolDef::new(
            "get_accounts",
            "List accounts.",
            serde_json::json!({"type": "object", "properties": {}}),
        );
        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(json["type"], "function");
        assert_eq!(json["function"]["name"], "get_accounts");
        assert_eq!(json["function"]["description"], "List accounts.");

        let back: ToolDef = serde_json::from_value(json).unwrap();
        assert_eq!(back, def);
    }
}
