//! Error taxonomy for configuration composition.
//!
//! Every failure is surfaced to the caller unchanged. Nothing here is caused
//! by a transient condition, so nothing is retried.

use thiserror::Error;

/// Text shown to end users when composition fails. Internal error kinds are
/// never exposed past the layer that invokes the composer.
pub const ASSISTANT_UNAVAILABLE: &str =
    "The assistant is unavailable right now. Please try again later.";

/// Errors produced while composing an assistant configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The household's currency code is not in the currency catalog.
    #[error("unknown currency code '{code}'")]
    UnknownCurrency { code: String },

    /// A date-format preference outside the supported set.
    #[error("unsupported date format '{pattern}'")]
    UnknownDateFormat { pattern: String },

    /// A template slot could not be filled, or the template itself is malformed.
    #[error("cannot render slot '{slot}': {reason}")]
    TemplateRender { slot: String, reason: String },

    /// The capability registry returned no capabilities.
    #[error("capability registry returned an empty list")]
    EmptyCapabilityList,

    /// Two capabilities in one list share a name.
    #[error("capability '{name}' is declared more than once")]
    DuplicateCapability { name: String },

    /// A capability in a bundle has no registered handler.
    #[error("no handler registered for capability '{name}'")]
    UnboundCapability { name: String },

    /// An assistant configuration file could not be read or parsed.
    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: String, reason: String },
}

impl ConfigError {
    pub(crate) fn template(slot: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TemplateRender {
            slot: slot.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error means a registry invariant was broken.
    ///
    /// These indicate a bug in a registry declaration rather than bad input,
    /// and callers should treat them as fatal.
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyCapabilityList | Self::DuplicateCapability { .. }
        )
    }

    /// The message to show an end user for this failure.
    pub fn user_message(&self) -> &'static str {
        ASSISTANT_UNAVAILABLE
    }
}
