//! Capability descriptors: the identity and contract of a callable function.
//!
//! A [`CapabilityDescriptor`] carries no executable logic. It names the
//! capability, describes it to the model, and points at the handler an
//! orchestrator should dispatch model-issued calls to.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::spec::CapabilitySpec;
use crate::ToolDef;

/// Reference to an externally implemented handler.
///
/// Orchestrators resolve it through their own handler table (see
/// [`HandlerTable`](super::handler::HandlerTable)). By default it equals the
/// capability name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerRef(String);

impl HandlerRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapabilityDescriptor {
    name: String,
    definition: ToolDef,
    handler: HandlerRef,
}

impl CapabilityDescriptor {
    /// Describe a capability from its function-calling definition.
    pub fn from_tool_def(definition: ToolDef) -> Self {
        let name = definition.function.name.clone();
        Self {
            handler: HandlerRef::new(name.clone()),
            name,
            definition,
        }
    }

    /// Point this capability at a handler other than its own name.
    pub fn with_handler(mut self, handler: HandlerRef) -> Self {
        self.handler = handler;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> &ToolDef {
        &self.definition
    }

    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }
}

impl From<CapabilitySpec> for CapabilityDescriptor {
    fn from(spec: CapabilitySpec) -> Self {
        Self::from_tool_def(spec.to_tool_def())
    }
}
