//! Capability descriptors and the registries that serve them.
//!
//! - [`names`]: canonical capability name constants.
//! - [`args`]: schemars-derived argument types for the default capabilities.
//! - [`spec`]: [`CapabilitySpec`] builder for structured descriptions.
//! - [`descriptor`]: [`CapabilityDescriptor`] and [`HandlerRef`].
//! - [`registry`]: the [`CapabilitySet`] trait, [`DefaultCapabilities`],
//!   [`RestrictedCapabilities`] and [`list_default_capabilities`].
//! - [`handler`]: the [`CapabilityHandler`] interface implementers supply,
//!   and the [`HandlerTable`] orchestrators dispatch through.

pub mod args;
pub mod descriptor;
pub mod handler;
pub mod names;
pub mod registry;
pub mod spec;

pub use descriptor::{CapabilityDescriptor, HandlerRef};
pub use handler::{CapabilityHandler, FnHandler, HandlerFuture, HandlerTable};
pub use registry::{
    CapabilitySet, DefaultCapabilities, RestrictedCapabilities, list_default_capabilities,
    validate_capabilities,
};
pub use spec::CapabilitySpec;
