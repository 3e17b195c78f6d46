//! Binding between capability descriptors and their implementations.
//!
//! The capabilities themselves (fetching transactions, computing a balance
//! sheet) live outside this crate. Whoever implements them registers a
//! [`CapabilityHandler`] per [`HandlerRef`] in a [`HandlerTable`]; the
//! orchestrator then checks a composed bundle against the table before
//! starting a conversation and dispatches model-issued calls through it.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use super::descriptor::HandlerRef;
use crate::composer::ConfigurationBundle;
use crate::error::ConfigError;

/// Boxed future returned by [`CapabilityHandler::invoke`].
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<String, String>> + Send + 'a>>;

/// An externally implemented capability.
///
/// `arguments` is the raw JSON string the model produced. Validating it
/// against the advertised schema and formatting the result are the
/// handler's job.
pub trait CapabilityHandler: Send + Sync {
    fn invoke(&self, arguments: &str) -> HandlerFuture<'_>;
}

/// A closure-based handler.
pub struct FnHandler<F> {
    func: F,
}

impl<F, Fut> FnHandler<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, String>> + Send + 'static,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F, Fut> CapabilityHandler for FnHandler<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, String>> + Send + 'static,
{
    fn invoke(&self, arguments: &str) -> HandlerFuture<'_> {
        Box::pin((self.func)(arguments.to_string()))
    }
}

/// Handlers keyed by [`HandlerRef`].
#[derive(Default)]
pub struct HandlerTable {
    handlers: HashMap<HandlerRef, Box<dyn CapabilityHandler>>,
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Replaces any existing handler for the same key.
    pub fn register(&mut self, key: HandlerRef, handler: impl CapabilityHandler + 'static) {
        self.handlers.insert(key, Box::new(handler));
    }

    /// Register a handler (builder pattern).
    pub fn with(mut self, key: impl Into<String>, handler: impl CapabilityHandler + 'static) -> Self {
        self.register(HandlerRef::new(key), handler);
        self
    }

    pub fn get(&self, key: &HandlerRef) -> Option<&dyn CapabilityHandler> {
        self.handlers.get(key).map(|h| &**h)
    }

    /// Check every capability in `bundle` has a handler.
    ///
    /// Reports the first unbound capability in bundle order.
    pub fn ensure_bound(&self, bundle: &ConfigurationBundle) -> Result<(), ConfigError> {
        match bundle
            .capabilities()
            .iter()
            .find(|c| !self.handlers.contains_key(c.handler()))
        {
            Some(unbound) => Err(ConfigError::UnboundCapability {
                name: unbound.name().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Dispatch a call by capability handler key.
    pub async fn dispatch(&self, key: &HandlerRef, arguments: &str) -> Result<String, String> {
        match self.get(key) {
            Some(handler) => handler.invoke(arguments).await,
            None => Err(format!("Error: no handler for '{key}'")),
        }
    }
}
