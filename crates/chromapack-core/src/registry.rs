//! Formatter registry
//!
//! Plugin factories are consulted newest-first before the stock tables. A
//! factory declines a descriptor by returning `None`. The registry itself
//! does no locking: mutate it before sharing a [`Context`](crate::Context)
//! across threads.

use std::sync::Arc;

use crate::format::PixelFormat;
use crate::formatters::{
    Direction, Formatter, Pack16Fn, PackFloatFn, Representation, Unpack16Fn, UnpackFloatFn,
    stock_formatter,
};

/// Source of codecs for descriptors the stock tables do not know
pub trait FormatterFactory: Send + Sync {
    fn formatter(
        &self,
        format: PixelFormat,
        direction: Direction,
        representation: Representation,
    ) -> Option<Formatter>;
}

impl<F> FormatterFactory for F
where
    F: Fn(PixelFormat, Direction, Representation) -> Option<Formatter> + Send + Sync,
{
    fn formatter(
        &self,
        format: PixelFormat,
        direction: Direction,
        representation: Representation,
    ) -> Option<Formatter> {
        self(format, direction, representation)
    }
}

/// Ordered list of plugin factories in front of the stock tables
///
/// Cloning copies the list, so registrations on a clone never show up in
/// the original.
#[derive(Clone, Default)]
pub struct FormatterRegistry {
    // Oldest first; lookups walk it backwards
    plugins: Vec<Arc<dyn FormatterFactory>>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a factory. It takes precedence over everything registered before.
    pub fn register<F: FormatterFactory + 'static>(&mut self, factory: F) {
        self.plugins.push(Arc::new(factory));
    }

    /// Plugin-style registration: `None` drops every factory.
    pub fn register_plugin(&mut self, plugin: Option<Arc<dyn FormatterFactory>>) {
        match plugin {
            Some(factory) => self.plugins.push(factory),
            None => self.reset(),
        }
    }

    /// Back to stock tables only
    pub fn reset(&mut self) {
        self.plugins.clear();
    }

    /// Number of registered factories
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Resolve a codec for `format`.
    ///
    /// Plugins see the descriptor unchanged. A plugin answer of the wrong
    /// direction or representation is ignored.
    pub fn lookup(
        &self,
        format: PixelFormat,
        direction: Direction,
        representation: Representation,
    ) -> Option<Formatter> {
        for (index, factory) in self.plugins.iter().enumerate().rev() {
            let Some(found) = factory.formatter(format, direction, representation) else {
                continue;
            };
            if found.direction() != direction || found.representation() != representation {
                tracing::warn!(
                    plugin = index,
                    ?format,
                    ?direction,
                    ?representation,
                    "plugin returned a mismatched formatter, skipping"
                );
                continue;
            }
            tracing::trace!(plugin = index, ?format, ?direction, ?representation, "plugin formatter");
            return Some(found);
        }

        let found = stock_formatter(format, direction, representation);
        tracing::trace!(
            ?format,
            ?direction,
            ?representation,
            hit = found.is_some(),
            "stock formatter"
        );
        found
    }

    pub fn unpack_16(&self, format: PixelFormat) -> Option<Unpack16Fn> {
        self.lookup(format, Direction::Input, Representation::Word)?
            .as_unpack_16()
    }

    pub fn unpack_float(&self, format: PixelFormat) -> Option<UnpackFloatFn> {
        self.lookup(format, Direction::Input, Representation::Float)?
            .as_unpack_float()
    }

    pub fn pack_16(&self, format: PixelFormat) -> Option<Pack16Fn> {
        self.lookup(format, Direction::Output, Representation::Word)?
            .as_pack_16()
    }

    pub fn pack_float(&self, format: PixelFormat) -> Option<PackFloatFn> {
        self.lookup(format, Direction::Output, Representation::Float)?
            .as_pack_float()
    }
}

impl std::fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("plugins", &self.plugins.len())
            .finish()
    }
}
