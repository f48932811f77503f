//! Execution context and transform options
//!
//! A [`Context`] owns the formatter registry used by transforms built
//! through it. Contexts are plain values: [`Context::derive`] hands out an
//! independent copy that inherits the parent's plugins at that moment.

use crate::format::PixelFormat;
use crate::formatters::{Direction, Formatter, Representation};
use crate::registry::{FormatterFactory, FormatterRegistry};

/// Execution context
#[derive(Debug, Clone, Default)]
pub struct Context {
    registry: FormatterRegistry,
}

impl Context {
    /// Create a context with only the stock formatters
    pub fn new() -> Self {
        Self::default()
    }

    /// Independent child context carrying a copy of this context's plugins
    pub fn derive(&self) -> Self {
        self.clone()
    }

    pub fn registry(&self) -> &FormatterRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FormatterRegistry {
        &mut self.registry
    }

    /// Register a formatter factory (builder style)
    pub fn with_formatter_factory<F: FormatterFactory + 'static>(mut self, factory: F) -> Self {
        self.registry.register(factory);
        self
    }

    /// Resolve a codec through this context's registry
    pub fn formatter(
        &self,
        format: PixelFormat,
        direction: Direction,
        representation: Representation,
    ) -> Option<Formatter> {
        self.registry.lookup(format, direction, representation)
    }
}

/// Transform flags for additional options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformFlags {
    /// Do not keep a one-pixel result cache
    pub no_cache: bool,
    /// Evaluate the full chain for every pixel instead of an optimized form
    pub no_optimize: bool,
    /// Prefer dense grids when precalculating
    pub high_res_precalc: bool,
    /// Prefer coarse grids when precalculating
    pub low_res_precalc: bool,
    /// Explicit grid size for sampled tables, overriding the resolution hints
    pub grid_points: Option<u32>,
}

impl TransformFlags {
    /// Create default flags
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_no_cache(mut self) -> Self {
        self.no_cache = true;
        self
    }

    pub fn with_no_optimize(mut self) -> Self {
        self.no_optimize = true;
        self
    }

    pub fn with_high_res_precalc(mut self) -> Self {
        self.high_res_precalc = true;
        self
    }

    pub fn with_low_res_precalc(mut self) -> Self {
        self.low_res_precalc = true;
        self
    }

    /// Force the number of grid points per dimension
    pub fn with_grid_points(mut self, n: u32) -> Self {
        self.grid_points = Some(n);
        self
    }
}
