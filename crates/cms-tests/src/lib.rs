//! # cms-tests
//!
//! Integration tests for chromapack.
//!
//! This crate provides:
//! - Seeded pixel buffers for codec tests
//! - Extra device models that exercise estimator failure paths
//! - deltaE statistics over Lab buffers
//!
//! ## Test Categories
//!
//! 1. **Formatters**: pack/unpack across layouts, plugin precedence
//! 2. **Gamut check**: proofing tables over real chains
//! 3. **Ink coverage**: TAC of output profiles
//! 4. **Black curve**: K relationship between CMYK chains
//! 5. **Gamma**: apparent gamma of RGB profiles

use std::sync::Once;

pub mod accuracy;
pub mod models;
pub mod patterns;

pub use accuracy::{DeltaEStats, compare_lab_buffers, delta_e_2000};
pub use models::{FoldedK, gray_chain};
pub use patterns::{TestPattern, generate_pattern, random_words};

static TRACING: Once = Once::new();

/// Route `tracing` output to the test harness, filtered by `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
