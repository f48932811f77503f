//! SIMD-Optimized Sample Conversions
//!
//! Block conversions between the canonical pixel vectors and the unit
//! doubles the transform engine evaluates, using the `multiversion` crate
//! for automatic CPU dispatch.
//!
//! Supported instruction sets:
//! - x86-64: SSE4.1, AVX2
//! - ARM64: NEON
//!
//! # Usage
//!
//! All functions automatically dispatch to the best available implementation
//! at runtime. The scalar fallback is always available.

mod batch;

pub use batch::{
    floats_to_unit_batch, unit_to_floats_batch, unit_to_words_batch, words_to_unit_batch,
};

/// Get a description of the active SIMD features
pub fn active_features() -> &'static str {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            "AVX2"
        } else if is_x86_feature_detected!("sse4.1") {
            "SSE4.1"
        } else {
            "scalar"
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        "NEON"
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        "scalar"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_features() {
        let features = active_features();
        println!("Active SIMD features: {}", features);
        assert!(!features.is_empty());
    }
}
