//! Mathematical operations for color management
//!
//! This module provides foundational math operations used throughout chromapack:
//! - Fixed-point sample conversions used by the pixel codecs
//! - Table interpolation for tone curves
//! - 3x3 matrix operations for RGB↔XYZ transforms
//! - Transfer functions for the built-in device models

pub mod fixed;
pub mod gamma;
pub mod interpolation;
pub mod matrix;

pub use fixed::{
    change_endian, from_8_to_16, from_16_to_8, labv2_to_labv4, labv4_to_labv2,
    quick_saturate_word, reverse_flavor_8, reverse_flavor_16, to_fixed_domain,
};
pub use gamma::{Transfer, gamma_decode, gamma_encode, srgb_gamma_decode, srgb_gamma_encode};
pub use interpolation::{lin_interp_16, lin_interp_f32};
pub use matrix::Matrix3x3;
