//! Color space types and conversions
//!
//! This module provides:
//! - CIE XYZ color space and the D50 PCS white
//! - CIELAB (L*a*b*) color space, CIE76 difference and gamut-prism clipping
//! - 16-bit PCS encodings (Lab V2/V4, XYZ)

pub mod encoding;
pub mod lab;
pub mod xyz;

pub use encoding::{
    float_to_lab_encoded, float_to_lab_encoded_v2, float_to_xyz_encoded, lab_encoded_to_float,
    lab_encoded_v2_to_float, xyz_encoded_to_float,
};
pub use lab::{LCh, Lab, delta_e_76, desaturate_lab};
pub use xyz::{D50, MAX_ENCODEABLE_XYZ, Xyz};
