//! Transfer functions used by the built-in device models
//!
//! This module provides:
//! - sRGB gamma encode/decode
//! - Pure power-law gamma

/// sRGB gamma decode (encoded → linear)
///
/// Uses the IEC 61966-2-1 transfer function.
#[inline]
pub fn srgb_gamma_decode(encoded: f64) -> f64 {
    if encoded <= 0.04045 {
        encoded / 12.92
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB gamma encode (linear → encoded)
#[inline]
pub fn srgb_gamma_encode(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// y = x^gamma
#[inline]
pub fn gamma_decode(encoded: f64, gamma: f64) -> f64 {
    if encoded <= 0.0 {
        0.0
    } else {
        encoded.powf(gamma)
    }
}

/// y = x^(1/gamma)
#[inline]
pub fn gamma_encode(linear: f64, gamma: f64) -> f64 {
    if linear <= 0.0 {
        0.0
    } else {
        linear.powf(1.0 / gamma)
    }
}

/// Per-channel transfer curve of a shaper model
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transfer {
    /// Pure power law
    Gamma(f64),
    /// IEC 61966-2-1
    Srgb,
}

impl Transfer {
    /// Encoded device value to linear light
    #[inline]
    pub fn decode(self, v: f64) -> f64 {
        match self {
            Self::Gamma(g) => gamma_decode(v, g),
            Self::Srgb => srgb_gamma_decode(v),
        }
    }

    /// Linear light to encoded device value
    #[inline]
    pub fn encode(self, v: f64) -> f64 {
        match self {
            Self::Gamma(g) => gamma_encode(v, g),
            Self::Srgb => srgb_gamma_encode(v),
        }
    }
}
