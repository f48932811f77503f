//! Built-in device models
//!
//! Small analytic models that cover the color spaces the estimators deal
//! with. None of them depends on the rendering intent.

use crate::color::{D50, Lab, Xyz};
use crate::error::{Error, Result};
use crate::math::{Matrix3x3, Transfer};
use crate::profile::{DeviceModel, Profile};
use crate::types::{ColorSpace, ProfileClass, RenderingIntent};

/// Abstract Lab → Lab identity (the "Lab v4" profile)
#[derive(Debug, Clone, Copy, Default)]
pub struct LabIdentity;

impl DeviceModel for LabIdentity {
    fn color_space(&self) -> ColorSpace {
        ColorSpace::Lab
    }

    fn class(&self) -> ProfileClass {
        ProfileClass::Abstract
    }

    fn to_pcs(&self, _intent: RenderingIntent, device: &[f64]) -> [f64; 3] {
        [device[0], device[1], device[2]]
    }

    fn from_pcs(&self, _intent: RenderingIntent, pcs: [f64; 3], device: &mut [f64]) {
        device[..3].copy_from_slice(&pcs);
    }
}

/// Abstract XYZ → XYZ identity
#[derive(Debug, Clone, Copy, Default)]
pub struct XyzIdentity;

impl DeviceModel for XyzIdentity {
    fn color_space(&self) -> ColorSpace {
        ColorSpace::Xyz
    }

    fn pcs(&self) -> ColorSpace {
        ColorSpace::Xyz
    }

    fn class(&self) -> ProfileClass {
        ProfileClass::Abstract
    }

    fn to_pcs(&self, _intent: RenderingIntent, device: &[f64]) -> [f64; 3] {
        [device[0], device[1], device[2]]
    }

    fn from_pcs(&self, _intent: RenderingIntent, pcs: [f64; 3], device: &mut [f64]) {
        device[..3].copy_from_slice(&pcs);
    }
}

/// RGB matrix/shaper: per-channel transfer, then a 3x3 matrix to D50 XYZ
#[derive(Debug, Clone, Copy)]
pub struct MatrixShaper {
    to_xyz: Matrix3x3,
    from_xyz: Matrix3x3,
    transfer: Transfer,
}

impl MatrixShaper {
    pub fn new(to_xyz: Matrix3x3, transfer: Transfer) -> Result<Self> {
        let from_xyz = to_xyz
            .inverse()
            .ok_or_else(|| Error::Transform("singular RGB to XYZ matrix".into()))?;
        Ok(Self {
            to_xyz,
            from_xyz,
            transfer,
        })
    }

    pub fn transfer(&self) -> Transfer {
        self.transfer
    }
}

impl DeviceModel for MatrixShaper {
    fn color_space(&self) -> ColorSpace {
        ColorSpace::Rgb
    }

    fn pcs(&self) -> ColorSpace {
        ColorSpace::Xyz
    }

    fn class(&self) -> ProfileClass {
        ProfileClass::Display
    }

    fn is_matrix_shaper(&self) -> bool {
        true
    }

    fn to_pcs(&self, _intent: RenderingIntent, device: &[f64]) -> [f64; 3] {
        let linear = [0, 1, 2].map(|i| self.transfer.decode(device[i].clamp(0.0, 1.0)));
        self.to_xyz.multiply_vec(linear)
    }

    fn from_pcs(&self, _intent: RenderingIntent, pcs: [f64; 3], device: &mut [f64]) {
        let linear = self.from_xyz.multiply_vec(pcs);
        for (d, v) in device.iter_mut().zip(linear) {
            *d = self.transfer.encode(v.clamp(0.0, 1.0));
        }
    }
}

/// Gray with a transfer curve on `Y`, neutral along the D50 white
#[derive(Debug, Clone, Copy)]
pub struct GrayTrc {
    transfer: Transfer,
}

impl GrayTrc {
    pub fn new(transfer: Transfer) -> Self {
        Self { transfer }
    }
}

impl DeviceModel for GrayTrc {
    fn color_space(&self) -> ColorSpace {
        ColorSpace::Gray
    }

    fn pcs(&self) -> ColorSpace {
        ColorSpace::Xyz
    }

    fn class(&self) -> ProfileClass {
        ProfileClass::Display
    }

    fn is_matrix_shaper(&self) -> bool {
        true
    }

    fn to_pcs(&self, _intent: RenderingIntent, device: &[f64]) -> [f64; 3] {
        let y = self.transfer.decode(device[0].clamp(0.0, 1.0));
        [D50.x * y, D50.y * y, D50.z * y]
    }

    fn from_pcs(&self, _intent: RenderingIntent, pcs: [f64; 3], device: &mut [f64]) {
        device[0] = self.transfer.encode(pcs[1].clamp(0.0, 1.0));
    }
}

fn srgb_from_xyz() -> Matrix3x3 {
    // SRGB_D50 is well conditioned; the fallback is unreachable
    Matrix3x3::SRGB_D50.inverse().unwrap_or(Matrix3x3::IDENTITY)
}

/// CMYK printer model with full gray component replacement
///
/// Ink coverage multiplies linear sRGB-primaries light:
/// `r = (1 - c)(1 - k)` and so on. The inverse puts all neutral density
/// into K.
#[derive(Debug, Clone, Copy)]
pub struct NaiveCmyk {
    to_xyz: Matrix3x3,
    from_xyz: Matrix3x3,
}

impl Default for NaiveCmyk {
    fn default() -> Self {
        Self {
            to_xyz: Matrix3x3::SRGB_D50,
            from_xyz: srgb_from_xyz(),
        }
    }
}

impl DeviceModel for NaiveCmyk {
    fn color_space(&self) -> ColorSpace {
        ColorSpace::Cmyk
    }

    fn class(&self) -> ProfileClass {
        ProfileClass::Output
    }

    fn to_pcs(&self, _intent: RenderingIntent, device: &[f64]) -> [f64; 3] {
        let [c, m, y, k] = [0, 1, 2, 3].map(|i| device[i].clamp(0.0, 1.0));
        let white = 1.0 - k;
        let rgb = [(1.0 - c) * white, (1.0 - m) * white, (1.0 - y) * white];
        let xyz = self.to_xyz.multiply_vec(rgb);
        Lab::from_xyz(Xyz::from_array(xyz)).to_array()
    }

    fn from_pcs(&self, _intent: RenderingIntent, pcs: [f64; 3], device: &mut [f64]) {
        let xyz = Lab::from_array(pcs).to_xyz().to_array();
        let rgb = self.from_xyz.multiply_vec(xyz).map(|v| v.clamp(0.0, 1.0));
        let max = rgb[0].max(rgb[1]).max(rgb[2]);
        let k = 1.0 - max;

        if max <= 1e-12 {
            device[..4].copy_from_slice(&[0.0, 0.0, 0.0, 1.0]);
            return;
        }
        for i in 0..3 {
            device[i] = ((max - rgb[i]) / max).clamp(0.0, 1.0);
        }
        device[3] = k;
    }
}

impl Profile {
    /// Abstract Lab identity, the canonical chain terminator
    pub fn lab_identity() -> Self {
        Profile::new(LabIdentity)
    }

    /// Abstract XYZ identity
    pub fn xyz_identity() -> Self {
        Profile::new(XyzIdentity)
    }

    /// sRGB primaries and transfer curve, D50 adapted
    pub fn srgb() -> Self {
        Profile::new(MatrixShaper {
            to_xyz: Matrix3x3::SRGB_D50,
            from_xyz: srgb_from_xyz(),
            transfer: Transfer::Srgb,
        })
    }

    /// sRGB primaries with a pure power-law transfer
    pub fn rgb_gamma(gamma: f64) -> Result<Self> {
        if !(gamma.is_finite() && gamma > 0.0) {
            return Err(Error::InvalidCurve(format!("gamma {gamma}")));
        }
        Ok(Profile::new(MatrixShaper::new(
            Matrix3x3::SRGB_D50,
            Transfer::Gamma(gamma),
        )?))
    }

    /// Gray with a power-law transfer
    pub fn gray(gamma: f64) -> Result<Self> {
        if !(gamma.is_finite() && gamma > 0.0) {
            return Err(Error::InvalidCurve(format!("gamma {gamma}")));
        }
        Ok(Profile::new(GrayTrc::new(Transfer::Gamma(gamma))))
    }

    /// Output-class CMYK model, see [`NaiveCmyk`]
    pub fn naive_cmyk() -> Self {
        Profile::new(NaiveCmyk::default())
    }
}
