//! Device models for failure paths the built-in models never hit

use chromapack_core::color::{Lab, Xyz};
use chromapack_core::engine::models::GrayTrc;
use chromapack_core::math::{Matrix3x3, Transfer};
use chromapack_core::profile::DeviceModel;
use chromapack_core::{ChainLink, ColorSpace, Profile, ProfileClass, RenderingIntent};

/// CMYK model whose black ink darkens up to 50% and lightens again after
///
/// The K to lightness relationship is a tent, so any K curve built from a
/// chain that starts here cannot be monotonic.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldedK;

impl FoldedK {
    /// Effective darkness of `k`, 0 at both ends and 1 at 50%
    pub fn darkness(k: f64) -> f64 {
        1.0 - (2.0 * k.clamp(0.0, 1.0) - 1.0).abs()
    }
}

impl DeviceModel for FoldedK {
    fn color_space(&self) -> ColorSpace {
        ColorSpace::Cmyk
    }

    fn class(&self) -> ProfileClass {
        ProfileClass::Output
    }

    fn to_pcs(&self, _intent: RenderingIntent, device: &[f64]) -> [f64; 3] {
        let [c, m, y] = [0, 1, 2].map(|i| device[i].clamp(0.0, 1.0));
        let white = 1.0 - Self::darkness(device[3]);
        let rgb = [(1.0 - c) * white, (1.0 - m) * white, (1.0 - y) * white];
        let xyz = Matrix3x3::SRGB_D50.multiply_vec(rgb);
        Lab::from_xyz(Xyz::from_array(xyz)).to_array()
    }

    fn from_pcs(&self, _intent: RenderingIntent, pcs: [f64; 3], device: &mut [f64]) {
        // Inverse along the rising half only
        let y = Lab::from_array(pcs).to_xyz().y.clamp(0.0, 1.0);
        device[..3].fill(0.0);
        device[3] = (1.0 - y) / 2.0;
    }
}

/// `n` links of a linear gray profile, perceptual intent
pub fn gray_chain(n: usize) -> Vec<ChainLink> {
    let gray = Profile::new(GrayTrc::new(Transfer::Gamma(1.0)));
    (0..n)
        .map(|_| ChainLink::new(gray.clone(), RenderingIntent::Perceptual))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_darkness_is_a_tent() {
        assert_eq!(FoldedK::darkness(0.0), 0.0);
        assert_eq!(FoldedK::darkness(0.5), 1.0);
        assert_eq!(FoldedK::darkness(1.0), 0.0);
        assert!((FoldedK::darkness(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_folded_white_and_black() {
        let model = FoldedK;
        let white = model.to_pcs(RenderingIntent::Perceptual, &[0.0, 0.0, 0.0, 0.0]);
        assert!((white[0] - 100.0).abs() < 0.05, "L={}", white[0]);
        let black = model.to_pcs(RenderingIntent::Perceptual, &[0.0, 0.0, 0.0, 0.5]);
        assert!(black[0].abs() < 1e-6, "L={}", black[0]);
        let folded = model.to_pcs(RenderingIntent::Perceptual, &[0.0, 0.0, 0.0, 1.0]);
        assert!((folded[0] - white[0]).abs() < 1e-9);
    }

    #[test]
    fn test_gray_chain_length() {
        let chain = gray_chain(5);
        assert_eq!(chain.len(), 5);
        assert!(chain[0].profile.ptr_eq(&chain[4].profile));
    }
}
