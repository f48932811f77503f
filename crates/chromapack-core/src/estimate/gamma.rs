//! Apparent gamma of RGB profiles

use crate::context::TransformFlags;
use crate::engine::{CmsBackend, ColorTransform};
use crate::format::PixelFormat;
use crate::math::from_8_to_16;
use crate::profile::Profile;
use crate::tone_curve::ToneCurve;
use crate::types::{ColorSpace, ProfileClass, RenderingIntent};

const GRAY_STEPS: usize = 256;

/// Gamma fitted to the luminance of the profile's neutral ramp
///
/// Only RGB profiles of class input, display, output or color space
/// qualify. Returns `-1.0` when the profile does not qualify, when the
/// transform to XYZ cannot be built, or when the fit's standard deviation
/// exceeds `threshold`.
pub fn detect_rgb_profile_gamma<C: CmsBackend + ?Sized>(
    cms: &C,
    profile: &Profile,
    threshold: f64,
) -> f64 {
    if profile.color_space() != ColorSpace::Rgb {
        return -1.0;
    }
    if !matches!(
        profile.class(),
        ProfileClass::Input | ProfileClass::Display | ProfileClass::Output | ProfileClass::ColorSpace
    ) {
        return -1.0;
    }

    let xform = match cms.create_simple_transform(
        profile,
        PixelFormat::RGB_16,
        &Profile::xyz_identity(),
        PixelFormat::XYZ_DBL,
        RenderingIntent::RelativeColorimetric,
        TransformFlags::new().with_no_optimize(),
    ) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(error = %e, "gamma detection transform unavailable");
            return -1.0;
        }
    };

    let rgb: Vec<u16> = (0..GRAY_STEPS)
        .flat_map(|i| [from_8_to_16(i as u8); 3])
        .collect();
    let mut xyz = vec![0f64; 3 * GRAY_STEPS];
    if let Err(e) = xform.execute_slice(&rgb, &mut xyz, GRAY_STEPS) {
        tracing::warn!(error = %e, "gamma detection sampling failed");
        return -1.0;
    }

    let y: Vec<f32> = xyz.chunks_exact(3).map(|v| v[1] as f32).collect();
    let Ok(curve) = ToneCurve::from_float_samples(&y) else {
        return -1.0;
    };
    let gamma = curve.estimate_gamma(threshold);
    tracing::debug!(gamma, threshold, "detected RGB gamma");
    gamma
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ReferenceCms;

    #[test]
    fn test_power_law_profiles() {
        let cms = ReferenceCms::default();
        for g in [1.8, 2.2] {
            let profile = Profile::rgb_gamma(g).unwrap();
            let found = detect_rgb_profile_gamma(&cms, &profile, 0.1);
            assert!((found - g).abs() < 0.02, "gamma {g}: {found}");
        }
    }

    #[test]
    fn test_non_rgb_rejected() {
        let cms = ReferenceCms::default();
        assert_eq!(detect_rgb_profile_gamma(&cms, &Profile::naive_cmyk(), 1.0), -1.0);
        assert_eq!(detect_rgb_profile_gamma(&cms, &Profile::gray(2.2).unwrap(), 1.0), -1.0);
    }
}
