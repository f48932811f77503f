//! Black channel tone curve for black-preserving CMYK to CMYK transforms

use crate::context::TransformFlags;
use crate::engine::{CmsBackend, ColorTransform};
use crate::format::PixelFormat;
use crate::profile::ChainLink;
use crate::tone_curve::ToneCurve;
use crate::types::{ColorSpace, ProfileClass};

use super::chain_to_lab;

/// `1 - L*/100` against K = 0..100% through `links` and a Lab terminal
fn k_to_lstar<C: CmsBackend + ?Sized>(
    cms: &C,
    links: &[ChainLink],
    n_points: usize,
    flags: TransformFlags,
) -> Option<ToneCurve> {
    let xform = cms
        .create_transform(
            &chain_to_lab(links),
            PixelFormat::CMYK_FLT,
            PixelFormat::LAB_DBL,
            flags,
        )
        .inspect_err(|e| tracing::warn!(error = %e, "K to L* transform unavailable"))
        .ok()?;

    let last = (n_points - 1) as f64;
    let cmyk: Vec<f32> = (0..n_points)
        .flat_map(|i| [0.0, 0.0, 0.0, (i as f64 * 100.0 / last) as f32])
        .collect();
    let mut lab = vec![0f64; 3 * n_points];
    xform
        .execute_slice(&cmyk, &mut lab, n_points)
        .inspect_err(|e| tracing::warn!(error = %e, "K to L* sampling failed"))
        .ok()?;

    let samples: Vec<f32> = lab
        .chunks_exact(3)
        .map(|lab| (1.0 - lab[0] / 100.0) as f32)
        .collect();
    ToneCurve::from_float_samples(&samples).ok()
}

/// Relationship between the black channel of `chain`'s first and last
/// profiles
///
/// The first `n - 1` links and the last link alone are each sampled from
/// K to lightness at `n_points` positions; the result is the first curve
/// joined with the inverse of the second. Both ends of the chain must be
/// CMYK, the last profile must be output class, and the joined curve must
/// be monotonic; otherwise `None`.
pub fn build_k_tone_curve<C: CmsBackend + ?Sized>(
    cms: &C,
    chain: &[ChainLink],
    n_points: usize,
    flags: TransformFlags,
) -> Option<ToneCurve> {
    let (first, last) = match chain {
        [first, .., last] => (first, last),
        _ => {
            tracing::debug!(links = chain.len(), "K curve needs at least two profiles");
            return None;
        }
    };
    if first.profile.color_space() != ColorSpace::Cmyk
        || last.profile.color_space() != ColorSpace::Cmyk
    {
        return None;
    }
    if last.profile.class() != ProfileClass::Output {
        return None;
    }
    if n_points < 2 {
        return None;
    }

    let split = chain.len() - 1;
    let input = k_to_lstar(cms, &chain[..split], n_points, flags)?;
    let output = k_to_lstar(cms, &chain[split..], n_points, flags)?;

    let joined = ToneCurve::join(&input, &output, n_points)
        .inspect_err(|e| tracing::warn!(error = %e, "K curve join failed"))
        .ok()?;

    if !joined.is_monotonic() {
        tracing::warn!(n_points, "joined K curve is not monotonic");
        return None;
    }
    tracing::debug!(n_points, links = chain.len(), "built K tone curve");
    Some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ReferenceCms;
    use crate::profile::Profile;
    use crate::types::RenderingIntent;

    fn links(profiles: &[Profile]) -> Vec<ChainLink> {
        profiles
            .iter()
            .map(|p| ChainLink::new(p.clone(), RenderingIntent::Perceptual))
            .collect()
    }

    #[test]
    fn test_k_curve_identity_chain() {
        let cms = ReferenceCms::default();
        let cmyk = Profile::naive_cmyk();
        let curve =
            build_k_tone_curve(&cms, &links(&[cmyk.clone(), cmyk]), 256, TransformFlags::new())
                .unwrap();
        assert!(curve.is_monotonic());
        for t in [0.0f32, 0.25, 0.5, 0.9, 1.0] {
            assert!((curve.eval_float(t) - t).abs() < 0.01, "t={t}: {}", curve.eval_float(t));
        }
    }

    #[test]
    fn test_k_curve_requires_cmyk_output() {
        let cms = ReferenceCms::default();
        let flags = TransformFlags::new();
        let cmyk = Profile::naive_cmyk();
        assert!(build_k_tone_curve(&cms, &links(&[cmyk.clone()]), 64, flags).is_none());
        assert!(
            build_k_tone_curve(&cms, &links(&[Profile::srgb(), cmyk.clone()]), 64, flags).is_none()
        );
        assert!(
            build_k_tone_curve(&cms, &links(&[cmyk.clone(), Profile::srgb()]), 64, flags).is_none()
        );
        assert!(build_k_tone_curve(&cms, &links(&[cmyk.clone(), cmyk]), 1, flags).is_none());
    }
}
