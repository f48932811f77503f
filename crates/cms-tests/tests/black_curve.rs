//! Black Tone Curve Tests
//!
//! K to K relationship across CMYK chains, including chains longer than
//! two profiles and a model whose black ink folds back on itself.

use chromapack_core::{
    ChainLink, Profile, ProfileChain, ReferenceCms, RenderingIntent, TransformFlags,
    build_k_tone_curve,
};
use cms_tests::{FoldedK, init_tracing};

fn chain(profiles: &[Profile]) -> Vec<ChainLink> {
    ProfileChain::from_profiles(profiles, RenderingIntent::Perceptual)
        .unwrap()
        .links()
        .to_vec()
}

#[test]
fn test_same_profile_gives_identity() {
    init_tracing();
    let cms = ReferenceCms::default();
    let cmyk = Profile::naive_cmyk();
    let curve = build_k_tone_curve(&cms, &chain(&[cmyk.clone(), cmyk]), 4096, TransformFlags::new())
        .unwrap();

    assert!(curve.is_monotonic());
    assert!(!curve.is_descending());
    for i in 0..=20 {
        let t = i as f32 / 20.0;
        let got = curve.eval_float(t);
        assert!((got - t).abs() < 0.01, "K {t}: {got}");
    }
}

#[test]
fn test_longer_chain() {
    // CMYK -> Lab -> CMYK: the Lab stage is transparent for K
    let cms = ReferenceCms::default();
    let cmyk = Profile::naive_cmyk();
    let links = chain(&[cmyk.clone(), Profile::lab_identity(), cmyk]);
    let curve = build_k_tone_curve(&cms, &links, 256, TransformFlags::new().with_no_cache())
        .unwrap();
    assert!((curve.eval_float(0.5) - 0.5).abs() < 0.01);
}

#[test]
fn test_folded_black_is_rejected() {
    init_tracing();
    let cms = ReferenceCms::default();
    let links = chain(&[Profile::new(FoldedK), Profile::naive_cmyk()]);
    assert!(build_k_tone_curve(&cms, &links, 256, TransformFlags::new()).is_none());
}

#[test]
fn test_last_profile_must_be_output_class() {
    let cms = ReferenceCms::default();
    let links = chain(&[Profile::naive_cmyk(), Profile::srgb()]);
    assert!(build_k_tone_curve(&cms, &links, 256, TransformFlags::new()).is_none());
    assert!(build_k_tone_curve(&cms, &[], 256, TransformFlags::new()).is_none());
}
