//! Gamut Check Tests
//!
//! Proofing tables built over real chains: a gamut that contains the
//! source, a gamut that collapses chroma, and the chain position limits.

use chromapack_core::error::Error;
use chromapack_core::{
    ChainLink, Clut16, Profile, ProfileChain, ReferenceCms, RenderingIntent, build_gamut_check,
};
use cms_tests::{gray_chain, init_tracing};

fn node_value(clut: &Clut16, coords: &[u32]) -> u16 {
    let n = clut.grid_points()[0] as usize;
    let index = coords.iter().fold(0usize, |acc, &c| acc * n + c as usize);
    clut.table()[index]
}

fn srgb_chain() -> Vec<ChainLink> {
    vec![ChainLink::new(Profile::srgb(), RenderingIntent::Perceptual)]
}

#[test]
fn test_srgb_inside_cmyk_gamut() -> anyhow::Result<()> {
    init_tracing();
    let cms = ReferenceCms::default();
    let clut = build_gamut_check(&cms, &srgb_chain(), 1, &Profile::naive_cmyk())?;

    assert_eq!(clut.inputs(), 3);
    assert_eq!(clut.outputs(), 1);
    assert_eq!(clut.grid_points(), &[49, 49, 49]);
    let flagged = clut.table().iter().filter(|&&v| v != 0).count();
    assert_eq!(flagged, 0, "{flagged} nodes flagged out of gamut");
    Ok(())
}

#[test]
fn test_chroma_out_of_gray_gamut() -> anyhow::Result<()> {
    init_tracing();
    let cms = ReferenceCms::default();
    let gray = Profile::gray(2.2)?;
    let clut = build_gamut_check(&cms, &srgb_chain(), 1, &gray)?;

    let red = node_value(&clut, &[48, 0, 0]);
    let blue = node_value(&clut, &[0, 0, 48]);
    assert!(red > 50, "red={red}");
    assert!(blue > 50, "blue={blue}");

    for i in [0u32, 12, 24, 36, 48] {
        let v = node_value(&clut, &[i, i, i]);
        assert_eq!(v, 0, "neutral node {i} flagged: {v}");
    }
    Ok(())
}

#[test]
fn test_gamut_position_limits() {
    init_tracing();
    let cms = ReferenceCms::default();
    let gray = Profile::gray(1.0).unwrap();
    let chain = gray_chain(255);

    for position in [0usize, 256] {
        let err = build_gamut_check(&cms, &chain, position, &gray).unwrap_err();
        assert!(matches!(err, Error::Range { .. }), "position {position}: {err}");
    }

    for position in [1usize, 255] {
        let clut = build_gamut_check(&cms, &chain, position, &gray)
            .unwrap_or_else(|e| panic!("position {position}: {e}"));
        assert_eq!(clut.inputs(), 1);
        assert!(clut.table().iter().all(|&v| v == 0));
    }
}

#[test]
fn test_position_beyond_chain() {
    let cms = ReferenceCms::default();
    let chain = ProfileChain::from_profiles(
        &[Profile::srgb(), Profile::naive_cmyk()],
        RenderingIntent::Perceptual,
    )
    .unwrap();
    let err = build_gamut_check(&cms, chain.links(), 3, &Profile::naive_cmyk()).unwrap_err();
    assert!(matches!(err, Error::Range { value: 3, max: 2, .. }), "{err}");
}
