//! Reference transform engine
//!
//! The estimators only need two capabilities from a color management
//! system: build a transform from a profile chain, and run it over a pixel
//! buffer. [`CmsBackend`] and [`ColorTransform`] describe those two
//! capabilities; [`ReferenceCms`] implements them on top of
//! [`DeviceModel`]s and the formatter registry of a [`Context`].
//!
//! # Execution
//!
//! A transform unpacks pixels with the context's codecs, widens the
//! canonical vectors to unit doubles, evaluates the chain in double
//! precision, and packs the result:
//!
//! 1. Float codecs on both sides when either format is floating point,
//!    16-bit codecs otherwise
//! 2. All-integer transforms are precalculated into a [`Clut16`] unless
//!    [`TransformFlags::no_optimize`] is set
//! 3. All-integer transforms reuse the previous pixel's result when the
//!    input words repeat, unless [`TransformFlags::no_cache`] is set

pub mod models;

use std::fmt;
use std::sync::Arc;

use crate::clut::Clut16;
use crate::color::{Lab, MAX_ENCODEABLE_XYZ, Xyz};
use crate::context::{Context, TransformFlags};
use crate::error::{Error, Result};
use crate::format::{MAX_CHANNELS, PixelFormat, pixel_type};
use crate::formatters::{
    FloatVec, Pack16Fn, PackFloatFn, ReadCursor, Unpack16Fn, UnpackFloatFn, WordVec, WriteCursor,
};
use crate::math::quick_saturate_word;
use crate::profile::{ChainLink, DeviceModel, MAX_CHAIN_PROFILES, Profile};
use crate::sampling::{MAX_INPUT_DIMENSIONS, cube_size, reasonable_grid_points};
use crate::simd::{floats_to_unit_batch, unit_to_floats_batch, unit_to_words_batch, words_to_unit_batch};
use crate::types::{ColorSpace, ProfileClass, RenderingIntent};

/// Longest chain a transform accepts: a full caller chain plus one
/// terminal profile appended by the estimators
pub const MAX_TRANSFORM_LINKS: usize = MAX_CHAIN_PROFILES + 1;

/// Largest table an all-integer transform is precalculated into
pub const MAX_PRECALC_NODES: usize = 1 << 20;

/// Pixels converted per batch
const BLOCK: usize = 64;

/// A built transform
pub trait ColorTransform: Send + Sync {
    fn input_format(&self) -> PixelFormat;

    fn output_format(&self) -> PixelFormat;

    /// Convert `count` pixels
    ///
    /// Planar buffers hold `count` samples per plane.
    fn execute(&self, input: &[u8], output: &mut [u8], count: usize) -> Result<()>;

    /// [`execute`](Self::execute) over typed sample slices
    fn execute_slice<I: bytemuck::Pod, O: bytemuck::Pod>(
        &self,
        input: &[I],
        output: &mut [O],
        count: usize,
    ) -> Result<()>
    where
        Self: Sized,
    {
        self.execute(
            bytemuck::cast_slice(input),
            bytemuck::cast_slice_mut(output),
            count,
        )
    }
}

/// Transform construction capability
pub trait CmsBackend: Send + Sync {
    type Transform: ColorTransform;

    /// Build a transform through every link of `chain`
    fn create_transform(
        &self,
        chain: &[ChainLink],
        input: PixelFormat,
        output: PixelFormat,
        flags: TransformFlags,
    ) -> Result<Self::Transform>;

    /// Two-profile shortcut, no black point compensation, full adaptation
    fn create_simple_transform(
        &self,
        input_profile: &Profile,
        input: PixelFormat,
        output_profile: &Profile,
        output: PixelFormat,
        intent: RenderingIntent,
        flags: TransformFlags,
    ) -> Result<Self::Transform> {
        let chain = [
            ChainLink::new(input_profile.clone(), intent),
            ChainLink::new(output_profile.clone(), intent),
        ];
        self.create_transform(&chain, input, output, flags)
    }
}

/// In-crate backend evaluating [`DeviceModel`] chains
#[derive(Debug, Clone, Default)]
pub struct ReferenceCms {
    context: Context,
}

impl ReferenceCms {
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }
}

#[derive(Clone)]
enum Step {
    ToPcs {
        model: Arc<dyn DeviceModel>,
        intent: RenderingIntent,
        channels: usize,
    },
    FromPcs {
        model: Arc<dyn DeviceModel>,
        intent: RenderingIntent,
        channels: usize,
    },
    LabToXyz,
    XyzToLab,
}

impl Step {
    fn apply(&self, v: &mut [f64; MAX_CHANNELS]) {
        match self {
            Self::ToPcs {
                model,
                intent,
                channels,
            } => {
                let pcs = model.to_pcs(*intent, &v[..*channels]);
                v[..3].copy_from_slice(&pcs);
            }
            Self::FromPcs {
                model,
                intent,
                channels,
            } => {
                let pcs = [v[0], v[1], v[2]];
                model.from_pcs(*intent, pcs, &mut v[..*channels]);
            }
            Self::LabToXyz => {
                let xyz = Lab::new(v[0], v[1], v[2]).to_xyz();
                v[..3].copy_from_slice(&xyz.to_array());
            }
            Self::XyzToLab => {
                let lab = Lab::from_xyz(Xyz::new(v[0], v[1], v[2]));
                v[..3].copy_from_slice(&lab.to_array());
            }
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToPcs { model, intent, .. } => write!(f, "ToPcs({model:?}, {intent:?})"),
            Self::FromPcs { model, intent, .. } => write!(f, "FromPcs({model:?}, {intent:?})"),
            Self::LabToXyz => f.write_str("LabToXyz"),
            Self::XyzToLab => f.write_str("XyzToLab"),
        }
    }
}

/// Bridge between two PCS encodings, if one is needed
fn connect(current: ColorSpace, wanted: ColorSpace, steps: &mut Vec<Step>) -> Result<()> {
    match (current, wanted) {
        (a, b) if a == b => Ok(()),
        (ColorSpace::Lab, ColorSpace::Xyz) => {
            steps.push(Step::LabToXyz);
            Ok(())
        }
        (ColorSpace::Xyz, ColorSpace::Lab) => {
            steps.push(Step::XyzToLab);
            Ok(())
        }
        _ => Err(Error::ColorSpaceMismatch {
            expected: wanted.name(),
            found: current.name(),
        }),
    }
}

/// Evaluation steps for a chain, with its entry and exit spaces
fn resolve_chain(chain: &[ChainLink]) -> Result<(ColorSpace, ColorSpace, Vec<Step>)> {
    let Some(first) = chain.first() else {
        return Err(Error::Transform("empty profile chain".into()));
    };
    if chain.len() > MAX_TRANSFORM_LINKS {
        return Err(Error::Range {
            what: "profile chain length",
            value: chain.len(),
            min: 1,
            max: MAX_TRANSFORM_LINKS,
        });
    }

    let entry = first.profile.color_space();
    let mut current = entry;
    let mut steps = Vec::with_capacity(chain.len() + 2);

    for link in chain {
        let profile = &link.profile;
        let model = profile.model().clone();
        let device_to_pcs = matches!(profile.class(), ProfileClass::DeviceLink | ProfileClass::Abstract)
            || !current.is_pcs();

        if device_to_pcs {
            connect(current, profile.color_space(), &mut steps)?;
            steps.push(Step::ToPcs {
                model,
                intent: link.intent,
                channels: profile.color_space().channels(),
            });
            current = profile.pcs();
        } else {
            if !profile.model().supports_from_pcs() {
                return Err(Error::Transform(format!(
                    "{:?} profile cannot be used as output",
                    profile.class()
                )));
            }
            connect(current, profile.pcs(), &mut steps)?;
            steps.push(Step::FromPcs {
                model,
                intent: link.intent,
                channels: profile.color_space().channels(),
            });
            current = profile.color_space();
        }
    }
    Ok((entry, current, steps))
}

/// Descriptor must carry the space's channel count and, unless untagged,
/// the space itself
fn check_format(format: PixelFormat, space: ColorSpace) -> Result<()> {
    if format.channels() != space.channels() || space.channels() > MAX_INPUT_DIMENSIONS {
        return Err(Error::UnsupportedFormat(format!(
            "{format} has {} channels, {space} needs {}",
            format.channels(),
            space.channels()
        )));
    }
    if format.pixel_type() == pixel_type::ANY {
        return Ok(());
    }
    match format.color_space() {
        Some(found) if found == space => Ok(()),
        found => Err(Error::ColorSpaceMismatch {
            expected: space.name(),
            found: found.map_or("unknown", |s| s.name()),
        }),
    }
}

fn missing(format: PixelFormat) -> Error {
    tracing::warn!(?format, "no formatter for transform format");
    Error::UnsupportedFormat(format.to_string())
}

#[derive(Clone, Copy)]
enum Codecs {
    Word {
        unpack: Unpack16Fn,
        pack: Pack16Fn,
    },
    Float {
        unpack: UnpackFloatFn,
        pack: PackFloatFn,
    },
}

impl CmsBackend for ReferenceCms {
    type Transform = ReferenceTransform;

    fn create_transform(
        &self,
        chain: &[ChainLink],
        input: PixelFormat,
        output: PixelFormat,
        flags: TransformFlags,
    ) -> Result<ReferenceTransform> {
        let (entry, exit, steps) = resolve_chain(chain)?;
        check_format(input, entry)?;
        check_format(output, exit)?;

        let registry = self.context.registry();
        let codecs = if input.is_float() || output.is_float() {
            Codecs::Float {
                unpack: registry.unpack_float(input).ok_or_else(|| missing(input))?,
                pack: registry.pack_float(output).ok_or_else(|| missing(output))?,
            }
        } else {
            Codecs::Word {
                unpack: registry.unpack_16(input).ok_or_else(|| missing(input))?,
                pack: registry.pack_16(output).ok_or_else(|| missing(output))?,
            }
        };

        let mut transform = ReferenceTransform {
            input,
            output,
            entry,
            exit,
            steps,
            codecs,
            precalc: None,
            cache: None,
        };

        if let Codecs::Word { .. } = codecs {
            if !flags.no_optimize {
                transform.precalc = transform.precalculate(&flags)?;
            }
            if !flags.no_cache {
                let zero = [0u16; MAX_CHANNELS];
                let mut out = [0u16; MAX_CHANNELS];
                transform.eval_words(&zero, &mut out);
                transform.cache = Some((zero, out));
            }
        }

        tracing::debug!(
            links = chain.len(),
            steps = transform.steps.len(),
            entry = %entry,
            exit = %exit,
            float = matches!(codecs, Codecs::Float { .. }),
            precalc = transform.precalc.is_some(),
            simd = crate::simd::active_features(),
            "built transform"
        );
        Ok(transform)
    }
}

/// Transform built by [`ReferenceCms`]
pub struct ReferenceTransform {
    input: PixelFormat,
    output: PixelFormat,
    entry: ColorSpace,
    exit: ColorSpace,
    steps: Vec<Step>,
    codecs: Codecs,
    precalc: Option<Clut16>,
    /// Input and output words of the last evaluated pixel
    cache: Option<(WordVec, WordVec)>,
}

impl fmt::Debug for ReferenceTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceTransform")
            .field("input", &self.input)
            .field("output", &self.output)
            .field("steps", &self.steps)
            .field("precalc", &self.precalc.as_ref().map(|c| c.grid_points()))
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

impl ReferenceTransform {
    /// Space of the first profile's device side
    pub fn entry_space(&self) -> ColorSpace {
        self.entry
    }

    /// Space the last link produces
    pub fn exit_space(&self) -> ColorSpace {
        self.exit
    }

    pub fn is_precalculated(&self) -> bool {
        self.precalc.is_some()
    }

    fn precalculate(&self, flags: &TransformFlags) -> Result<Option<Clut16>> {
        let grid = vec![reasonable_grid_points(self.entry, flags); self.entry.channels()];
        match cube_size(&grid) {
            Some(nodes) if nodes <= MAX_PRECALC_NODES => {}
            _ => {
                tracing::debug!(?grid, "grid too large, evaluating per pixel");
                return Ok(None);
            }
        }

        let mut clut = Clut16::new(&grid, self.exit.channels())?;
        let n_out = self.exit.channels();
        let mut unit_in = [0f64; MAX_CHANNELS];
        let mut unit_out = [0f64; MAX_CHANNELS];
        clut.sample(|node, out| {
            words_to_unit_batch(node, &mut unit_in);
            self.eval_unit(&unit_in[..node.len()], &mut unit_out[..n_out], true);
            for (o, &u) in out.iter_mut().zip(&unit_out[..n_out]) {
                *o = quick_saturate_word(u * 65535.0);
            }
            true
        });
        Ok(Some(clut))
    }

    /// Evaluate one pixel in the unit domain of the canonical vectors
    fn eval_unit(&self, input: &[f64], output: &mut [f64], words: bool) {
        let mut v = [0f64; MAX_CHANNELS];
        decode(self.entry, input, &mut v);
        for step in &self.steps {
            step.apply(&mut v);
        }
        encode(self.exit, &v, output, words);
    }

    /// Evaluate one pixel of 16-bit canonical words
    fn eval_words(&self, input: &WordVec, output: &mut WordVec) {
        let n_in = self.entry.channels();
        let n_out = self.exit.channels();
        if let Some(clut) = &self.precalc {
            clut.eval_16(&input[..n_in], &mut output[..n_out]);
            return;
        }
        let mut unit_in = [0f64; MAX_CHANNELS];
        let mut unit_out = [0f64; MAX_CHANNELS];
        words_to_unit_batch(&input[..n_in], &mut unit_in);
        self.eval_unit(&unit_in[..n_in], &mut unit_out[..n_out], true);
        unit_to_words_batch(&unit_out[..n_out], &mut output[..n_out]);
    }

    fn check_buffers(&self, input: &[u8], output: &[u8], count: usize) -> Result<()> {
        for (format, len) in [(self.input, input.len()), (self.output, output.len())] {
            let expected = count
                .checked_mul(format.pixel_size())
                .ok_or(Error::BufferSize {
                    expected: usize::MAX,
                    actual: len,
                })?;
            if len < expected {
                return Err(Error::BufferSize {
                    expected,
                    actual: len,
                });
            }
        }
        Ok(())
    }

    fn execute_words(
        &self,
        unpack: Unpack16Fn,
        pack: Pack16Fn,
        input: &[u8],
        output: &mut [u8],
        count: usize,
    ) -> Result<()> {
        let n_in = self.entry.channels();
        let n_out = self.exit.channels();
        let in_stride = count * self.input.sample_size();
        let out_stride = count * self.output.sample_size();
        let mut reader = ReadCursor::new(input);
        let mut writer = WriteCursor::new(output);

        let mut ins = [0u16; BLOCK * MAX_CHANNELS];
        let mut outs = [0u16; BLOCK * MAX_CHANNELS];
        let mut unit_in = [0f64; BLOCK * MAX_CHANNELS];
        let mut unit_out = [0f64; BLOCK * MAX_CHANNELS];
        let mut hit = [false; BLOCK];
        let mut cache = self.cache;
        let mut w: WordVec = [0; MAX_CHANNELS];

        let mut done = 0;
        while done < count {
            let k = (count - done).min(BLOCK);

            for i in 0..k {
                unpack(self.input, &mut w, &mut reader, in_stride)?;
                ins[i * n_in..(i + 1) * n_in].copy_from_slice(&w[..n_in]);
            }

            for i in 0..k {
                let current = &ins[i * n_in..(i + 1) * n_in];
                hit[i] = match (&cache, i) {
                    (None, _) => false,
                    (Some((prev_in, _)), 0) => current == &prev_in[..n_in],
                    (Some(_), _) => current == &ins[(i - 1) * n_in..i * n_in],
                };
            }

            if let Some(clut) = &self.precalc {
                for i in (0..k).filter(|&i| !hit[i]) {
                    clut.eval_16(
                        &ins[i * n_in..(i + 1) * n_in],
                        &mut outs[i * n_out..(i + 1) * n_out],
                    );
                }
            } else {
                words_to_unit_batch(&ins[..k * n_in], &mut unit_in[..k * n_in]);
                for i in (0..k).filter(|&i| !hit[i]) {
                    self.eval_unit(
                        &unit_in[i * n_in..(i + 1) * n_in],
                        &mut unit_out[i * n_out..(i + 1) * n_out],
                        true,
                    );
                }
                unit_to_words_batch(&unit_out[..k * n_out], &mut outs[..k * n_out]);
            }

            for i in 0..k {
                if !hit[i] {
                    continue;
                }
                if i == 0 {
                    if let Some((_, prev_out)) = &cache {
                        outs[..n_out].copy_from_slice(&prev_out[..n_out]);
                    }
                } else {
                    outs.copy_within((i - 1) * n_out..i * n_out, i * n_out);
                }
            }

            if let Some((prev_in, prev_out)) = &mut cache {
                prev_in[..n_in].copy_from_slice(&ins[(k - 1) * n_in..k * n_in]);
                prev_out[..n_out].copy_from_slice(&outs[(k - 1) * n_out..k * n_out]);
            }

            for i in 0..k {
                w[..n_out].copy_from_slice(&outs[i * n_out..(i + 1) * n_out]);
                pack(self.output, &w, &mut writer, out_stride)?;
            }
            done += k;
        }
        Ok(())
    }

    fn execute_floats(
        &self,
        unpack: UnpackFloatFn,
        pack: PackFloatFn,
        input: &[u8],
        output: &mut [u8],
        count: usize,
    ) -> Result<()> {
        let n_in = self.entry.channels();
        let n_out = self.exit.channels();
        let in_stride = count * self.input.sample_size();
        let out_stride = count * self.output.sample_size();
        let mut reader = ReadCursor::new(input);
        let mut writer = WriteCursor::new(output);

        let mut ins = [0f32; BLOCK * MAX_CHANNELS];
        let mut outs = [0f32; BLOCK * MAX_CHANNELS];
        let mut unit_in = [0f64; BLOCK * MAX_CHANNELS];
        let mut unit_out = [0f64; BLOCK * MAX_CHANNELS];
        let mut f: FloatVec = [0.0; MAX_CHANNELS];

        let mut done = 0;
        while done < count {
            let k = (count - done).min(BLOCK);

            for i in 0..k {
                unpack(self.input, &mut f, &mut reader, in_stride)?;
                ins[i * n_in..(i + 1) * n_in].copy_from_slice(&f[..n_in]);
            }
            floats_to_unit_batch(&ins[..k * n_in], &mut unit_in[..k * n_in]);
            for i in 0..k {
                self.eval_unit(
                    &unit_in[i * n_in..(i + 1) * n_in],
                    &mut unit_out[i * n_out..(i + 1) * n_out],
                    false,
                );
            }
            unit_to_floats_batch(&unit_out[..k * n_out], &mut outs[..k * n_out]);
            for i in 0..k {
                f[..n_out].copy_from_slice(&outs[i * n_out..(i + 1) * n_out]);
                pack(self.output, &f, &mut writer, out_stride)?;
            }
            done += k;
        }
        Ok(())
    }
}

impl ColorTransform for ReferenceTransform {
    fn input_format(&self) -> PixelFormat {
        self.input
    }

    fn output_format(&self) -> PixelFormat {
        self.output
    }

    fn execute(&self, input: &[u8], output: &mut [u8], count: usize) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        self.check_buffers(input, output, count)?;
        match self.codecs {
            Codecs::Word { unpack, pack } => self.execute_words(unpack, pack, input, output, count),
            Codecs::Float { unpack, pack } => {
                self.execute_floats(unpack, pack, input, output, count)
            }
        }
    }
}

/// Canonical unit values to real coordinates of `space`
fn decode(space: ColorSpace, unit: &[f64], v: &mut [f64; MAX_CHANNELS]) {
    match space {
        ColorSpace::Lab => {
            v[0] = unit[0] * 100.0;
            v[1] = unit[1] * 255.0 - 128.0;
            v[2] = unit[2] * 255.0 - 128.0;
        }
        ColorSpace::Xyz => {
            for (d, &u) in v.iter_mut().zip(unit) {
                *d = u * MAX_ENCODEABLE_XYZ;
            }
        }
        _ => v[..unit.len()].copy_from_slice(unit),
    }
}

/// Real coordinates of `space` to canonical unit values
///
/// On the 16-bit path an XYZ with no luminance encodes as black.
fn encode(space: ColorSpace, v: &[f64; MAX_CHANNELS], unit: &mut [f64], words: bool) {
    match space {
        ColorSpace::Lab => {
            unit[0] = v[0] / 100.0;
            unit[1] = (v[1] + 128.0) / 255.0;
            unit[2] = (v[2] + 128.0) / 255.0;
        }
        ColorSpace::Xyz if words && v[1] <= 0.0 => unit[..3].fill(0.0),
        ColorSpace::Xyz => {
            for (u, &d) in unit.iter_mut().zip(v) {
                *u = d / MAX_ENCODEABLE_XYZ;
            }
        }
        _ => {
            let n = unit.len();
            unit.copy_from_slice(&v[..n]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::delta_e_76;

    const REL: RenderingIntent = RenderingIntent::RelativeColorimetric;

    fn link(profile: Profile) -> ChainLink {
        ChainLink::new(profile, REL)
    }

    fn cms() -> ReferenceCms {
        ReferenceCms::default()
    }

    #[test]
    fn test_resolve_inserts_pcs_bridge() {
        let (entry, exit, steps) =
            resolve_chain(&[link(Profile::srgb()), link(Profile::lab_identity())]).unwrap();
        assert_eq!(entry, ColorSpace::Rgb);
        assert_eq!(exit, ColorSpace::Lab);
        assert_eq!(steps.len(), 3);
        assert!(matches!(steps[1], Step::XyzToLab));
    }

    #[test]
    fn test_resolve_device_to_device() {
        let (entry, exit, steps) =
            resolve_chain(&[link(Profile::srgb()), link(Profile::naive_cmyk())]).unwrap();
        assert_eq!((entry, exit), (ColorSpace::Rgb, ColorSpace::Cmyk));
        assert!(matches!(steps.last(), Some(Step::FromPcs { channels: 4, .. })));
    }

    #[test]
    fn test_resolve_errors() {
        assert!(resolve_chain(&[]).is_err());

        let lab = link(Profile::lab_identity());
        let chain = vec![lab.clone(); MAX_TRANSFORM_LINKS];
        assert!(resolve_chain(&chain).is_ok());
        let chain = vec![lab; MAX_TRANSFORM_LINKS + 1];
        assert!(matches!(resolve_chain(&chain), Err(Error::Range { .. })));
    }

    #[test]
    fn test_format_must_match_chain() {
        let chain = [link(Profile::srgb()), link(Profile::lab_identity())];
        let err = cms()
            .create_transform(&chain, PixelFormat::CMYK_16, PixelFormat::LAB_DBL, TransformFlags::new())
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));

        let err = cms()
            .create_transform(&chain, PixelFormat::RGB_8, PixelFormat::XYZ_DBL, TransformFlags::new())
            .unwrap_err();
        assert!(matches!(err, Error::ColorSpaceMismatch { .. }));
    }

    #[test]
    fn test_srgb_white_to_lab() {
        let t = cms()
            .create_simple_transform(
                &Profile::srgb(),
                PixelFormat::RGB_8,
                &Profile::lab_identity(),
                PixelFormat::LAB_DBL,
                REL,
                TransformFlags::new(),
            )
            .unwrap();
        let mut lab = [0f64; 6];
        t.execute_slice(&[255u8, 255, 255, 0, 0, 0], &mut lab, 2).unwrap();
        assert!((lab[0] - 100.0).abs() < 0.05, "L={}", lab[0]);
        assert!(lab[1].abs() < 0.05 && lab[2].abs() < 0.05, "{lab:?}");
        assert!(lab[3].abs() < 1e-9);
    }

    #[test]
    fn test_precalc_close_to_exact() {
        let chain = [link(Profile::srgb()), link(Profile::srgb())];
        let exact = cms()
            .create_transform(&chain, PixelFormat::RGB_16, PixelFormat::RGB_16, TransformFlags::new().with_no_optimize())
            .unwrap();
        let fast = cms()
            .create_transform(&chain, PixelFormat::RGB_16, PixelFormat::RGB_16, TransformFlags::new())
            .unwrap();
        assert!(!exact.is_precalculated());
        assert!(fast.is_precalculated());

        let input: Vec<u16> = (0..300u32).map(|i| (i * 7919 % 65536) as u16).collect();
        let mut a = vec![0u16; 300];
        let mut b = vec![0u16; 300];
        exact.execute_slice(&input, &mut a, 100).unwrap();
        fast.execute_slice(&input, &mut b, 100).unwrap();
        for i in 0..300 {
            assert!((a[i] as i32 - input[i] as i32).abs() <= 1, "exact {i}");
            assert!((a[i] as i32 - b[i] as i32).abs() < 800, "precalc {i}: {} vs {}", a[i], b[i]);
        }
    }

    #[test]
    fn test_cache_matches_uncached() {
        let chain = [link(Profile::srgb()), link(Profile::naive_cmyk())];
        let flags = TransformFlags::new().with_no_optimize();
        let cached = cms()
            .create_transform(&chain, PixelFormat::RGB_8, PixelFormat::CMYK_8, flags)
            .unwrap();
        let plain = cms()
            .create_transform(&chain, PixelFormat::RGB_8, PixelFormat::CMYK_8, flags.with_no_cache())
            .unwrap();

        // Runs of repeated pixels across a block boundary
        let mut input = Vec::new();
        for i in 0..150u32 {
            let v = (i / 10 * 17) as u8;
            input.extend_from_slice(&[v, 255 - v, 0]);
        }
        let mut a = vec![0u8; 600];
        let mut b = vec![0u8; 600];
        cached.execute(&input, &mut a, 150).unwrap();
        plain.execute(&input, &mut b, 150).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_planar_and_short_buffers() {
        let chain = [link(Profile::srgb()), link(Profile::srgb())];
        let t = cms()
            .create_transform(
                &chain,
                PixelFormat::RGB_8_PLANAR,
                PixelFormat::RGB_8,
                TransformFlags::new().with_no_optimize(),
            )
            .unwrap();
        // Planes: R R, G G, B B
        let input = [10u8, 200, 20, 210, 30, 220];
        let mut out = [0u8; 6];
        t.execute(&input, &mut out, 2).unwrap();
        assert_eq!(out, [10, 20, 30, 200, 210, 220]);

        let mut short = [0u8; 5];
        assert!(matches!(
            t.execute(&input, &mut short, 2),
            Err(Error::BufferSize { expected: 6, actual: 5 })
        ));
    }

    #[test]
    fn test_cmyk_lab_roundtrip_float() {
        let to_lab = cms()
            .create_simple_transform(
                &Profile::naive_cmyk(),
                PixelFormat::CMYK_FLT,
                &Profile::lab_identity(),
                PixelFormat::LAB_DBL,
                REL,
                TransformFlags::new(),
            )
            .unwrap();
        let from_lab = cms()
            .create_simple_transform(
                &Profile::lab_identity(),
                PixelFormat::LAB_DBL,
                &Profile::naive_cmyk(),
                PixelFormat::CMYK_FLT,
                REL,
                TransformFlags::new(),
            )
            .unwrap();

        let cmyk = [0.0f32, 40.0, 70.0, 10.0];
        let mut lab = [0f64; 3];
        to_lab.execute_slice(&cmyk, &mut lab, 1).unwrap();
        let mut back = [0f32; 4];
        from_lab.execute_slice(&lab, &mut back, 1).unwrap();
        let mut again = [0f64; 3];
        to_lab.execute_slice(&back, &mut again, 1).unwrap();

        let de = delta_e_76(Lab::from_array(lab), Lab::from_array(again));
        assert!(de < 1e-3, "dE={de}");
    }

    #[test]
    fn test_output_only_model_rejected() {
        #[derive(Debug)]
        struct InputOnly;
        impl DeviceModel for InputOnly {
            fn color_space(&self) -> ColorSpace {
                ColorSpace::Gray
            }
            fn class(&self) -> ProfileClass {
                ProfileClass::Input
            }
            fn supports_from_pcs(&self) -> bool {
                false
            }
            fn to_pcs(&self, _: RenderingIntent, device: &[f64]) -> [f64; 3] {
                [device[0] * 100.0, 0.0, 0.0]
            }
            fn from_pcs(&self, _: RenderingIntent, _: [f64; 3], _: &mut [f64]) {}
        }

        let chain = [link(Profile::srgb()), link(Profile::new(InputOnly))];
        let err = cms()
            .create_transform(&chain, PixelFormat::RGB_8, PixelFormat::GRAY_8, TransformFlags::new())
            .unwrap_err();
        assert!(matches!(err, Error::Transform(_)));
    }

    #[test]
    fn test_transform_spaces() {
        let chain = [link(Profile::srgb()), link(Profile::lab_identity())];
        let t = cms()
            .create_transform(&chain, PixelFormat::RGB_8, PixelFormat::LAB_DBL, TransformFlags::new())
            .unwrap();
        assert_eq!(t.entry_space(), ColorSpace::Rgb);
        assert_eq!(t.exit_space(), ColorSpace::Lab);
        // Float output never precalculates
        assert!(!t.is_precalculated());
    }
}
