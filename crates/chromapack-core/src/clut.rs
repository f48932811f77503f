//! 16-bit color lookup table stage
//!
//! Nodes are stored in raster order (last input dimension fastest), each
//! node holding `outputs` words. Evaluation is multilinear over the `2^N`
//! corners of the enclosing cell.

use crate::error::{Error, Result};
use crate::format::MAX_CHANNELS;
use crate::sampling::{MAX_INPUT_DIMENSIONS, checked_cube_size, grid_node};

/// Sampled N-input, M-output table of 16-bit values
#[derive(Debug, Clone, PartialEq)]
pub struct Clut16 {
    grid_points: Vec<u32>,
    outputs: usize,
    /// Word offset between neighbouring nodes along each dimension
    strides: Vec<usize>,
    table: Vec<u16>,
}

impl Clut16 {
    /// Zero-filled table with the given grid size per input dimension
    pub fn new(grid_points: &[u32], outputs: usize) -> Result<Self> {
        if outputs == 0 || outputs >= MAX_CHANNELS {
            return Err(Error::Range {
                what: "CLUT outputs",
                value: outputs,
                min: 1,
                max: MAX_CHANNELS - 1,
            });
        }
        let nodes = checked_cube_size(grid_points)?;
        let len = nodes.checked_mul(outputs).ok_or(Error::Allocation(usize::MAX))?;

        let mut table = Vec::new();
        table.try_reserve_exact(len).map_err(|_| Error::Allocation(len))?;
        table.resize(len, 0);

        let mut strides = vec![0; grid_points.len()];
        let mut stride = outputs;
        for (t, &n) in grid_points.iter().enumerate().rev() {
            strides[t] = stride;
            stride *= n as usize;
        }

        Ok(Self {
            grid_points: grid_points.to_vec(),
            outputs,
            strides,
            table,
        })
    }

    /// Same number of grid points on every input
    pub fn uniform(grid_points: u32, inputs: usize, outputs: usize) -> Result<Self> {
        if inputs == 0 || inputs > MAX_INPUT_DIMENSIONS {
            return Err(Error::Range {
                what: "CLUT inputs",
                value: inputs,
                min: 1,
                max: MAX_INPUT_DIMENSIONS,
            });
        }
        Self::new(&vec![grid_points; inputs], outputs)
    }

    pub fn inputs(&self) -> usize {
        self.grid_points.len()
    }

    pub fn outputs(&self) -> usize {
        self.outputs
    }

    pub fn grid_points(&self) -> &[u32] {
        &self.grid_points
    }

    /// Number of grid nodes
    pub fn nodes(&self) -> usize {
        self.table.len() / self.outputs
    }

    /// Raw node data
    pub fn table(&self) -> &[u16] {
        &self.table
    }

    /// Fill the table node by node in raster order
    ///
    /// The sampler receives the node's 16-bit coordinates and its current
    /// contents, which it may overwrite. Returning `false` stops sampling;
    /// the method then returns `false` and the table is left partially
    /// written.
    pub fn sample<F>(&mut self, mut sampler: F) -> bool
    where
        F: FnMut(&[u16], &mut [u16]) -> bool,
    {
        let dims = self.grid_points.len();
        let mut node = [0u16; MAX_INPUT_DIMENSIONS];

        for (i, out) in self.table.chunks_exact_mut(self.outputs).enumerate() {
            grid_node(i, &self.grid_points, &mut node[..dims]);
            if !sampler(&node[..dims], out) {
                return false;
            }
        }
        true
    }

    /// Parallel [`sample`](Self::sample). Nodes are visited in no particular
    /// order.
    #[cfg(feature = "parallel")]
    pub fn par_sample<F>(&mut self, sampler: F) -> bool
    where
        F: Fn(&[u16], &mut [u16]) -> bool + Sync,
    {
        use rayon::prelude::*;

        let dims = self.grid_points.len();
        let grid = &self.grid_points;
        self.table
            .par_chunks_mut(self.outputs)
            .enumerate()
            .all(|(i, out)| {
                let mut node = [0u16; MAX_INPUT_DIMENSIONS];
                grid_node(i, grid, &mut node[..dims]);
                sampler(&node[..dims], out)
            })
    }

    /// Walk the nodes without modifying them
    pub fn inspect<F>(&self, mut visitor: F) -> bool
    where
        F: FnMut(&[u16], &[u16]) -> bool,
    {
        let dims = self.grid_points.len();
        let mut node = [0u16; MAX_INPUT_DIMENSIONS];

        for (i, out) in self.table.chunks_exact(self.outputs).enumerate() {
            grid_node(i, &self.grid_points, &mut node[..dims]);
            if !visitor(&node[..dims], out) {
                return false;
            }
        }
        true
    }

    /// Interpolate at 16-bit coordinates
    ///
    /// # Panics
    ///
    /// Panics when `input` holds fewer than [`inputs`](Self::inputs) values.
    /// Only the first `min(output.len(), outputs)` results are written.
    pub fn eval_16(&self, input: &[u16], output: &mut [u16]) {
        assert!(
            input.len() >= self.inputs(),
            "CLUT needs {} inputs, got {}",
            self.inputs(),
            input.len()
        );
        let mut acc = [0f64; MAX_CHANNELS];
        self.interpolate(|t| input[t] as f64 / 65535.0, &mut acc);
        for (o, &v) in output.iter_mut().zip(&acc[..self.outputs]) {
            *o = crate::math::quick_saturate_word(v);
        }
    }

    /// Interpolate at unit coordinates, results scaled to `[0, 1]`
    ///
    /// Same input length precondition as [`eval_16`](Self::eval_16).
    pub fn eval_float(&self, input: &[f32], output: &mut [f32]) {
        assert!(
            input.len() >= self.inputs(),
            "CLUT needs {} inputs, got {}",
            self.inputs(),
            input.len()
        );
        let mut acc = [0f64; MAX_CHANNELS];
        self.interpolate(|t| input[t] as f64, &mut acc);
        for (o, &v) in output.iter_mut().zip(&acc[..self.outputs]) {
            *o = (v / 65535.0) as f32;
        }
    }

    fn interpolate(&self, unit: impl Fn(usize) -> f64, acc: &mut [f64; MAX_CHANNELS]) {
        let dims = self.grid_points.len();
        let mut frac = [0f64; MAX_INPUT_DIMENSIONS];
        let mut base = 0usize;

        for t in 0..dims {
            let last = (self.grid_points[t] - 1) as usize;
            let u = unit(t);
            let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 };
            let pos = u * last as f64;
            let cell = (pos.floor() as usize).min(last - 1);
            frac[t] = pos - cell as f64;
            base += cell * self.strides[t];
        }

        acc[..self.outputs].fill(0.0);
        for corner in 0..1usize << dims {
            let mut weight = 1.0;
            let mut offset = base;
            for t in 0..dims {
                if corner >> t & 1 == 1 {
                    weight *= frac[t];
                    offset += self.strides[t];
                } else {
                    weight *= 1.0 - frac[t];
                }
            }
            if weight == 0.0 {
                continue;
            }
            let node = &self.table[offset..offset + self.outputs];
            for (a, &v) in acc.iter_mut().zip(node) {
                *a += weight * v as f64;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_3d(grid: u32) -> Clut16 {
        let mut clut = Clut16::uniform(grid, 3, 3).unwrap();
        assert!(clut.sample(|input, out| {
            out.copy_from_slice(input);
            true
        }));
        clut
    }

    #[test]
    fn test_layout() {
        let clut = Clut16::new(&[2, 3, 4], 2).unwrap();
        assert_eq!(clut.nodes(), 24);
        assert_eq!(clut.table().len(), 48);
        assert_eq!(clut.strides, vec![24, 8, 2]);
    }

    #[test]
    fn test_identity_eval() {
        let clut = identity_3d(9);
        for rgb in [[0u16, 0, 0], [0xFFFF, 0xFFFF, 0xFFFF], [1234, 40000, 65000]] {
            let mut out = [0u16; 3];
            clut.eval_16(&rgb, &mut out);
            for k in 0..3 {
                assert!((out[k] as i32 - rgb[k] as i32).abs() <= 1, "{rgb:?} -> {out:?}");
            }
        }
    }

    #[test]
    #[should_panic(expected = "CLUT needs 3 inputs, got 2")]
    fn test_eval_short_input() {
        let clut = identity_3d(3);
        let mut out = [0u16; 3];
        clut.eval_16(&[0, 0], &mut out);
    }

    #[test]
    #[should_panic(expected = "CLUT needs 2 inputs, got 1")]
    fn test_eval_float_short_input() {
        let clut = Clut16::uniform(2, 2, 1).unwrap();
        let mut out = [0f32; 1];
        clut.eval_float(&[0.5], &mut out);
    }

    #[test]
    fn test_multilinear_midpoint() {
        let mut clut = Clut16::uniform(2, 2, 1).unwrap();
        clut.sample(|input, out| {
            out[0] = if input == [0xFFFF, 0xFFFF] { 40000 } else { 0 };
            true
        });
        let mut out = [0f32; 1];
        clut.eval_float(&[0.5, 0.5], &mut out);
        assert!((out[0] - 10000.0 / 65535.0).abs() < 1e-6);
    }

    #[test]
    fn test_sample_sees_previous_contents() {
        let mut clut = Clut16::uniform(3, 1, 1).unwrap();
        clut.sample(|_, out| {
            out[0] = 7;
            true
        });
        let mut seen = Vec::new();
        clut.sample(|_, out| {
            seen.push(out[0]);
            out[0] += 1;
            true
        });
        assert_eq!(seen, vec![7, 7, 7]);
        assert!(clut.inspect(|_, out| out[0] == 8));
    }

    #[test]
    fn test_sample_abort() {
        let mut clut = Clut16::uniform(5, 2, 1).unwrap();
        let mut count = 0;
        assert!(!clut.sample(|_, _| {
            count += 1;
            count < 4
        }));
        assert_eq!(count, 4);
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(Clut16::new(&[3, 3], 0).is_err());
        assert!(Clut16::new(&[3, 1], 1).is_err());
        assert!(Clut16::uniform(3, 0, 1).is_err());
        assert!(Clut16::uniform(3, 16, 1).is_err());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_par_sample_matches_sequential() {
        let sequential = identity_3d(5);
        let mut parallel = Clut16::uniform(5, 3, 3).unwrap();
        assert!(parallel.par_sample(|input, out| {
            out.copy_from_slice(input);
            true
        }));
        assert_eq!(sequential, parallel);
    }
}
