//! One-dimensional tone curves
//!
//! A curve is always backed by an evenly spaced 16-bit table. Curves built
//! from float samples keep the samples as well and evaluate them directly in
//! the float domain; the 16-bit table is then a 4096-entry cache.
//!
//! Inversion, composition and monotonicity checks all operate on the 16-bit
//! table, which bounds their accuracy to 16-bit resolution.

use crate::error::{Error, Result};
use crate::math::{lin_interp_16, lin_interp_f32, quick_saturate_word};

/// Entries in the 16-bit cache of a float curve
pub const FLOAT_CURVE_CACHE: usize = 4096;

/// Largest accepted 16-bit table
pub const MAX_TABLE_ENTRIES: usize = 65530;

// Sample count used by gamma estimation
const GAMMA_NODES: usize = 4097;

/// Sampled tone curve
#[derive(Debug, Clone, PartialEq)]
pub struct ToneCurve {
    table16: Vec<u16>,
    samples: Option<Vec<f32>>,
}

impl ToneCurve {
    /// Tabulated 16-bit curve over the whole `0..=0xFFFF` input domain
    pub fn from_table16(table: &[u16]) -> Result<Self> {
        if table.is_empty() || table.len() > MAX_TABLE_ENTRIES {
            return Err(Error::InvalidCurve(format!(
                "{} entries, expected 1..={MAX_TABLE_ENTRIES}",
                table.len()
            )));
        }
        Ok(Self {
            table16: table.to_vec(),
            samples: None,
        })
    }

    /// Tabulated float curve, samples evenly spaced over `[0, 1]`
    ///
    /// Inputs below 0 or above 1 evaluate to the first or last sample.
    pub fn from_float_samples(samples: &[f32]) -> Result<Self> {
        if samples.len() < 2 || samples.len() > MAX_TABLE_ENTRIES {
            return Err(Error::InvalidCurve(format!(
                "{} float samples, expected 2..={MAX_TABLE_ENTRIES}",
                samples.len()
            )));
        }
        if let Some(bad) = samples.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidCurve(format!("sample {bad} is not finite")));
        }

        let domain = (FLOAT_CURVE_CACHE - 1) as f32;
        let table16 = (0..FLOAT_CURVE_CACHE)
            .map(|i| {
                let y = lin_interp_f32(samples, i as f32 / domain);
                quick_saturate_word(y as f64 * 65535.0)
            })
            .collect();

        Ok(Self {
            table16,
            samples: Some(samples.to_vec()),
        })
    }

    /// `y = x^gamma`, tabulated as a float curve
    pub fn gamma(gamma: f64) -> Result<Self> {
        if !(gamma.is_finite() && gamma > 0.0) {
            return Err(Error::InvalidCurve(format!("gamma {gamma}")));
        }
        let domain = (FLOAT_CURVE_CACHE - 1) as f64;
        let samples: Vec<f32> = (0..FLOAT_CURVE_CACHE)
            .map(|i| (i as f64 / domain).powf(gamma) as f32)
            .collect();
        Self::from_float_samples(&samples)
    }

    /// The 16-bit table (the cache for float curves)
    pub fn table16(&self) -> &[u16] {
        &self.table16
    }

    /// Number of 16-bit table entries
    pub fn len(&self) -> usize {
        self.table16.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table16.is_empty()
    }

    /// Whether the curve keeps float samples
    pub fn is_float(&self) -> bool {
        self.samples.is_some()
    }

    /// Evaluate at a 16-bit input
    #[inline]
    pub fn eval_16(&self, v: u16) -> u16 {
        lin_interp_16(&self.table16, v)
    }

    /// Evaluate at a float input
    ///
    /// Float curves interpolate their samples; 16-bit curves round-trip the
    /// input through the table.
    pub fn eval_float(&self, v: f32) -> f32 {
        match &self.samples {
            Some(samples) => lin_interp_f32(samples, v),
            None => {
                let w = quick_saturate_word(v as f64 * 65535.0);
                self.eval_16(w) as f32 / 65535.0
            }
        }
    }

    /// First entry above last entry
    pub fn is_descending(&self) -> bool {
        match (self.table16.first(), self.table16.last()) {
            (Some(first), Some(last)) => first > last,
            _ => false,
        }
    }

    /// Monotonic in its overall direction, tolerating ripples of up to
    /// 2 units in the 16-bit table
    pub fn is_monotonic(&self) -> bool {
        let t = &self.table16;
        if t.len() < 2 {
            return true;
        }

        // Walk against the overall direction: no entry may climb over its
        // predecessor by more than the ripple allowance.
        if self.is_descending() {
            !climbs(t.iter().copied())
        } else {
            !climbs(t.iter().rev().copied())
        }
    }

    /// Functional inverse sampled at `n_samples` points
    ///
    /// For every output node the table interval containing it is searched
    /// and inverted linearly. Flat intervals resolve to their upper end on
    /// ascending curves and to their lower end on descending ones. Nodes
    /// that fall in no interval reuse the previous interval's line.
    pub fn reverse(&self, n_samples: usize) -> Result<Self> {
        if !(2..=MAX_TABLE_ENTRIES).contains(&n_samples) {
            return Err(Error::InvalidCurve(format!(
                "{n_samples} reverse samples, expected 2..={MAX_TABLE_ENTRIES}"
            )));
        }

        let ascending = !self.is_descending();
        let domain = (self.table16.len().max(2) - 1) as f64;
        let (mut a, mut b) = (0.0f64, 0.0f64);
        let mut out = Vec::with_capacity(n_samples);

        for i in 0..n_samples {
            let y = i as f64 * 65535.0 / (n_samples - 1) as f64;

            if let Some(j) = self.interval_of(y) {
                let x1 = self.table16[j] as f64;
                let x2 = self.table16[j + 1] as f64;
                let y1 = j as f64 * 65535.0 / domain;
                let y2 = (j + 1) as f64 * 65535.0 / domain;

                if x1 == x2 {
                    out.push(quick_saturate_word(if ascending { y2 } else { y1 }));
                    continue;
                }
                a = (y2 - y1) / (x2 - x1);
                b = y2 - a * x2;
            }
            out.push(quick_saturate_word(a * y + b));
        }

        Self::from_table16(&out)
    }

    /// Inverse at the float-curve cache resolution
    pub fn reversed(&self) -> Result<Self> {
        self.reverse(FLOAT_CURVE_CACHE)
    }

    /// Table interval `[j, j+1]` whose endpoints bracket `y`
    fn interval_of(&self, y: f64) -> Option<usize> {
        let t = &self.table16;
        if t.len() < 2 {
            return None;
        }
        let brackets = |i: usize| {
            let (y0, y1) = (t[i] as f64, t[i + 1] as f64);
            let (lo, hi) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
            y >= lo && y <= hi
        };

        let last = t.len() - 1;
        if t[0] < t[last] {
            (0..last).rev().find(|&i| brackets(i))
        } else {
            (0..last).find(|&i| brackets(i))
        }
    }

    /// `y⁻¹(x(t))` sampled at `n_points` evenly spaced `t`
    pub fn join(x: &ToneCurve, y: &ToneCurve, n_points: usize) -> Result<Self> {
        if n_points < 2 {
            return Err(Error::InvalidCurve(format!("{n_points} join points")));
        }
        let y_reversed = y.reverse(n_points)?;

        let samples: Vec<f32> = (0..n_points)
            .map(|i| {
                let t = i as f32 / (n_points - 1) as f32;
                y_reversed.eval_float(x.eval_float(t))
            })
            .collect();

        Self::from_float_samples(&samples)
    }

    /// Least-squares style gamma estimate
    ///
    /// Averages `ln(y) / ln(x)` over interior samples with `x > 0.07` and
    /// `0 < y < 1`. Returns `-1.0` when too few samples qualify or when the
    /// standard deviation exceeds `precision`.
    pub fn estimate_gamma(&self, precision: f64) -> f64 {
        let domain = (GAMMA_NODES - 1) as f64;
        let (mut sum, mut sum2, mut n) = (0.0f64, 0.0f64, 0.0f64);

        for i in 1..GAMMA_NODES - 1 {
            let x = i as f64 / domain;
            let y = self.eval_float(x as f32) as f64;

            // Lower 7% skipped: linear toe segments would skew the fit
            if y > 0.0 && y < 1.0 && x > 0.07 {
                let gamma = y.ln() / x.ln();
                sum += gamma;
                sum2 += gamma * gamma;
                n += 1.0;
            }
        }

        if n <= 1.0 {
            return -1.0;
        }

        let std = ((n * sum2 - sum * sum) / (n * (n - 1.0))).max(0.0).sqrt();
        if std > precision {
            return -1.0;
        }
        sum / n
    }
}

fn climbs(mut seq: impl Iterator<Item = u16>) -> bool {
    let Some(mut last) = seq.next() else {
        return false;
    };
    for v in seq {
        if v as i32 - last as i32 > 2 {
            return true;
        }
        last = v;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<u16> {
        (0..n).map(|i| (i * 65535 / (n - 1)) as u16).collect()
    }

    #[test]
    fn test_table16_eval_endpoints() {
        let curve = ToneCurve::from_table16(&ramp(256)).unwrap();
        assert_eq!(curve.eval_16(0), 0);
        assert_eq!(curve.eval_16(0xFFFF), 0xFFFF);
        assert!(!curve.is_float());
        assert!((curve.eval_float(0.5) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_float_curve_clamps_domain() {
        let curve = ToneCurve::from_float_samples(&[0.2, 0.4, 0.8]).unwrap();
        assert_eq!(curve.len(), FLOAT_CURVE_CACHE);
        assert!((curve.eval_float(-3.0) - 0.2).abs() < 1e-6);
        assert!((curve.eval_float(7.0) - 0.8).abs() < 1e-6);
        assert!((curve.eval_float(0.25) - 0.3).abs() < 1e-6);
        assert_eq!(curve.table16()[0], quick_saturate_word(0.2 * 65535.0));
    }

    #[test]
    fn test_invalid_curves_rejected() {
        assert!(ToneCurve::from_table16(&[]).is_err());
        assert!(ToneCurve::from_float_samples(&[1.0]).is_err());
        assert!(ToneCurve::from_float_samples(&[0.0, f32::NAN]).is_err());
        assert!(ToneCurve::gamma(0.0).is_err());
        assert!(ToneCurve::gamma(2.2).unwrap().reverse(1).is_err());
    }

    #[test]
    fn test_monotonic_with_ripple() {
        let mut t = ramp(64);
        t[10] = t[11] + 2;
        assert!(ToneCurve::from_table16(&t).unwrap().is_monotonic());
        t[10] = t[11] + 300;
        assert!(!ToneCurve::from_table16(&t).unwrap().is_monotonic());
    }

    #[test]
    fn test_descending_is_monotonic() {
        let t: Vec<u16> = ramp(32).into_iter().rev().collect();
        let curve = ToneCurve::from_table16(&t).unwrap();
        assert!(curve.is_descending());
        assert!(curve.is_monotonic());
    }

    #[test]
    fn test_tent_is_not_monotonic() {
        let tent: Vec<f32> = (0..33).map(|i| 1.0 - (i as f32 / 16.0 - 1.0).abs()).collect();
        let curve = ToneCurve::from_float_samples(&tent).unwrap();
        assert!(!curve.is_monotonic());
    }

    #[test]
    fn test_reverse_gamma() {
        let curve = ToneCurve::gamma(2.2).unwrap();
        let inverse = curve.reverse(4096).unwrap();
        for x in [0.1f32, 0.3, 0.5, 0.9] {
            let expected = x.powf(1.0 / 2.2);
            let got = inverse.eval_float(x);
            assert!((got - expected).abs() < 2e-3, "x={x}: {got} vs {expected}");
        }
    }

    #[test]
    fn test_reverse_descending() {
        let t: Vec<u16> = ramp(256).into_iter().rev().collect();
        let inverse = ToneCurve::from_table16(&t).unwrap().reverse(256).unwrap();
        assert!(inverse.is_descending());
        let mid = inverse.eval_16(0x4000) as i32;
        assert!((mid - 0xC000).abs() < 16, "mid={mid}");
    }

    #[test]
    fn test_join_same_curve_is_identity() {
        let curve = ToneCurve::gamma(1.8).unwrap();
        let joined = ToneCurve::join(&curve, &curve, 256).unwrap();
        assert!(joined.is_monotonic());
        for t in [0.0f32, 0.25, 0.5, 0.75, 1.0] {
            assert!((joined.eval_float(t) - t).abs() < 5e-3, "t={t}");
        }
    }

    #[test]
    fn test_estimate_gamma() {
        let g = ToneCurve::gamma(2.2).unwrap().estimate_gamma(0.01);
        assert!((g - 2.2).abs() < 0.01, "gamma={g}");

        let linear = ToneCurve::from_float_samples(&[0.0, 1.0]).unwrap();
        assert!((linear.estimate_gamma(0.01) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_estimate_gamma_rejects_non_power() {
        // Piecewise: linear then flat, the log ratio spreads widely
        let samples: Vec<f32> = (0..256).map(|i| (i as f32 / 128.0).min(0.999)).collect();
        let curve = ToneCurve::from_float_samples(&samples).unwrap();
        assert_eq!(curve.estimate_gamma(0.01), -1.0);
    }
}
