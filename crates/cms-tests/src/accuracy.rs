//! Accuracy measurement over Lab buffers
//!
//! CIEDE2000 is the metric for round-trip checks; the library's own
//! estimators use CIE76, so both show up in the tests.

/// Statistics from a deltaE comparison
#[derive(Debug, Clone)]
pub struct DeltaEStats {
    pub mean: f64,
    pub max: f64,
    /// 95th percentile
    pub p95: f64,
    pub count: usize,
}

impl DeltaEStats {
    /// Every difference below 1.0
    pub fn is_excellent(&self) -> bool {
        self.max < 1.0
    }

    /// Every difference below 2.0
    pub fn is_good(&self) -> bool {
        self.max < 2.0
    }
}

fn hue_degrees(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a).to_degrees();
    if h < 0.0 { h + 360.0 } else { h }
}

/// CIEDE2000 between two Lab colors, unit weighting factors
pub fn delta_e_2000(lab1: [f64; 3], lab2: [f64; 3]) -> f64 {
    const POW25_7: f64 = 6_103_515_625.0;
    let [l1, a1, b1] = lab1;
    let [l2, a2, b2] = lab2;

    let c_avg = ((a1 * a1 + b1 * b1).sqrt() + (a2 * a2 + b2 * b2).sqrt()) / 2.0;
    let g = 0.5 * (1.0 - (c_avg.powi(7) / (c_avg.powi(7) + POW25_7)).sqrt());
    let (a1p, a2p) = (a1 * (1.0 + g), a2 * (1.0 + g));

    let c1p = (a1p * a1p + b1 * b1).sqrt();
    let c2p = (a2p * a2p + b2 * b2).sqrt();
    let h1p = hue_degrees(a1p, b1);
    let h2p = hue_degrees(a2p, b2);
    let chroma_product = c1p * c2p;

    let dh = if chroma_product == 0.0 {
        0.0
    } else {
        let d = h2p - h1p;
        if d > 180.0 {
            d - 360.0
        } else if d < -180.0 {
            d + 360.0
        } else {
            d
        }
    };
    let dh_big = 2.0 * chroma_product.sqrt() * (dh.to_radians() / 2.0).sin();

    let h_avg = if chroma_product == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_avg - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_avg).to_radians().cos()
        + 0.32 * (3.0 * h_avg + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_avg - 63.0).to_radians().cos();

    let c_avg_p = (c1p + c2p) / 2.0;
    let l_off = ((l1 + l2) / 2.0 - 50.0).powi(2);
    let s_l = 1.0 + 0.015 * l_off / (20.0 + l_off).sqrt();
    let s_c = 1.0 + 0.045 * c_avg_p;
    let s_h = 1.0 + 0.015 * c_avg_p * t;

    let theta = 30.0 * (-((h_avg - 275.0) / 25.0).powi(2)).exp();
    let r_c = 2.0 * (c_avg_p.powi(7) / (c_avg_p.powi(7) + POW25_7)).sqrt();
    let r_t = -r_c * (2.0 * theta.to_radians()).sin();

    let dl = (l2 - l1) / s_l;
    let dc = (c2p - c1p) / s_c;
    let dhs = dh_big / s_h;
    (dl * dl + dc * dc + dhs * dhs + r_t * dc * dhs).sqrt()
}

/// Pairwise CIEDE2000 statistics of two equally long Lab buffers
pub fn compare_lab_buffers(reference: &[[f64; 3]], result: &[[f64; 3]]) -> DeltaEStats {
    assert_eq!(reference.len(), result.len());

    let mut delta_es: Vec<f64> = reference
        .iter()
        .zip(result)
        .map(|(a, b)| delta_e_2000(*a, *b))
        .collect();
    delta_es.sort_by(|a, b| a.total_cmp(b));

    let count = delta_es.len();
    let mean = if count == 0 {
        0.0
    } else {
        delta_es.iter().sum::<f64>() / count as f64
    };
    let max = delta_es.last().copied().unwrap_or(0.0);
    let p95 = delta_es
        .get((count as f64 * 0.95) as usize)
        .copied()
        .unwrap_or(max);

    DeltaEStats {
        mean,
        max,
        p95,
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_e_same_color() {
        let lab = [50.0, 25.0, -25.0];
        assert!(delta_e_2000(lab, lab) < 1e-4);
    }

    #[test]
    fn test_delta_e_lightness_step() {
        let de = delta_e_2000([50.0, 0.0, 0.0], [51.0, 0.0, 0.0]);
        assert!(de > 0.0 && de < 2.0, "deltaE={de}");
    }

    #[test]
    fn test_delta_e_reference_pair() {
        // Sharma, Wu and Dalal test data, pair 1
        let de = delta_e_2000([50.0, 2.6772, -79.7751], [50.0, 0.0, -82.7485]);
        assert!((de - 2.0425).abs() < 1e-3, "deltaE={de}");
    }

    #[test]
    fn test_identical_buffers() {
        let buf = [[10.0, 5.0, -3.0], [90.0, -20.0, 40.0]];
        let stats = compare_lab_buffers(&buf, &buf);
        assert!(stats.is_excellent());
        assert_eq!(stats.count, 2);
    }
}
