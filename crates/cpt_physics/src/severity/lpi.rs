// crates/cpt_physics/src/severity/lpi.rs

//! 液化潜势指数 LPI (Iwasaki et al. 1978)
//!
//! ```text
//! LPI = Σ ∫ (1 − FS)(10 − 0.5 z) dz,   z ≤ 20 m 且 FS ≤ 1 的行
//! ```

use cpt_foundation::KahanSum;

use super::row_interval;
use crate::constants::METHOD_DEPTH_LIMIT;

/// ∫ (10 − 0.5 z) dz 在 [a, b] 上的值
#[inline]
fn depth_weight_integral(a: f64, b: f64) -> f64 {
    10.0 * (b - a) - 0.25 * (b * b - a * a)
}

/// 计算 LPI
///
/// `fs` 为单情景的安全系数剖面，非数值行以 NaN 表示。
pub fn liquefaction_potential_index(depth: &[f64], fs: &[f64]) -> f64 {
    let mut sum = KahanSum::new();
    for (i, (&z, &f)) in depth.iter().zip(fs).enumerate() {
        if z <= METHOD_DEPTH_LIMIT && f <= 1.0 {
            if let Some((a, b)) = row_interval(depth, i) {
                sum.add((1.0 - f) * depth_weight_integral(a, b));
            }
        }
    }
    sum.value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_liquefaction_is_zero() {
        let z = [1.0, 2.0, 3.0];
        assert_eq!(liquefaction_potential_index(&z, &[9999.0, 1.5, f64::NAN]), 0.0);
    }

    #[test]
    fn test_full_liquefaction_matches_closed_form() {
        // FS = 0 处处：∫_0^20 (10 − 0.5 z) dz = 100
        let z: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let fs = vec![0.0; z.len()];
        let lpi = liquefaction_potential_index(&z, &fs);
        assert!((lpi - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_deep_rows_excluded() {
        let z = [19.0, 20.0, 21.0];
        let lpi = liquefaction_potential_index(&z, &[2.0, 0.0, 0.0]);
        assert!((lpi - depth_weight_integral(19.0, 20.0)).abs() < 1e-12);
    }

    #[test]
    fn test_single_row_contributes_zero() {
        assert_eq!(liquefaction_potential_index(&[3.0], &[0.2]), 0.0);
    }
}
