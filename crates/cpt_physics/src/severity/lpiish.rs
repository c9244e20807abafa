// crates/cpt_physics/src/severity/lpiish.rs

//! LPI-ish (Maurer et al. 2015)
//!
//! ```text
//! LPIish = Σ ∫ 25.56 c / z dz,   h1 ≤ z ≤ 20 m 且 z ≥ 0.4 m 的行
//! c = 1 − FS   若 FS ≤ 1 且 h1 · m(FS) ≤ 3，m(FS) = exp(5/(25.56 (1 − FS))) − 1
//! c = 0        其他
//! ```
//!
//! h1 来自厚度扫描，基本与累计两种 h1 各得一个结果。

use cpt_foundation::KahanSum;

use super::{log_integral, row_interval};
use crate::constants::METHOD_DEPTH_LIMIT;

/// 被积函数系数
pub const LPIISH_COEFFICIENT: f64 = 25.56;

/// 最小计入深度 [m]
pub const LPIISH_MIN_DEPTH: f64 = 0.4;

/// 上覆非液化层对地表表现的抑制系数 c
#[inline]
pub fn crust_factor(fs: f64, h1: f64) -> f64 {
    let m = (5.0 / (LPIISH_COEFFICIENT * (1.0 - fs))).exp() - 1.0;
    if fs <= 1.0 && h1 * m <= 3.0 {
        1.0 - fs
    } else {
        0.0
    }
}

/// 计算 LPI-ish
pub fn lpi_ish(depth: &[f64], fs: &[f64], h1: f64) -> f64 {
    let mut sum = KahanSum::new();
    for (i, (&z, &f)) in depth.iter().zip(fs).enumerate() {
        if !(h1 <= z && z <= METHOD_DEPTH_LIMIT) || z < LPIISH_MIN_DEPTH {
            continue;
        }
        if let Some((a, b)) = row_interval(depth, i) {
            let c = crust_factor(f, h1);
            sum.add(log_integral(LPIISH_COEFFICIENT * c, a, b, "LPI-ish"));
        }
    }
    sum.value()
}
