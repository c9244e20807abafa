// crates/cpt_physics/src/severity/lsn.rs

//! 液化严重性数 LSN (van Ballegooy et al. 2014)
//!
//! ```text
//! LSN = Σ ∫ 10 εv / z dz,   z ≤ 20 m 且 qc1Ncs 有定义的行
//! ```
//!
//! 体积应变 εv [%] 由 qc1Ncs 与 FS 查 Zhang et al. (2002) 曲线族得到：
//! 每条曲线 A_k(q) 是 qc1Ncs 的幂函数，相邻 FS 档之间线性插值。

use cpt_foundation::KahanSum;
use serde::{Deserialize, Serialize};

use super::{log_integral, row_interval};
use crate::constants::METHOD_DEPTH_LIMIT;

// ============================================================
// Zhang et al. (2002) 应变曲线
// ============================================================

#[inline]
fn a1(q: f64) -> f64 {
    102.0 * q.powf(-0.82)
}

#[inline]
fn a3(q: f64) -> f64 {
    2411.0 * q.powf(-1.45)
}

#[inline]
fn a5(q: f64) -> f64 {
    1701.0 * q.powf(-1.42)
}

#[inline]
fn a7(q: f64) -> f64 {
    1690.0 * q.powf(-1.46)
}

#[inline]
fn a9(q: f64) -> f64 {
    1430.0 * q.powf(-1.48)
}

#[inline]
fn a10(q: f64) -> f64 {
    64.0 * q.powf(-0.93)
}

#[inline]
fn a11(q: f64) -> f64 {
    11.0 * q.powf(-0.65)
}

#[inline]
fn a12(q: f64) -> f64 {
    9.7 * q.powf(-0.69)
}

#[inline]
fn a13(q: f64) -> f64 {
    7.6 * q.powf(-0.71)
}

/// A14 ≡ 0
const A14: f64 = 0.0;

/// 查表的 qc1Ncs 区间 [20, 200]
const Q_MIN: f64 = 20.0;
const Q_MAX: f64 = 200.0;

/// qc1Ncs 低于此值时应变取固定值
const Q_FLOOR: f64 = 33.0;
const FLOOR_STRAIN: f64 = 10.0;

/// FS 插值上限
const FS_CEILING: f64 = 2.0;

/// 两条曲线之间按 FS 插值：`(fs_hi − fs) · 10 · (ε_lo − ε_hi) + ε_hi`
///
/// 系数 10 对应 0.1 宽的 FS 档；最后一档 [1.3, 2] 沿用同一系数。
#[inline]
pub fn interpolate(lower_strain: f64, upper_strain: f64, upper_fs: f64, fs: f64) -> f64 {
    (upper_fs - fs) * 10.0 * (lower_strain - upper_strain) + upper_strain
}

#[inline]
fn within(value: f64, lo: f64, hi: f64) -> bool {
    lo <= value && value <= hi
}

/// 单行体积应变 εv [%]，无定义时为 NaN
///
/// 第二个返回值表示该行是否落入 qc1Ncs < 33 的固定应变区。
pub fn volumetric_strain(q: f64, fs: f64) -> (f64, bool) {
    let mut eps = f64::NAN;
    let mut below_range = false;

    let in_table = within(q, Q_MIN, Q_MAX);
    if in_table {
        if q < Q_FLOOR {
            eps = FLOOR_STRAIN;
            below_range = true;
        } else {
            eps = a1(q);
        }
    }

    // FS 档按顺序匹配，首个满足者生效
    if within(fs, 0.5, 0.6) && within(q, 147.0, Q_MAX) {
        eps = interpolate(a1(q), a3(q), 0.6, fs);
    } else if within(fs, 0.6, 0.7) && within(q, 110.0, Q_MAX) {
        let lower = if q < 147.0 { eps } else { a3(q) };
        eps = interpolate(lower, a5(q), 0.7, fs);
    } else if within(fs, 0.7, 0.8) && within(q, 80.0, Q_MAX) {
        let lower = if q < 110.0 { eps } else { a5(q) };
        eps = interpolate(lower, a7(q), 0.8, fs);
    } else if within(fs, 0.8, 0.9) && within(q, 60.0, Q_MAX) {
        let lower = if q < 80.0 { eps } else { a7(q) };
        eps = interpolate(lower, a9(q), 0.9, fs);
    } else if within(fs, 0.9, 1.0) && in_table {
        let lower = if q < 60.0 { eps } else { a9(q) };
        eps = interpolate(lower, a10(q), 1.0, fs);
    } else if within(fs, 1.0, 1.1) && in_table {
        eps = interpolate(a10(q), a11(q), 1.1, fs);
    } else if within(fs, 1.1, 1.2) && in_table {
        eps = interpolate(a11(q), a12(q), 1.2, fs);
    } else if within(fs, 1.2, 1.3) && in_table {
        eps = interpolate(a12(q), a13(q), 1.3, fs);
    } else if fs >= 1.3 && in_table {
        let fs = if fs > FS_CEILING { FS_CEILING } else { fs };
        eps = interpolate(a13(q), A14, FS_CEILING, fs);
    }

    (eps, below_range)
}

/// LSN 计算结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LsnResult {
    /// LSN
    pub lsn: f64,
    /// qc1Ncs < 33（固定应变 10%）的行数
    pub below_range: usize,
    /// 参与查表的行数（z ≤ 20 m 且 qc1Ncs 有定义）
    pub qualifying_rows: usize,
}

/// 计算 LSN
///
/// `qc1ncs` 与 `fs` 为单情景剖面，非数值行以 NaN 表示。首行不计入积分。
pub fn liquefaction_severity_number(depth: &[f64], qc1ncs: &[f64], fs: &[f64]) -> LsnResult {
    let mut sum = KahanSum::new();
    let mut result = LsnResult::default();

    for (i, ((&z, &q), &f)) in depth.iter().zip(qc1ncs).zip(fs).enumerate() {
        if !(z <= METHOD_DEPTH_LIMIT && !q.is_nan()) {
            continue;
        }
        result.qualifying_rows += 1;

        let (eps, below) = volumetric_strain(q, f);
        if below {
            result.below_range += 1;
        }

        if i == 0 || eps.is_nan() {
            continue;
        }
        if let Some((a, b)) = row_interval(depth, i) {
            sum.add(log_integral(10.0 * eps, a, b, "LSN"));
        }
    }

    result.lsn = sum.value();
    log::debug!(
        "LSN: qc1Ncs 低于查表范围的行 {}/{}",
        result.below_range,
        result.qualifying_rows
    );
    result
}
