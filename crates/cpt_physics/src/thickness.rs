// crates/cpt_physics/src/thickness.rs

//! 液化层厚度扫描
//!
//! 由单个情景的 FS 剖面求 h1（非液化上覆层厚度，即液化层顶面深度）
//! 与 h2（液化层厚度）：
//!
//! - [`scan_basic`]: 最浅的连续液化层
//! - [`scan_cumulative`]: h1 取 10 m 以内首个厚度 > 0.3 m 的连续液化层，
//!   h2 为 10 m 以内所有液化行的厚度之和
//!
//! 连续性规则：FS < 1 的行若与上一个液化深度的间距 ≤ 0.3 m 则延伸当前层。
//! FS 缺失（NaN）时比较结果为 false。

use serde::{Deserialize, Serialize};

/// 液化深度间距阈值 [m]
pub const CONTIGUITY_GAP: f64 = 0.3;

/// 累计扫描的深度上限 [m]
pub const CUMULATIVE_DEPTH_LIMIT: f64 = 10.0;

/// 近地表判定深度 [m]
const SURFACE_DEPTH: f64 = 0.05;

/// h1 / h2
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerThickness {
    /// 液化层顶面深度 h1 [m]
    pub h1: f64,
    /// 液化层厚度 h2 [m]
    pub h2: f64,
}

impl LayerThickness {
    /// 创建
    pub fn new(h1: f64, h2: f64) -> Self {
        Self { h1, h2 }
    }
}

/// 正在延伸的液化层
#[derive(Debug, Clone, Copy)]
struct Run {
    start: f64,
    last: f64,
    h1_index: usize,
}

impl Run {
    #[inline]
    fn extends(run: Option<Run>, depth: f64, fs: f64) -> bool {
        fs < 1.0 && run.map_or(true, |r| depth - r.last <= CONTIGUITY_GAP)
    }

    #[inline]
    fn push(run: Option<Run>, index: usize, depth: f64) -> Run {
        match run {
            Some(r) => Run { last: depth, ..r },
            None => Run {
                start: depth,
                last: depth,
                h1_index: index.saturating_sub(1),
            },
        }
    }
}

/// 基本扫描
///
/// 无满足条件的液化层时 h1 为最大深度，h2 = 0。
pub fn scan_basic(depth: &[f64], fs: &[f64]) -> LayerThickness {
    let mut result = LayerThickness::new(depth.last().copied().unwrap_or(0.0), 0.0);
    let mut run: Option<Run> = None;

    for (i, (&z, &f)) in depth.iter().zip(fs).enumerate() {
        if Run::extends(run, z, f) {
            run = Some(Run::push(run, i, z));
        } else if let Some(r) = run {
            if z - r.last > CONTIGUITY_GAP {
                result = LayerThickness::new(depth[r.h1_index], r.last - r.start);
                break;
            }
        }
    }

    result
}

/// 累计扫描
///
/// h1 默认 10 m。液化层在被非延伸行截断时厚度须 > 0.3 m 才被采用，
/// 否则丢弃并继续扫描；超过 10 m 的首行只参与截断判断，随后停止。
pub fn scan_cumulative(depth: &[f64], fs: &[f64]) -> LayerThickness {
    let mut h1 = CUMULATIVE_DEPTH_LIMIT;
    let mut run: Option<Run> = None;

    for (i, (&z, &f)) in depth.iter().zip(fs).enumerate() {
        let within = z <= CUMULATIVE_DEPTH_LIMIT;
        if within && Run::extends(run, z, f) {
            run = Some(Run::push(run, i, z));
            continue;
        }
        if let Some(r) = run {
            if r.last - r.start > CONTIGUITY_GAP {
                h1 = depth[r.h1_index];
                break;
            }
        }
        run = None;
        if !within {
            break;
        }
    }

    LayerThickness::new(h1, cumulative_thickness(depth, fs))
}

/// 10 m 以内所有 0 < FS < 1 行的厚度之和
///
/// 首行厚度：近地表（z0 ≤ 0.05）取 z0，否则取到下一行的间距。
pub fn cumulative_thickness(depth: &[f64], fs: &[f64]) -> f64 {
    let mut h2 = 0.0;
    for (i, (&z, &f)) in depth.iter().zip(fs).enumerate() {
        if f > 0.0 && f < 1.0 && z <= CUMULATIVE_DEPTH_LIMIT {
            h2 += match i {
                0 if z > SURFACE_DEPTH => depth.get(1).map_or(0.0, |&next| next - z),
                0 => z,
                _ => z - depth[i - 1],
            };
        }
        if z > CUMULATIVE_DEPTH_LIMIT {
            break;
        }
    }
    h2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depths(n: usize, step: f64) -> Vec<f64> {
        (1..=n).map(|i| i as f64 * step).collect()
    }

    #[test]
    fn test_basic_no_liquefaction_defaults() {
        let z = depths(5, 0.5);
        let t = scan_basic(&z, &[2.0; 5]);
        assert_eq!(t, LayerThickness::new(2.5, 0.0));
    }

    #[test]
    fn test_basic_closed_run() {
        // 液化行 1.0–1.4（间距 0.2），1.6 非液化，2.0 与 1.4 间距 0.6 截断
        let z = vec![0.8, 1.0, 1.2, 1.4, 1.6, 2.0];
        let fs = vec![2.0, 0.5, 0.6, 0.7, 3.0, 3.0];
        let t = scan_basic(&z, &fs);
        assert_eq!(t.h1, 0.8);
        assert!((t.h2 - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_basic_run_at_first_row() {
        let z = vec![0.2, 0.4, 1.5];
        let fs = vec![0.5, 0.5, 2.0];
        let t = scan_basic(&z, &fs);
        assert_eq!(t.h1, 0.2);
        assert!((t.h2 - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_basic_open_run_keeps_defaults() {
        let z = vec![1.0, 1.2, 1.4];
        let t = scan_basic(&z, &[0.5, 0.5, 0.5]);
        assert_eq!(t, LayerThickness::new(1.4, 0.0));
    }

    #[test]
    fn test_nan_fs_does_not_extend() {
        let z = vec![1.0, 1.2];
        let t = scan_basic(&z, &[f64::NAN, f64::NAN]);
        assert_eq!(t, LayerThickness::new(1.2, 0.0));
    }

    #[test]
    fn test_cumulative_rejects_thin_run() {
        // 1.0 单行液化层（厚度 0）被 2.0 截断后丢弃；3.0–3.8 厚度 0.8 被 4.5 截断后采用
        let z = vec![0.5, 1.0, 2.0, 2.5, 3.0, 3.2, 3.4, 3.6, 3.8, 4.5];
        let fs = vec![2.0, 0.5, 2.0, 2.0, 0.5, 0.5, 0.5, 0.5, 0.5, 2.0];
        let t = scan_cumulative(&z, &fs);
        assert_eq!(t.h1, 2.5);
        let basic = scan_basic(&z, &fs);
        assert_eq!(basic.h1, 0.5);
        assert!(basic.h2 <= t.h2);
    }

    #[test]
    fn test_cumulative_defaults_to_ten() {
        let z = depths(30, 0.5);
        let t = scan_cumulative(&z, &vec![2.0; 30]);
        assert_eq!(t, LayerThickness::new(10.0, 0.0));
    }

    #[test]
    fn test_cumulative_thin_run_closed_below_limit() {
        // 9.9–10.0 液化层延伸到 10.2 时被截断，厚度 0.1 不足，扫描随即停止
        let z = vec![9.0, 9.9, 10.0, 10.2, 10.5];
        let fs = vec![2.0, 0.5, 0.5, 0.5, 2.0];
        let t = scan_cumulative(&z, &fs);
        assert_eq!(t.h1, 10.0);
        assert!((t.h2 - 1.0).abs() < 1e-9, "h2 = {}", t.h2);
    }

    #[test]
    fn test_cumulative_run_accepted_at_limit() {
        // 9.5–10.0 厚度 0.5，由 10.2 截断后采用，h1 取层顶上一行深度
        let z = vec![9.0, 9.5, 9.7, 9.9, 10.0, 10.2];
        let fs = vec![2.0, 0.5, 0.5, 0.5, 0.5, 0.5];
        let t = scan_cumulative(&z, &fs);
        assert_eq!(t.h1, 9.0);
        // 10.2 不计入 h2
        assert!((t.h2 - 1.0).abs() < 1e-9, "h2 = {}", t.h2);
    }

    #[test]
    fn test_cumulative_thickness_surface_rule() {
        assert_eq!(cumulative_thickness(&[0.02, 0.1], &[0.5, 2.0]), 0.02);
        assert!((cumulative_thickness(&[0.1, 0.3], &[0.5, 2.0]) - 0.2).abs() < 1e-12);
        // FS ≤ 0 与 10 m 以下不计
        assert_eq!(cumulative_thickness(&[0.1, 0.3, 10.5], &[0.0, 2.0, 0.5]), 0.0);
    }
}
