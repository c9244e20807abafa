// crates/cpt_physics/src/severity/mod.rs

//! 液化严重性指标
//!
//! - [`lpi`]: 液化潜势指数 LPI (Iwasaki et al. 1978)
//! - [`lpiish`]: LPI-ish (Maurer et al. 2015)，考虑非液化上覆层厚度 h1
//! - [`lsn`]: 液化严重性数 LSN (van Ballegooy et al. 2014)
//!
//! 三者都对单情景 FS 剖面逐行积分。第 i 行的积分区间为
//! `[z(i−1), z(i)]`；首行使用虚拟起点 `z0 − (z1 − z0)`。
//! 被积函数在每个区间上为常系数的线性函数或 1/z，积分按解析原函数精确计算。

pub mod lpi;
pub mod lpiish;
pub mod lsn;

pub use lpi::liquefaction_potential_index;
pub use lpiish::lpi_ish;
pub use lsn::{liquefaction_severity_number, LsnResult};

/// 第 i 行的积分区间
///
/// 首行在只有一行时没有可用的间距，返回 None。
#[inline]
pub(crate) fn row_interval(depth: &[f64], i: usize) -> Option<(f64, f64)> {
    let z = *depth.get(i)?;
    if i == 0 {
        let next = *depth.get(1)?;
        Some((z - (next - z), z))
    } else {
        Some((depth[i - 1], z))
    }
}

/// ∫ coefficient / z dz 在 [a, b] 上的值
///
/// 下限 ≤ 0 时积分发散，记录警告并跳过该区间。
#[inline]
pub(crate) fn log_integral(coefficient: f64, a: f64, b: f64, index: &str) -> f64 {
    if coefficient == 0.0 {
        return 0.0;
    }
    if a <= 0.0 {
        log::warn!(
            "{} 积分区间 [{}, {}] 下限非正，跳过该区间",
            index,
            a,
            b
        );
        return 0.0;
    }
    coefficient * (b / a).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_interval() {
        let z = [0.5, 0.7, 1.0];
        assert_eq!(row_interval(&z, 0), Some((0.5 - (0.7 - 0.5), 0.5)));
        assert_eq!(row_interval(&z, 2), Some((0.7, 1.0)));
        assert_eq!(row_interval(&[0.5], 0), None);
        assert_eq!(row_interval(&z, 3), None);
    }

    #[test]
    fn test_log_integral_skips_divergent() {
        assert_eq!(log_integral(1.0, -0.1, 0.2, "LSN"), 0.0);
        assert_eq!(log_integral(0.0, -0.1, 0.2, "LSN"), 0.0);
        assert!((log_integral(2.0, 1.0, std::f64::consts::E, "LSN") - 2.0).abs() < 1e-12);
    }
}
