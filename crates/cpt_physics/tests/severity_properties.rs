// crates/cpt_physics/tests/severity_properties.rs

//! 液化层厚度与严重性指标的随机性质测试（固定种子）

use cpt_physics::severity::lpiish::crust_factor;
use cpt_physics::severity::lsn::volumetric_strain;
use cpt_physics::{
    liquefaction_potential_index, liquefaction_severity_number, lpi_ish, scan_basic,
    scan_cumulative,
};
use rand::prelude::*;
use rand::rngs::StdRng;

// ============================================================
// 随机剖面
// ============================================================

/// 不等间距深度序列，z0 ∈ [0.1, 0.5)
fn random_depths(rng: &mut StdRng, rows: usize, max_step: f64) -> Vec<f64> {
    let mut z = rng.gen_range(0.1..0.5);
    (0..rows)
        .map(|_| {
            let current = z;
            z += rng.gen_range(0.02..max_step);
            current
        })
        .collect()
}

/// FS ≥ 0，含地下水位以上的 9999
fn random_fs(rng: &mut StdRng, rows: usize) -> Vec<f64> {
    (0..rows)
        .map(|_| match rng.gen_range(0..10) {
            0 => 9999.0,
            1..=4 => rng.gen_range(0.0..1.0),
            _ => rng.gen_range(1.0..2.5),
        })
        .collect()
}

// ============================================================
// LPI / LPI-ish
// ============================================================

#[test]
fn test_lpi_non_negative() {
    let mut rng = StdRng::seed_from_u64(2014);
    for _ in 0..200 {
        let rows = rng.gen_range(2..80);
        let z = random_depths(&mut rng, rows, 0.6);
        let fs = random_fs(&mut rng, rows);
        let lpi = liquefaction_potential_index(&z, &fs);
        assert!(lpi >= 0.0, "LPI = {}", lpi);
    }
}

#[test]
fn test_lpi_grows_as_fs_drops() {
    let mut rng = StdRng::seed_from_u64(1978);
    for _ in 0..100 {
        let rows = rng.gen_range(2..60);
        let z = random_depths(&mut rng, rows, 0.5);
        let fs = random_fs(&mut rng, rows);
        let weaker: Vec<f64> = fs.iter().map(|f| f * 0.5).collect();
        let base = liquefaction_potential_index(&z, &fs);
        let lowered = liquefaction_potential_index(&z, &weaker);
        assert!(lowered + 1e-9 >= base);
    }
}

#[test]
fn test_lpi_ish_non_negative_for_both_h1() {
    let mut rng = StdRng::seed_from_u64(2015);
    for _ in 0..200 {
        let rows = rng.gen_range(2..80);
        let z = random_depths(&mut rng, rows, 0.6);
        let fs = random_fs(&mut rng, rows);
        let basic = scan_basic(&z, &fs);
        let cumulative = scan_cumulative(&z, &fs);
        assert!(lpi_ish(&z, &fs, basic.h1) >= 0.0);
        assert!(lpi_ish(&z, &fs, cumulative.h1) >= 0.0);
    }
}

// ============================================================
// h1 / h2
// ============================================================

#[test]
fn test_basic_thickness_bounded_by_cumulative() {
    // 0.2 m 等间距、全部在 10 m 以内：基本扫描的液化层由相邻液化行组成
    let z: Vec<f64> = (1..50).map(|i| i as f64 * 0.2).collect();
    let mut rng = StdRng::seed_from_u64(2002);
    for _ in 0..300 {
        let fs: Vec<f64> = z
            .iter()
            .map(|_| if rng.gen_bool(0.5) { rng.gen_range(0.05..0.95) } else { 1.5 })
            .collect();
        let basic = scan_basic(&z, &fs);
        let cumulative = scan_cumulative(&z, &fs);
        assert!(
            basic.h2 <= cumulative.h2 + 1e-9,
            "h2 基本 {} > 累计 {}",
            basic.h2,
            cumulative.h2
        );
        assert!(cumulative.h1 <= 10.0);
    }
}

#[test]
fn test_no_liquefaction_defaults() {
    let z: Vec<f64> = (1..=30).map(|i| i as f64 * 0.5).collect();
    let fs = vec![2.0; z.len()];
    let basic = scan_basic(&z, &fs);
    assert_eq!(basic.h1, 15.0);
    assert_eq!(basic.h2, 0.0);
    let cumulative = scan_cumulative(&z, &fs);
    assert_eq!(cumulative.h1, 10.0);
    assert_eq!(cumulative.h2, 0.0);
}

// ============================================================
// LSN
// ============================================================

#[test]
fn test_lsn_counts_consistent() {
    let mut rng = StdRng::seed_from_u64(2016);
    for _ in 0..100 {
        let rows = rng.gen_range(2..60);
        let z = random_depths(&mut rng, rows, 0.8);
        let fs = random_fs(&mut rng, rows);
        let q: Vec<f64> = (0..rows)
            .map(|_| if rng.gen_bool(0.2) { f64::NAN } else { rng.gen_range(10.0..220.0) })
            .collect();
        let result = liquefaction_severity_number(&z, &q, &fs);
        let expected_rows = z
            .iter()
            .zip(&q)
            .filter(|(z, q)| **z <= 20.0 && !q.is_nan())
            .count();
        assert_eq!(result.qualifying_rows, expected_rows);
        assert!(result.below_range <= result.qualifying_rows);
        assert!(result.lsn.is_finite());
    }
}

#[test]
fn test_lsn_zero_above_water_table() {
    let z: Vec<f64> = (1..=10).map(|i| i as f64).collect();
    let q = vec![120.0; z.len()];
    let fs = vec![9999.0; z.len()];
    assert_eq!(liquefaction_severity_number(&z, &q, &fs).lsn, 0.0);
}

// ============================================================
// 地表起始的测深（z0 = 0）
// ============================================================

/// 第 2 行起各区间 [z(i−1), z(i)] 的 ln(zi / zi−1) 之和
fn log_sum_from_second_interval(z: &[f64]) -> f64 {
    (2..z.len()).map(|i| (z[i] / z[i - 1]).ln()).sum()
}

#[test]
fn test_lsn_surface_start_sums_later_rows() {
    let z = vec![0.0, 1.0, 2.0, 4.0];
    let q = vec![100.0; z.len()];
    let fs = vec![0.5; z.len()];

    let (eps, below) = volumetric_strain(100.0, 0.5);
    assert!(eps > 0.0 && !below);

    let result = liquefaction_severity_number(&z, &q, &fs);
    let expected = 10.0 * eps * log_sum_from_second_interval(&z);
    assert!(expected > 0.0);
    assert!((result.lsn - expected).abs() < 1e-9, "LSN {} != {}", result.lsn, expected);
    assert_eq!(result.qualifying_rows, z.len());
}

#[test]
fn test_lpi_ish_surface_start_sums_later_rows() {
    let z = vec![0.0, 1.0, 2.0, 4.0];
    let fs = vec![0.5; z.len()];

    let expected = 25.56 * crust_factor(0.5, 0.0) * log_sum_from_second_interval(&z);
    let lpi = lpi_ish(&z, &fs, 0.0);
    assert!(expected > 0.0);
    assert!((lpi - expected).abs() < 1e-9, "LPI-ish {} != {}", lpi, expected);
}
