// crates/cpt_physics/src/sounding.rs

//! 测深数据模型
//!
//! 一条测深 = 测深级记录 [`SiteInfo`]（场地、地下水位、预钻孔深度）
//! + 按深度严格递增的原始数据行 [`RawRow`]。

use cpt_foundation::validation::{ValidationError, ValidationReport, ValidationWarning};
use cpt_foundation::{CptError, CptResult};
use serde::{Deserialize, Serialize};

/// 原始测量行
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// 深度 z [m]
    pub depth: f64,
    /// 锥尖阻力 qc [MPa]
    pub qc: f64,
    /// 侧壁摩阻力 fs [kPa]
    pub fs: f64,
    /// 实测孔压 u2 [kPa]（随行携带，经验公式不使用）
    #[serde(default)]
    pub u: Option<f64>,
    /// 修正锥尖阻力 qt [MPa]
    pub qt: f64,
}

impl RawRow {
    /// 创建数据行
    pub fn new(depth: f64, qc: f64, fs: f64, qt: f64) -> Self {
        Self {
            depth,
            qc,
            fs,
            u: None,
            qt,
        }
    }
}

/// 测深级记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteInfo {
    /// 场地标识
    pub site: String,
    /// 地下水位深度 GWT [m]
    #[serde(default)]
    pub gwt: Option<f64>,
    /// 预钻孔（preforo）深度 [m]
    #[serde(default)]
    pub preforo: Option<f64>,
}

impl SiteInfo {
    /// 创建测深级记录
    pub fn new(site: impl Into<String>, gwt: Option<f64>, preforo: Option<f64>) -> Self {
        Self {
            site: site.into(),
            gwt,
            preforo,
        }
    }

    /// 有效的地下水位（GWT > 0）
    pub fn valid_gwt(&self) -> Option<f64> {
        self.gwt.filter(|&g| g > 0.0)
    }
}

/// 一条 CPTU 测深
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sounding {
    /// 测深级记录
    pub info: SiteInfo,
    /// 数据行（深度严格递增）
    pub rows: Vec<RawRow>,
}

impl Sounding {
    /// 创建测深
    pub fn new(info: SiteInfo, rows: Vec<RawRow>) -> Self {
        Self { info, rows }
    }

    /// 场地标识
    pub fn site(&self) -> &str {
        &self.info.site
    }

    /// 行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 验证输入数据
    ///
    /// 错误：空测深、深度非有限、深度非严格递增。
    /// 警告：少于两行（积分需要行距）、负侧壁摩阻力、缺少预钻孔深度。
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        if self.rows.is_empty() {
            report.add_error(ValidationError::Empty);
            return report;
        }

        if self.rows.len() < 2 {
            report.add_warning(ValidationWarning::Custom {
                message: format!("测深 {} 只有一行，深度积分区间退化", self.site()),
            });
        }

        let mut previous: Option<f64> = None;
        for (i, row) in self.rows.iter().enumerate() {
            if !row.depth.is_finite() {
                report.add_error(ValidationError::NonFinite {
                    field: "depth",
                    row: i,
                    value: row.depth,
                });
                continue;
            }
            if let Some(prev) = previous {
                if row.depth <= prev {
                    report.add_error(ValidationError::NonIncreasingDepth {
                        row: i,
                        depth: row.depth,
                        previous: prev,
                    });
                }
            }
            previous = Some(row.depth);

            if row.fs < 0.0 {
                report.add_warning(ValidationWarning::LowValue {
                    field: "fs",
                    row: i,
                    value: row.fs,
                    threshold: 0.0,
                });
            }
        }

        if self.info.preforo.is_none() {
            report.add_warning(ValidationWarning::MissingOptional { field: "preforo" });
        }

        report
    }

    /// 验证并在存在错误时返回第一个错误
    pub fn ensure_valid(&self) -> CptResult<()> {
        let report = self.validate();
        match report.errors.first() {
            None => Ok(()),
            Some(ValidationError::NonIncreasingDepth {
                row,
                depth,
                previous,
            }) => Err(CptError::NonIncreasingDepth {
                row: *row,
                depth: *depth,
                previous: *previous,
            }),
            Some(other) => Err(CptError::invalid_input(format!(
                "测深 {}: {}",
                self.site(),
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_sounding(depths: &[f64]) -> Sounding {
        Sounding::new(
            SiteInfo::new("T", Some(1.0), Some(0.5)),
            depths
                .iter()
                .map(|&z| RawRow::new(z, 5.0, 20.0, 5.0))
                .collect(),
        )
    }

    #[test]
    fn test_valid_sounding() {
        let s = make_sounding(&[0.1, 0.2, 0.3]);
        assert!(s.validate().is_valid());
        assert!(s.ensure_valid().is_ok());
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn test_empty_sounding_rejected() {
        let s = make_sounding(&[]);
        assert!(s.validate().has_errors());
        assert!(s.ensure_valid().is_err());
    }

    #[test]
    fn test_non_increasing_depth_rejected() {
        let s = make_sounding(&[0.1, 0.3, 0.3]);
        assert!(matches!(
            s.ensure_valid(),
            Err(CptError::NonIncreasingDepth { row: 2, .. })
        ));
    }

    #[test]
    fn test_single_row_warns() {
        let s = make_sounding(&[0.1]);
        let report = s.validate();
        assert!(report.is_valid());
        assert!(report.has_warnings());
    }

    #[test]
    fn test_valid_gwt() {
        assert_eq!(SiteInfo::new("a", Some(1.2), None).valid_gwt(), Some(1.2));
        assert_eq!(SiteInfo::new("a", Some(0.0), None).valid_gwt(), None);
        assert_eq!(SiteInfo::new("a", None, None).valid_gwt(), None);
    }

    #[test]
    fn test_deserialize_without_pore_pressure() {
        let json = r#"{"depth": 1.0, "qc": 2.0, "fs": 10.0, "qt": 2.1}"#;
        let row: RawRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.u, None);
        assert_eq!(row.qt, 2.1);
    }
}
