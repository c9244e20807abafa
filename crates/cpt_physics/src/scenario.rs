// crates/cpt_physics/src/scenario.rs

//! 场地地震情景查找
//!
//! 每个场地的 PGA 按情景标签给出，另附实测是否液化的标记。
//! 查表来源（文件、数据库）由调用方实现 [`ScenarioLookup`]；
//! 本模块提供内存实现 [`ScenarioTable`]。

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// 单个场地的情景数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteScenario {
    /// 情景标签 → PGA [g]
    #[serde(default)]
    pub pga: BTreeMap<String, f64>,
    /// 实测是否发生液化
    #[serde(default)]
    pub liquefaction_observed: Option<bool>,
}

impl SiteScenario {
    /// 创建空的情景数据
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置某情景的 PGA
    pub fn with_pga(mut self, label: impl Into<String>, pga: f64) -> Self {
        self.pga.insert(label.into(), pga);
        self
    }

    /// 设置实测液化标记
    pub fn with_liquefaction(mut self, observed: bool) -> Self {
        self.liquefaction_observed = Some(observed);
        self
    }

    /// 查询某情景的 PGA
    pub fn pga(&self, label: &str) -> Option<f64> {
        self.pga.get(label).copied()
    }
}

/// 场地情景查找接口
pub trait ScenarioLookup: Send + Sync {
    /// 按场地标识查找；无记录时返回 None
    fn lookup(&self, site: &str) -> Option<SiteScenario>;
}

/// 内存情景表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioTable {
    sites: HashMap<String, SiteScenario>,
}

impl ScenarioTable {
    /// 创建空表
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或替换场地记录
    pub fn insert(&mut self, site: impl Into<String>, scenario: SiteScenario) {
        self.sites.insert(site.into(), scenario);
    }

    /// 链式插入
    pub fn with_site(mut self, site: impl Into<String>, scenario: SiteScenario) -> Self {
        self.insert(site, scenario);
        self
    }

    /// 场地数
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl ScenarioLookup for ScenarioTable {
    fn lookup(&self, site: &str) -> Option<SiteScenario> {
        self.sites.get(site).cloned()
    }
}

/// 预钻孔深度与地下水位的关系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreforoStatus {
    /// 地下水位不浅于预钻孔底（GWT ≥ preforo）
    GwtBelowPreforo,
    /// 地下水位浅于预钻孔底
    GwtAbovePreforo,
    /// 缺少预钻孔深度
    PreforoMissing,
}

impl PreforoStatus {
    /// 分类
    ///
    /// 比较按 IEEE 语义：任一值缺失时 `gwt ≥ preforo` 不成立。
    pub fn classify(gwt: Option<f64>, preforo: Option<f64>) -> Self {
        let g = gwt.unwrap_or(f64::NAN);
        let p = preforo.unwrap_or(f64::NAN);
        if g >= p {
            Self::GwtBelowPreforo
        } else if preforo.map_or(true, f64::is_nan) {
            Self::PreforoMissing
        } else {
            Self::GwtAbovePreforo
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_scenario_builder() {
        let s = SiteScenario::new()
            .with_pga("20may", 0.25)
            .with_liquefaction(true);
        assert_eq!(s.pga("20may"), Some(0.25));
        assert_eq!(s.pga("29may"), None);
        assert_eq!(s.liquefaction_observed, Some(true));
    }

    #[test]
    fn test_table_lookup() {
        let table = ScenarioTable::new().with_site("S01", SiteScenario::new().with_pga("a", 0.1));
        assert!(table.lookup("S01").is_some());
        assert!(table.lookup("S02").is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_from_json() {
        let json = r#"{ "S01": { "pga": { "20may": 0.25, "29may": 0.2 }, "liquefaction_observed": false } }"#;
        let table: ScenarioTable = serde_json::from_str(json).unwrap();
        let s = table.lookup("S01").unwrap();
        assert_eq!(s.pga("29may"), Some(0.2));
        assert_eq!(s.liquefaction_observed, Some(false));
    }

    #[test]
    fn test_preforo_status() {
        assert_eq!(PreforoStatus::classify(Some(2.0), Some(1.0)), PreforoStatus::GwtBelowPreforo);
        assert_eq!(PreforoStatus::classify(Some(1.0), Some(1.0)), PreforoStatus::GwtBelowPreforo);
        assert_eq!(PreforoStatus::classify(Some(0.5), Some(1.0)), PreforoStatus::GwtAbovePreforo);
        assert_eq!(PreforoStatus::classify(Some(1.0), None), PreforoStatus::PreforoMissing);
        assert_eq!(PreforoStatus::classify(None, Some(1.0)), PreforoStatus::GwtAbovePreforo);
    }
}
