// crates/cpt_config/src/pipeline_config.rs

//! PipelineConfig - 流水线配置
//!
//! 定义一次运行的全部参数：地震情景（标签 + 震级）、两个不动点求解器的
//! 收敛容差与迭代上限，以及地下水位无效时的处理策略。
//!
//! PGA 按场地查表得到，不属于本配置。

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::ConfigError;

/// 流水线配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// 地震情景列表，顺序即输出顺序
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<ScenarioConfig>,

    /// 土类指数（Ic）求解器
    #[serde(default)]
    pub sbt: IterationConfig,

    /// 相对密实度（Idriss & Boulanger 2008）求解器
    #[serde(default)]
    pub density: IterationConfig,

    /// 地下水位无效时的策略
    #[serde(default)]
    pub gwt_policy: GwtPolicy,
}

fn default_scenarios() -> Vec<ScenarioConfig> {
    vec![
        ScenarioConfig::new("20may", 6.1),
        ScenarioConfig::new("29may", 5.9),
    ]
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scenarios: default_scenarios(),
            sbt: IterationConfig::default(),
            density: IterationConfig::default(),
            gwt_policy: GwtPolicy::default(),
        }
    }
}

/// 地震情景
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// 情景标签（如 "20may"），用于查找 PGA 与命名输出
    pub label: String,
    /// 矩震级 Mw
    pub magnitude: f64,
}

impl ScenarioConfig {
    /// 创建情景
    pub fn new(label: impl Into<String>, magnitude: f64) -> Self {
        Self {
            label: label.into(),
            magnitude,
        }
    }
}

/// 不动点迭代参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationConfig {
    /// 收敛容差
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// 最大迭代次数
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_tolerance() -> f64 { 0.01 }
fn default_max_iterations() -> usize { 100 }

impl Default for IterationConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl IterationConfig {
    /// 创建迭代参数
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }
}

/// 地下水位无效（GWT ≤ 0 或缺失）时的策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GwtPolicy {
    /// 放弃整条测深，记录到批处理报告
    #[default]
    Abort,
    /// 继续计算，依赖有效应力的字段全部标记为不适用
    Continue,
}

impl PipelineConfig {
    /// 从 JSON 字符串解析并验证
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }

    /// 按标签查找情景
    pub fn scenario(&self, label: &str) -> Option<&ScenarioConfig> {
        self.scenarios.iter().find(|s| s.label == label)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scenarios.is_empty() {
            return Err(ConfigError::Missing("scenarios".to_string()));
        }

        let mut seen = HashSet::new();
        for (i, scenario) in self.scenarios.iter().enumerate() {
            if scenario.label.trim().is_empty() {
                return Err(ConfigError::invalid_value(
                    format!("scenarios[{}].label", i),
                    "\"\"",
                    "情景标签不能为空",
                ));
            }
            if !seen.insert(scenario.label.as_str()) {
                return Err(ConfigError::invalid_value(
                    format!("scenarios[{}].label", i),
                    &scenario.label,
                    "情景标签重复",
                ));
            }
            if !(scenario.magnitude > 0.0 && scenario.magnitude <= 10.0) {
                return Err(ConfigError::invalid_value(
                    format!("scenarios[{}].magnitude", i),
                    scenario.magnitude,
                    "震级必须在 (0, 10] 范围内",
                ));
            }
        }

        Self::validate_iteration("sbt", &self.sbt)?;
        Self::validate_iteration("density", &self.density)?;

        Ok(())
    }

    fn validate_iteration(key: &str, iteration: &IterationConfig) -> Result<(), ConfigError> {
        if !(iteration.tolerance > 0.0) {
            return Err(ConfigError::invalid_value(
                format!("{}.tolerance", key),
                iteration.tolerance,
                "容差必须为正",
            ));
        }
        if iteration.max_iterations == 0 {
            return Err(ConfigError::invalid_value(
                format!("{}.max_iterations", key),
                iteration.max_iterations,
                "最大迭代次数至少为 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scenarios.len(), 2);
        assert_eq!(config.scenario("20may").map(|s| s.magnitude), Some(6.1));
        assert_eq!(config.density.max_iterations, 100);
        assert_eq!(config.gwt_policy, GwtPolicy::Abort);
    }

    #[test]
    fn test_invalid_magnitude() {
        let mut config = PipelineConfig::default();
        config.scenarios[0].magnitude = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_label() {
        let mut config = PipelineConfig::default();
        config.scenarios[1].label = "20may".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let mut config = PipelineConfig::default();
        config.sbt.max_iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "scenarios": [ { "label": "main", "magnitude": 6.5 } ], "gwt_policy": "continue" }"#;
        let config = PipelineConfig::from_json_str(json).unwrap();
        assert_eq!(config.scenarios.len(), 1);
        assert_eq!(config.gwt_policy, GwtPolicy::Continue);
        assert_eq!(config.sbt, IterationConfig::default());
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
