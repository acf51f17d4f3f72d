// ==========================================
// 批次腌制排产系统 - 配置加载器
// ==========================================
// 存储: JSON 文件 / JSON 字符串
// 职责: 读取 + 解析 PlannerConfig（不做校验）
// ==========================================

use crate::config::error::ConfigResult;
use crate::config::planner_config::PlannerConfig;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

// ==========================================
// ConfigLoader - 配置加载器
// ==========================================
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从 JSON 字符串解析配置，缺省字段取默认值
    pub fn from_json_str(raw: &str) -> ConfigResult<PlannerConfig> {
        let config: PlannerConfig = serde_json::from_str(raw)?;
        debug!(
            sync_groups = config.sync_groups.len(),
            holidays = config.holidays.len(),
            "配置解析完成"
        );
        Ok(config)
    }

    /// 从 JSON 文件读取配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<PlannerConfig> {
        let path = path.as_ref();
        info!(path = %path.display(), "读取排产配置");
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// 可选路径：未提供时使用默认配置
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> ConfigResult<PlannerConfig> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                info!("未提供配置文件，使用默认配置");
                Ok(PlannerConfig::default())
            }
        }
    }

    /// 配置快照（JSON），用于随结果一起留档
    pub fn snapshot(config: &PlannerConfig) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(config)?)
    }
}
