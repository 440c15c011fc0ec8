// ==========================================
// IP商品销量预测模拟器 - 配置管理器
// ==========================================
// 职责: 配置加载、校验
// 存储: JSON 文件 (缺省时使用内置默认值)
// ==========================================

use crate::config::simulator_config::SimulatorConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值无效: {0}")]
    InvalidValue(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    config: SimulatorConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用内置默认配置
    pub fn with_defaults() -> Self {
        Self {
            config: SimulatorConfig::default(),
            source: None,
        }
    }

    /// 从 JSON 文件加载配置
    ///
    /// 文件不存在时回退到默认配置;存在但格式错误时报错
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "配置文件不存在,使用默认配置");
            return Ok(Self::with_defaults());
        }

        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: SimulatorConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let manager = Self {
            config,
            source: Some(path.to_path_buf()),
        };
        manager.validate()?;
        tracing::info!(path = %path.display(), "配置加载完成");
        Ok(manager)
    }

    /// 从默认位置加载 (<config_dir>/ip-sales-simulator/config.json)
    pub fn load_default() -> ConfigResult<Self> {
        match default_config_path() {
            Some(path) => Self::load(path),
            None => Ok(Self::with_defaults()),
        }
    }

    /// 校验配置
    pub fn validate(&self) -> ConfigResult<()> {
        let config = &self.config;
        if config.target_week_options.is_empty() {
            return Err(ConfigError::InvalidValue(
                "target_week_options 不能为空".to_string(),
            ));
        }
        if config.target_week_options.contains(&0) {
            return Err(ConfigError::InvalidValue(
                "target_week_options 不能包含 0".to_string(),
            ));
        }
        if !config.allows_target_week(config.default_target_week) {
            return Err(ConfigError::InvalidValue(format!(
                "default_target_week={} 不在可选周数内",
                config.default_target_week
            )));
        }
        Ok(())
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn into_config(self) -> SimulatorConfig {
        self.config
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ip-sales-simulator").join("config.json"))
}
