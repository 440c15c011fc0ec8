// ==========================================
// IP商品销量预测模拟器 - API层错误类型
// ==========================================
// 职责: 汇总各层错误,转换为面向用户的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::engine::error::RegistryError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("{0}")]
    InvalidConfiguration(#[source] RegistryError),

    #[error("配置不存在或已删除: {0}")]
    NotFound(String),

    #[error("目标周数无效: {week} (可选: {options:?})")]
    InvalidTargetWeek { week: u32, options: Vec<u32> },

    // ==========================================
    // 导入与配置错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(#[from] ImportError),

    #[error("配置加载失败: {0}")]
    ConfigError(#[from] ConfigError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UnknownConfiguration(key) => ApiError::NotFound(key),
            other => ApiError::InvalidConfiguration(other),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
