// ==========================================
// IP商品销量预测模拟器 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 校验失败时配置注册表保持不变
// ==========================================

use thiserror::Error;

/// 配置违规原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationViolation {
    #[error("门店数 {value} 超出范围 [0, {max}]")]
    StoreCountOutOfRange { value: i64, max: u32 },

    #[error("门店类型未在数据中出现: {}", types.join(", "))]
    UnobservedStoreTypes { types: Vec<String> },
}

/// 配置注册表错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("无效配置 ({key}): {violation}")]
    InvalidConfiguration {
        key: String,
        violation: ConfigurationViolation,
    },

    #[error("配置不存在或已删除: {0}")]
    UnknownConfiguration(String),
}

/// Result 类型别名
pub type RegistryResult<T> = Result<T, RegistryError>;
