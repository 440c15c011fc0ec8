// ==========================================
// IP商品销量预测模拟器 - 配置层
// ==========================================
// 职责: 模拟器默认参数 (目标周数、默认筛选、工作表名)
// 存储: JSON 文件
// ==========================================

pub mod config_manager;
pub mod simulator_config;

// 重导出核心配置管理器
pub use config_manager::{default_config_path, ConfigError, ConfigManager, ConfigResult};
pub use simulator_config::SimulatorConfig;
