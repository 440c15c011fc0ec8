// ==========================================
// IP商品销量预测模拟器 - 核心库
// ==========================================
// 系统定位: 铺货场景推演 (选店 + 销量汇总) + 社媒/电商热度大屏,不做统计预测
// 数据流: 底表 -> 筛选 -> 门店目录 -> 排名选择 -> 周汇总 -> 跨配置聚合
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 默认参数
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 会话接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AggregationOutcome, BreakdownSlice, ClampNotice, ConfigurationEntry, ConfigurationKey,
    DashboardOutcome, KeyObservation, KeyRollup, LifecycleState, SalesRollup, SalesTable,
    SocialMetricTable, StoreSalesRecord, TrendSeries, UpsertOutcome,
};

// 引擎
pub use engine::{
    ConfigurationRegistry, CrossConfigAggregator, DashboardEngine, DashboardQuery, RegistryError,
    SalesRollupCalculator, SelectionFilter, StoreCatalog, StoreSelector,
};

// API
pub use api::{ApiError, ApiResult, SimulationReport, SimulationSession};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "IP商品销量预测模拟器";
