// ==========================================
// IP商品销量预测模拟器 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读取逻辑,不含引擎逻辑
// ==========================================

pub mod configuration;
pub mod dashboard;
pub mod forecast;
pub mod social;
pub mod store;
pub mod types;

// 重导出核心类型
pub use configuration::{ClampNotice, ConfigurationEntry, KeyObservation, UpsertOutcome};
pub use dashboard::{DashboardKpis, DashboardOutcome, Kpi, MetricSeries, SeriesPoint, TrendMetric};
pub use forecast::{AggregationOutcome, BreakdownSlice, KeyRollup, SalesRollup, TrendSeries};
pub use social::{DataStatus, SocialMetricRecord, SocialMetricTable};
pub use store::{ProductAttributes, SalesTable, StoreSalesRecord};
pub use types::{ConfigurationKey, LifecycleState};
