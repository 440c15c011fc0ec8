// ==========================================
// IP商品销量预测模拟器 - 引擎层
// ==========================================
// 职责: 选店与销量汇总的业务规则,社媒/电商热度统计
// 数据流: 底表 -> 门店目录 -> 排名选择 -> 周汇总 -> 跨配置聚合
//         热度数据 -> 大屏指标卡 / 趋势
// 红线: 所有计算同步、确定,不做任何 I/O
// ==========================================

pub mod aggregator;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod registry;
pub mod rollup;
pub mod selector;

// 重导出核心引擎
pub use aggregator::CrossConfigAggregator;
pub use catalog::StoreCatalog;
pub use dashboard::{DashboardEngine, DashboardQuery, EcommercePlatform, SocialPlatform};
pub use error::{ConfigurationViolation, RegistryError, RegistryResult};
pub use filter::SelectionFilter;
pub use registry::ConfigurationRegistry;
pub use rollup::SalesRollupCalculator;
pub use selector::StoreSelector;
