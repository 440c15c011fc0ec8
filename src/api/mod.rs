// ==========================================
// IP商品销量预测模拟器 - API层
// ==========================================
// 职责: 面向展示层的会话接口
// 输入: 用户编辑事件 (门店数 / 门店类型 / 删除勾选 / 筛选 / 目标周数)
// 输出: 配置表、各配置汇总、占比与趋势
// ==========================================

pub mod error;
pub mod session;

pub use error::{ApiError, ApiResult};
pub use session::{ConfigurationRow, SimulationReport, SimulationSession};
