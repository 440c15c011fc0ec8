// ==========================================
// IP商品销量预测模拟器 - 领域类型定义
// ==========================================
// 职责: 配置键与配置生命周期状态
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 配置键 (Configuration Key)
// ==========================================
// 唯一标识一个铺货场景: (IP名称, 商品编号, 销售渠道, 市场)
// 红线: 只由结构字段构成,筛选条件变化后同一组合映射到同一键
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConfigurationKey {
    pub ip_name: String,      // IP名称
    pub product_code: String, // 商品编号
    pub channel: String,      // 销售渠道
    pub market: String,       // 市场
}

impl ConfigurationKey {
    pub fn new(
        ip_name: impl Into<String>,
        product_code: impl Into<String>,
        channel: impl Into<String>,
        market: impl Into<String>,
    ) -> Self {
        Self {
            ip_name: ip_name.into(),
            product_code: product_code.into(),
            channel: channel.into(),
            market: market.into(),
        }
    }

    /// 展示标签: "<IP名称>-<商品编号>"
    ///
    /// 同一商品在不同渠道/市场下标签相同,标签不能当作键使用
    pub fn label(&self) -> String {
        format!("{}-{}", self.ip_name, self.product_code)
    }
}

impl fmt::Display for ConfigurationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.ip_name, self.product_code, self.channel, self.market
        )
    }
}

// ==========================================
// 配置生命周期状态 (Lifecycle State)
// ==========================================
// 状态机: Active --(删除)--> MarkedForDeletion --(确认)--> Deleted
// 同时勾选删除+确认: Active --> Deleted
// Deleted 为终态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    Active,            // 生效
    MarkedForDeletion, // 已勾选删除,待确认
    Deleted,           // 已删除
}

impl LifecycleState {
    /// 根据删除/确认两个勾选框推导下一状态
    ///
    /// 取消删除勾选总是回到 Active,确认勾选单独出现时不生效
    pub fn transition(self, delete_flag: bool, confirm_flag: bool) -> LifecycleState {
        match (self, delete_flag, confirm_flag) {
            (LifecycleState::Deleted, _, _) => LifecycleState::Deleted,
            (_, true, true) => LifecycleState::Deleted,
            (_, true, false) => LifecycleState::MarkedForDeletion,
            (_, false, _) => LifecycleState::Active,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Active => write!(f, "ACTIVE"),
            LifecycleState::MarkedForDeletion => write!(f, "MARKED_FOR_DELETION"),
            LifecycleState::Deleted => write!(f, "DELETED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_label_and_display() {
        let key = ConfigurationKey::new("青丘", "P001", "线下", "US");
        assert_eq!(key.label(), "青丘-P001");
        assert_eq!(key.to_string(), "青丘|P001|线下|US");
    }

    #[test]
    fn test_single_click_never_deletes() {
        assert_eq!(
            LifecycleState::Active.transition(true, false),
            LifecycleState::MarkedForDeletion
        );
        assert_eq!(
            LifecycleState::Active.transition(false, true),
            LifecycleState::Active
        );
    }

    #[test]
    fn test_both_flags_delete_directly() {
        assert_eq!(
            LifecycleState::Active.transition(true, true),
            LifecycleState::Deleted
        );
        assert_eq!(
            LifecycleState::MarkedForDeletion.transition(true, true),
            LifecycleState::Deleted
        );
    }

    #[test]
    fn test_unmark_returns_to_active() {
        assert_eq!(
            LifecycleState::MarkedForDeletion.transition(false, false),
            LifecycleState::Active
        );
        assert_eq!(
            LifecycleState::MarkedForDeletion.transition(false, true),
            LifecycleState::Active
        );
    }

    #[test]
    fn test_deleted_is_terminal() {
        assert_eq!(
            LifecycleState::Deleted.transition(false, false),
            LifecycleState::Deleted
        );
    }
}
