// ==========================================
// IP商品销量预测模拟器 - 上游筛选
// ==========================================
// 职责: 按市场/渠道/IP类别/材质/用途筛选底表
// 规则: 某维度选择为空时不限制该维度
// ==========================================

use crate::domain::store::{SalesTable, StoreSalesRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 筛选条件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionFilter {
    #[serde(default)]
    pub markets: BTreeSet<String>,
    #[serde(default)]
    pub channels: BTreeSet<String>,
    #[serde(default)]
    pub ip_categories: BTreeSet<String>,
    #[serde(default)]
    pub materials: BTreeSet<String>,
    #[serde(default)]
    pub purposes: BTreeSet<String>,
}

impl SelectionFilter {
    /// 不做任何限制的筛选
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn matches(&self, record: &StoreSalesRecord) -> bool {
        let attrs = &record.attributes;
        allows(&self.markets, Some(&record.key.market))
            && allows(&self.channels, Some(&record.key.channel))
            && allows(&self.ip_categories, attrs.ip_category.as_ref())
            && allows(&self.materials, attrs.material.as_ref())
            && allows(&self.purposes, attrs.purpose.as_ref())
    }

    /// 生成筛选后的底表
    pub fn apply(&self, table: &SalesTable) -> SalesTable {
        let filtered: SalesTable = table.iter().filter(|r| self.matches(r)).cloned().collect();
        tracing::debug!(
            before = table.len(),
            after = filtered.len(),
            "上游筛选完成"
        );
        filtered
    }
}

fn allows(selected: &BTreeSet<String>, value: Option<&String>) -> bool {
    if selected.is_empty() {
        return true;
    }
    value.map(|v| selected.contains(v)).unwrap_or(false)
}
