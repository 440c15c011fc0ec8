// ==========================================
// IP商品销量预测模拟器 - 销量汇总计算器
// ==========================================
// 职责: 对入选门店按周求和,得到周序列与总量
// 红线: 缺失的周列计 0,不报错;未入选门店整体排除
// ==========================================

use crate::domain::forecast::SalesRollup;
use crate::domain::store::StoreSalesRecord;
use std::collections::HashSet;

pub struct SalesRollupCalculator;

impl SalesRollupCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 汇总第 1..=target_week 周销量
    ///
    /// # 参数
    /// - `records`: 配置键下的门店记录视图
    /// - `selected_store_ids`: 入选门店
    /// - `target_week`: 目标周数
    pub fn rollup(
        &self,
        records: &[&StoreSalesRecord],
        selected_store_ids: &[String],
        target_week: u32,
    ) -> SalesRollup {
        let selected: HashSet<&str> = selected_store_ids.iter().map(|s| s.as_str()).collect();

        let weekly: Vec<f64> = (1..=target_week)
            .map(|week| {
                records
                    .iter()
                    .filter(|r| selected.contains(r.store_id.as_str()))
                    .filter_map(|r| r.week_sales(week))
                    .sum()
            })
            .collect();
        let total = weekly.iter().sum();

        SalesRollup { total, weekly }
    }
}

impl Default for SalesRollupCalculator {
    fn default() -> Self {
        Self::new()
    }
}
