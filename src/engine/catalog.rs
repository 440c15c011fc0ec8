// ==========================================
// IP商品销量预测模拟器 - 门店目录视图
// ==========================================
// 职责: 按配置键 + 商圈类型筛选门店记录 (只读)
// 输入: 上游筛选后的底表
// 输出: 记录视图 / 每个配置键的观测结果
// ==========================================

use crate::domain::configuration::KeyObservation;
use crate::domain::store::StoreSalesRecord;
use crate::domain::types::ConfigurationKey;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// StoreCatalog - 门店目录
// ==========================================
// 红线: 无副作用,无匹配时返回空视图而非错误
pub struct StoreCatalog<'a> {
    records: &'a [StoreSalesRecord],
}

impl<'a> StoreCatalog<'a> {
    pub fn new(records: &'a [StoreSalesRecord]) -> Self {
        Self { records }
    }

    /// 取某配置键下的门店记录,保持底表顺序
    ///
    /// # 参数
    /// - `key`: 配置键
    /// - `district_types`: 商圈类型过滤,空集合表示不限制
    pub fn view(
        &self,
        key: &ConfigurationKey,
        district_types: &BTreeSet<String>,
    ) -> Vec<&'a StoreSalesRecord> {
        self.records
            .iter()
            .filter(|r| &r.key == key && r.matches_district(district_types))
            .collect()
    }

    /// 观测底表中出现的全部配置键
    ///
    /// 每个键统计: 去重门店数、商圈类型、最早销售日期、首行商品属性
    pub fn observe(&self) -> BTreeMap<ConfigurationKey, KeyObservation> {
        let mut stores: BTreeMap<&ConfigurationKey, BTreeSet<&str>> = BTreeMap::new();
        let mut observations: BTreeMap<ConfigurationKey, KeyObservation> = BTreeMap::new();

        for record in self.records {
            stores
                .entry(&record.key)
                .or_default()
                .insert(record.store_id.as_str());

            let observation = observations
                .entry(record.key.clone())
                .or_insert_with(|| KeyObservation {
                    max_stores: 0,
                    district_types: BTreeSet::new(),
                    start_date: None,
                    attributes: record.attributes.clone(),
                });

            if let Some(t) = record.district_type.as_deref().filter(|t| !t.is_empty()) {
                observation.district_types.insert(t.to_string());
            }
            observation.start_date = earliest(observation.start_date, record.start_date);
        }

        for (key, observation) in observations.iter_mut() {
            observation.max_stores = stores.get(key).map(|s| s.len() as u32).unwrap_or(0);
        }

        observations
    }
}

fn earliest(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Option<NaiveDate> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}
