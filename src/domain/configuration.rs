// ==========================================
// IP商品销量预测模拟器 - 配置领域模型
// ==========================================
// 职责: 配置项 (可编辑参数 + 最近一次观测值) 及观测结果
// ==========================================

use crate::domain::store::ProductAttributes;
use crate::domain::types::{ConfigurationKey, LifecycleState};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// KeyObservation - 单个配置键的观测结果
// ==========================================
// 由当前筛选后的底表推导,每次重算刷新
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyObservation {
    pub max_stores: u32,                     // 去重门店数
    pub district_types: BTreeSet<String>,    // 出现过的商圈类型
    pub start_date: Option<NaiveDate>,       // 最早销售起始日期
    pub attributes: ProductAttributes,       // 首行商品属性
}

// ==========================================
// ConfigurationEntry - 配置项
// ==========================================
// 红线: store_count <= observed_max; store_types ⊆ observed_types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationEntry {
    pub key: ConfigurationKey,

    // ===== 用户可编辑 =====
    pub store_count: u32,
    pub store_types: BTreeSet<String>,

    // ===== 只读 =====
    pub start_date: NaiveDate,
    pub state: LifecycleState,

    // ===== 最近一次观测 =====
    pub observed_max: u32,
    pub observed_types: BTreeSet<String>,
    pub attributes: ProductAttributes,
}

impl ConfigurationEntry {
    /// 首次观测到配置键时创建: 门店数取上限,门店类型取全部观测类型
    pub fn from_observation(
        key: ConfigurationKey,
        observation: &KeyObservation,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            key,
            store_count: observation.max_stores,
            store_types: observation.district_types.clone(),
            start_date,
            state: LifecycleState::Active,
            observed_max: observation.max_stores,
            observed_types: observation.district_types.clone(),
            attributes: observation.attributes.clone(),
        }
    }
}

// ==========================================
// UpsertOutcome - upsert 结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpsertOutcome {
    /// 新建配置项
    Created,
    /// 已有配置项刷新观测值; clamped_from 为被压回上限前的门店数
    Refreshed { clamped_from: Option<u32> },
    /// 键在已删除集合中,未创建
    SkippedDeleted,
}

/// 门店数被压回上限的提示,交由展示层提醒用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampNotice {
    pub key: ConfigurationKey,
    pub previous: u32,
    pub clamped_to: u32,
}
