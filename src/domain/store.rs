// ==========================================
// IP商品销量预测模拟器 - 门店销量领域模型
// ==========================================
// 用途: 导入层写入,引擎层只读
// 对齐: 预测结果底表 (一行 = 一个配置键下的一家门店)
// ==========================================

use crate::domain::types::ConfigurationKey;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// ProductAttributes - 商品属性
// ==========================================
// 仅用于上游筛选和配置表展示,不参与计算
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductAttributes {
    pub ip_category: Option<String>, // IP类别
    pub material: Option<String>,    // 商品材质
    pub purpose: Option<String>,     // 商品用途
    pub color: Option<String>,       // 商品颜色
    pub size: Option<String>,        // 商品尺寸
    pub price: Option<String>,       // 商品价格
}

// ==========================================
// StoreSalesRecord - 门店周销量记录
// ==========================================
// 红线: 不可变,核心计算从不修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSalesRecord {
    // ===== 配置键 =====
    pub key: ConfigurationKey,

    // ===== 门店信息 =====
    pub store_id: String,              // 门店编号
    pub district_type: Option<String>, // 门店商圈类型

    // ===== 销量 =====
    pub first_week_sales: Option<f64>,     // 销量_上市首周
    pub weekly_sales: BTreeMap<u32, f64>,  // 周序号(从1开始) -> 销量_上市第N周
    pub start_date: Option<NaiveDate>,     // 销售起始日期

    // ===== 商品属性 =====
    pub attributes: ProductAttributes,
}

impl StoreSalesRecord {
    /// 第 week 周销量,缺列返回 None
    pub fn week_sales(&self, week: u32) -> Option<f64> {
        self.weekly_sales.get(&week).copied()
    }

    /// 排名用的首周销量
    ///
    /// 依次取: 销量_上市首周 -> 销量_上市第1周 -> 0
    pub fn ranking_sales(&self) -> f64 {
        self.first_week_sales
            .or_else(|| self.week_sales(1))
            .unwrap_or(0.0)
    }

    /// 商圈类型是否落在给定集合内 (空集合不限制)
    pub fn matches_district(&self, district_types: &BTreeSet<String>) -> bool {
        if district_types.is_empty() {
            return true;
        }
        match &self.district_type {
            Some(t) => district_types.contains(t),
            None => false,
        }
    }
}

// ==========================================
// SalesTable - 门店销量底表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesTable {
    pub records: Vec<StoreSalesRecord>,
}

impl SalesTable {
    pub fn new(records: Vec<StoreSalesRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoreSalesRecord> {
        self.records.iter()
    }
}

impl FromIterator<StoreSalesRecord> for SalesTable {
    fn from_iter<I: IntoIterator<Item = StoreSalesRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
