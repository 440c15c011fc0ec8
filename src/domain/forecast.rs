// ==========================================
// IP商品销量预测模拟器 - 汇总结果模型
// ==========================================
// 职责: 单配置汇总结果 + 跨配置占比/趋势输出
// ==========================================

use crate::domain::types::ConfigurationKey;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// SalesRollup - 单配置销量汇总
// ==========================================
// 红线: 零销量也必须保留,只在最终聚合时过滤
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRollup {
    pub total: f64,
    pub weekly: Vec<f64>, // 长度 = target_week, 下标 0 对应第1周
}

impl SalesRollup {
    pub fn zero(target_week: u32) -> Self {
        Self {
            total: 0.0,
            weekly: vec![0.0; target_week as usize],
        }
    }

    pub fn has_sales(&self) -> bool {
        self.total > 0.0
    }
}

/// 单配置的选店 + 汇总结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyRollup {
    pub key: ConfigurationKey,
    pub label: String,
    pub selected_store_ids: Vec<String>,
    pub rollup: SalesRollup,
}

// ==========================================
// BreakdownSlice - 销量占比
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownSlice {
    pub key: ConfigurationKey,
    pub label: String,
    pub total: f64,
    pub share: f64, // 占全部存活配置总销量的比例 (0~1)
}

// ==========================================
// TrendSeries - 周销量趋势
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub key: ConfigurationKey,
    pub label: String,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

// ==========================================
// AggregationOutcome - 跨配置聚合结果
// ==========================================
// NoData 与 "尚未计算" (Option::None) 区分,展示层据此显示空状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregationOutcome {
    NoData,
    Populated {
        breakdown: Vec<BreakdownSlice>,
        trends: Vec<TrendSeries>,
    },
}

impl AggregationOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, AggregationOutcome::NoData)
    }

    pub fn breakdown(&self) -> &[BreakdownSlice] {
        match self {
            AggregationOutcome::NoData => &[],
            AggregationOutcome::Populated { breakdown, .. } => breakdown,
        }
    }

    pub fn trends(&self) -> &[TrendSeries] {
        match self {
            AggregationOutcome::NoData => &[],
            AggregationOutcome::Populated { trends, .. } => trends,
        }
    }
}
