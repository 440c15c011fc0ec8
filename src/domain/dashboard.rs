// ==========================================
// IP商品销量预测模拟器 - 热度大屏结果模型
// ==========================================
// 职责: 日均指标卡 + 按 IP 拆分的 实际/预测 趋势
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// TrendMetric - 趋势指标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendMetric {
    Engagement,      // 互动量
    Posts,           // 发帖数
    Sales,           // 电商销量
    SecondhandSales, // 二手销量
}

// ==========================================
// Kpi - 单个指标卡
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kpi {
    /// 没有勾选任何平台
    NotSelected,
    /// 数据表没有对应列,或时间范围内没有实际数据
    Unavailable,
    /// 实际数据的日均值,`columns` 为参与求和的列数
    Average { value: f64, columns: usize },
}

impl Kpi {
    pub fn value(&self) -> Option<f64> {
        match self {
            Kpi::Average { value, .. } => Some(*value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardKpis {
    pub daily_posts: Kpi,
    pub daily_engagement: Kpi,
    pub daily_fan_heat: Kpi,
    pub daily_sales: Kpi,
    pub daily_secondhand: Kpi,
}

// ==========================================
// MetricSeries - 单 IP 单指标趋势
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub ip_name: String,
    pub metric: TrendMetric,
    pub platform: Option<String>, // 二手销量不分平台
    pub column: String,
    pub actual: Vec<SeriesPoint>,
    pub forecast: Vec<SeriesPoint>,
}

// ==========================================
// DashboardOutcome - 大屏结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DashboardOutcome {
    /// 筛选后没有任何数据行
    NoData,
    Populated {
        start: NaiveDate,
        end: NaiveDate,
        kpis: DashboardKpis,
        social_series: Vec<MetricSeries>,
        ecommerce_series: Vec<MetricSeries>,
    },
}

impl DashboardOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, DashboardOutcome::NoData)
    }

    pub fn kpis(&self) -> Option<&DashboardKpis> {
        match self {
            DashboardOutcome::Populated { kpis, .. } => Some(kpis),
            DashboardOutcome::NoData => None,
        }
    }
}
