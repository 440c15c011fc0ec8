// ==========================================
// IP商品销量预测模拟器 - 社媒/电商热度模型
// ==========================================
// 职责: 社媒_电商原始数据表 的一行 (IP × 日期)
// 指标列: 社媒热度_* / 电商热度_*,按列名保存
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ==========================================
// DataStatus - 数据状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataStatus {
    Actual,   // 实际
    Forecast, // 预测
}

impl DataStatus {
    /// 源数据中的 "实际" / "预测"
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "实际" => Some(DataStatus::Actual),
            "预测" => Some(DataStatus::Forecast),
            _ => None,
        }
    }
}

impl fmt::Display for DataStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataStatus::Actual => write!(f, "实际"),
            DataStatus::Forecast => write!(f, "预测"),
        }
    }
}

// ==========================================
// SocialMetricRecord - IP 单日热度
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialMetricRecord {
    pub ip_name: String,
    pub date: NaiveDate,
    pub status: DataStatus,
    /// 指标列名 -> 数值,空单元格不入表
    pub metrics: BTreeMap<String, f64>,
}

impl SocialMetricRecord {
    pub fn metric(&self, column: &str) -> Option<f64> {
        self.metrics.get(column).copied()
    }

    pub fn is_actual(&self) -> bool {
        self.status == DataStatus::Actual
    }
}

// ==========================================
// SocialMetricTable - 热度底表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialMetricTable {
    pub records: Vec<SocialMetricRecord>,
    /// 表头中出现的全部指标列 (即使整列为空)
    pub columns: BTreeSet<String>,
}

impl SocialMetricTable {
    pub fn new(records: Vec<SocialMetricRecord>, columns: BTreeSet<String>) -> Self {
        Self { records, columns }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(column)
    }

    /// IP 名称,按首次出现顺序
    pub fn ip_names(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.ip_name.as_str()))
            .map(|r| r.ip_name.clone())
            .collect()
    }

    /// 数据覆盖的日期范围
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ip: &str, day: u32) -> SocialMetricRecord {
        SocialMetricRecord {
            ip_name: ip.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            status: DataStatus::Actual,
            metrics: BTreeMap::new(),
        }
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(DataStatus::from_label("实际"), Some(DataStatus::Actual));
        assert_eq!(DataStatus::from_label(" 预测 "), Some(DataStatus::Forecast));
        assert_eq!(DataStatus::from_label("其他"), None);
    }

    #[test]
    fn test_ip_names_in_first_seen_order() {
        let table = SocialMetricTable::new(
            vec![record("青丘", 3), record("山海", 1), record("青丘", 2)],
            BTreeSet::new(),
        );
        assert_eq!(table.ip_names(), vec!["青丘", "山海"]);
        assert_eq!(
            table.date_range(),
            Some((
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()
            ))
        );
        assert_eq!(SocialMetricTable::default().date_range(), None);
    }
}
