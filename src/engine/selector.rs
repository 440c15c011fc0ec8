// ==========================================
// IP商品销量预测模拟器 - 门店排名选择器
// ==========================================
// 职责: 按首周销量挑选 Top-N 门店
// 排序键:
// 1) 首周销量降序
// 2) 门店编号升序 (保证确定性);两个编号都是纯数字时按数值比较
// ==========================================

use crate::domain::store::StoreSalesRecord;
use std::cmp::Ordering;
use std::collections::BTreeMap;

// ==========================================
// StoreSelector - 门店选择器
// ==========================================
pub struct StoreSelector {
    // 无状态引擎,不需要注入依赖
}

impl StoreSelector {
    pub fn new() -> Self {
        Self {}
    }

    /// 选出前 count 家门店
    ///
    /// 同一门店有多行时取第一行的首周销量
    ///
    /// # 返回
    /// 门店编号列表,长度 = min(count, 去重门店数)
    pub fn select(&self, records: &[&StoreSalesRecord], count: u32) -> Vec<String> {
        if records.is_empty() || count == 0 {
            return Vec::new();
        }

        let mut first_week: BTreeMap<&str, f64> = BTreeMap::new();
        for record in records {
            first_week
                .entry(record.store_id.as_str())
                .or_insert_with(|| record.ranking_sales());
        }

        let mut ranked: Vec<(&str, f64)> = first_week.into_iter().collect();
        ranked.sort_by(|a, b| self.compare(a, b));

        ranked
            .into_iter()
            .take(count as usize)
            .map(|(store_id, _)| store_id.to_string())
            .collect()
    }

    fn compare(&self, a: &(&str, f64), b: &(&str, f64)) -> Ordering {
        match b.1.total_cmp(&a.1) {
            Ordering::Equal => compare_store_ids(a.0, b.0),
            other => other,
        }
    }
}

/// 门店编号升序: "9" 排在 "10" 之前,非纯数字编号按字符串比较
fn compare_store_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

impl Default for StoreSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::ProductAttributes;
    use crate::domain::types::ConfigurationKey;

    fn record(store: &str, first_week: Option<f64>, week1: Option<f64>) -> StoreSalesRecord {
        let mut weekly_sales = BTreeMap::new();
        if let Some(v) = week1 {
            weekly_sales.insert(1, v);
        }
        StoreSalesRecord {
            key: ConfigurationKey::new("IP1", "P1", "线下", "US"),
            store_id: store.to_string(),
            district_type: None,
            first_week_sales: first_week,
            weekly_sales,
            start_date: None,
            attributes: ProductAttributes::default(),
        }
    }

    #[test]
    fn test_select_top_n_by_first_week() {
        let records = vec![
            record("S1", Some(10.0), None),
            record("S2", Some(30.0), None),
            record("S3", Some(20.0), None),
        ];
        let refs: Vec<&StoreSalesRecord> = records.iter().collect();

        let selected = StoreSelector::new().select(&refs, 2);
        assert_eq!(selected, vec!["S2".to_string(), "S3".to_string()]);
    }

    #[test]
    fn test_ties_broken_by_store_id() {
        let records = vec![
            record("S9", Some(5.0), None),
            record("S3", Some(5.0), None),
            record("S5", Some(7.0), None),
            record("S1", Some(5.0), None),
        ];
        let refs: Vec<&StoreSalesRecord> = records.iter().collect();

        let selected = StoreSelector::new().select(&refs, 10);
        assert_eq!(selected, vec!["S5", "S1", "S3", "S9"]);
    }

    #[test]
    fn test_numeric_store_ids_tie_break_by_value() {
        let records = vec![
            record("10", Some(5.0), None),
            record("9", Some(5.0), None),
            record("100", Some(5.0), None),
        ];
        let refs: Vec<&StoreSalesRecord> = records.iter().collect();
        let selector = StoreSelector::new();

        assert_eq!(selector.select(&refs, 1), vec!["9"]);
        assert_eq!(selector.select(&refs, 3), vec!["9", "10", "100"]);
    }

    #[test]
    fn test_length_and_no_duplicates() {
        let records = vec![
            record("S1", Some(1.0), None),
            record("S1", Some(99.0), None),
            record("S2", Some(2.0), None),
        ];
        let refs: Vec<&StoreSalesRecord> = records.iter().collect();
        let selector = StoreSelector::new();

        let selected = selector.select(&refs, 5);
        assert_eq!(selected.len(), 2);
        // S1 取首行首周销量 1.0
        assert_eq!(selected, vec!["S2", "S1"]);

        assert!(selector.select(&refs, 0).is_empty());
        assert!(selector.select(&[], 3).is_empty());
    }

    #[test]
    fn test_missing_first_week_falls_back() {
        let records = vec![
            record("S1", None, Some(8.0)),
            record("S2", None, None),
            record("S3", Some(4.0), None),
        ];
        let refs: Vec<&StoreSalesRecord> = records.iter().collect();

        let selected = StoreSelector::new().select(&refs, 3);
        assert_eq!(selected, vec!["S1", "S3", "S2"]);
    }
}
