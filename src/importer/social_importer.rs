// ==========================================
// IP商品销量预测模拟器 - 社媒/电商热度导入器
// ==========================================
// 职责: 社媒_电商原始数据表 -> SocialMetricTable
// 必填列: IP名称 / 日期 / 数据状态
// 指标列: 以 社媒热度_ 或 电商热度_ 开头的全部列
// ==========================================

use crate::domain::social::{DataStatus, SocialMetricRecord, SocialMetricTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{parse_date_value, parse_number};
use crate::importer::file_parser::{RawRow, UniversalFileParser};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

pub mod columns {
    pub const IP_NAME: &str = "IP名称";
    pub const DATE: &str = "日期";
    pub const STATUS: &str = "数据状态";
    pub const SOCIAL_PREFIX: &str = "社媒热度_";
    pub const ECOMMERCE_PREFIX: &str = "电商热度_";
}

fn is_metric_column(header: &str) -> bool {
    header.starts_with(columns::SOCIAL_PREFIX) || header.starts_with(columns::ECOMMERCE_PREFIX)
}

fn cell<'r>(row: &'r RawRow, key: &str) -> Option<&'r str> {
    row.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("nan"))
}

fn require<'r>(row: &'r RawRow, key: &str, row_number: usize) -> ImportResult<&'r str> {
    cell(row, key).ok_or_else(|| ImportError::MissingField {
        row: row_number,
        field: key.to_string(),
    })
}

pub struct SocialImporter {
    parser: UniversalFileParser,
}

impl SocialImporter {
    /// # 参数
    /// - `sheet_name`: Excel 工作表名,CSV 忽略
    pub fn new(sheet_name: Option<String>) -> Self {
        Self {
            parser: UniversalFileParser::new(sheet_name),
        }
    }

    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<SocialMetricTable> {
        let path = file_path.as_ref();
        tracing::info!(path = %path.display(), "开始导入社媒/电商热度数据");

        let rows = self.parser.parse(path)?;
        let table = self.map_rows(&rows)?;

        tracing::info!(
            rows = table.len(),
            metric_columns = table.columns.len(),
            "热度数据导入完成"
        );
        Ok(table)
    }

    /// 映射已解析的行,行号从 2 开始
    pub fn map_rows(&self, rows: &[RawRow]) -> ImportResult<SocialMetricTable> {
        let columns: BTreeSet<String> = rows
            .iter()
            .flat_map(|row| row.keys())
            .filter(|h| is_metric_column(h))
            .cloned()
            .collect();

        let records = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.map_row(row, idx + 2))
            .collect::<ImportResult<Vec<_>>>()?;

        Ok(SocialMetricTable::new(records, columns))
    }

    fn map_row(&self, row: &RawRow, row_number: usize) -> ImportResult<SocialMetricRecord> {
        let status_label = require(row, columns::STATUS, row_number)?;
        let status =
            DataStatus::from_label(status_label).ok_or_else(|| ImportError::TypeConversionError {
                row: row_number,
                field: columns::STATUS.to_string(),
                message: format!("数据状态只能是 实际/预测,实际 {}", status_label),
            })?;

        let mut metrics = BTreeMap::new();
        for (header, _) in row.iter().filter(|(h, _)| is_metric_column(h)) {
            if let Some(value) = cell(row, header) {
                metrics.insert(header.clone(), parse_number(value, header, row_number)?);
            }
        }

        Ok(SocialMetricRecord {
            ip_name: require(row, columns::IP_NAME, row_number)?.to_string(),
            date: parse_date_value(require(row, columns::DATE, row_number)?, columns::DATE, row_number)?,
            status,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_map_rows_collects_metric_columns() {
        let rows = vec![
            row(&[
                ("IP名称", "青丘"),
                ("日期", "2025-01-01 00:00:00"),
                ("数据状态", "实际"),
                ("社媒热度_发帖数_ins", "1,200"),
                ("电商热度_销量_amazon", ""),
                ("备注", "x"),
            ]),
            row(&[
                ("IP名称", "青丘"),
                ("日期", "2025/01/02"),
                ("数据状态", "预测"),
                ("社媒热度_发帖数_ins", "nan"),
                ("电商热度_销量_amazon", "30"),
                ("备注", ""),
            ]),
        ];

        let table = SocialImporter::new(None).map_rows(&rows).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.has_column("电商热度_销量_amazon"));
        assert!(!table.has_column("备注"));

        let first = &table.records[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(first.metric("社媒热度_发帖数_ins"), Some(1200.0));
        assert_eq!(first.metric("电商热度_销量_amazon"), None);
        assert_eq!(table.records[1].status, DataStatus::Forecast);
        assert_eq!(table.records[1].metric("社媒热度_发帖数_ins"), None);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let rows = vec![row(&[("IP名称", "青丘"), ("日期", "2025-01-01"), ("数据状态", "估算")])];
        let err = SocialImporter::new(None).map_rows(&rows).unwrap_err();
        assert!(matches!(err, ImportError::TypeConversionError { row: 2, .. }));
    }

    #[test]
    fn test_missing_date_rejected() {
        let rows = vec![row(&[("IP名称", "青丘"), ("数据状态", "实际")])];
        let err = SocialImporter::new(None).map_rows(&rows).unwrap_err();
        assert!(matches!(err, ImportError::MissingField { row: 2, .. }));
    }
}
