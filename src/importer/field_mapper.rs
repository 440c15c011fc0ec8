// ==========================================
// IP商品销量预测模拟器 - 字段映射器
// ==========================================
// 职责: 预测结果底表源字段 → StoreSalesRecord + 类型转换
// ==========================================

use crate::domain::store::{ProductAttributes, StoreSalesRecord};
use crate::domain::types::ConfigurationKey;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

// ==========================================
// 源字段名
// ==========================================
pub mod columns {
    pub const IP_NAME: &str = "IP名称";
    pub const PRODUCT_CODE: &str = "商品编号";
    pub const CHANNEL: &str = "销售渠道";
    pub const MARKET: &str = "市场";
    pub const STORE_ID: &str = "门店编号";
    pub const DISTRICT_TYPE: &str = "门店信息_门店商圈类型";
    pub const DISTRICT_TYPE_ALIAS: &str = "门店商圈类型";
    pub const FIRST_WEEK_SALES: &str = "销量_上市首周";
    pub const WEEK_SALES_PREFIX: &str = "销量_上市第";
    pub const WEEK_SALES_SUFFIX: &str = "周";
    pub const START_DATE: &str = "销售起始日期";
    pub const IP_CATEGORY: &str = "IP类别";
    pub const MATERIAL: &str = "商品材质";
    pub const PURPOSE: &str = "商品用途";
    pub const COLOR: &str = "商品颜色";
    pub const SIZE: &str = "商品尺寸";
    pub const PRICE: &str = "商品价格";
}

pub struct FieldMapper;

impl FieldMapper {
    pub fn new() -> Self {
        Self
    }

    /// 映射一行源数据
    ///
    /// # 参数
    /// - `row`: 表头 -> 单元格文本
    /// - `row_number`: 源文件行号 (用于报错)
    pub fn map_to_record(&self, row: &RawRow, row_number: usize) -> ImportResult<StoreSalesRecord> {
        let key = ConfigurationKey {
            ip_name: self.require(row, columns::IP_NAME, row_number)?,
            product_code: self.require(row, columns::PRODUCT_CODE, row_number)?,
            channel: self.require(row, columns::CHANNEL, row_number)?,
            market: self.require(row, columns::MARKET, row_number)?,
        };

        Ok(StoreSalesRecord {
            key,
            store_id: self.require(row, columns::STORE_ID, row_number)?,
            district_type: self.get_string(row, columns::DISTRICT_TYPE),
            first_week_sales: self.parse_f64(row, columns::FIRST_WEEK_SALES, row_number)?,
            weekly_sales: self.parse_weekly_sales(row, row_number)?,
            start_date: self.parse_date(row, columns::START_DATE, row_number)?,
            attributes: ProductAttributes {
                ip_category: self.get_string(row, columns::IP_CATEGORY),
                material: self.get_string(row, columns::MATERIAL),
                purpose: self.get_string(row, columns::PURPOSE),
                color: self.get_string(row, columns::COLOR),
                size: self.get_string(row, columns::SIZE),
                price: self.get_string(row, columns::PRICE),
            },
        })
    }

    /// 提取字符串字段，支持列名别名；空白视为缺失
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        let aliases: &[&str] = match key {
            columns::DISTRICT_TYPE => &[columns::DISTRICT_TYPE, columns::DISTRICT_TYPE_ALIAS],
            _ => &[key],
        };

        aliases
            .iter()
            .filter_map(|alias| row.get(*alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty() && !v.eq_ignore_ascii_case("nan"))
            .map(|v| v.to_string())
    }

    fn require(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<String> {
        self.get_string(row, key).ok_or_else(|| ImportError::MissingField {
            row: row_number,
            field: key.to_string(),
        })
    }

    /// 解析浮点数（允许千分位逗号）
    fn parse_f64(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<Option<f64>> {
        self.get_string(row, key)
            .map(|value| parse_number(&value, key, row_number))
            .transpose()
    }

    /// 收集全部 "销量_上市第N周" 列
    fn parse_weekly_sales(&self, row: &RawRow, row_number: usize) -> ImportResult<BTreeMap<u32, f64>> {
        let mut weekly = BTreeMap::new();
        for header in row.keys() {
            let Some(week) = week_of_column(header) else {
                continue;
            };
            if let Some(value) = self.parse_f64(row, header, row_number)? {
                weekly.insert(week, value);
            }
        }
        Ok(weekly)
    }

    /// 解析日期
    fn parse_date(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<Option<NaiveDate>> {
        self.get_string(row, key)
            .map(|value| parse_date_value(&value, key, row_number))
            .transpose()
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// 数值单元格,拒绝 inf / NaN 等非有限值
pub(crate) fn parse_number(value: &str, field: &str, row_number: usize) -> ImportResult<f64> {
    let conversion_error = || ImportError::TypeConversionError {
        row: row_number,
        field: field.to_string(),
        message: format!("无法解析为数值: {}", value),
    };

    let number = value
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| conversion_error())?;
    if !number.is_finite() {
        return Err(conversion_error());
    }
    Ok(number)
}

/// 日期单元格
///
/// 支持: YYYY-MM-DD / YYYY/MM/DD / YYYYMMDD,可带时间部分 (空格或 T 分隔);Excel 日期序列号
pub(crate) fn parse_date_value(value: &str, field: &str, row_number: usize) -> ImportResult<NaiveDate> {
    let date_part = value
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()
        .unwrap_or(value);

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, fmt) {
            return Ok(date);
        }
    }
    if let Some(date) = excel_serial_date(value) {
        return Ok(date);
    }

    Err(ImportError::DateFormatError {
        row: row_number,
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// "销量_上市第3周" -> Some(3)
fn week_of_column(header: &str) -> Option<u32> {
    header
        .strip_prefix(columns::WEEK_SALES_PREFIX)?
        .strip_suffix(columns::WEEK_SALES_SUFFIX)?
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|w| *w >= 1)
}

/// Excel 序列号日期 (1899-12-30 起算)
fn excel_serial_date(value: &str) -> Option<NaiveDate> {
    let serial = value.parse::<f64>().ok()?;
    if !(1.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_row() -> RawRow {
        let mut row = RawRow::new();
        row.insert("IP名称".to_string(), "青丘".to_string());
        row.insert("商品编号".to_string(), "P001".to_string());
        row.insert("销售渠道".to_string(), "线下".to_string());
        row.insert("市场".to_string(), "US".to_string());
        row.insert("门店编号".to_string(), "S001".to_string());
        row
    }

    #[test]
    fn test_field_mapper_basic() {
        let mut row = base_row();
        row.insert("门店商圈类型".to_string(), "商场".to_string());
        row.insert("销量_上市首周".to_string(), "12".to_string());
        row.insert("销量_上市第1周".to_string(), "12".to_string());
        row.insert("销量_上市第2周".to_string(), "1,024.5".to_string());
        row.insert("销量_上市第3周".to_string(), "".to_string());
        row.insert("销售起始日期".to_string(), "2025-03-01 00:00:00".to_string());
        row.insert("商品材质".to_string(), "木质".to_string());

        let record = FieldMapper::new().map_to_record(&row, 2).unwrap();

        assert_eq!(record.key, ConfigurationKey::new("青丘", "P001", "线下", "US"));
        assert_eq!(record.store_id, "S001");
        assert_eq!(record.district_type.as_deref(), Some("商场"));
        assert_eq!(record.first_week_sales, Some(12.0));
        assert_eq!(record.week_sales(2), Some(1024.5));
        assert_eq!(record.week_sales(3), None);
        assert_eq!(record.start_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(record.attributes.material.as_deref(), Some("木质"));
    }

    #[test]
    fn test_missing_store_id() {
        let mut row = base_row();
        row.remove("门店编号");

        let err = FieldMapper::new().map_to_record(&row, 7).unwrap_err();
        assert!(matches!(err, ImportError::MissingField { row: 7, .. }));
    }

    #[test]
    fn test_bad_number() {
        let mut row = base_row();
        row.insert("销量_上市第1周".to_string(), "abc".to_string());

        let err = FieldMapper::new().map_to_record(&row, 3).unwrap_err();
        assert!(matches!(err, ImportError::TypeConversionError { row: 3, .. }));
    }

    #[test]
    fn test_non_finite_number_rejected() {
        for value in ["inf", "-inf", "infinity", "+Infinity"] {
            let mut row = base_row();
            row.insert("销量_上市首周".to_string(), value.to_string());

            let err = FieldMapper::new().map_to_record(&row, 4).unwrap_err();
            assert!(
                matches!(err, ImportError::TypeConversionError { row: 4, .. }),
                "{value}"
            );
        }
    }

    #[test]
    fn test_date_formats() {
        let mapper = FieldMapper::new();
        let expected = NaiveDate::from_ymd_opt(2025, 3, 1);
        for value in [
            "2025-03-01",
            "2025/03/01",
            "20250301",
            "2025-03-01 00:00:00",
            "2025-03-01 00:00",
            "2025-03-01T08:30:00",
            "2025/03/01 00:00:00",
            "2025/03/01 00:00",
            "45717",
        ] {
            let mut row = base_row();
            row.insert("销售起始日期".to_string(), value.to_string());
            assert_eq!(mapper.map_to_record(&row, 1).unwrap().start_date, expected, "{value}");
        }

        let mut row = base_row();
        row.insert("销售起始日期".to_string(), "下周一".to_string());
        assert!(matches!(
            mapper.map_to_record(&row, 1),
            Err(ImportError::DateFormatError { .. })
        ));
    }

    #[test]
    fn test_week_of_column() {
        assert_eq!(week_of_column("销量_上市第12周"), Some(12));
        assert_eq!(week_of_column("销量_上市首周"), None);
        assert_eq!(week_of_column("销量_上市第0周"), None);
    }
}
