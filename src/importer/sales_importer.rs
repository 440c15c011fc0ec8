// ==========================================
// IP商品销量预测模拟器 - 底表导入器
// ==========================================
// 流程:
// 1. 文件读取与解析 (CSV / Excel)
// 2. 字段映射与类型转换
// 3. 组装 SalesTable
// ==========================================

use crate::domain::store::SalesTable;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{RawRow, UniversalFileParser};
use std::path::Path;

pub struct SalesImporter {
    parser: UniversalFileParser,
    mapper: FieldMapper,
}

impl SalesImporter {
    /// # 参数
    /// - `sheet_name`: Excel 工作表名,CSV 忽略
    pub fn new(sheet_name: Option<String>) -> Self {
        Self {
            parser: UniversalFileParser::new(sheet_name),
            mapper: FieldMapper::new(),
        }
    }

    /// 从文件导入底表
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<SalesTable> {
        let path = file_path.as_ref();
        tracing::info!(path = %path.display(), "开始导入预测结果底表");

        let rows = self.parser.parse(path)?;
        let table = self.map_rows(&rows)?;

        tracing::info!(rows = table.len(), "底表导入完成");
        Ok(table)
    }

    /// 映射已解析的行,行号从 2 开始 (第 1 行为表头)
    pub fn map_rows(&self, rows: &[RawRow]) -> ImportResult<SalesTable> {
        rows.iter()
            .enumerate()
            .map(|(idx, row)| self.mapper.map_to_record(row, idx + 2))
            .collect::<ImportResult<Vec<_>>>()
            .map(SalesTable::new)
    }
}
