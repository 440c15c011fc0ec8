// ==========================================
// IP商品销量预测模拟器 - 导入层
// ==========================================
// 职责: 外部底表导入,生成 SalesTable / SocialMetricTable
// 支持: Excel, CSV
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod sales_importer;
pub mod social_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, UniversalFileParser};
pub use sales_importer::SalesImporter;
pub use social_importer::SocialImporter;
