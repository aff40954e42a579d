// ==========================================
// 人力看板 - 导入层
// ==========================================
// 职责: 原始表格数据 → 员工主数据 + 异动记录
// 支持: 制表符/逗号分隔文本, Excel
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod raw_data_importer;
pub mod reference_resolver;
pub mod row_reducer;
pub mod template;

// 重导出核心类型
pub use data_cleaner::MovementClassification;
pub use error::{ImportError, ImporterResult};
pub use field_mapper::{FieldMapper, RawDataRow};
pub use file_parser::{read_raw_text, tokenize, Delimiter, RawRow};
pub use raw_data_importer::{parse_raw_text, RawDataImporter, RawDataImporterImpl};
pub use reference_resolver::{
    EnsureReport, LookupCache, ReferenceCaches, ReferenceNames, ReferenceResolver,
};
pub use row_reducer::RowReducer;
pub use template::template_csv;
