// ==========================================
// 人力看板 - 导入模板
// ==========================================
// 带 BOM 的 CSV，列位与 field_mapper::columns 一致
// ==========================================

use crate::importer::error::{ImportError, ImporterResult};
use crate::importer::field_mapper::columns;
use csv::{Terminator, WriterBuilder};

pub const TEMPLATE_FILE_NAME: &str = "manpower_import_template.csv";

/// 表头（26 列，19-21 列导入时忽略）
pub const TEMPLATE_HEADERS: [&str; columns::FULL_WIDTH] = [
    "Month",
    "Movement Type",
    "Employee ID",
    "Name",
    "Surname",
    "Gender",
    "Position Title",
    "Position Level",
    "Section",
    "Department",
    "Business Unit",
    "Site",
    "Company (Payroll)",
    "Birthday",
    "Age",
    "Service Year",
    "Generation",
    "Onboard Date",
    "Resigned Date",
    "Status",
    "Level",
    "Reserved",
    "Education",
    "Leaving Type",
    "Leaving Reason",
    "Remark",
];

const SAMPLE_ROW: [&str; columns::FULL_WIDTH] = [
    "January",
    "New Hired",
    "EMP001",
    "John",
    "Doe",
    "Male",
    "Engineer",
    "6. Officer",
    "Engineering",
    "R&D",
    "BU1",
    "Site A",
    "My Company",
    "1 January 1990",
    "",
    "",
    "",
    "1 January 2024",
    "",
    "Active",
    "",
    "",
    "Bachelor",
    "",
    "",
    "",
];

/// 生成模板 CSV 文本（BOM + 表头 + 示例行）
pub fn template_csv() -> ImporterResult<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer("\u{feff}".as_bytes().to_vec());

    writer.write_record(TEMPLATE_HEADERS)?;
    writer.write_record(SAMPLE_ROW)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::CsvError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ImportError::CsvError(e.to_string()))
}
