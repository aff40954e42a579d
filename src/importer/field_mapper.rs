// ==========================================
// 人力看板 - 字段映射器
// ==========================================
// 职责: 按固定列位把原始单元格映射为命名字段
// 列位: 14-16（年龄/司龄/世代）与 19-21 忽略
// ==========================================

use crate::importer::data_cleaner::clean_name;
use crate::importer::file_parser::RawRow;
use serde::{Deserialize, Serialize};

/// 列位常量
pub mod columns {
    pub const MONTH: usize = 0;
    pub const MOVEMENT_TYPE: usize = 1;
    pub const EMPLOYEE_ID: usize = 2;
    pub const FIRST_NAME: usize = 3;
    pub const LAST_NAME: usize = 4;
    pub const GENDER: usize = 5;
    pub const POSITION_TITLE: usize = 6;
    pub const POSITION_LEVEL: usize = 7;
    pub const SECTION: usize = 8;
    pub const DEPARTMENT: usize = 9;
    pub const BUSINESS_UNIT: usize = 10;
    pub const SITE: usize = 11;
    pub const COMPANY: usize = 12;
    pub const BIRTH_DATE: usize = 13;
    pub const ONBOARD_DATE: usize = 17;
    pub const RESIGNED_DATE: usize = 18;
    pub const EDUCATION_LEVEL: usize = 22;
    pub const LEAVING_TYPE: usize = 23;
    pub const LEAVING_REASON: usize = 24;
    pub const REMARK: usize = 25;

    /// 完整布局的列数
    pub const FULL_WIDTH: usize = 26;
}

/// 一行原始数据的命名视图（所有字段已裁剪）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDataRow {
    pub month: String,
    pub movement_type: String,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub position_title: String,
    pub position_level: String,
    pub section: String,
    pub department: String,
    pub business_unit: String,
    pub site: String,
    pub company: String,
    pub birth_date: String,
    pub onboard_date: String,
    pub resigned_date: String,
    pub education_level: String,
    pub leaving_type: String,
    pub leaving_reason: String,
    pub remark: String,

    pub row_number: usize,
}

impl RawDataRow {
    /// 员工编号为空或为 "." 的行整行丢弃
    pub fn has_employee_id(&self) -> bool {
        !self.employee_id.is_empty() && self.employee_id != "."
    }
}

pub struct FieldMapper;

impl FieldMapper {
    /// 映射一行；缺失的列读作空字符串
    pub fn map_row(&self, row: &RawRow) -> RawDataRow {
        let cell = |idx: usize| -> String {
            row.cells
                .get(idx)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        RawDataRow {
            month: cell(columns::MONTH),
            movement_type: cell(columns::MOVEMENT_TYPE),
            employee_id: cell(columns::EMPLOYEE_ID),
            first_name: clean_name(&cell(columns::FIRST_NAME)),
            last_name: clean_name(&cell(columns::LAST_NAME)),
            gender: cell(columns::GENDER),
            position_title: cell(columns::POSITION_TITLE),
            position_level: cell(columns::POSITION_LEVEL),
            section: cell(columns::SECTION),
            department: cell(columns::DEPARTMENT),
            business_unit: cell(columns::BUSINESS_UNIT),
            site: cell(columns::SITE),
            company: cell(columns::COMPANY),
            birth_date: cell(columns::BIRTH_DATE),
            onboard_date: cell(columns::ONBOARD_DATE),
            resigned_date: cell(columns::RESIGNED_DATE),
            education_level: cell(columns::EDUCATION_LEVEL),
            leaving_type: cell(columns::LEAVING_TYPE),
            leaving_reason: cell(columns::LEAVING_REASON),
            remark: cell(columns::REMARK),
            row_number: row.row_number,
        }
    }
}
