// ==========================================
// 人力看板 - 员工领域模型
// ==========================================
// ParsedEmployee: 解析阶段产物，组织字段仍为名称文本
// EmployeeRecord: 外键解析后的落库结构，对齐 employee_master 表
// ==========================================

use crate::domain::types::EmployeeStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ParsedEmployee - 员工快照（导入中间结构体）
// ==========================================
// 生命周期: 仅在单次导入内
// 约束: 同一 employee_id 在一个批次内只保留一条
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEmployee {
    // ===== 主键 =====
    pub employee_id: String,

    // ===== 基础信息 =====
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub birth_date: Option<NaiveDate>,
    pub education_level: String, // 规范化学历

    // ===== 在职信息 =====
    pub onboard_date: Option<NaiveDate>,
    pub resigned_date: Option<NaiveDate>, // 仅在出现离职类异动后有值
    pub current_status: EmployeeStatus,

    // ===== 组织名称（待解析为外键）=====
    pub section_name: String,
    pub department_name: String,
    pub business_unit_name: String,
    pub site_name: String,
    pub company_name: String,
}

// ==========================================
// EmployeeRecord - 员工主数据（落库结构）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub education_level: Option<String>,
    pub onboard_date: Option<NaiveDate>,
    pub resigned_date: Option<NaiveDate>,
    pub current_status: EmployeeStatus,

    // ===== 组织外键（未匹配为 None）=====
    pub section_id: Option<i64>,
    pub department_id: Option<i64>,
    pub business_unit_id: Option<i64>,
    pub site_id: Option<i64>,
    pub company_id: Option<i64>,
}

/// 员工写入结果（upsert 区分新增/更新）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}
