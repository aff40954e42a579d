// ==========================================
// 人力看板 - 导入结果模型
// ==========================================
// ParseOutput: 预览（无副作用）
// ImportResult: 导入接口返回值，不落库
// ==========================================

use crate::domain::employee::ParsedEmployee;
use crate::domain::movement::ParsedMovement;
use serde::{Deserialize, Serialize};

// ==========================================
// ParseOutput - 解析产物
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOutput {
    pub employees: Vec<ParsedEmployee>,
    pub movements: Vec<ParsedMovement>,
    pub warnings: Vec<String>, // 结构性行错误（列数不足等）
}

// ==========================================
// EmployeeImportReport - 员工写入统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeImportReport {
    pub total: usize,
    pub inserted: usize,
    pub updated: usize,
    pub errors: Vec<String>,
}

// ==========================================
// MovementImportReport - 异动写入统计
// ==========================================
// 已存在的重复记录静默跳过，不计数也不报错
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementImportReport {
    pub total: usize,
    pub inserted: usize,
    pub errors: Vec<String>,
}

// ==========================================
// ImportResult - 导入结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub success: bool,
    pub batch_id: String, // 本次导入批次 ID（UUID，仅用于日志追溯）
    pub employees: EmployeeImportReport,
    pub movements: MovementImportReport,
    pub warnings: Vec<String>, // 同时计入 employees.errors
    pub elapsed_ms: u64,
}

impl ImportResult {
    /// 两类错误列表均为空即成功
    pub fn compute_success(&mut self) {
        self.success = self.employees.errors.is_empty() && self.movements.errors.is_empty();
    }
}
