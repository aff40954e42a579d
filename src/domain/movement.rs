// ==========================================
// 人力看板 - 异动记录领域模型
// ==========================================
// 对齐: movement_transactions 表
// 去重键: (employee_id, movement_type, effective_date)
// ==========================================

use crate::domain::types::MovementType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ParsedMovement - 异动记录（导入中间结构体）
// ==========================================
// 解析期间只追加，不合并、不去重
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMovement {
    pub employee_id: String,
    pub movement_type: MovementType,
    pub effective_date: Option<NaiveDate>, // 离职类取离职日期，其余取入职日期
    pub position_title: String,
    pub position_level: String,
    pub reason_code: Option<String>,
    pub reason_detail: Option<String>,
    pub org_id: i64,

    // 原始组织文本
    pub section: String,
    pub department: String,

    // 元信息
    pub row_number: usize, // 原始文件行号（用于告警定位）
}

impl ParsedMovement {
    /// 去重键
    pub fn dedup_key(&self) -> (&str, MovementType, Option<NaiveDate>) {
        (&self.employee_id, self.movement_type, self.effective_date)
    }
}
