// ==========================================
// 人力看板 - 组织参照数据
// ==========================================
// 部门 / 科室 / 事业部 / 厂区 / 公司 五类小表
// ==========================================

use serde::{Deserialize, Serialize};

/// 已落库的参照记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub id: i64,
    pub name: String,
    pub code: Option<String>, // 仅事业部/厂区/公司
}

/// 待新增的参照记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReference {
    pub name: String,
    pub code: Option<String>,
    pub is_active: bool,
}

/// 批量新增结果（允许部分失败）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertManyOutcome {
    pub inserted: usize,
    pub errors: Vec<String>,
}
