// ==========================================
// 人力看板 - 领域类型定义
// ==========================================
// 异动类型 / 在职状态 / 组织参照类型
// 序列化格式与数据库存储值一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 异动类型 (Movement Type)
// ==========================================
// 封闭集合: 原始文本必须归入其中之一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    #[serde(rename = "New Hired")]
    NewHired,
    #[serde(rename = "Voluntary Resignation")]
    VoluntaryResignation,
    #[serde(rename = "Involuntary Resignation")]
    InvoluntaryResignation,
    #[serde(rename = "Transfer-In")]
    TransferIn,
    #[serde(rename = "Transfer-Out")]
    TransferOut,
    #[serde(rename = "Retirement")]
    Retirement,
}

impl MovementType {
    pub const ALL: [MovementType; 6] = [
        MovementType::NewHired,
        MovementType::VoluntaryResignation,
        MovementType::InvoluntaryResignation,
        MovementType::TransferIn,
        MovementType::TransferOut,
        MovementType::Retirement,
    ];

    /// 数据库存储值
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::NewHired => "New Hired",
            MovementType::VoluntaryResignation => "Voluntary Resignation",
            MovementType::InvoluntaryResignation => "Involuntary Resignation",
            MovementType::TransferIn => "Transfer-In",
            MovementType::TransferOut => "Transfer-Out",
            MovementType::Retirement => "Retirement",
        }
    }

    /// 入职类: 覆盖员工快照
    pub fn is_new_hire(&self) -> bool {
        matches!(self, MovementType::NewHired | MovementType::TransferIn)
    }

    /// 离职类: 只更新状态与离职日期
    pub fn is_leaving(&self) -> bool {
        matches!(
            self,
            MovementType::VoluntaryResignation
                | MovementType::InvoluntaryResignation
                | MovementType::Retirement
                | MovementType::TransferOut
        )
    }

    /// 该异动对应的在职状态
    pub fn implied_status(&self) -> EmployeeStatus {
        match self {
            MovementType::InvoluntaryResignation => EmployeeStatus::Terminated,
            t if t.is_leaving() => EmployeeStatus::Resigned,
            _ => EmployeeStatus::Active,
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        MovementType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("未知异动类型: {}", s))
    }
}

// ==========================================
// 在职状态 (Employee Status)
// ==========================================
// Resigned / Terminated 为终态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,
    Resigned,
    Terminated,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Resigned => "Resigned",
            EmployeeStatus::Terminated => "Terminated",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, EmployeeStatus::Resigned | EmployeeStatus::Terminated)
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Active" => Ok(EmployeeStatus::Active),
            "Resigned" => Ok(EmployeeStatus::Resigned),
            "Terminated" => Ok(EmployeeStatus::Terminated),
            other => Err(format!("未知在职状态: {}", other)),
        }
    }
}

// ==========================================
// 组织参照类型 (Reference Kind)
// ==========================================
// 对齐: sections / departments / business_units / sites / companies 表
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Section,
    Department,
    BusinessUnit,
    Site,
    Company,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 5] = [
        ReferenceKind::Section,
        ReferenceKind::Department,
        ReferenceKind::BusinessUnit,
        ReferenceKind::Site,
        ReferenceKind::Company,
    ];

    pub fn table_name(&self) -> &'static str {
        match self {
            ReferenceKind::Section => "sections",
            ReferenceKind::Department => "departments",
            ReferenceKind::BusinessUnit => "business_units",
            ReferenceKind::Site => "sites",
            ReferenceKind::Company => "companies",
        }
    }

    /// 是否带 code 列
    pub fn has_code(&self) -> bool {
        matches!(
            self,
            ReferenceKind::BusinessUnit | ReferenceKind::Site | ReferenceKind::Company
        )
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_type_categories() {
        assert!(MovementType::NewHired.is_new_hire());
        assert!(MovementType::TransferIn.is_new_hire());
        assert!(MovementType::TransferOut.is_leaving());
        assert!(MovementType::Retirement.is_leaving());
        assert!(!MovementType::NewHired.is_leaving());
    }

    #[test]
    fn test_implied_status() {
        assert_eq!(
            MovementType::InvoluntaryResignation.implied_status(),
            EmployeeStatus::Terminated
        );
        assert_eq!(
            MovementType::Retirement.implied_status(),
            EmployeeStatus::Resigned
        );
        assert_eq!(MovementType::TransferIn.implied_status(), EmployeeStatus::Active);
    }

    #[test]
    fn test_movement_type_serde_uses_display_names() {
        let json = serde_json::to_string(&MovementType::TransferOut).unwrap();
        assert_eq!(json, "\"Transfer-Out\"");
        let parsed: MovementType = "new hired".parse().unwrap();
        assert_eq!(parsed, MovementType::NewHired);
    }

    #[test]
    fn test_reference_kind_code_bearing() {
        assert!(!ReferenceKind::Section.has_code());
        assert!(!ReferenceKind::Department.has_code());
        assert!(ReferenceKind::Company.has_code());
        assert_eq!(ReferenceKind::BusinessUnit.table_name(), "business_units");
    }
}
