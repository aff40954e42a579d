// ==========================================
// 人力看板 - 领域模型层
// ==========================================
// 职责: 定义导入管道的实体与类型
// 红线: 不含数据访问逻辑,不含解析逻辑
// ==========================================

pub mod employee;
pub mod import;
pub mod movement;
pub mod reference;
pub mod types;

// 重导出核心类型
pub use employee::{EmployeeRecord, ParsedEmployee, UpsertOutcome};
pub use import::{EmployeeImportReport, ImportResult, MovementImportReport, ParseOutput};
pub use movement::ParsedMovement;
pub use reference::{InsertManyOutcome, NewReference, ReferenceRow};
pub use types::{EmployeeStatus, MovementType, ReferenceKind};
