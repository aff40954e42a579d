// ==========================================
// 人力看板 - 导入 Repository Trait
// ==========================================
// 职责: 定义导入管道所需的数据访问接口（不包含实现）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::domain::employee::{EmployeeRecord, UpsertOutcome};
use crate::domain::movement::ParsedMovement;
use crate::domain::reference::{InsertManyOutcome, NewReference, ReferenceRow};
use crate::domain::types::{MovementType, ReferenceKind};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use chrono::NaiveDate;

// ==========================================
// HrImportRepository Trait
// ==========================================
// 用途: 导入管道访问持久化存储的唯一入口
// 实现者: HrImportRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait HrImportRepository: Send + Sync {
    // ===== 组织参照数据 =====

    /// 读取某类参照表的全部记录
    async fn fetch_all(&self, kind: ReferenceKind) -> RepositoryResult<Vec<ReferenceRow>>;

    /// 批量新增参照记录
    ///
    /// # 返回
    /// - Ok(InsertManyOutcome): 成功条数 + 逐条失败信息（允许部分失败）
    /// - Err: 整体失败（如锁获取失败）
    async fn insert_many(
        &self,
        kind: ReferenceKind,
        rows: Vec<NewReference>,
    ) -> RepositoryResult<InsertManyOutcome>;

    // ===== 员工主数据 =====

    /// 按 employee_id 新增或更新员工
    async fn upsert_employee(&self, record: &EmployeeRecord) -> RepositoryResult<UpsertOutcome>;

    // ===== 异动记录 =====

    /// 检查去重键 (employee_id, movement_type, effective_date) 是否已存在
    ///
    /// effective_date 为 None 时与已存的 NULL 视为相同
    async fn exists_movement(
        &self,
        employee_id: &str,
        movement_type: MovementType,
        effective_date: Option<NaiveDate>,
    ) -> RepositoryResult<bool>;

    /// 新增一条异动记录，返回 transaction_id
    async fn insert_movement(&self, movement: &ParsedMovement) -> RepositoryResult<i64>;
}
