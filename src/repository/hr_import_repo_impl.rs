// ==========================================
// 人力看板 - 导入 Repository 实现
// ==========================================
// 职责: 实现导入相关数据访问（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::employee::{EmployeeRecord, UpsertOutcome};
use crate::domain::movement::ParsedMovement;
use crate::domain::reference::{InsertManyOutcome, NewReference, ReferenceRow};
use crate::domain::types::{MovementType, ReferenceKind};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::hr_import_repo::HrImportRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

// ==========================================
// HrImportRepositoryImpl
// ==========================================
pub struct HrImportRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl HrImportRepositoryImpl {
    /// 创建新的 Repository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 统计 employee_master 表记录数
    pub fn count_employees(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM employee_master", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// 统计 movement_transactions 表记录数
    pub fn count_movements(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM movement_transactions",
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// 按 employee_id 读取员工（测试/排查用）
    pub fn find_employee(&self, employee_id: &str) -> RepositoryResult<Option<EmployeeRecord>> {
        let conn = self.get_conn()?;
        let record = conn
            .query_row(
                r#"
                SELECT employee_id, first_name, last_name, birth_date, gender,
                       education_level, onboard_date, resigned_date, current_status,
                       section_id, department_id, business_unit_id, site_id, company_id
                FROM employee_master
                WHERE employee_id = ?1
                "#,
                params![employee_id],
                |row| {
                    let status_raw: String = row.get(8)?;
                    Ok((
                        EmployeeRecord {
                            employee_id: row.get(0)?,
                            first_name: row.get(1)?,
                            last_name: row.get(2)?,
                            birth_date: row.get(3)?,
                            gender: row.get(4)?,
                            education_level: row.get(5)?,
                            onboard_date: row.get(6)?,
                            resigned_date: row.get(7)?,
                            current_status: crate::domain::types::EmployeeStatus::Active,
                            section_id: row.get(9)?,
                            department_id: row.get(10)?,
                            business_unit_id: row.get(11)?,
                            site_id: row.get(12)?,
                            company_id: row.get(13)?,
                        },
                        status_raw,
                    ))
                },
            )
            .optional()?;

        match record {
            None => Ok(None),
            Some((mut record, status_raw)) => {
                record.current_status =
                    status_raw
                        .parse()
                        .map_err(|message| RepositoryError::FieldValueError {
                            field: "current_status".to_string(),
                            message,
                        })?;
                Ok(Some(record))
            }
        }
    }
}

#[async_trait]
impl HrImportRepository for HrImportRepositoryImpl {
    async fn fetch_all(&self, kind: ReferenceKind) -> RepositoryResult<Vec<ReferenceRow>> {
        let conn = self.get_conn()?;

        // 表名来自封闭枚举，不接受外部输入
        let sql = if kind.has_code() {
            format!("SELECT id, name, code FROM {} ORDER BY id", kind.table_name())
        } else {
            format!("SELECT id, name, NULL FROM {} ORDER BY id", kind.table_name())
        };

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ReferenceRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    code: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    async fn insert_many(
        &self,
        kind: ReferenceKind,
        rows: Vec<NewReference>,
    ) -> RepositoryResult<InsertManyOutcome> {
        let conn = self.get_conn()?;

        let sql = if kind.has_code() {
            format!(
                "INSERT INTO {} (name, code, is_active) VALUES (?1, ?2, ?3)",
                kind.table_name()
            )
        } else {
            format!(
                "INSERT INTO {} (name, is_active) VALUES (?1, ?2)",
                kind.table_name()
            )
        };
        let mut stmt = conn.prepare(&sql)?;

        // 逐条写入，单条失败不影响其余记录
        let mut outcome = InsertManyOutcome::default();
        for row in &rows {
            let result = if kind.has_code() {
                stmt.execute(params![row.name, row.code, row.is_active])
            } else {
                stmt.execute(params![row.name, row.is_active])
            };

            match result {
                Ok(_) => outcome.inserted += 1,
                Err(e) => {
                    let err = RepositoryError::from(e);
                    if err.is_unique_violation() {
                        debug!(table = %kind, name = %row.name, "参照名称已存在");
                    }
                    outcome.errors.push(format!("{}: {}", row.name, err));
                }
            }
        }

        Ok(outcome)
    }

    async fn upsert_employee(&self, record: &EmployeeRecord) -> RepositoryResult<UpsertOutcome> {
        let conn = self.get_conn()?;

        let existed = conn
            .query_row(
                "SELECT 1 FROM employee_master WHERE employee_id = ?1",
                params![record.employee_id],
                |_row| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        conn.execute(
            r#"
            INSERT INTO employee_master (
                employee_id, first_name, last_name, birth_date, gender,
                education_level, onboard_date, resigned_date, current_status,
                section_id, department_id, business_unit_id, site_id, company_id
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14
            )
            ON CONFLICT(employee_id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                birth_date = excluded.birth_date,
                gender = excluded.gender,
                education_level = excluded.education_level,
                onboard_date = excluded.onboard_date,
                resigned_date = excluded.resigned_date,
                current_status = excluded.current_status,
                section_id = excluded.section_id,
                department_id = excluded.department_id,
                business_unit_id = excluded.business_unit_id,
                site_id = excluded.site_id,
                company_id = excluded.company_id,
                updated_at = datetime('now')
            "#,
            params![
                record.employee_id,
                record.first_name,
                record.last_name,
                record.birth_date,
                record.gender,
                record.education_level,
                record.onboard_date,
                record.resigned_date,
                record.current_status.as_str(),
                record.section_id,
                record.department_id,
                record.business_unit_id,
                record.site_id,
                record.company_id,
            ],
        )?;

        Ok(if existed {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Inserted
        })
    }

    async fn exists_movement(
        &self,
        employee_id: &str,
        movement_type: MovementType,
        effective_date: Option<NaiveDate>,
    ) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;

        // IS 比较: NULL 与 NULL 视为相同
        let found = conn
            .query_row(
                r#"
                SELECT 1 FROM movement_transactions
                WHERE employee_id = ?1 AND movement_type = ?2 AND effective_date IS ?3
                LIMIT 1
                "#,
                params![employee_id, movement_type.as_str(), effective_date],
                |_row| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        Ok(found)
    }

    async fn insert_movement(&self, movement: &ParsedMovement) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO movement_transactions (
                employee_id, movement_type, effective_date, position_title,
                position_level, reason_code, reason_detail, org_id, section, department
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                movement.employee_id,
                movement.movement_type.as_str(),
                movement.effective_date,
                movement.position_title,
                movement.position_level,
                movement.reason_code,
                movement.reason_detail,
                movement.org_id,
                movement.section,
                movement.department,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }
}
