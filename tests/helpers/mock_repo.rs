// ==========================================
// 内存仓储（故障注入）
// ==========================================
// 用途: 验证记录级失败的收集与参照数据失败的容忍
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use manpower_import::domain::employee::{EmployeeRecord, UpsertOutcome};
use manpower_import::domain::movement::ParsedMovement;
use manpower_import::domain::reference::{InsertManyOutcome, NewReference, ReferenceRow};
use manpower_import::domain::types::{MovementType, ReferenceKind};
use manpower_import::repository::{HrImportRepository, RepositoryError, RepositoryResult};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub struct Failures {
    pub fetch_kinds: HashSet<ReferenceKind>,
    pub insert_kinds: HashSet<ReferenceKind>,
    pub upsert_ids: HashSet<String>,
    pub exists_ids: HashSet<String>,
    pub insert_movement_ids: HashSet<String>,
}

#[derive(Default)]
struct State {
    references: BTreeMap<ReferenceKind, Vec<ReferenceRow>>,
    employees: HashMap<String, EmployeeRecord>,
    movements: Vec<ParsedMovement>,
    fetch_calls: usize,
}

#[derive(Default)]
pub struct MockRepository {
    pub failures: Failures,
    state: Mutex<State>,
}

impl MockRepository {
    pub fn new(failures: Failures) -> Self {
        Self {
            failures,
            state: Mutex::new(State::default()),
        }
    }

    pub fn employee(&self, id: &str) -> Option<EmployeeRecord> {
        self.state.lock().unwrap().employees.get(id).cloned()
    }

    pub fn movements(&self) -> Vec<ParsedMovement> {
        self.state.lock().unwrap().movements.clone()
    }

    pub fn references(&self, kind: ReferenceKind) -> Vec<ReferenceRow> {
        self.state
            .lock()
            .unwrap()
            .references
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    pub fn fetch_calls(&self) -> usize {
        self.state.lock().unwrap().fetch_calls
    }
}

fn injected(what: &str) -> RepositoryError {
    RepositoryError::DatabaseQueryError(format!("injected failure: {}", what))
}

#[async_trait]
impl HrImportRepository for MockRepository {
    async fn fetch_all(&self, kind: ReferenceKind) -> RepositoryResult<Vec<ReferenceRow>> {
        let mut state = self.state.lock().unwrap();
        state.fetch_calls += 1;
        if self.failures.fetch_kinds.contains(&kind) {
            return Err(injected("fetch"));
        }
        Ok(state.references.get(&kind).cloned().unwrap_or_default())
    }

    async fn insert_many(
        &self,
        kind: ReferenceKind,
        rows: Vec<NewReference>,
    ) -> RepositoryResult<InsertManyOutcome> {
        if self.failures.insert_kinds.contains(&kind) {
            return Err(injected("insert_many"));
        }
        let mut state = self.state.lock().unwrap();
        let table = state.references.entry(kind).or_default();
        let mut outcome = InsertManyOutcome::default();
        for row in rows {
            let id = table.len() as i64 + 1;
            table.push(ReferenceRow {
                id,
                name: row.name,
                code: row.code,
            });
            outcome.inserted += 1;
        }
        Ok(outcome)
    }

    async fn upsert_employee(&self, record: &EmployeeRecord) -> RepositoryResult<UpsertOutcome> {
        if self.failures.upsert_ids.contains(&record.employee_id) {
            return Err(injected("upsert_employee"));
        }
        let mut state = self.state.lock().unwrap();
        let previous = state
            .employees
            .insert(record.employee_id.clone(), record.clone());
        Ok(if previous.is_some() {
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
        if self.failures.exists_ids.contains(employee_id) {
            return Err(injected("exists_movement"));
        }
        let state = self.state.lock().unwrap();
        Ok(state
            .movements
            .iter()
            .any(|m| m.dedup_key() == (employee_id, movement_type, effective_date)))
    }

    async fn insert_movement(&self, movement: &ParsedMovement) -> RepositoryResult<i64> {
        if self.failures.insert_movement_ids.contains(&movement.employee_id) {
            return Err(injected("insert_movement"));
        }
        let mut state = self.state.lock().unwrap();
        state.movements.push(movement.clone());
        Ok(state.movements.len() as i64)
    }
}
