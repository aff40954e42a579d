// ==========================================
// 人力看板 - 行归并
// ==========================================
// 职责: 按文件顺序折叠数据行
//   - 员工: employee_id → 最新快照（保持首次出现顺序）
//   - 异动: 每个有效行追加一条，不合并不去重
// 约束: 相同输入得到相同输出
// ==========================================

use crate::config::ParseOptions;
use crate::domain::employee::ParsedEmployee;
use crate::domain::import::ParseOutput;
use crate::domain::movement::ParsedMovement;
use crate::domain::types::MovementType;
use crate::importer::data_cleaner::{
    canonicalize_education, classify_movement_type, clean_position_level,
    extract_leaving_reason, parse_month_name_date, MovementClassification,
};
use crate::importer::field_mapper::RawDataRow;
use std::collections::HashMap;
use tracing::debug;

/// 归并累加器
pub struct RowReducer<'a> {
    options: &'a ParseOptions,
    employees: Vec<ParsedEmployee>,
    index_by_id: HashMap<String, usize>,
    movements: Vec<ParsedMovement>,
    warnings: Vec<String>,
}

impl<'a> RowReducer<'a> {
    pub fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            employees: Vec::new(),
            index_by_id: HashMap::new(),
            movements: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// 分词阶段产生的告警并入结果
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    /// 折叠一行
    pub fn push(&mut self, row: &RawDataRow) {
        if !row.has_employee_id() {
            return;
        }

        let movement_type = match classify_movement_type(&row.movement_type) {
            MovementClassification::Matched(t) => t,
            unrecognized @ MovementClassification::Unrecognized(_) => {
                let fallback = self.options.unrecognized_movement_type;
                debug!(
                    row = row.row_number,
                    employee_id = %row.employee_id,
                    raw = %row.movement_type,
                    fallback = %fallback,
                    "异动类型无法识别，使用默认类型"
                );
                unrecognized.resolve(fallback)
            }
        };

        let is_leaving = movement_type.is_leaving();
        let resigned_date = parse_month_name_date(&row.resigned_date);
        let onboard_date = parse_month_name_date(&row.onboard_date);

        self.apply_snapshot(row, movement_type, resigned_date, onboard_date);

        let effective_date = if is_leaving { resigned_date } else { onboard_date };

        self.movements.push(ParsedMovement {
            employee_id: row.employee_id.clone(),
            movement_type,
            effective_date,
            position_title: row.position_title.clone(),
            position_level: clean_position_level(&row.position_level),
            reason_code: extract_leaving_reason(
                &row.leaving_reason,
                self.options.reason_code_max_len,
                &self.options.reason_fallback_code,
            ),
            reason_detail: if row.remark.is_empty() {
                None
            } else {
                Some(row.remark.clone())
            },
            org_id: self.options.default_org_id,
            section: row.section.clone(),
            department: row.department.clone(),
            row_number: row.row_number,
        });
    }

    fn apply_snapshot(
        &mut self,
        row: &RawDataRow,
        movement_type: MovementType,
        resigned_date: Option<chrono::NaiveDate>,
        onboard_date: Option<chrono::NaiveDate>,
    ) {
        let is_leaving = movement_type.is_leaving();
        let implied_status = movement_type.implied_status();
        let existing = self.index_by_id.get(&row.employee_id).copied();

        match existing {
            Some(idx) if !movement_type.is_new_hire() => {
                if is_leaving {
                    let employee = &mut self.employees[idx];
                    employee.current_status = implied_status;
                    employee.resigned_date = resigned_date;
                }
            }
            _ => {
                // 已离职/已解除的状态不会被后续入职行覆盖
                let current_status = match existing {
                    Some(idx) if self.employees[idx].current_status.is_terminal() => {
                        self.employees[idx].current_status
                    }
                    _ => implied_status,
                };

                let snapshot = ParsedEmployee {
                    employee_id: row.employee_id.clone(),
                    first_name: row.first_name.clone(),
                    last_name: row.last_name.clone(),
                    gender: row.gender.clone(),
                    birth_date: parse_month_name_date(&row.birth_date),
                    education_level: canonicalize_education(&row.education_level),
                    onboard_date,
                    resigned_date: if is_leaving { resigned_date } else { None },
                    current_status,
                    section_name: row.section.clone(),
                    department_name: row.department.clone(),
                    business_unit_name: row.business_unit.clone(),
                    site_name: row.site.clone(),
                    company_name: row.company.clone(),
                };

                match existing {
                    Some(idx) => self.employees[idx] = snapshot,
                    None => {
                        self.index_by_id
                            .insert(row.employee_id.clone(), self.employees.len());
                        self.employees.push(snapshot);
                    }
                }
            }
        }
    }

    /// 结束归并
    pub fn finish(self) -> ParseOutput {
        ParseOutput {
            employees: self.employees,
            movements: self.movements,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::EmployeeStatus;
    use chrono::NaiveDate;

    fn row(id: &str, movement: &str, onboard: &str, resigned: &str) -> RawDataRow {
        RawDataRow {
            movement_type: movement.to_string(),
            employee_id: id.to_string(),
            first_name: format!("{}-first", movement),
            last_name: "Jaidee".to_string(),
            position_level: "6. Officer".to_string(),
            department: "R&D".to_string(),
            onboard_date: onboard.to_string(),
            resigned_date: resigned.to_string(),
            row_number: 2,
            ..Default::default()
        }
    }

    fn reduce(rows: &[RawDataRow]) -> ParseOutput {
        let options = ParseOptions::default();
        let mut reducer = RowReducer::new(&options);
        for r in rows {
            reducer.push(r);
        }
        reducer.finish()
    }

    #[test]
    fn test_hire_then_resignation() {
        let out = reduce(&[
            row("E1", "New Hired", "17 May 2022", ""),
            row("E1", "Voluntary Resignation", "1 January 2000", "31 January 2024"),
        ]);

        assert_eq!(out.employees.len(), 1);
        let e = &out.employees[0];
        assert_eq!(e.current_status, EmployeeStatus::Resigned);
        assert_eq!(e.resigned_date, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(e.first_name, "New Hired-first");
        assert_eq!(e.onboard_date, NaiveDate::from_ymd_opt(2022, 5, 17));

        assert_eq!(out.movements.len(), 2);
        assert_eq!(out.movements[0].effective_date, NaiveDate::from_ymd_opt(2022, 5, 17));
        assert_eq!(out.movements[1].effective_date, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(out.movements[0].position_level, "Officer");
    }

    #[test]
    fn test_terminal_status_survives_rehire_row() {
        let out = reduce(&[
            row("E1", "Retirement", "", "1 March 2023"),
            row("E1", "New Hired", "2 April 2023", ""),
        ]);

        let e = &out.employees[0];
        assert_eq!(e.current_status, EmployeeStatus::Resigned);
        assert_eq!(e.resigned_date, None);
        assert_eq!(e.onboard_date, NaiveDate::from_ymd_opt(2023, 4, 2));
    }

    #[test]
    fn test_mutual_contract_terminates() {
        let out = reduce(&[row("E1", "Mutual Contract", "", "5 June 2024")]);
        assert_eq!(out.employees[0].current_status, EmployeeStatus::Terminated);
        assert_eq!(
            out.movements[0].movement_type,
            MovementType::InvoluntaryResignation
        );
    }

    #[test]
    fn test_missing_id_rows_are_dropped() {
        let out = reduce(&[
            row("", "New Hired", "", ""),
            row(".", "New Hired", "", ""),
            row("E2", "New Hired", "", ""),
        ]);
        assert_eq!(out.employees.len(), 1);
        assert_eq!(out.movements.len(), 1);
    }

    #[test]
    fn test_unrecognized_movement_falls_back() {
        let mut options = ParseOptions::default();
        options.unrecognized_movement_type = MovementType::TransferIn;
        let mut reducer = RowReducer::new(&options);
        reducer.push(&row("E1", "9 - Transfer", "1 May 2020", ""));
        let out = reducer.finish();

        assert_eq!(out.movements[0].movement_type, MovementType::TransferIn);
    }

    #[test]
    fn test_leaving_row_only_updates_status() {
        let mut leaving = row("E1", "Transfer Out", "9 September 2021", "30 June 2024");
        leaving.first_name = "Changed".to_string();
        leaving.department = "Sales".to_string();

        let out = reduce(&[row("E1", "New Hired", "1 May 2020", ""), leaving]);

        let e = &out.employees[0];
        assert_eq!(e.first_name, "New Hired-first");
        assert_eq!(e.department_name, "R&D");
        assert_eq!(e.onboard_date, NaiveDate::from_ymd_opt(2020, 5, 1));
        assert_eq!(e.current_status, EmployeeStatus::Resigned);
        assert_eq!(e.resigned_date, NaiveDate::from_ymd_opt(2024, 6, 30));
        assert_eq!(out.movements[1].department, "Sales");
    }

    #[test]
    fn test_transfer_in_overwrites_snapshot() {
        let mut transfer = row("E1", "Transfer In", "3 March 2021", "");
        transfer.first_name = "Changed".to_string();

        let out = reduce(&[row("E1", "New Hired", "1 May 2020", ""), transfer]);

        assert_eq!(out.employees[0].first_name, "Changed");
        assert_eq!(out.employees[0].onboard_date, NaiveDate::from_ymd_opt(2021, 3, 3));
        assert_eq!(out.employees[0].current_status, EmployeeStatus::Active);
        assert_eq!(out.movements.len(), 2);
    }

    #[test]
    fn test_employee_order_is_first_seen() {
        let out = reduce(&[
            row("B", "New Hired", "", ""),
            row("A", "New Hired", "", ""),
            row("B", "New Hired", "", ""),
        ]);
        let ids: Vec<&str> = out.employees.iter().map(|e| e.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }
}
