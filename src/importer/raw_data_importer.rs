// ==========================================
// 人力看板 - 原始数据导入器
// ==========================================
// 流程: 分词 → 映射 → 规范化/归并 → 组织参照 → 员工 upsert → 异动去重写入
// 约束: 单条记录失败不中断，错误收集到 ImportResult
// 约束: 不做整体事务，部分成功可接受
// ==========================================

use crate::config::{ImportConfigReader, ParseOptions};
use crate::domain::employee::UpsertOutcome;
use crate::domain::import::{
    EmployeeImportReport, ImportResult, MovementImportReport, ParseOutput,
};
use crate::importer::error::{ImportError, ImporterResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{read_raw_text, tokenize};
use crate::importer::reference_resolver::{ReferenceNames, ReferenceResolver};
use crate::importer::row_reducer::RowReducer;
use crate::repository::HrImportRepository;
use async_trait::async_trait;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// 纯解析（无副作用），相同输入得到相同输出
pub fn parse_raw_text(text: &str, options: &ParseOptions) -> ParseOutput {
    let tokenized = tokenize(text, options);
    let mapper = FieldMapper;

    let mut reducer = RowReducer::new(options).with_warnings(tokenized.warnings);
    for raw in &tokenized.rows {
        reducer.push(&mapper.map_row(raw));
    }
    reducer.finish()
}

// ==========================================
// RawDataImporter Trait
// ==========================================
#[async_trait]
pub trait RawDataImporter: Send + Sync {
    /// 预览: 只解析不落库
    async fn parse_raw_data(&self, text: &str) -> ImporterResult<ParseOutput>;

    /// 解析并写入
    ///
    /// # 返回
    /// - Ok(ImportResult): 记录级错误在结果内（列数不足的行排在员工错误列表最前），
    ///   success 表示两类错误列表均为空
    /// - Err: 配置读取失败
    async fn import_raw_data(&self, text: &str) -> ImporterResult<ImportResult>;

    /// 从文件导入（.csv/.tsv/.txt/.xlsx/.xls）
    async fn import_from_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImporterResult<ImportResult>;
}

// ==========================================
// RawDataImporterImpl
// ==========================================
pub struct RawDataImporterImpl<R, C>
where
    R: HrImportRepository,
    C: ImportConfigReader,
{
    repo: R,
    config: C,
}

impl<R, C> RawDataImporterImpl<R, C>
where
    R: HrImportRepository,
    C: ImportConfigReader,
{
    pub fn new(repo: R, config: C) -> Self {
        Self { repo, config }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    async fn load_options(&self) -> ImporterResult<ParseOptions> {
        ParseOptions::from_config(&self.config)
            .await
            .map_err(|e| ImportError::ConfigReadError(e.to_string()))
    }

    async fn persist_employees(
        &self,
        parsed: &ParseOutput,
        report: &mut EmployeeImportReport,
    ) {
        let resolver = ReferenceResolver::new(&self.repo);
        let names = ReferenceNames::collect(&parsed.employees);
        let ensured = resolver.ensure_exists(&names).await;
        let caches = resolver.reload_caches(&ensured).await;

        for employee in &parsed.employees {
            let record = caches.resolve_employee(employee);
            match self.repo.upsert_employee(&record).await {
                Ok(UpsertOutcome::Inserted) => report.inserted += 1,
                Ok(UpsertOutcome::Updated) => report.updated += 1,
                Err(e) => {
                    error!(employee_id = %employee.employee_id, error = %e, "员工写入失败");
                    report
                        .errors
                        .push(format!("Employee {}: {}", employee.employee_id, e));
                }
            }
        }
    }

    async fn persist_movements(&self, parsed: &ParseOutput, report: &mut MovementImportReport) {
        let mut skipped = 0usize;

        for movement in &parsed.movements {
            let exists = self
                .repo
                .exists_movement(
                    &movement.employee_id,
                    movement.movement_type,
                    movement.effective_date,
                )
                .await;

            let outcome = match exists {
                Ok(true) => {
                    skipped += 1;
                    continue;
                }
                Ok(false) => self.repo.insert_movement(movement).await.map(|_| ()),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(()) => report.inserted += 1,
                Err(e) => {
                    error!(
                        employee_id = %movement.employee_id,
                        row = movement.row_number,
                        error = %e,
                        "异动写入失败"
                    );
                    report
                        .errors
                        .push(format!("Movement for {}: {}", movement.employee_id, e));
                }
            }
        }

        debug!(skipped = skipped, "已存在的异动记录跳过");
    }
}

#[async_trait]
impl<R, C> RawDataImporter for RawDataImporterImpl<R, C>
where
    R: HrImportRepository + Send + Sync,
    C: ImportConfigReader + Send + Sync,
{
    async fn parse_raw_data(&self, text: &str) -> ImporterResult<ParseOutput> {
        let options = self.load_options().await?;
        Ok(parse_raw_text(text, &options))
    }

    #[instrument(skip(self, text), fields(batch_id))]
    async fn import_raw_data(&self, text: &str) -> ImporterResult<ImportResult> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        info!(batch_id = %batch_id, bytes = text.len(), "开始导入原始数据");

        // === 步骤 1: 解析 ===
        let options = self.load_options().await?;
        let parsed = parse_raw_text(text, &options);
        info!(
            employees = parsed.employees.len(),
            movements = parsed.movements.len(),
            warnings = parsed.warnings.len(),
            "解析完成"
        );

        let mut result = ImportResult {
            success: true,
            batch_id,
            // 结构性行错误计入员工错误列表，有被丢弃的行即视为未完全成功
            employees: EmployeeImportReport {
                total: parsed.employees.len(),
                errors: parsed.warnings.clone(),
                ..Default::default()
            },
            movements: MovementImportReport {
                total: parsed.movements.len(),
                ..Default::default()
            },
            warnings: parsed.warnings.clone(),
            elapsed_ms: 0,
        };

        // === 步骤 2: 组织参照 + 员工 ===
        self.persist_employees(&parsed, &mut result.employees).await;

        // === 步骤 3: 异动 ===
        self.persist_movements(&parsed, &mut result.movements).await;

        result.compute_success();
        result.elapsed_ms = start_time.elapsed().as_millis() as u64;

        info!(
            batch_id = %result.batch_id,
            success = result.success,
            employees_inserted = result.employees.inserted,
            employees_updated = result.employees.updated,
            employee_errors = result.employees.errors.len(),
            movements_inserted = result.movements.inserted,
            movement_errors = result.movements.errors.len(),
            elapsed_ms = result.elapsed_ms,
            "导入完成"
        );

        Ok(result)
    }

    async fn import_from_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImporterResult<ImportResult> {
        let path = file_path.as_ref();
        info!(file_path = %path.display(), "读取导入文件");

        let text = read_raw_text(path).map_err(|e| {
            error!(error = %e, "文件读取失败");
            e
        })?;

        self.import_raw_data(&text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Month\tMovement Type\tEmployee ID\tName\tSurname\tGender\tPosition Title\n\
Jan\tNew Hired\tE1\tSomchai\tJaidee\tMale\tEngineer\t6. Officer\tQA\tR&D\n\
Jan\tbroken\n\
Feb\tVoluntary Resignation\tE1\tSomchai\tJaidee\tMale\tEngineer\t6. Officer\tQA\tR&D\n";

    #[test]
    fn test_parse_raw_text_is_deterministic() {
        let options = ParseOptions::default();
        let first = parse_raw_text(SAMPLE, &options);
        let second = parse_raw_text(SAMPLE, &options);

        assert_eq!(first, second);
        assert_eq!(first.employees.len(), 1);
        assert_eq!(first.movements.len(), 2);
        assert_eq!(first.warnings, vec!["Row 3: Not enough columns (2)".to_string()]);
    }
}
