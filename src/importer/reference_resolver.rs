// ==========================================
// 人力看板 - 组织参照解析
// ==========================================
// 两步:
//   1. ensure_exists: 批次中出现但库中没有的组织名称自动新增
//   2. reload_caches: 重新读取五类参照表，构建小写名称 → id 缓存
// reload_caches 需要 ensure_exists 返回的 EnsureReport，保证先建后查
// 参照数据读写失败只记录日志，不中断导入（对应外键置空）
// ==========================================

use crate::domain::employee::{EmployeeRecord, ParsedEmployee};
use crate::domain::reference::{NewReference, ReferenceRow};
use crate::domain::types::ReferenceKind;
use crate::repository::HrImportRepository;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info, warn};

// ==========================================
// ReferenceNames - 批次内出现的组织名称
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceNames {
    names: BTreeMap<ReferenceKind, Vec<String>>,
}

impl ReferenceNames {
    /// 收集员工快照中的非空组织名称（大小写不敏感去重，保留首次写法）
    pub fn collect(employees: &[ParsedEmployee]) -> Self {
        let mut names: BTreeMap<ReferenceKind, Vec<String>> = BTreeMap::new();
        let mut seen: HashSet<(ReferenceKind, String)> = HashSet::new();

        for employee in employees {
            for kind in ReferenceKind::ALL {
                let name = org_name(employee, kind).trim();
                if name.is_empty() {
                    continue;
                }
                if seen.insert((kind, name.to_lowercase())) {
                    names.entry(kind).or_default().push(name.to_string());
                }
            }
        }

        Self { names }
    }

    pub fn get(&self, kind: ReferenceKind) -> &[String] {
        self.names.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn org_name(employee: &ParsedEmployee, kind: ReferenceKind) -> &str {
    match kind {
        ReferenceKind::Section => &employee.section_name,
        ReferenceKind::Department => &employee.department_name,
        ReferenceKind::BusinessUnit => &employee.business_unit_name,
        ReferenceKind::Site => &employee.site_name,
        ReferenceKind::Company => &employee.company_name,
    }
}

// ==========================================
// EnsureReport - 自动新增结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnsureReport {
    pub created: BTreeMap<ReferenceKind, usize>,
    pub messages: Vec<String>,
}

impl EnsureReport {
    pub fn created_total(&self) -> usize {
        self.created.values().sum()
    }
}

// ==========================================
// LookupCache / ReferenceCaches
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupCache {
    by_key: HashMap<String, i64>,
}

impl LookupCache {
    /// 名称（及 code）小写作为键；code 不覆盖已有名称键
    pub fn from_rows(rows: &[ReferenceRow], use_code: bool) -> Self {
        let mut by_key = HashMap::new();
        for row in rows {
            by_key.insert(row.name.trim().to_lowercase(), row.id);
        }
        if use_code {
            for row in rows {
                if let Some(code) = row.code.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
                    by_key.entry(code.to_lowercase()).or_insert(row.id);
                }
            }
        }
        Self { by_key }
    }

    pub fn lookup(&self, name: &str) -> Option<i64> {
        let key = name.trim();
        if key.is_empty() {
            return None;
        }
        self.by_key.get(&key.to_lowercase()).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceCaches {
    caches: BTreeMap<ReferenceKind, LookupCache>,
}

impl ReferenceCaches {
    pub fn lookup(&self, kind: ReferenceKind, name: &str) -> Option<i64> {
        self.caches.get(&kind).and_then(|c| c.lookup(name))
    }

    /// 员工快照 → 落库结构（组织名称解析为外键，未匹配为 None）
    pub fn resolve_employee(&self, employee: &ParsedEmployee) -> EmployeeRecord {
        let non_empty = |v: &str| -> Option<String> {
            if v.is_empty() {
                None
            } else {
                Some(v.to_string())
            }
        };

        EmployeeRecord {
            employee_id: employee.employee_id.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            birth_date: employee.birth_date,
            gender: non_empty(&employee.gender),
            education_level: non_empty(&employee.education_level),
            onboard_date: employee.onboard_date,
            resigned_date: employee.resigned_date,
            current_status: employee.current_status,
            section_id: self.lookup(ReferenceKind::Section, &employee.section_name),
            department_id: self.lookup(ReferenceKind::Department, &employee.department_name),
            business_unit_id: self
                .lookup(ReferenceKind::BusinessUnit, &employee.business_unit_name),
            site_id: self.lookup(ReferenceKind::Site, &employee.site_name),
            company_id: self.lookup(ReferenceKind::Company, &employee.company_name),
        }
    }
}

// ==========================================
// ReferenceResolver
// ==========================================
pub struct ReferenceResolver<'a, R: HrImportRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: HrImportRepository + ?Sized> ReferenceResolver<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// 第一步: 自动新增缺失的组织参照
    pub async fn ensure_exists(&self, names: &ReferenceNames) -> EnsureReport {
        let mut report = EnsureReport::default();

        for kind in ReferenceKind::ALL {
            let wanted = names.get(kind);
            if wanted.is_empty() {
                continue;
            }

            let existing = match self.repo.fetch_all(kind).await {
                Ok(rows) => rows
                    .into_iter()
                    .map(|r| r.name.trim().to_lowercase())
                    .collect::<HashSet<_>>(),
                Err(e) => {
                    warn!(table = %kind, error = %e, "读取参照表失败，跳过自动新增");
                    report.messages.push(format!("{}: {}", kind, e));
                    continue;
                }
            };

            let to_insert: Vec<NewReference> = wanted
                .iter()
                .filter(|name| !existing.contains(&name.to_lowercase()))
                .map(|name| NewReference {
                    name: name.clone(),
                    code: if kind.has_code() {
                        Some(name.clone())
                    } else {
                        None
                    },
                    is_active: true,
                })
                .collect();

            if to_insert.is_empty() {
                continue;
            }

            info!(table = %kind, count = to_insert.len(), "自动新增组织参照");
            match self.repo.insert_many(kind, to_insert).await {
                Ok(outcome) => {
                    for message in &outcome.errors {
                        warn!(table = %kind, error = %message, "组织参照新增失败");
                    }
                    report
                        .messages
                        .extend(outcome.errors.iter().map(|m| format!("{}: {}", kind, m)));
                    report.created.insert(kind, outcome.inserted);
                }
                Err(e) => {
                    warn!(table = %kind, error = %e, "组织参照批量新增失败");
                    report.messages.push(format!("{}: {}", kind, e));
                }
            }
        }

        report
    }

    /// 第二步: 重新读取参照表，构建缓存
    pub async fn reload_caches(&self, ensured: &EnsureReport) -> ReferenceCaches {
        debug!(created = ensured.created_total(), "重新加载组织参照缓存");

        let mut caches = BTreeMap::new();
        for kind in ReferenceKind::ALL {
            let cache = match self.repo.fetch_all(kind).await {
                Ok(rows) => LookupCache::from_rows(&rows, kind.has_code()),
                Err(e) => {
                    warn!(table = %kind, error = %e, "读取参照表失败，缓存置空");
                    LookupCache::default()
                }
            };
            caches.insert(kind, cache);
        }

        ReferenceCaches { caches }
    }
}
