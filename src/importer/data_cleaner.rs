// ==========================================
// 人力看板 - 字段规范化
// ==========================================
// 职责: 日期 / 异动类型 / 职级 / 离职原因 / 学历 / 姓名
// 约束: 全部为纯函数，任何输入都返回结果（无法识别时返回兜底值）
// ==========================================

use crate::domain::types::MovementType;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static POSITION_LEVEL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("valid position level regex"));

static LEAVING_REASON_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*-\s*.+$").expect("valid leaving reason regex"));

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

// ==========================================
// 日期
// ==========================================

/// 解析 "<日> <英文月份全称> <四位年份>"，如 "4 June 1999"
///
/// 其他形式（含 ISO 日期）返回 None。
/// 日历上不存在的日期（如 "30 February 1995"）同样返回 None，不生成 1995-02-30 这类无效值。
pub fn parse_month_name_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return None;
    }

    let parts: Vec<&str> = trimmed.split(' ').collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    if day.is_empty() || !day.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let month_lower = month.to_lowercase();
    let month_index = MONTH_NAMES.iter().position(|m| *m == month_lower)?;

    NaiveDate::from_ymd_opt(
        year.parse().ok()?,
        month_index as u32 + 1,
        day.parse().ok()?,
    )
}

// ==========================================
// 异动类型
// ==========================================

/// 异动类型识别结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovementClassification {
    Matched(MovementType),
    Unrecognized(String),
}

impl MovementClassification {
    /// 无法识别时使用 fallback
    pub fn resolve(&self, fallback: MovementType) -> MovementType {
        match self {
            MovementClassification::Matched(t) => *t,
            MovementClassification::Unrecognized(_) => fallback,
        }
    }
}

/// 异动类型识别（小写子串匹配，按顺序首个命中）
///
/// 注意: "involuntary resignation" 包含 "voluntary resignation"，会先命中自愿离职。
pub fn classify_movement_type(raw: &str) -> MovementClassification {
    let text = raw.trim().to_lowercase();

    let matched = if text.contains("new hired") {
        Some(MovementType::NewHired)
    } else if text.contains("voluntary resignation") {
        Some(MovementType::VoluntaryResignation)
    } else if text.contains("involuntary resignation") || text.contains("mutual contract") {
        Some(MovementType::InvoluntaryResignation)
    } else if text.contains("transfer") && text.contains("in") {
        Some(MovementType::TransferIn)
    } else if text.contains("transfer") && text.contains("out") {
        Some(MovementType::TransferOut)
    } else if text.contains("retirement") {
        Some(MovementType::Retirement)
    } else {
        None
    };

    match matched {
        Some(t) => MovementClassification::Matched(t),
        None => MovementClassification::Unrecognized(raw.to_string()),
    }
}

// ==========================================
// 职级 / 离职原因
// ==========================================

/// 去除职级前的序号，如 "6. Officer" → "Officer"
pub fn clean_position_level(raw: &str) -> String {
    POSITION_LEVEL_PREFIX.replace(raw, "").trim().to_string()
}

/// 提取离职原因代码
///
/// - 空白 → None
/// - "5 - ความก้าวหน้า" → "5"
/// - 无代码但不超过 max_len 个字符 → 原文
/// - 其余 → fallback_code
pub fn extract_leaving_reason(raw: &str, max_len: usize, fallback_code: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = LEAVING_REASON_CODE.captures(trimmed) {
        return Some(caps[1].to_string());
    }

    if trimmed.chars().count() <= max_len {
        Some(trimmed.to_string())
    } else {
        Some(fallback_code.to_string())
    }
}

// ==========================================
// 学历
// ==========================================

const EDUCATION_TIERS: &[(&[&str], &str)] = &[
    (&["ป. เอก", "ป.เอก", "phd", "ดร."], "ป. เอก"),
    (&["ป. โท", "ป.โท", "master"], "ป. โท"),
    (&["ป. ตรี", "ป.ตรี", "bachelor"], "ป. ตรี"),
    (&["ปวส"], "ปวส."),
    (&["ปวช"], "ปวช."),
    (&["ม.6", "ม. 6"], "ม.6"),
    (&["ม.3", "ม. 3"], "ม.3"),
];

/// 学历规范化；未命中时取第一个空白分隔的词
pub fn canonicalize_education(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let lower = trimmed.to_lowercase();
    for (needles, canonical) in EDUCATION_TIERS {
        if needles.iter().any(|n| lower.contains(n)) {
            return canonical.to_string();
        }
    }

    trimmed
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

// ==========================================
// 姓名
// ==========================================

/// 去除全部双引号并裁剪
pub fn clean_name(raw: &str) -> String {
    raw.replace('"', "").trim().to_string()
}
