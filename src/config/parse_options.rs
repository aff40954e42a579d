// ==========================================
// 人力看板 - 解析参数快照
// ==========================================
// 每次导入开始时从配置读取一次，解析期间不再变化
// ==========================================

use crate::config::import_config_trait::{ConfigReadError, ImportConfigReader};
use crate::domain::types::MovementType;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_COLUMNS: usize = 10;
pub const DEFAULT_TSV_FIELD_THRESHOLD: usize = 5;
pub const DEFAULT_ORG_ID: i64 = 1;
pub const DEFAULT_REASON_FALLBACK_CODE: &str = "99";
pub const DEFAULT_REASON_CODE_MAX_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    pub min_columns: usize,
    pub tsv_field_threshold: usize,
    pub default_org_id: i64,
    pub reason_fallback_code: String,
    pub reason_code_max_len: usize,
    pub unrecognized_movement_type: MovementType,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            min_columns: DEFAULT_MIN_COLUMNS,
            tsv_field_threshold: DEFAULT_TSV_FIELD_THRESHOLD,
            default_org_id: DEFAULT_ORG_ID,
            reason_fallback_code: DEFAULT_REASON_FALLBACK_CODE.to_string(),
            reason_code_max_len: DEFAULT_REASON_CODE_MAX_LEN,
            unrecognized_movement_type: MovementType::NewHired,
        }
    }
}

impl ParseOptions {
    /// 从配置读取器构建参数快照
    pub async fn from_config<C>(config: &C) -> Result<Self, ConfigReadError>
    where
        C: ImportConfigReader + ?Sized,
    {
        Ok(Self {
            min_columns: config.get_min_columns().await?,
            tsv_field_threshold: config.get_tsv_field_threshold().await?,
            default_org_id: config.get_default_org_id().await?,
            reason_fallback_code: config.get_reason_fallback_code().await?,
            reason_code_max_len: config.get_reason_code_max_len().await?,
            unrecognized_movement_type: config.get_unrecognized_movement_type().await?,
        })
    }
}
