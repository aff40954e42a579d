// ==========================================
// 人力看板 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入管道所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::types::MovementType;
use async_trait::async_trait;
use std::error::Error;

/// 配置读取错误
pub type ConfigReadError = Box<dyn Error + Send + Sync>;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入管道所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
// 约定: 配置缺失或无法解析时返回默认值，不报错
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    // ===== 分词配置 =====

    /// 获取有效数据行的最少列数
    ///
    /// # 默认值
    /// - 10
    async fn get_min_columns(&self) -> Result<usize, ConfigReadError>;

    /// 获取判定为制表符分隔的字段数阈值（首行 tab 字段数需大于此值）
    ///
    /// # 默认值
    /// - 5
    async fn get_tsv_field_threshold(&self) -> Result<usize, ConfigReadError>;

    // ===== 异动记录配置 =====

    /// 获取异动记录的组织 ID
    ///
    /// # 默认值
    /// - 1
    async fn get_default_org_id(&self) -> Result<i64, ConfigReadError>;

    /// 获取离职原因无法识别时的兜底代码
    ///
    /// # 默认值
    /// - "99"
    async fn get_reason_fallback_code(&self) -> Result<String, ConfigReadError>;

    /// 获取离职原因原文直接作为代码的最大长度（字符数）
    ///
    /// # 默认值
    /// - 10
    async fn get_reason_code_max_len(&self) -> Result<usize, ConfigReadError>;

    /// 获取无法识别的异动类型的兜底类型
    ///
    /// # 默认值
    /// - MovementType::NewHired
    async fn get_unrecognized_movement_type(&self) -> Result<MovementType, ConfigReadError>;
}

// ==========================================
// DefaultImportConfig - 内置默认配置
// ==========================================
// 用途: 无数据库配置时（纯预览 / 测试）
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultImportConfig;

#[async_trait]
impl ImportConfigReader for DefaultImportConfig {
    async fn get_min_columns(&self) -> Result<usize, ConfigReadError> {
        Ok(crate::config::parse_options::DEFAULT_MIN_COLUMNS)
    }

    async fn get_tsv_field_threshold(&self) -> Result<usize, ConfigReadError> {
        Ok(crate::config::parse_options::DEFAULT_TSV_FIELD_THRESHOLD)
    }

    async fn get_default_org_id(&self) -> Result<i64, ConfigReadError> {
        Ok(crate::config::parse_options::DEFAULT_ORG_ID)
    }

    async fn get_reason_fallback_code(&self) -> Result<String, ConfigReadError> {
        Ok(crate::config::parse_options::DEFAULT_REASON_FALLBACK_CODE.to_string())
    }

    async fn get_reason_code_max_len(&self) -> Result<usize, ConfigReadError> {
        Ok(crate::config::parse_options::DEFAULT_REASON_CODE_MAX_LEN)
    }

    async fn get_unrecognized_movement_type(&self) -> Result<MovementType, ConfigReadError> {
        Ok(MovementType::NewHired)
    }
}
