// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use manpower_import::config::{ConfigReadError, ImportConfigReader, ParseOptions};
use manpower_import::domain::types::MovementType;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub options: ParseOptions,
    pub fail_reads: bool,
}

impl MockConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self {
            options: ParseOptions::default(),
            fail_reads: false,
        }
    }

    /// 创建读取即失败的配置
    pub fn failing() -> Self {
        Self {
            fail_reads: true,
            ..Self::new()
        }
    }

    pub fn with_reason_code(fallback: &str, max_len: usize) -> Self {
        let mut config = Self::new();
        config.options.reason_fallback_code = fallback.to_string();
        config.options.reason_code_max_len = max_len;
        config
    }

    fn check(&self) -> Result<(), ConfigReadError> {
        if self.fail_reads {
            return Err("config_kv unavailable".into());
        }
        Ok(())
    }
}

#[async_trait]
impl ImportConfigReader for MockConfig {
    async fn get_min_columns(&self) -> Result<usize, ConfigReadError> {
        self.check()?;
        Ok(self.options.min_columns)
    }

    async fn get_tsv_field_threshold(&self) -> Result<usize, ConfigReadError> {
        self.check()?;
        Ok(self.options.tsv_field_threshold)
    }

    async fn get_default_org_id(&self) -> Result<i64, ConfigReadError> {
        self.check()?;
        Ok(self.options.default_org_id)
    }

    async fn get_reason_fallback_code(&self) -> Result<String, ConfigReadError> {
        self.check()?;
        Ok(self.options.reason_fallback_code.clone())
    }

    async fn get_reason_code_max_len(&self) -> Result<usize, ConfigReadError> {
        self.check()?;
        Ok(self.options.reason_code_max_len)
    }

    async fn get_unrecognized_movement_type(&self) -> Result<MovementType, ConfigReadError> {
        self.check()?;
        Ok(self.options.unrecognized_movement_type)
    }
}
