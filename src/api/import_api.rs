// ==========================================
// 人力看板 - 导入API
// ==========================================
// 职责: 组装 仓储 + 配置 + 导入器，对外提供预览/导入/模板/配置接口
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, ParseOptions};
use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::import::{ImportResult, ParseOutput};
use crate::importer::{
    parse_raw_text, read_raw_text, template_csv, RawDataImporter, RawDataImporterImpl,
};
use crate::repository::HrImportRepositoryImpl;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

/// 导入API
pub struct ImportApi {
    importer: RawDataImporterImpl<HrImportRepositoryImpl, ConfigManager>,
    config: ConfigManager,
}

impl ImportApi {
    /// 打开数据库（不存在则创建并建表）
    pub fn open(db_path: &str) -> ApiResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(format!("{}: {}", db_path, e)))?;
        init_schema(&conn)?;

        let conn = Arc::new(Mutex::new(conn));
        let repo = HrImportRepositoryImpl::from_connection(conn.clone());
        let importer_config = ConfigManager::from_connection(conn.clone())
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        let config = ConfigManager::from_connection(conn)
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;

        info!(db_path = %db_path, "导入API已初始化");

        Ok(Self {
            importer: RawDataImporterImpl::new(repo, importer_config),
            config,
        })
    }

    // ==========================================
    // 预览
    // ==========================================

    /// 预览文本（只解析不落库）
    pub async fn preview_text(&self, text: &str) -> ApiResult<ParseOutput> {
        Ok(self.importer.parse_raw_data(text).await?)
    }

    /// 预览文件
    pub async fn preview_file(&self, file_path: &str) -> ApiResult<ParseOutput> {
        validate_file_path(file_path)?;
        let text = read_raw_text(Path::new(file_path))?;
        self.preview_text(&text).await
    }

    // ==========================================
    // 导入
    // ==========================================

    /// 导入文本
    pub async fn import_text(&self, text: &str) -> ApiResult<ImportResult> {
        if text.trim().is_empty() {
            return Err(ApiError::InvalidInput("导入内容为空".to_string()));
        }
        Ok(self.importer.import_raw_data(text).await?)
    }

    /// 导入文件
    pub async fn import_file(&self, file_path: &str) -> ApiResult<ImportResult> {
        validate_file_path(file_path)?;
        Ok(self.importer.import_from_file(file_path).await?)
    }

    // ==========================================
    // 模板 / 配置
    // ==========================================

    pub fn template_csv() -> ApiResult<String> {
        Ok(template_csv()?)
    }

    /// 当前生效的解析参数
    pub async fn current_options(&self) -> ApiResult<ParseOptions> {
        ParseOptions::from_config(&self.config)
            .await
            .map_err(|e| ApiError::ConfigError(e.to_string()))
    }

    /// 写入全局配置
    pub fn set_config(&self, key: &str, value: &str) -> ApiResult<()> {
        if key.trim().is_empty() {
            return Err(ApiError::InvalidInput("配置键不能为空".to_string()));
        }
        self.config
            .set_global_value(key.trim(), value)
            .map_err(|e| ApiError::ConfigError(e.to_string()))
    }
}

/// 预览不依赖数据库时使用默认参数
pub fn preview_with_defaults(text: &str) -> ParseOutput {
    parse_raw_text(text, &ParseOptions::default())
}

fn validate_file_path(file_path: &str) -> ApiResult<()> {
    if file_path.trim().is_empty() {
        return Err(ApiError::InvalidInput("文件路径不能为空".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_keys;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_open_creates_schema_and_reads_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();

        let api = ImportApi::open(db_path).unwrap();
        assert_eq!(api.current_options().await.unwrap(), ParseOptions::default());

        api.set_config(config_keys::DEFAULT_ORG_ID, "7").unwrap();
        assert_eq!(api.current_options().await.unwrap().default_org_id, 7);
    }

    #[tokio::test]
    async fn test_empty_input_rejected() {
        let temp_file = NamedTempFile::new().unwrap();
        let api = ImportApi::open(temp_file.path().to_str().unwrap()).unwrap();

        assert!(matches!(
            api.import_text("  \n").await,
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            api.import_file("").await,
            Err(ApiError::InvalidInput(_))
        ));
    }
}
