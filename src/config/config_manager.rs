// ==========================================
// 人力看板 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::import_config_trait::{ConfigReadError, ImportConfigReader};
use crate::config::parse_options::{
    DEFAULT_MIN_COLUMNS, DEFAULT_ORG_ID, DEFAULT_REASON_CODE_MAX_LEN,
    DEFAULT_REASON_FALLBACK_CODE, DEFAULT_TSV_FIELD_THRESHOLD,
};
use crate::db::open_sqlite_connection;
use crate::domain::types::MovementType;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, ConfigReadError> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, ConfigReadError> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, ConfigReadError> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_global_value(&self, key: &str, value: &str) -> Result<(), ConfigReadError> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;

        tracing::debug!(config_key = key, value = value, "配置已写入");
        Ok(())
    }

    /// 获取所有 global 配置（按 key 排序）
    pub fn list_global_values(&self) -> Result<BTreeMap<String, String>, ConfigReadError> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global'")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut values = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            values.insert(key, value);
        }
        Ok(values)
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, ConfigReadError> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 读取并解析配置值，无法解析时记录告警并回退默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> Result<T, ConfigReadError>
    where
        T: std::str::FromStr + ToString,
    {
        let raw = match self.get_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };

        match raw.trim().parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    default = %default.to_string(),
                    "配置值格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }
}

// ==========================================
// ImportConfigReader Trait 实现
// ==========================================
#[async_trait]
impl ImportConfigReader for ConfigManager {
    // ===== 分词配置 =====

    async fn get_min_columns(&self) -> Result<usize, ConfigReadError> {
        self.get_parsed_or_default(config_keys::MIN_COLUMNS, DEFAULT_MIN_COLUMNS)
    }

    async fn get_tsv_field_threshold(&self) -> Result<usize, ConfigReadError> {
        self.get_parsed_or_default(
            config_keys::TSV_FIELD_THRESHOLD,
            DEFAULT_TSV_FIELD_THRESHOLD,
        )
    }

    // ===== 异动记录配置 =====

    async fn get_default_org_id(&self) -> Result<i64, ConfigReadError> {
        self.get_parsed_or_default(config_keys::DEFAULT_ORG_ID, DEFAULT_ORG_ID)
    }

    async fn get_reason_fallback_code(&self) -> Result<String, ConfigReadError> {
        let value = self.get_config_or_default(
            config_keys::REASON_FALLBACK_CODE,
            DEFAULT_REASON_FALLBACK_CODE,
        )?;
        let value = value.trim();
        if value.is_empty() {
            Ok(DEFAULT_REASON_FALLBACK_CODE.to_string())
        } else {
            Ok(value.to_string())
        }
    }

    async fn get_reason_code_max_len(&self) -> Result<usize, ConfigReadError> {
        self.get_parsed_or_default(
            config_keys::REASON_CODE_MAX_LEN,
            DEFAULT_REASON_CODE_MAX_LEN,
        )
    }

    async fn get_unrecognized_movement_type(&self) -> Result<MovementType, ConfigReadError> {
        self.get_parsed_or_default(
            config_keys::UNRECOGNIZED_MOVEMENT_TYPE,
            MovementType::NewHired,
        )
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 分词
    pub const MIN_COLUMNS: &str = "import.min_columns";
    pub const TSV_FIELD_THRESHOLD: &str = "import.tsv_field_threshold";

    // 异动记录
    pub const DEFAULT_ORG_ID: &str = "import.default_org_id";
    pub const REASON_FALLBACK_CODE: &str = "import.reason_fallback_code";
    pub const REASON_CODE_MAX_LEN: &str = "import.reason_code_max_len";
    pub const UNRECOGNIZED_MOVEMENT_TYPE: &str = "import.unrecognized_movement_type";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseOptions;
    use crate::db::init_schema;

    fn create_manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[tokio::test]
    async fn test_defaults_when_config_missing() {
        let manager = create_manager();
        let options = ParseOptions::from_config(&manager).await.unwrap();
        assert_eq!(options, ParseOptions::default());
    }

    #[tokio::test]
    async fn test_overrides_are_read() {
        let manager = create_manager();
        manager.set_global_value(config_keys::MIN_COLUMNS, "12").unwrap();
        manager
            .set_global_value(config_keys::UNRECOGNIZED_MOVEMENT_TYPE, "Transfer-In")
            .unwrap();
        manager
            .set_global_value(config_keys::REASON_FALLBACK_CODE, "00")
            .unwrap();

        let options = ParseOptions::from_config(&manager).await.unwrap();
        assert_eq!(options.min_columns, 12);
        assert_eq!(options.unrecognized_movement_type, MovementType::TransferIn);
        assert_eq!(options.reason_fallback_code, "00");
        assert_eq!(options.tsv_field_threshold, DEFAULT_TSV_FIELD_THRESHOLD);
    }

    #[tokio::test]
    async fn test_unparsable_value_falls_back_to_default() {
        let manager = create_manager();
        manager.set_global_value(config_keys::MIN_COLUMNS, "ten").unwrap();
        manager
            .set_global_value(config_keys::UNRECOGNIZED_MOVEMENT_TYPE, "Promotion")
            .unwrap();

        assert_eq!(manager.get_min_columns().await.unwrap(), DEFAULT_MIN_COLUMNS);
        assert_eq!(
            manager.get_unrecognized_movement_type().await.unwrap(),
            MovementType::NewHired
        );
    }

    #[test]
    fn test_set_global_value_overwrites() {
        let manager = create_manager();
        manager.set_global_value(config_keys::DEFAULT_ORG_ID, "2").unwrap();
        manager.set_global_value(config_keys::DEFAULT_ORG_ID, "3").unwrap();

        let values = manager.list_global_values().unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(
            values.get(config_keys::DEFAULT_ORG_ID).map(String::as_str),
            Some("3")
        );
    }
}
