// ==========================================
// 人力看板 - 配置层
// ==========================================
// 职责: 导入参数管理,支持全局覆写
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod import_config_trait;
pub mod parse_options;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use import_config_trait::{ConfigReadError, DefaultImportConfig, ImportConfigReader};
pub use parse_options::ParseOptions;
