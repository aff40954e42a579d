// ==========================================
// 人力看板 - 原始数据导入核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 员工花名册与异动记录的原始表格导入管道
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 解析/规范化/写入
pub mod importer;

// 配置层 - 导入参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 对外接口
pub mod api;

// 命令行
pub mod cli;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::types::{EmployeeStatus, MovementType, ReferenceKind};
pub use domain::{ImportResult, ParseOutput, ParsedEmployee, ParsedMovement};
pub use importer::{RawDataImporter, RawDataImporterImpl};
pub use api::ImportApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "人力看板 - 原始数据导入";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
