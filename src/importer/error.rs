// ==========================================
// 人力看板 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 行级/记录级问题不走错误类型，
//       而是收集到 ParseOutput.warnings / ImportResult 的错误列表中
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("导入文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv/.tsv/.txt/.xlsx/.xls）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("文本编码错误: {path} 不是 UTF-8 编码")]
    NotUtf8 { path: String },

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("Excel 文件无工作表: {0}")]
    EmptyWorkbook(String),

    #[error("CSV 处理失败: {0}")]
    CsvError(String),

    // ===== 配置错误 =====
    #[error("配置读取失败: {0}")]
    ConfigReadError(String),

    // ===== 仓储错误 =====
    #[error("仓储访问失败: {0}")]
    Repository(#[from] RepositoryError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 文件读取类错误（io/csv/calamine）统一转换
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImporterResult<T> = Result<T, ImportError>;
