// ==========================================
// 人力看板 - API 层
// ==========================================
// 职责: 对外接口（CLI / 上层应用），组装下层组件
// ==========================================

pub mod error;
pub mod import_api;

pub use error::{ApiError, ApiResult};
pub use import_api::{preview_with_defaults, ImportApi};
