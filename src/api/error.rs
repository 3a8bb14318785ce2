// ==========================================
// 课表排班系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 转换导入层错误为用户友好的错误消息
// 传播策略: 校验错误与整批失败以失败响应返回;
//           单文件/单格的软失败只体现为结果中的缺项或警告
// ==========================================

use crate::importer::error::IngestError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入校验错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("课表导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 IngestError 转换
// 目的: 请求级校验问题归入 InvalidInput, 其余归入 ImportError
// ==========================================
impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::EmptyBatch => ApiError::InvalidInput(err.to_string()),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
