//! 业务数据模型
//!
//! 按资源划分子模块，`common` 提供统一响应与分页结构。

pub mod common;

pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod files;
pub mod submissions;
pub mod users;

pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

use serde::{Deserialize, Serialize};

/// API 业务错误码
///
/// 前两位对应 HTTP 状态类别，后三位为业务编号。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 400xx 请求错误
    BadRequest = 40000,
    FileTypeNotAllowed = 40001,
    FileSizeExceeded = 40002,
    MultifileUploadNotAllowed = 40003,
    RollNumberUnknown = 40004,

    // 401xx 认证错误
    Unauthorized = 40100,
    AuthFailed = 40101,
    RoleMismatch = 40102,

    // 403xx 权限错误
    Forbidden = 40300,
    StudentProfileMissing = 40301,
    CourseNotEligible = 40302,

    // 404xx 资源不存在
    NotFound = 40400,
    UserNotFound = 40401,
    CourseNotFound = 40402,
    SubmissionNotFound = 40403,
    FileNotFound = 40404,
    EnrollmentNotFound = 40405,

    // 409xx 冲突
    UserNameAlreadyExists = 40901,
    UserEmailAlreadyExists = 40902,
    RollNumberAlreadyExists = 40903,

    // 500xx 服务端错误
    InternalServerError = 50000,
    RegisterFailed = 50001,
    CourseCreateFailed = 50002,
    EnrollmentFailed = 50003,
    SubmissionFailed = 50004,
    FileUploadFailed = 50005,
    GradeFailed = 50006,
}

/// 程序启动时间（用于运行时长统计）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::Forbidden as i32, 40300);
        assert_eq!(ErrorCode::StudentProfileMissing as i32, 40301);
        assert_eq!(ErrorCode::FileTypeNotAllowed as i32, 40001);
    }
}
