//! 业务服务层
//!
//! 每个资源一个 Service 结构体，处理逻辑按操作拆成子模块文件。
//! 授权判断统一走 `access` 模块。

pub mod access;
pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod files;
pub mod notifier;
pub mod submissions;

pub use auth::AuthService;
pub use courses::CourseService;
pub use enrollments::EnrollmentService;
pub use files::FileService;
pub use submissions::SubmissionService;
