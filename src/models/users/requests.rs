use serde::Deserialize;

use super::entities::UserRole;

// 注册 / 创建用户请求
//
// role 缺省为 student；roll_number 仅对学生账户有意义，
// 不提供时由注册钩子生成占位学号。
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub roll_number: Option<String>,
}
