use serde::Deserialize;

use crate::models::users::entities::UserRole;

// 登录请求
//
// role 为登录页上的身份自选项：填写时必须与账户实际角色一致，
// 否则拒绝登录并提示选择正确身份。
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub remember_me: bool,
}
