use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode, users::requests::CreateUserRequest};
use crate::services::notifier::Notifier;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    validate_email, validate_password_simple, validate_roll_number, validate_username,
};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    mut create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 注册只开放学生 / 教师身份
    let role = create_request.role.clone().unwrap_or(UserRole::Student);
    if role == UserRole::Admin {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Cannot self-register as admin",
        )));
    }

    // 2. 字段合法性校验
    if let Err(msg) = validate_username(&create_request.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    if let Err(msg) = validate_email(&create_request.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    if let Err(msg) = validate_password_simple(&create_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    if let Some(ref roll_number) = create_request.roll_number
        && let Err(msg) = validate_roll_number(roll_number)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    // 3. 唯一性检查
    if let Err(response) = check_username_exists(&storage, &create_request.username).await {
        return Ok(response);
    }

    if let Err(response) = check_email_exists(&storage, &create_request.email).await {
        return Ok(response);
    }

    if role != UserRole::Teacher
        && let Some(ref roll_number) = create_request.roll_number
        && let Err(response) = check_roll_number_exists(&storage, roll_number).await
    {
        return Ok(response);
    }

    // 4. 哈希密码
    let password_hash = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("密码哈希失败: {e}"),
                )),
            );
        }
    };
    create_request.password = password_hash;
    create_request.role = Some(role);
    let roll_number = create_request.roll_number.take();

    // 5. 创建用户
    let user = match storage.create_user(create_request).await {
        Ok(user) => user,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("注册失败: {e}"),
                )),
            );
        }
    };

    // 6. 账户创建后的钩子：建学籍档案、发欢迎邮件
    if let Err(response) = post_registration_hook(&storage, &user, roll_number).await {
        return Ok(response);
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(user, "注册成功")))
}

/// 注册成功后的显式钩子
///
/// 非教师账户获得学籍档案（未填学号时生成占位学号）并收到
/// 欢迎邮件；教师注册不发邮件。邮件是尽力而为，档案创建失败则上报。
async fn post_registration_hook(
    storage: &std::sync::Arc<dyn Storage>,
    user: &User,
    roll_number: Option<String>,
) -> Result<(), HttpResponse> {
    if user.role != UserRole::Teacher {
        let roll_number = roll_number.unwrap_or_else(|| {
            crate::models::enrollments::entities::StudentProfile::placeholder_roll(user.id)
        });

        if let Err(e) = storage.create_student_profile(user.id, &roll_number).await {
            tracing::error!("Failed to create student profile for {}: {}", user.id, e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("创建学籍档案失败: {e}"),
                )),
            );
        }

        Notifier::send_welcome(user);
    }

    Ok(())
}

async fn check_username_exists(
    storage: &std::sync::Arc<dyn Storage>,
    username: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserNameAlreadyExists,
            "Username already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}

async fn check_email_exists(
    storage: &std::sync::Arc<dyn Storage>,
    email: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}

async fn check_roll_number_exists(
    storage: &std::sync::Arc<dyn Storage>,
    roll_number: &str,
) -> Result<(), HttpResponse> {
    match storage.get_student_profile_by_roll_number(roll_number).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::RollNumberAlreadyExists,
            "Roll number already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}
