use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest};
use crate::services::access;

use super::CourseService;

pub async fn handle_create_course(
    service: &CourseService,
    create_request: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    if let access::AccessDecision::Denied(reason) = access::can_create_course(&user) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, reason)));
    }

    if create_request.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Course title cannot be empty",
        )));
    }

    // 创建者即授课教师；存储错误按校验错误回给调用方，不抛 500
    match storage.create_course(user.id, create_request).await {
        Ok(course) => {
            tracing::info!("Course '{}' created by user {}", course.title, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "课程创建成功")))
        }
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CourseCreateFailed,
            format!("课程创建失败: {e}"),
        ))),
    }
}
