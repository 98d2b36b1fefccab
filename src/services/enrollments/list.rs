use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, enrollments::responses::EnrollmentListResponse};

use super::EnrollmentService;

pub async fn handle_list_my_enrollments(
    service: &EnrollmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    let profile = match storage.get_student_profile_by_user_id(user.id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::StudentProfileMissing,
                "A student profile is required to view enrollments",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学籍档案失败: {e}"),
                )),
            );
        }
    };

    match storage.list_enrollments_by_student(profile.id, false).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EnrollmentListResponse { items },
            "OK",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询选课列表失败: {e}"),
            )),
        ),
    }
}
