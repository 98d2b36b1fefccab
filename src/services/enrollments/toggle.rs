use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::{entities::EnrollmentOutcome, responses::EnrollmentToggleResponse},
};
use crate::services::access;

use super::EnrollmentService;

/// 选课开关：无记录则新建激活记录，有记录则翻转激活状态。
/// 同一学生连续调用两次会选上再退掉，这是有意的开关语义。
pub async fn handle_toggle_enrollment(
    service: &EnrollmentService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    // 教师（非管理员）不走学生选课通道
    if let access::AccessDecision::Denied(reason) = access::can_toggle_enrollment(&user) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, reason)));
    }

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询课程失败: {e}"),
                )),
            );
        }
    };

    let profile = match storage.get_student_profile_by_user_id(user.id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::StudentProfileMissing,
                "A student profile is required to enroll",
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

    let existing = match storage.get_enrollment(profile.id, course.id).await {
        Ok(existing) => existing,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::EnrollmentFailed,
                    format!("查询选课记录失败: {e}"),
                )),
            );
        }
    };

    let outcome = EnrollmentOutcome::from_existing(existing.as_ref().map(|e| e.active));

    let enrollment = match existing {
        None => storage.create_enrollment(profile.id, course.id).await,
        Some(existing) => {
            match storage
                .set_enrollment_active(
                    existing.id,
                    outcome.active_after(),
                    outcome.refreshes_enrolled_on(),
                )
                .await
            {
                Ok(Some(enrollment)) => Ok(enrollment),
                Ok(None) => Err(crate::errors::CourseSysError::not_found(
                    "选课记录在翻转时消失",
                )),
                Err(e) => Err(e),
            }
        }
    };

    match enrollment {
        Ok(enrollment) => {
            tracing::info!(
                "Enrollment toggle: student {} course {} -> {:?}",
                profile.id,
                course.id,
                outcome
            );
            let response = EnrollmentToggleResponse {
                outcome,
                message: outcome.message(&course.title),
                enrollment,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "OK")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::EnrollmentFailed,
                format!("选课操作失败: {e}"),
            )),
        ),
    }
}
