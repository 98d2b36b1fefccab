use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::{
        entities::EnrollmentOutcome, requests::ManualEnrollRequest,
        responses::EnrollmentToggleResponse,
    },
};
use crate::services::access;

use super::EnrollmentService;

/// 教务手动选课：get-or-create 语义，已在读状态下是无操作，
/// 不会像学生自助开关那样把人退课。
pub async fn handle_manual_enroll(
    service: &EnrollmentService,
    enroll_request: ManualEnrollRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    if let access::AccessDecision::Denied(reason) = access::can_manual_enroll(&user) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, reason)));
    }

    // 未知学号按参数错误处理
    let profile = match storage
        .get_student_profile_by_roll_number(&enroll_request.roll_number)
        .await
    {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::RollNumberUnknown,
                format!("Unknown roll number: {}", enroll_request.roll_number),
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

    let course = match storage.get_course_by_id(enroll_request.course_id).await {
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

    let (enrollment, outcome, message) = match existing {
        // 已在读：无操作
        Some(enrollment) if enrollment.active => (
            Ok(enrollment),
            EnrollmentOutcome::Enrolled,
            format!("Student is already enrolled in '{}'.", course.title),
        ),
        // 曾退课：重新激活
        Some(enrollment) => {
            let outcome = EnrollmentOutcome::ReEnrolled;
            let result = match storage
                .set_enrollment_active(enrollment.id, true, true)
                .await
            {
                Ok(Some(enrollment)) => Ok(enrollment),
                Ok(None) => Err(crate::errors::CourseSysError::not_found(
                    "选课记录在更新时消失",
                )),
                Err(e) => Err(e),
            };
            (result, outcome, outcome.message(&course.title))
        }
        // 无记录：新建
        None => {
            let outcome = EnrollmentOutcome::Enrolled;
            (
                storage.create_enrollment(profile.id, course.id).await,
                outcome,
                outcome.message(&course.title),
            )
        }
    };

    match enrollment {
        Ok(enrollment) => {
            tracing::info!(
                "Manual enrollment by user {}: roll {} course {}",
                user.id,
                profile.roll_number,
                course.id
            );
            let response = EnrollmentToggleResponse {
                outcome,
                message,
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
