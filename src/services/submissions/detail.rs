use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, submissions::responses::SubmissionDetailResponse,
};
use crate::services::access;

use super::SubmissionService;

pub async fn handle_get_submission(
    service: &SubmissionService,
    submission_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    let item = match storage.get_submission_with_context(submission_id).await {
        Ok(Some(item)) => item,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交失败: {e}"),
                )),
            );
        }
    };

    let course = match storage.get_course_by_id(item.submission.course_id).await {
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

    let viewer_profile_id = match storage.get_student_profile_by_user_id(user.id).await {
        Ok(profile) => profile.map(|p| p.id),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学籍档案失败: {e}"),
                )),
            );
        }
    };

    if let access::AccessDecision::Denied(reason) =
        access::can_view_submission(&user, viewer_profile_id, &item.submission, &course)
    {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, reason)));
    }

    let response = SubmissionDetailResponse {
        submission: item.submission,
        course_title: item.course_title,
        student_roll_number: item.student_roll_number,
        student_username: item.student_username,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "OK")))
}
