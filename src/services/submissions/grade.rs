use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, submissions::requests::GradeSubmissionRequest,
};
use crate::services::{access, notifier::Notifier};

use super::SubmissionService;

/// 评分：教师/管理员或课程授课人。重新评分覆盖旧值，
/// 每次成功的评分动作恰好触发一封通知邮件。
pub async fn handle_grade_submission(
    service: &SubmissionService,
    submission_id: i64,
    grade_request: GradeSubmissionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    if grade_request.grade.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Grade cannot be empty",
        )));
    }

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
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

    let course = match storage.get_course_by_id(submission.course_id).await {
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

    if let access::AccessDecision::Denied(reason) = access::can_grade(&user, &course) {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::Forbidden, reason)));
    }

    let graded = match storage
        .apply_grade(
            submission.id,
            grade_request.grade.trim(),
            Some(grade_request.feedback_or_default()),
            user.id,
        )
        .await
    {
        Ok(Some(graded)) => graded,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::GradeFailed,
                    format!("写入成绩失败: {e}"),
                )),
            );
        }
    };

    tracing::info!(
        "Submission {} graded '{}' by user {}",
        graded.id,
        grade_request.grade.trim(),
        user.id
    );

    // 通知提交人，尽力而为
    notify_student(&storage, &graded, &course.title).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(graded, "Submission graded")))
}

async fn notify_student(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    submission: &crate::models::submissions::entities::Submission,
    course_title: &str,
) {
    let Ok(Some(profile)) = storage.get_student_profile_by_id(submission.student_id).await else {
        tracing::warn!(
            "Graded notification skipped: profile {} not found",
            submission.student_id
        );
        return;
    };

    let Ok(Some(student)) = storage.get_user_by_id(profile.user_id).await else {
        tracing::warn!(
            "Graded notification skipped: user {} not found",
            profile.user_id
        );
        return;
    };

    Notifier::send_graded(
        student.email.clone(),
        student.display_or_username().to_string(),
        course_title.to_string(),
        submission.grade.clone().unwrap_or_default(),
        submission.feedback.clone(),
    );
}
