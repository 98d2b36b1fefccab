use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode, courses::responses::CourseDetailResponse};

use super::{CourseService, optional_user};

pub async fn handle_get_course(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    // 匿名或无学籍档案的查看者恒为 false，不报错
    let mut is_enrolled = false;
    if let Some(user) = optional_user(&storage, request).await
        && let Ok(Some(profile)) = storage.get_student_profile_by_user_id(user.id).await
        && let Ok(Some(enrollment)) = storage.get_enrollment(profile.id, course.id).await
    {
        is_enrolled = enrollment.active;
    }

    let response = CourseDetailResponse {
        course,
        is_enrolled,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "OK")))
}
