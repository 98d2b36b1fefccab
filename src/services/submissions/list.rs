use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, PaginationInfo,
    courses::requests::CourseListQuery,
    submissions::{
        requests::{SubmissionListQuery, SubmissionQueryParams},
        responses::SubmissionListResponse,
    },
};
use crate::services::access::{self, SubmissionScope};

use super::SubmissionService;

pub async fn handle_list_submissions(
    service: &SubmissionService,
    query: SubmissionQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    let profile_id = match storage.get_student_profile_by_user_id(user.id).await {
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

    // 非教师账户名下是否有课程（授课人不是教师账户的边缘情形）
    let instructs_any = if user.role.is_staff() {
        false
    } else {
        match storage
            .list_courses_with_pagination(CourseListQuery {
                page: Some(1),
                size: Some(1),
                department: None,
                instructor_id: Some(user.id),
            })
            .await
        {
            Ok(response) => response.pagination.total > 0,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询课程失败: {e}"),
                    )),
                );
            }
        }
    };

    let mut list_query = SubmissionListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course_id: query.course,
        ..Default::default()
    };

    match access::submission_scope(&user, profile_id, instructs_any) {
        SubmissionScope::All => {}
        SubmissionScope::InstructedCourses(instructor_id) => {
            list_query.instructor_id = Some(instructor_id);
        }
        SubmissionScope::Own(student_id) => {
            list_query.student_id = Some(student_id);
        }
        // 无学籍也无课程：空集，不查库
        SubmissionScope::Nothing => {
            return Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmissionListResponse {
                    items: Vec::new(),
                    pagination: PaginationInfo {
                        page: query.pagination.page,
                        page_size: query.pagination.size,
                        total: 0,
                        total_pages: 0,
                    },
                },
                "OK",
            )));
        }
    }

    match storage.list_submissions_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "OK"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询提交列表失败: {e}"),
            )),
        ),
    }
}
