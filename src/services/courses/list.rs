use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    courses::{
        entities::Department,
        requests::{CourseListQuery, CourseQueryParams},
    },
};

use super::CourseService;

pub async fn handle_list_courses(
    service: &CourseService,
    query: CourseQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 院系筛选大小写不敏感，未知院系按参数错误处理
    let department = match query.department.as_deref() {
        Some(raw) => match raw.parse::<Department>() {
            Ok(department) => Some(department),
            Err(msg) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
            }
        },
        None => None,
    };

    let list_query = CourseListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        department,
        instructor_id: None,
    };

    match storage.list_courses_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "OK"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询课程列表失败: {e}"),
            )),
        ),
    }
}
