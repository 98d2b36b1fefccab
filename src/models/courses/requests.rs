use serde::Deserialize;

use crate::models::common::pagination::PaginationQuery;

use super::entities::Department;

// 课程列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct CourseQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub department: Option<String>,
}

// 创建课程请求
//
// 创建者即授课教师，由当前登录用户决定，不接受请求指定。
#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    pub department: Option<Department>,
    pub description: Option<String>,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub department: Option<Department>,
    pub instructor_id: Option<i64>,
}
