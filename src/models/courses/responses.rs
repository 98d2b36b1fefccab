use serde::Serialize;

use crate::models::PaginationInfo;

use super::entities::Course;

// 课程列表响应
#[derive(Debug, Serialize)]
pub struct CourseListResponse {
    pub items: Vec<Course>,
    pub pagination: PaginationInfo,
}

// 课程详情响应
//
// is_enrolled: 当前查看者是否持有该课程的激活选课记录。
// 匿名查看者或无学籍档案的查看者恒为 false，不报错。
#[derive(Debug, Serialize)]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: Course,
    pub is_enrolled: bool,
}
