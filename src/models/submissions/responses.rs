use serde::Serialize;

use crate::models::PaginationInfo;

use super::entities::Submission;

// 提交列表里的一条记录，附带课程与提交人信息
#[derive(Debug, Serialize)]
pub struct SubmissionItem {
    #[serde(flatten)]
    pub submission: Submission,
    pub course_title: String,
    pub student_roll_number: String,
    pub student_username: String,
}

// 提交列表响应
#[derive(Debug, Serialize)]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionItem>,
    pub pagination: PaginationInfo,
}

// 提交详情响应
#[derive(Debug, Serialize)]
pub struct SubmissionDetailResponse {
    #[serde(flatten)]
    pub submission: Submission,
    pub course_title: String,
    pub student_roll_number: String,
    pub student_username: String,
}
