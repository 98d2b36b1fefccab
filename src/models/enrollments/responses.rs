use serde::Serialize;

use crate::models::courses::entities::Course;

use super::entities::{Enrollment, EnrollmentOutcome};

// 选课开关响应
#[derive(Debug, Serialize)]
pub struct EnrollmentToggleResponse {
    pub outcome: EnrollmentOutcome,
    pub message: String,
    pub enrollment: Enrollment,
}

// 我的选课列表里的一条记录
#[derive(Debug, Serialize)]
pub struct EnrollmentItem {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub course: Course,
}

// 选课列表响应
#[derive(Debug, Serialize)]
pub struct EnrollmentListResponse {
    pub items: Vec<EnrollmentItem>,
}
