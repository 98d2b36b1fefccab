use serde::Deserialize;

use crate::models::common::pagination::PaginationQuery;

// 提交列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct SubmissionQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    // 按课程筛选
    pub course: Option<i64>,
}

// 提交列表查询参数（用于存储层，已带上角色裁剪）
#[derive(Debug, Clone, Default)]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
    // 学生只能看自己的提交
    pub student_id: Option<i64>,
    // 非管理教师只能看自己课程的提交
    pub instructor_id: Option<i64>,
}

// 评分请求
#[derive(Debug, Deserialize)]
pub struct GradeSubmissionRequest {
    pub grade: String,
    pub feedback: Option<String>,
}

impl GradeSubmissionRequest {
    /// 未填评语时按空字符串处理
    pub fn feedback_or_default(&self) -> &str {
        self.feedback.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_defaults_to_empty_string() {
        let omitted = GradeSubmissionRequest {
            grade: "A".to_string(),
            feedback: None,
        };
        assert_eq!(omitted.feedback_or_default(), "");

        let given = GradeSubmissionRequest {
            grade: "A".to_string(),
            feedback: Some("Good work".to_string()),
        };
        assert_eq!(given.feedback_or_default(), "Good work");
    }
}
