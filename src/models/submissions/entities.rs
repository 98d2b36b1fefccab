use serde::{Deserialize, Serialize};

// 作业提交
//
// graded 置位后 grade/graded_by/graded_at 同时写入；
// 重新评分覆盖旧值并刷新 graded_at。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    // 指向上传文件的下载令牌
    pub file_token: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub graded: bool,
    pub grade: Option<String>,
    pub feedback: Option<String>,
    pub graded_by: Option<i64>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Submission {
    /// 提交是否已评分且持有成绩
    pub fn has_grade(&self) -> bool {
        self.graded && self.grade.is_some()
    }
}
