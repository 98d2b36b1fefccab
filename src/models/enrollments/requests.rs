use serde::Deserialize;

// 教务手动选课请求
//
// 仅教师/管理员可用，按学号定位学生，翻转语义与学生自助选课一致。
#[derive(Debug, Deserialize)]
pub struct ManualEnrollRequest {
    pub roll_number: String,
    pub course_id: i64,
}
