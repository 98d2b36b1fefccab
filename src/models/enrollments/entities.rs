use serde::{Deserialize, Serialize};

// 学籍档案
//
// 仅非教师账户持有，一对一挂在用户上，学号全局唯一。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: i64,
    pub user_id: i64,
    pub roll_number: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl StudentProfile {
    /// 占位学号：注册钩子在学生未填写学号时生成
    pub fn placeholder_roll(user_id: i64) -> String {
        format!("ROLL{user_id:05}")
    }
}

// 选课记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub enrolled_on: chrono::DateTime<chrono::Utc>,
    pub active: bool,
    // 选课维度的总评成绩，可选
    pub grade: Option<String>,
}

// 选课开关一次翻转的结果
//
// 这是一个开关而非幂等设置：连续调用两次会翻转两次。
// enrolled_on 仅在翻转到激活态时刷新（退课不改时间戳）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentOutcome {
    Enrolled,   // 首次选课
    ReEnrolled, // 退课后重新选课
    Dropped,    // 退课
}

impl EnrollmentOutcome {
    /// 根据已有记录的激活状态推导本次翻转的结果
    pub fn from_existing(existing_active: Option<bool>) -> Self {
        match existing_active {
            None => EnrollmentOutcome::Enrolled,
            Some(true) => EnrollmentOutcome::Dropped,
            Some(false) => EnrollmentOutcome::ReEnrolled,
        }
    }

    /// 翻转后记录应处于的激活状态
    pub fn active_after(&self) -> bool {
        !matches!(self, EnrollmentOutcome::Dropped)
    }

    /// 是否需要刷新 enrolled_on（仅在转为激活态时）
    pub fn refreshes_enrolled_on(&self) -> bool {
        matches!(
            self,
            EnrollmentOutcome::Enrolled | EnrollmentOutcome::ReEnrolled
        )
    }

    /// 用户可见的结果描述
    pub fn message(&self, course_title: &str) -> String {
        match self {
            EnrollmentOutcome::Enrolled => {
                format!("You have been enrolled in '{course_title}'.")
            }
            EnrollmentOutcome::ReEnrolled => {
                format!("You have been re-enrolled in '{course_title}'.")
            }
            EnrollmentOutcome::Dropped => format!("You have dropped '{course_title}'."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_toggle_enrolls() {
        let outcome = EnrollmentOutcome::from_existing(None);
        assert_eq!(outcome, EnrollmentOutcome::Enrolled);
        assert!(outcome.active_after());
        assert!(outcome.refreshes_enrolled_on());
    }

    #[test]
    fn test_toggle_active_drops() {
        let outcome = EnrollmentOutcome::from_existing(Some(true));
        assert_eq!(outcome, EnrollmentOutcome::Dropped);
        assert!(!outcome.active_after());
        // 退课不刷新选课时间
        assert!(!outcome.refreshes_enrolled_on());
    }

    #[test]
    fn test_toggle_inactive_re_enrolls() {
        let outcome = EnrollmentOutcome::from_existing(Some(false));
        assert_eq!(outcome, EnrollmentOutcome::ReEnrolled);
        assert!(outcome.active_after());
        assert!(outcome.refreshes_enrolled_on());
    }

    #[test]
    fn test_double_toggle_returns_to_start() {
        // 连续翻转两次回到初始激活状态（非幂等的开关语义）
        for initial in [true, false] {
            let first = EnrollmentOutcome::from_existing(Some(initial));
            let second = EnrollmentOutcome::from_existing(Some(first.active_after()));
            assert_eq!(second.active_after(), initial);
        }
    }

    #[test]
    fn test_placeholder_roll_format() {
        assert_eq!(StudentProfile::placeholder_roll(7), "ROLL00007");
        assert_eq!(StudentProfile::placeholder_roll(123456), "ROLL123456");
    }

    #[test]
    fn test_outcome_messages() {
        assert!(
            EnrollmentOutcome::Enrolled
                .message("Rust 101")
                .contains("enrolled in 'Rust 101'")
        );
        assert!(
            EnrollmentOutcome::Dropped
                .message("Rust 101")
                .contains("dropped")
        );
    }
}
