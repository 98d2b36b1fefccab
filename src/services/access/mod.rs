//! 集中式访问决策
//!
//! 所有业务动作的授权判断收敛在这里，处理程序只根据返回的
//! 决策结果拼响应，不各自散落角色判断。

use crate::models::{
    courses::entities::Course,
    enrollments::entities::Enrollment,
    files::entities::File,
    submissions::entities::Submission,
    users::entities::User,
};

/// 一次访问决策的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    Denied(&'static str),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allowed)
    }

    pub fn reason(&self) -> Option<&'static str> {
        match self {
            AccessDecision::Allowed => None,
            AccessDecision::Denied(reason) => Some(reason),
        }
    }
}

/// 提交列表的可见范围
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionScope {
    /// 教师/管理员：全部提交
    All,
    /// 非教师账户但名下有课程：本人课程的提交
    InstructedCourses(i64),
    /// 学生：本人的提交
    Own(i64),
    /// 无学籍也无课程：空集
    Nothing,
}

/// 创建课程：仅教师/管理员
pub fn can_create_course(user: &User) -> AccessDecision {
    if user.role.is_staff() {
        AccessDecision::Allowed
    } else {
        AccessDecision::Denied("Only teachers or admins can create courses")
    }
}

/// 选课开关：教师（非管理员）不走学生选课通道
pub fn can_toggle_enrollment(user: &User) -> AccessDecision {
    if user.role.is_staff() && !user.role.is_admin() {
        AccessDecision::Denied("Teachers cannot enroll in courses")
    } else {
        AccessDecision::Allowed
    }
}

/// 评分：教师/管理员，或课程的授课人（按 ID 相等判断，
/// 覆盖授课人不是教师账户的边缘情形）
pub fn can_grade(user: &User, course: &Course) -> AccessDecision {
    if user.role.is_staff() || course.instructor_id == Some(user.id) {
        AccessDecision::Allowed
    } else {
        AccessDecision::Denied("You are not allowed to grade this submission")
    }
}

/// 查看单条提交：教师/管理员、课程授课人、或提交本人
pub fn can_view_submission(
    user: &User,
    viewer_profile_id: Option<i64>,
    submission: &Submission,
    course: &Course,
) -> AccessDecision {
    if user.role.is_staff() || course.instructor_id == Some(user.id) {
        return AccessDecision::Allowed;
    }
    if viewer_profile_id == Some(submission.student_id) {
        return AccessDecision::Allowed;
    }
    AccessDecision::Denied("You are not allowed to view this submission")
}

/// 提交作业到某课程：管理员不受限；教师只能提交到
/// 自己授课的课程；学生必须持有该课程的激活选课记录
pub fn can_submit_to_course(
    user: &User,
    course: &Course,
    active_enrollment: Option<&Enrollment>,
) -> AccessDecision {
    if user.role.is_admin() {
        return AccessDecision::Allowed;
    }
    if user.role.is_staff() {
        return if course.instructor_id == Some(user.id) {
            AccessDecision::Allowed
        } else {
            AccessDecision::Denied("You can only submit to courses you instruct")
        };
    }
    match active_enrollment {
        Some(enrollment) if enrollment.active => AccessDecision::Allowed,
        _ => AccessDecision::Denied("You are not enrolled in this course"),
    }
}

/// 下载文件：教师/管理员或上传者本人
/// （授课人即教师账户，已被 is_staff 覆盖）
pub fn can_download_file(user: &User, file: &File) -> AccessDecision {
    if user.role.is_staff() || file.user_id == user.id {
        AccessDecision::Allowed
    } else {
        AccessDecision::Denied("You are not allowed to download this file")
    }
}

/// 手动按学号选课：仅教师/管理员
pub fn can_manual_enroll(user: &User) -> AccessDecision {
    if user.role.is_staff() {
        AccessDecision::Allowed
    } else {
        AccessDecision::Denied("Only teachers or admins can enroll students manually")
    }
}

/// 计算提交列表的可见范围
pub fn submission_scope(
    user: &User,
    profile_id: Option<i64>,
    instructs_any_course: bool,
) -> SubmissionScope {
    if user.role.is_staff() {
        SubmissionScope::All
    } else if instructs_any_course {
        SubmissionScope::InstructedCourses(user.id)
    } else if let Some(profile_id) = profile_id {
        SubmissionScope::Own(profile_id)
    } else {
        SubmissionScope::Nothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{UserRole, UserStatus};

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn course(id: i64, instructor_id: Option<i64>) -> Course {
        Course {
            id,
            title: format!("Course {id}"),
            department: None,
            description: None,
            instructor_id,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn submission(student_id: i64, course_id: i64) -> Submission {
        Submission {
            id: 1,
            student_id,
            course_id,
            file_token: "tok".into(),
            submitted_at: chrono::Utc::now(),
            graded: false,
            grade: None,
            feedback: None,
            graded_by: None,
            graded_at: None,
        }
    }

    fn enrollment(student_id: i64, course_id: i64, active: bool) -> Enrollment {
        Enrollment {
            id: 1,
            student_id,
            course_id,
            enrolled_on: chrono::Utc::now(),
            active,
            grade: None,
        }
    }

    #[test]
    fn test_create_course_roles() {
        assert!(can_create_course(&user(1, UserRole::Teacher)).is_allowed());
        assert!(can_create_course(&user(1, UserRole::Admin)).is_allowed());
        assert!(!can_create_course(&user(1, UserRole::Student)).is_allowed());
    }

    #[test]
    fn test_toggle_enrollment_rejects_plain_teacher() {
        assert!(can_toggle_enrollment(&user(1, UserRole::Student)).is_allowed());
        assert!(can_toggle_enrollment(&user(1, UserRole::Admin)).is_allowed());
        let denied = can_toggle_enrollment(&user(1, UserRole::Teacher));
        assert!(!denied.is_allowed());
        assert!(denied.reason().is_some());
    }

    #[test]
    fn test_grade_by_staff_or_instructor() {
        let c = course(10, Some(42));
        assert!(can_grade(&user(1, UserRole::Teacher), &c).is_allowed());
        assert!(can_grade(&user(1, UserRole::Admin), &c).is_allowed());
        // 授课人即便不是教师账户也可评分
        assert!(can_grade(&user(42, UserRole::Student), &c).is_allowed());
        assert!(!can_grade(&user(7, UserRole::Student), &c).is_allowed());
    }

    #[test]
    fn test_grade_course_without_instructor() {
        let c = course(10, None);
        assert!(can_grade(&user(1, UserRole::Teacher), &c).is_allowed());
        assert!(!can_grade(&user(7, UserRole::Student), &c).is_allowed());
    }

    #[test]
    fn test_view_submission_owner_and_staff() {
        let c = course(10, Some(42));
        let s = submission(5, 10);
        assert!(can_view_submission(&user(1, UserRole::Admin), None, &s, &c).is_allowed());
        assert!(can_view_submission(&user(42, UserRole::Student), None, &s, &c).is_allowed());
        assert!(can_view_submission(&user(9, UserRole::Student), Some(5), &s, &c).is_allowed());
        assert!(!can_view_submission(&user(9, UserRole::Student), Some(6), &s, &c).is_allowed());
        assert!(!can_view_submission(&user(9, UserRole::Student), None, &s, &c).is_allowed());
    }

    #[test]
    fn test_submit_requires_active_enrollment() {
        let c = course(10, None);
        let active = enrollment(5, 10, true);
        let dropped = enrollment(5, 10, false);
        assert!(can_submit_to_course(&user(1, UserRole::Student), &c, Some(&active)).is_allowed());
        assert!(
            !can_submit_to_course(&user(1, UserRole::Student), &c, Some(&dropped)).is_allowed()
        );
        assert!(!can_submit_to_course(&user(1, UserRole::Student), &c, None).is_allowed());
    }

    #[test]
    fn test_submit_staff_limited_to_instructed_courses() {
        let own = course(10, Some(42));
        let other = course(11, Some(7));

        // 教师只能提交到自己授课的课程，名下无课则一律拒绝
        assert!(can_submit_to_course(&user(42, UserRole::Teacher), &own, None).is_allowed());
        let denied = can_submit_to_course(&user(42, UserRole::Teacher), &other, None);
        assert!(!denied.is_allowed());
        assert!(denied.reason().is_some());
        assert!(
            !can_submit_to_course(&user(42, UserRole::Teacher), &course(12, None), None)
                .is_allowed()
        );

        // 管理员不受课程归属限制
        assert!(can_submit_to_course(&user(1, UserRole::Admin), &other, None).is_allowed());
    }

    #[test]
    fn test_submission_scope_order() {
        assert_eq!(
            submission_scope(&user(1, UserRole::Admin), None, false),
            SubmissionScope::All
        );
        assert_eq!(
            submission_scope(&user(2, UserRole::Student), Some(5), true),
            SubmissionScope::InstructedCourses(2)
        );
        assert_eq!(
            submission_scope(&user(2, UserRole::Student), Some(5), false),
            SubmissionScope::Own(5)
        );
        assert_eq!(
            submission_scope(&user(2, UserRole::Student), None, false),
            SubmissionScope::Nothing
        );
    }
}
