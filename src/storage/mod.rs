use std::sync::Arc;

use crate::models::{
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest},
        responses::CourseListResponse,
    },
    enrollments::{
        entities::{Enrollment, StudentProfile},
        responses::EnrollmentItem,
    },
    files::entities::File,
    submissions::{
        entities::Submission,
        requests::SubmissionListQuery,
        responses::{SubmissionItem, SubmissionListResponse},
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段已是哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户总数（用于初始管理员播种）
    async fn count_users(&self) -> Result<u64>;

    /// 学籍档案方法
    // 创建学籍档案
    async fn create_student_profile(
        &self,
        user_id: i64,
        roll_number: &str,
    ) -> Result<StudentProfile>;
    // 通过ID获取学籍档案
    async fn get_student_profile_by_id(&self, id: i64) -> Result<Option<StudentProfile>>;
    // 通过用户ID获取学籍档案
    async fn get_student_profile_by_user_id(&self, user_id: i64)
    -> Result<Option<StudentProfile>>;
    // 通过学号获取学籍档案
    async fn get_student_profile_by_roll_number(
        &self,
        roll_number: &str,
    ) -> Result<Option<StudentProfile>>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(
        &self,
        instructor_id: i64,
        course: CreateCourseRequest,
    ) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;

    /// 选课管理方法
    // 获取某学生对某课程的选课记录（不论激活与否）
    async fn get_enrollment(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>>;
    // 新建激活态选课记录
    async fn create_enrollment(&self, student_id: i64, course_id: i64) -> Result<Enrollment>;
    // 翻转选课记录的激活状态，refresh_enrolled_on 为真时刷新选课时间
    async fn set_enrollment_active(
        &self,
        enrollment_id: i64,
        active: bool,
        refresh_enrolled_on: bool,
    ) -> Result<Option<Enrollment>>;
    // 列出某学生的选课记录（附课程信息），active_only 为真时只看激活记录
    async fn list_enrollments_by_student(
        &self,
        student_id: i64,
        active_only: bool,
    ) -> Result<Vec<EnrollmentItem>>;

    /// 作业提交方法
    // 创建提交
    async fn create_submission(
        &self,
        student_id: i64,
        course_id: i64,
        file_token: &str,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 通过ID获取提交（附课程与提交人信息）
    async fn get_submission_with_context(&self, id: i64) -> Result<Option<SubmissionItem>>;
    // 列出提交（查询参数已按角色裁剪）
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 写入成绩（重新评分覆盖旧值）
    async fn apply_grade(
        &self,
        submission_id: i64,
        grade: &str,
        feedback: Option<&str>,
        graded_by: i64,
    ) -> Result<Option<Submission>>;

    /// 文件管理方法
    // 记录上传文件
    async fn create_file(
        &self,
        download_token: &str,
        original_name: &str,
        stored_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File>;
    // 通过唯一 token 获取文件信息
    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
