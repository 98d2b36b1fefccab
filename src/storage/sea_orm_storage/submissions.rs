//! 作业提交存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::prelude::{Courses, StudentProfiles, SubmissionModel, Users};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions, Relation};
use crate::errors::{CourseSysError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::Submission,
        requests::SubmissionListQuery,
        responses::{SubmissionItem, SubmissionListResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 创建提交
    pub async fn create_submission_impl(
        &self,
        student_id: i64,
        course_id: i64,
        file_token: &str,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            file_token: Set(file_token.to_string()),
            submitted_at: Set(now),
            graded: Set(false),
            grade: Set(None),
            feedback: Set(None),
            graded_by: Set(None),
            graded_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("创建提交失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 通过 ID 获取提交（附课程与提交人信息）
    pub async fn get_submission_with_context_impl(
        &self,
        id: i64,
    ) -> Result<Option<SubmissionItem>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("查询提交失败: {e}")))?;

        let Some(model) = result else {
            return Ok(None);
        };

        let mut items = self.build_submission_items(vec![model]).await?;
        Ok(items.pop())
    }

    /// 分页列出提交（查询参数已按角色裁剪）
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Submissions::find();

        // 课程筛选
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        // 学生视角：只看自己的提交
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        // 教师视角：只看自己课程的提交
        if let Some(instructor_id) = query.instructor_id {
            select = select
                .join(JoinType::InnerJoin, Relation::Course.def())
                .filter(crate::entity::courses::Column::InstructorId.eq(instructor_id));
        }

        // 最新提交在前
        select = select.order_by_desc(Column::SubmittedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CourseSysError::database_operation(format!("查询提交总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CourseSysError::database_operation(format!("查询提交页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("查询提交列表失败: {e}")))?;

        let items = self.build_submission_items(rows).await?;

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 写入成绩（重新评分覆盖旧值并刷新评分时间）
    pub async fn apply_grade_impl(
        &self,
        submission_id: i64,
        grade: &str,
        feedback: Option<&str>,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        let existing = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("查询提交失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();

        let mut model: ActiveModel = existing.into();
        model.graded = Set(true);
        model.grade = Set(Some(grade.to_string()));
        // 未填评语按空字符串落库，不存 NULL
        model.feedback = Set(Some(feedback.unwrap_or_default().to_string()));
        model.graded_by = Set(Some(graded_by));
        model.graded_at = Set(Some(now));

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("写入成绩失败: {e}")))?;

        Ok(Some(result.into_submission()))
    }

    /// 批量补齐提交的课程标题与提交人信息
    async fn build_submission_items(
        &self,
        rows: Vec<SubmissionModel>,
    ) -> Result<Vec<SubmissionItem>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let course_ids: Vec<i64> = rows.iter().map(|m| m.course_id).collect();
        let student_ids: Vec<i64> = rows.iter().map(|m| m.student_id).collect();

        let course_titles: HashMap<i64, String> = Courses::find()
            .filter(crate::entity::courses::Column::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("查询课程失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m.title))
            .collect();

        let profiles: Vec<_> = StudentProfiles::find()
            .filter(crate::entity::student_profiles::Column::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("查询学籍档案失败: {e}")))?;

        let user_ids: Vec<i64> = profiles.iter().map(|p| p.user_id).collect();
        let usernames: HashMap<i64, String> = Users::find()
            .filter(crate::entity::users::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("查询用户失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m.username))
            .collect();

        let students: HashMap<i64, (String, String)> = profiles
            .into_iter()
            .map(|p| {
                let username = usernames.get(&p.user_id).cloned().unwrap_or_default();
                (p.id, (p.roll_number, username))
            })
            .collect();

        let items = rows
            .into_iter()
            .map(|m| {
                let course_title = course_titles.get(&m.course_id).cloned().unwrap_or_default();
                let (roll_number, username) = students
                    .get(&m.student_id)
                    .cloned()
                    .unwrap_or_default();
                SubmissionItem {
                    submission: m.into_submission(),
                    course_title,
                    student_roll_number: roll_number,
                    student_username: username,
                }
            })
            .collect();

        Ok(items)
    }
}
