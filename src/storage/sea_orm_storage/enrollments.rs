//! 选课记录存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::prelude::Courses;
use crate::errors::{CourseSysError, Result};
use crate::models::enrollments::{entities::Enrollment, responses::EnrollmentItem};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 获取某学生对某课程的选课记录
    pub async fn get_enrollment_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 新建激活态选课记录
    pub async fn create_enrollment_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            enrolled_on: Set(now),
            active: Set(true),
            grade: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("创建选课记录失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    /// 翻转选课记录的激活状态
    pub async fn set_enrollment_active_impl(
        &self,
        enrollment_id: i64,
        active: bool,
        refresh_enrolled_on: bool,
    ) -> Result<Option<Enrollment>> {
        let existing = Enrollments::find_by_id(enrollment_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("查询选课记录失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.active = Set(active);
        if refresh_enrolled_on {
            model.enrolled_on = Set(chrono::Utc::now().timestamp());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("更新选课记录失败: {e}")))?;

        Ok(Some(result.into_enrollment()))
    }

    /// 列出某学生的选课记录（附课程信息）
    pub async fn list_enrollments_by_student_impl(
        &self,
        student_id: i64,
        active_only: bool,
    ) -> Result<Vec<EnrollmentItem>> {
        let mut select = Enrollments::find().filter(Column::StudentId.eq(student_id));

        if active_only {
            select = select.filter(Column::Active.eq(true));
        }

        let rows = select
            .order_by_desc(Column::EnrolledOn)
            .all(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("查询选课列表失败: {e}")))?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        // 批量取课程信息
        let course_ids: Vec<i64> = rows.iter().map(|m| m.course_id).collect();
        let courses: HashMap<i64, _> = Courses::find()
            .filter(crate::entity::courses::Column::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("查询课程失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m.into_course()))
            .collect();

        let items = rows
            .into_iter()
            .filter_map(|m| {
                let course = courses.get(&m.course_id)?.clone();
                Some(EnrollmentItem {
                    enrollment: m.into_enrollment(),
                    course,
                })
            })
            .collect();

        Ok(items)
    }
}
