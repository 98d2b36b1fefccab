//! 学籍档案存储操作

use super::SeaOrmStorage;
use crate::entity::student_profiles::{ActiveModel, Column, Entity as StudentProfiles};
use crate::errors::{CourseSysError, Result};
use crate::models::enrollments::entities::StudentProfile;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建学籍档案
    pub async fn create_student_profile_impl(
        &self,
        user_id: i64,
        roll_number: &str,
    ) -> Result<StudentProfile> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(user_id),
            roll_number: Set(roll_number.to_string()),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("创建学籍档案失败: {e}")))?;

        Ok(result.into_student_profile())
    }

    /// 通过 ID 获取学籍档案
    pub async fn get_student_profile_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<StudentProfile>> {
        let result = StudentProfiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("查询学籍档案失败: {e}")))?;

        Ok(result.map(|m| m.into_student_profile()))
    }

    /// 通过用户 ID 获取学籍档案
    pub async fn get_student_profile_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<StudentProfile>> {
        let result = StudentProfiles::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("查询学籍档案失败: {e}")))?;

        Ok(result.map(|m| m.into_student_profile()))
    }

    /// 通过学号获取学籍档案
    pub async fn get_student_profile_by_roll_number_impl(
        &self,
        roll_number: &str,
    ) -> Result<Option<StudentProfile>> {
        let result = StudentProfiles::find()
            .filter(Column::RollNumber.eq(roll_number))
            .one(&self.db)
            .await
            .map_err(|e| CourseSysError::database_operation(format!("查询学籍档案失败: {e}")))?;

        Ok(result.map(|m| m.into_student_profile()))
    }
}
