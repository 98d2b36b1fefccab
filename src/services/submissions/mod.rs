pub mod detail;
pub mod grade;
pub mod list;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 上传作业（multipart：course_id 字段 + 单个 PDF 文件）
    pub async fn upload_submission(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload_submission(self, request, payload).await
    }

    // 按角色范围列出提交
    pub async fn list_submissions(
        &self,
        query: crate::models::submissions::requests::SubmissionQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_submissions(self, query, request).await
    }

    // 提交详情
    pub async fn get_submission(
        &self,
        submission_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::handle_get_submission(self, submission_id, request).await
    }

    // 评分
    pub async fn grade_submission(
        &self,
        submission_id: i64,
        grade_request: crate::models::submissions::requests::GradeSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grade::handle_grade_submission(self, submission_id, grade_request, request).await
    }
}
