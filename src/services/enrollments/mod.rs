pub mod list;
pub mod manual;
pub mod toggle;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
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

    // 选课开关（学生自助）
    pub async fn toggle_enrollment(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        toggle::handle_toggle_enrollment(self, course_id, request).await
    }

    // 我的选课列表
    pub async fn list_my_enrollments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::handle_list_my_enrollments(self, request).await
    }

    // 教务按学号手动选课
    pub async fn manual_enroll(
        &self,
        enroll_request: crate::models::enrollments::requests::ManualEnrollRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manual::handle_manual_enroll(self, enroll_request, request).await
    }
}
