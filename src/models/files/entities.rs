use serde::{Deserialize, Serialize};

// 已上传文件的元数据
//
// 文件本体以 stored_name 落盘在上传目录，对外只暴露 download_token。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    pub id: i64,
    pub download_token: String,
    pub original_name: String,
    #[serde(skip_serializing)]
    pub stored_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub user_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
