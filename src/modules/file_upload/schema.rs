use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Where a stored file can be found afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageLocation {
    Local { path: String },
    S3 { bucket: String, key: String, url: String },
}

/// Descriptor of a stored upload. Not persisted by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub field_name: String,
    pub original_name: String,
    pub key: String,
    pub mime_type: String,
    pub size: u64,
    pub location: StorageLocation,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileUploadResponse {
    pub message: Cow<'static, str>,
    pub file: UploadedFile,
}
