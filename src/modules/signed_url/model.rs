use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SignedUrlQuery {
    pub path: Option<String>,
    #[serde(rename = "expiresIn")]
    #[validate(range(min = 1, max = 604_800, message = "expiresIn is out of range"))]
    pub expires_in: Option<u64>,
}

/// A freshly signed CDN URL. Never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedUrl {
    pub resource: String,
    pub expires: i64,
    pub signature: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlResponse {
    pub status_code: u16,
    pub signed_url: String,
    pub expires: i64,
}
