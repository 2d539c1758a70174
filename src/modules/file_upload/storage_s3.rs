use aws_config::SdkConfig;
use aws_sdk_s3::{error::DisplayErrorContext, primitives::ByteStream, types::ObjectCannedAcl};

use crate::{
    api::error,
    modules::file_upload::{model::NewObject, schema::StorageLocation, storage::FileStorage},
};

/// Uploads into a single bucket as public-read objects.
#[derive(Clone)]
pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
    base_url: String,
}

impl S3Storage {
    pub fn new(sdk_config: &SdkConfig, bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        let endpoint = sdk_config.endpoint_url().map(|e| e.trim_end_matches('/').to_string());

        // Custom endpoints (localstack/minio) only understand path-style addressing
        let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
            .force_path_style(endpoint.is_some())
            .build();

        let region = sdk_config.region().map(|r| r.to_string()).unwrap_or_default();
        let base_url = object_base_url(endpoint.as_deref(), &bucket, &region);

        Self { client: aws_sdk_s3::Client::from_conf(s3_config), bucket, base_url }
    }
}

fn object_base_url(endpoint: Option<&str>, bucket: &str, region: &str) -> String {
    match endpoint {
        Some(endpoint) => format!("{endpoint}/{bucket}"),
        None => format!("https://{bucket}.s3.{region}.amazonaws.com"),
    }
}

#[async_trait::async_trait]
impl FileStorage for S3Storage {
    fn name(&self) -> &'static str {
        "s3"
    }

    async fn put(&self, object: NewObject) -> Result<StorageLocation, error::SystemError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&object.key)
            .body(ByteStream::from(object.bytes))
            .content_type(&object.content_type)
            .metadata("fieldname", &object.field_name)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| error::SystemError::storage(DisplayErrorContext(&e).to_string()))?;

        Ok(StorageLocation::S3 {
            url: format!("{}/{}", self.base_url, object.key),
            bucket: self.bucket.clone(),
            key: object.key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_urls_follow_the_endpoint() {
        assert_eq!(
            object_base_url(None, "media", "eu-west-1"),
            "https://media.s3.eu-west-1.amazonaws.com"
        );
        assert_eq!(
            object_base_url(Some("http://localhost:4566"), "media", "us-east-1"),
            "http://localhost:4566/media"
        );
    }
}
