use actix_multipart::{Field, Multipart};
use actix_web::{post, web};
use futures_util::TryStreamExt;

use crate::api::{error, success};
use crate::constants::UPLOAD_FIELD_NAME;
use crate::modules::file_upload::{
    model::IncomingFile, schema::FileUploadResponse, service::FileUploadService,
};

/// Buffers one multipart field, giving up as soon as it grows past `limit`.
async fn read_field(field: &mut Field, limit: usize) -> Result<Vec<u8>, error::Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) =
        field.try_next().await.map_err(|e| error::Error::bad_request(e.to_string()))?
    {
        if bytes.len() + chunk.len() > limit {
            return Err(error::SystemError::PayloadTooLarge(limit).into());
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Upload file handler
#[post("/upload")]
pub async fn upload_file(
    upload_service: web::Data<FileUploadService>,
    mut payload: Multipart,
) -> Result<success::Success<FileUploadResponse>, error::Error> {
    // Process multipart form data
    while let Some(mut field) =
        payload.try_next().await.map_err(|e| error::Error::bad_request(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            // drain fields we do not care about
            while field
                .try_next()
                .await
                .map_err(|e| error::Error::bad_request(e.to_string()))?
                .is_some()
            {}
            continue;
        }

        let original_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .ok_or_else(|| error::Error::bad_request("Missing filename"))?
            .to_string();
        let mime_type = field.content_type().map(|m| m.essence_str().to_string());

        let bytes = read_field(&mut field, upload_service.max_file_size()).await?;

        let file = upload_service
            .store(IncomingFile {
                field_name: UPLOAD_FIELD_NAME.to_string(),
                original_name,
                mime_type,
                bytes,
            })
            .await?;

        return Ok(success::Success::ok(FileUploadResponse {
            message: "File uploaded successfully".into(),
            file,
        }));
    }

    Err(error::Error::bad_request("No file found in request"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};

    use super::*;
    use crate::modules::file_upload::{model::UploadConfig, route};
    use crate::test::{multipart_body, MemoryStorage, MULTIPART_BOUNDARY};

    fn multipart_request(body: Vec<u8>) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/upload")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            ))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn upload_returns_file_descriptor() {
        let storage = Arc::new(MemoryStorage::default());
        let service = FileUploadService::new(storage.clone(), UploadConfig::default());
        let app = test::init_service(
            App::new().app_data(web::Data::new(service)).configure(route::configure),
        )
        .await;

        let body = multipart_body(&[
            ("title", None, b"ignored".as_slice()),
            ("file", Some("cat.png"), b"PNG".as_slice()),
        ]);
        let resp: FileUploadResponse =
            test::call_and_read_body_json(&app, multipart_request(body).to_request()).await;

        assert_eq!(resp.message, "File uploaded successfully");
        assert_eq!(resp.file.original_name, "cat.png");
        assert_eq!(resp.file.size, 3);
        assert!(resp.file.key.ends_with("-cat.png"));
        assert_eq!(storage.objects().len(), 1);
    }

    #[actix_web::test]
    async fn oversized_upload_is_rejected_before_storage() {
        let storage = Arc::new(MemoryStorage::default());
        let config = UploadConfig { max_file_size: 8, ..Default::default() };
        let service = FileUploadService::new(storage.clone(), config);
        let app = test::init_service(
            App::new().app_data(web::Data::new(service)).configure(route::configure),
        )
        .await;

        let body = multipart_body(&[("file", Some("big.bin"), [7u8; 64].as_slice())]);
        let resp = test::call_service(&app, multipart_request(body).to_request()).await;

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(storage.objects().is_empty());
    }

    #[actix_web::test]
    async fn request_without_file_field_is_bad_request() {
        let service =
            FileUploadService::new(Arc::new(MemoryStorage::default()), UploadConfig::default());
        let app = test::init_service(
            App::new().app_data(web::Data::new(service)).configure(route::configure),
        )
        .await;

        let body = multipart_body(&[("note", None, b"hello".as_slice())]);
        let resp = test::call_service(&app, multipart_request(body).to_request()).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
