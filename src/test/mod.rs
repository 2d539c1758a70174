//! In-process stand-ins for the external collaborators, shared by unit tests.

use std::{
    sync::{Mutex, OnceLock},
    time::Duration,
};

use bson::oid::ObjectId;
use rsa::RsaPrivateKey;

use crate::{
    api::error,
    modules::{
        file_upload::{model::NewObject, schema::StorageLocation, storage::FileStorage},
        lambda::invoker::FunctionInvoker,
        post::{
            model::{InsertPost, UpdatePost},
            repository::PostRepository,
            schema::PostEntity,
        },
    },
};

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<Vec<PostEntity>>,
}

#[async_trait::async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: &InsertPost) -> Result<PostEntity, error::SystemError> {
        let entity = PostEntity {
            id: ObjectId::new(),
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
            created_at: post.created_at,
        };
        self.posts.lock().unwrap().push(entity.clone());
        Ok(entity)
    }

    async fn find_all(&self) -> Result<Vec<PostEntity>, error::SystemError> {
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<PostEntity>, error::SystemError> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.id == *id).cloned())
    }

    async fn update_by_id(
        &self,
        id: &ObjectId,
        post: &UpdatePost,
    ) -> Result<Option<PostEntity>, error::SystemError> {
        let mut posts = self.posts.lock().unwrap();
        let Some(existing) = posts.iter_mut().find(|p| p.id == *id) else {
            return Ok(None);
        };
        if let Some(title) = &post.title {
            existing.title = title.clone();
        }
        if let Some(content) = &post.content {
            existing.content = content.clone();
        }
        if let Some(author) = &post.author {
            existing.author = author.clone();
        }
        Ok(Some(existing.clone()))
    }

    async fn delete_by_id(&self, id: &ObjectId) -> Result<Option<PostEntity>, error::SystemError> {
        let mut posts = self.posts.lock().unwrap();
        let index = posts.iter().position(|p| p.id == *id);
        Ok(index.map(|i| posts.remove(i)))
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<Vec<NewObject>>,
}

impl MemoryStorage {
    pub fn objects(&self) -> Vec<NewObject> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl FileStorage for MemoryStorage {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn put(&self, object: NewObject) -> Result<StorageLocation, error::SystemError> {
        let location = StorageLocation::Local { path: format!("memory://{}", object.key) };
        self.objects.lock().unwrap().push(object);
        Ok(location)
    }
}

pub struct StubInvoker {
    result: Result<serde_json::Value, String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, serde_json::Value)>>,
}

impl StubInvoker {
    pub fn responding(value: serde_json::Value) -> Self {
        Self { result: Ok(value), delay: None, calls: Mutex::new(Vec::new()) }
    }

    pub fn failing(reason: &str) -> Self {
        Self { result: Err(reason.to_string()), delay: None, calls: Mutex::new(Vec::new()) }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(String, serde_json::Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl FunctionInvoker for StubInvoker {
    async fn invoke(
        &self,
        function_name: &str,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, error::SystemError> {
        self.calls.lock().unwrap().push((function_name.to_string(), payload.clone()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone().map_err(error::SystemError::invocation)
    }
}

/// One throwaway key for the whole test run; generation is slow.
pub fn test_private_key() -> RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap()).clone()
}

pub const MULTIPART_BOUNDARY: &str = "----posts-service-test-boundary";

/// Builds a multipart/form-data body from `(field, filename, bytes)` parts.
pub fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, bytes) in parts {
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}
