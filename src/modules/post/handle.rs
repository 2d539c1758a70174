use actix_web::{delete, get, post, put, web};

use crate::modules::post::{model, service::PostService};
use crate::{
    api::{error, success},
    utils::ValidatedJson,
};

#[post("")]
pub async fn create_post(
    post_service: web::Data<PostService>,
    post_data: ValidatedJson<model::CreatePostModel>,
) -> Result<success::Success<model::PostResponse>, error::Error> {
    let post = post_service.create(post_data.0).await?;
    Ok(success::Success::ok(post))
}

#[get("")]
pub async fn list_posts(
    post_service: web::Data<PostService>,
) -> Result<success::Success<Vec<model::PostResponse>>, error::Error> {
    let posts = post_service.list().await?;
    Ok(success::Success::ok(posts))
}

#[get("/{id}")]
pub async fn get_post(
    post_service: web::Data<PostService>,
    post_id: web::Path<String>,
) -> Result<success::Success<model::PostResponse>, error::Error> {
    let post = post_service.get_by_id(&post_id).await?;
    Ok(success::Success::ok(post))
}

#[put("/{id}")]
pub async fn update_post(
    post_service: web::Data<PostService>,
    post_id: web::Path<String>,
    post_data: ValidatedJson<model::UpdatePostModel>,
) -> Result<success::Success<model::PostResponse>, error::Error> {
    let post = post_service.update_by_id(&post_id, post_data.0).await?;
    Ok(success::Success::ok(post))
}

#[delete("/{id}")]
pub async fn delete_post(
    post_service: web::Data<PostService>,
    post_id: web::Path<String>,
) -> Result<success::Success<model::PostResponse>, error::Error> {
    let post = post_service.delete_by_id(&post_id).await?;
    Ok(success::Success::ok(post))
}
