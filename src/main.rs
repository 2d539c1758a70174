use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;

use crate::{
    configs::{connect_database, load_aws_config},
    constants::{Env, StorageBackend},
    modules::{
        file_upload::{DiskStorage, FileStorage, FileUploadService, S3Storage, UploadConfig},
        lambda::{invoker::LambdaInvoker, service::LambdaService},
        post::{repository_mongo::PostRepositoryMongo, service::PostService},
        signed_url::{handle::DefaultTtl, signer::CdnSigner},
    },
};

mod api;
mod configs;
mod constants;
mod modules;
#[cfg(test)]
mod test;
mod utils;

#[actix_web::get("/")]
async fn hello() -> &'static str {
    "Hello World!"
}

fn startup_error(context: &str, err: api::error::SystemError) -> std::io::Error {
    log::error!("{context}: {err}");
    std::io::Error::other(format!("{context}: {err}"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    log::info!("Environment variables loaded");

    let env = Env::from_env().map_err(|e| startup_error("Configuration error", e))?;

    let db = connect_database(&env)
        .await
        .map_err(|e| startup_error("Database connection error", e))?;
    let aws_config = load_aws_config(&env).await;

    let signer = CdnSigner::from_pem_file(
        &env.cloudfront_domain,
        env.cloudfront_key_pair_id.clone(),
        &env.cloudfront_private_key_path,
    )
    .map_err(|e| startup_error("Signing key error", e))?;

    let post_repo = PostRepositoryMongo::new(&db, env.outbound_timeout);
    let post_service = PostService::with_dependencies(Arc::new(post_repo));

    let storage: Arc<dyn FileStorage + Send + Sync> = match &env.storage {
        StorageBackend::Local { upload_dir } => Arc::new(DiskStorage::new(upload_dir)),
        StorageBackend::S3 { bucket } => Arc::new(S3Storage::new(&aws_config, bucket)),
    };
    let upload_service = FileUploadService::new(
        storage,
        UploadConfig { max_file_size: env.max_upload_bytes, timeout: env.outbound_timeout },
    );

    let lambda_service = LambdaService::with_dependencies(
        Arc::new(LambdaInvoker::new(&aws_config)),
        env.lambda_function_name.clone(),
        env.outbound_timeout,
    );

    let signer = web::Data::new(signer);
    let default_ttl = web::Data::new(DefaultTtl(env.signed_url_ttl));
    let frontend_url = env.frontend_url.clone();

    log::info!("Starting server at http://{}:{}", env.ip, env.port);
    HttpServer::new(move || {
        let cors = if frontend_url == "*" {
            Cors::permissive()
        } else {
            Cors::default()
                .allowed_origin(&frontend_url)
                .allow_any_method()
                .allow_any_header()
                .max_age(3600)
        };

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(post_service.clone()))
            .app_data(web::Data::new(upload_service.clone()))
            .app_data(web::Data::new(lambda_service.clone()))
            .app_data(signer.clone())
            .app_data(default_ttl.clone())
            .service(hello)
            .configure(modules::file_upload::route::configure)
            .configure(modules::post::route::configure)
            .configure(modules::lambda::route::configure)
            .configure(modules::signed_url::route::configure)
    })
    .bind((env.ip.as_str(), env.port))?
    .run()
    .await
}
