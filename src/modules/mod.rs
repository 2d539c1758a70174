pub mod file_upload;
pub mod post {
    pub mod handle;
    pub mod model;
    pub mod repository;
    pub mod repository_mongo;
    pub mod route;
    pub mod schema;
    pub mod service;
}
pub mod lambda {
    pub mod handle;
    pub mod invoker;
    pub mod model;
    pub mod route;
    pub mod service;
}
pub mod signed_url {
    pub mod handle;
    pub mod model;
    pub mod route;
    pub mod signer;
}
