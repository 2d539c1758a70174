use actix_web::web::ServiceConfig;

use crate::modules::file_upload::handle::upload_file;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(upload_file);
}
