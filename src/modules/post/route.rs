use crate::modules::post::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/posts")
            .service(create_post)
            .service(list_posts)
            .service(get_post)
            .service(update_post)
            .service(delete_post),
    );
}
