use actix_web::{get, web};

use crate::modules::signed_url::{
    model::{SignedUrlQuery, SignedUrlResponse},
    signer::CdnSigner,
};
use crate::{
    api::{error, success},
    utils::ValidatedQuery,
};

/// TTL applied when the caller does not pass `expiresIn`.
#[derive(Debug, Clone, Copy)]
pub struct DefaultTtl(pub u64);

#[get("/signed-url")]
pub async fn signed_url(
    signer: web::Data<CdnSigner>,
    default_ttl: web::Data<DefaultTtl>,
    query: ValidatedQuery<SignedUrlQuery>,
) -> Result<success::Success<SignedUrlResponse>, error::Error> {
    let query = query.0;
    let path = query
        .path
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| error::Error::not_found("Path not found"))?;
    let ttl = query.expires_in.unwrap_or(default_ttl.0);

    let signed = signer.sign(&path, ttl)?;
    Ok(success::Success::ok(SignedUrlResponse {
        status_code: 200,
        signed_url: signed.url,
        expires: signed.expires,
    }))
}
