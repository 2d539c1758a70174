use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use rsa::{
    pkcs1::DecodeRsaPrivateKey,
    pkcs1v15::SigningKey,
    pkcs8::DecodePrivateKey,
    signature::{SignatureEncoding, Signer},
    RsaPrivateKey,
};
use sha1::Sha1;

use crate::{api::error, constants::MAX_SIGNED_URL_TTL, modules::signed_url::model::SignedUrl};

/// Issues CloudFront canned-policy URLs. The key is loaded once and shared
/// read-only for the life of the process.
pub struct CdnSigner {
    domain: String,
    key_pair_id: String,
    signing_key: SigningKey<Sha1>,
}

/// CloudFront's URL-safe variant of base64.
fn cloudfront_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes).replace('+', "-").replace('=', "_").replace('/', "~")
}

fn canned_policy(resource: &str, expires: i64) -> String {
    format!(
        r#"{{"Statement":[{{"Resource":"{resource}","Condition":{{"DateLessThan":{{"AWS:EpochTime":{expires}}}}}}}]}}"#
    )
}

/// Checks a resource path and returns it without leading slashes.
fn normalize_path(resource_path: &str) -> Result<&str, error::SystemError> {
    let path = resource_path.trim_start_matches('/');
    if path.is_empty() {
        return Err(error::SystemError::validation("Resource path is empty"));
    }
    if path.chars().any(|c| !c.is_ascii_graphic() || matches!(c, '?' | '#' | '*' | '"' | '\\')) {
        return Err(error::SystemError::validation(
            "Resource path contains characters that cannot be signed",
        ));
    }
    if path.split('/').any(|segment| segment == "." || segment == "..") {
        return Err(error::SystemError::validation("Resource path must not contain dot segments"));
    }
    Ok(path)
}

impl CdnSigner {
    pub fn new(domain: &str, key_pair_id: impl Into<String>, private_key: RsaPrivateKey) -> Self {
        let domain = domain
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
            .to_string();
        Self { domain, key_pair_id: key_pair_id.into(), signing_key: SigningKey::new(private_key) }
    }

    /// Loads a PEM private key (PKCS#8 or PKCS#1) from disk.
    pub fn from_pem_file(
        domain: &str,
        key_pair_id: impl Into<String>,
        path: &Path,
    ) -> Result<Self, error::SystemError> {
        let pem = std::fs::read_to_string(path).map_err(|e| {
            error::SystemError::config(format!(
                "cannot read signing key '{}': {e}",
                path.display()
            ))
        })?;
        let private_key = RsaPrivateKey::from_pkcs8_pem(&pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(&pem))
            .map_err(|e| {
                error::SystemError::config(format!(
                    "invalid signing key '{}': {e}",
                    path.display()
                ))
            })?;

        log::info!("Loaded CDN signing key from {}", path.display());
        Ok(Self::new(domain, key_pair_id, private_key))
    }

    pub fn sign(
        &self,
        resource_path: &str,
        ttl_seconds: u64,
    ) -> Result<SignedUrl, error::SystemError> {
        self.sign_at(resource_path, ttl_seconds, chrono::Utc::now())
    }

    pub fn sign_at(
        &self,
        resource_path: &str,
        ttl_seconds: u64,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<SignedUrl, error::SystemError> {
        if ttl_seconds == 0 || ttl_seconds > MAX_SIGNED_URL_TTL {
            return Err(error::SystemError::validation(format!(
                "TTL must be between 1 and {MAX_SIGNED_URL_TTL} seconds"
            )));
        }
        let path = normalize_path(resource_path)?;

        let resource = format!("https://{}/{}", self.domain, path);
        let expires = now.timestamp() + ttl_seconds as i64;
        let policy = canned_policy(&resource, expires);

        let signature = self
            .signing_key
            .try_sign(policy.as_bytes())
            .map_err(|e| error::SystemError::SigningError(e.to_string().into()))?;
        let signature = cloudfront_base64(&signature.to_bytes());

        let url = format!(
            "{resource}?Expires={expires}&Signature={signature}&Key-Pair-Id={}",
            self.key_pair_id
        );

        Ok(SignedUrl { resource, expires, signature, url })
    }
}
