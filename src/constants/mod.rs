use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::api::error::SystemError;

pub const POSTS_COLLECTION: &str = "posts";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1_000_000;
pub const DEFAULT_SIGNED_URL_TTL: u64 = 3600;
pub const MAX_SIGNED_URL_TTL: u64 = 7 * 24 * 3600;
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Where uploaded files end up. Fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    Local { upload_dir: PathBuf },
    S3 { bucket: String },
}

pub struct Env {
    pub database_url: String,
    pub database_name: String,
    pub ip: String,
    pub port: u16,
    pub frontend_url: String,
    pub storage: StorageBackend,
    pub max_upload_bytes: usize,
    pub aws_region: String,
    pub aws_endpoint_url: Option<String>,
    pub lambda_function_name: String,
    pub cloudfront_domain: String,
    pub cloudfront_key_pair_id: String,
    pub cloudfront_private_key_path: PathBuf,
    pub signed_url_ttl: u64,
    pub outbound_timeout: Duration,
}

impl Env {
    pub fn from_env() -> Result<Self, SystemError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SystemError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            var(key).ok_or_else(|| {
                SystemError::config(format!(
                    "{key} must be set in .env file or environment variable"
                ))
            })
        };

        let database_url = required("DATABASE_URL")?;
        let database_name = var("DATABASE_NAME").unwrap_or_else(|| "posts_service".to_string());

        let ip = var("IP").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or("PORT", var("PORT"), 3000u16)?;
        let frontend_url = var("FRONTEND_URL").unwrap_or_else(|| "*".to_string());

        let storage = match var("STORAGE_TYPE").as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("local") | Some("disk") => StorageBackend::Local {
                upload_dir: var("UPLOAD_DIR").unwrap_or_else(|| "uploads".to_string()).into(),
            },
            Some("s3") => StorageBackend::S3 { bucket: required("AWS_BUCKET_NAME")? },
            Some(other) => {
                return Err(SystemError::config(format!(
                    "STORAGE_TYPE must be 'local' or 's3', got '{other}'"
                )));
            }
        };
        let max_upload_bytes =
            parse_or("MAX_UPLOAD_BYTES", var("MAX_UPLOAD_BYTES"), DEFAULT_MAX_UPLOAD_BYTES)?;

        let aws_region = var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string());
        let aws_endpoint_url = var("AWS_ENDPOINT_URL");
        let lambda_function_name = required("LAMBDA_FUNCTION_NAME")?;

        let cloudfront_domain = required("CLOUDFRONT_DOMAIN")?;
        let cloudfront_key_pair_id = required("CLOUDFRONT_KEY_PAIR_ID")?;
        let cloudfront_private_key_path = var("CLOUDFRONT_PRIVATE_KEY_PATH")
            .unwrap_or_else(|| "private_key.pem".to_string())
            .into();
        let signed_url_ttl =
            parse_or("SIGNED_URL_TTL", var("SIGNED_URL_TTL"), DEFAULT_SIGNED_URL_TTL)?;
        if signed_url_ttl == 0 || signed_url_ttl > MAX_SIGNED_URL_TTL {
            return Err(SystemError::config(format!(
                "SIGNED_URL_TTL must be between 1 and {MAX_SIGNED_URL_TTL} seconds"
            )));
        }

        let outbound_timeout = Duration::from_secs(parse_or(
            "OUTBOUND_TIMEOUT_SECS",
            var("OUTBOUND_TIMEOUT_SECS"),
            10u64,
        )?);

        Ok(Env {
            database_url,
            database_name,
            ip,
            port,
            frontend_url,
            storage,
            max_upload_bytes,
            aws_region,
            aws_endpoint_url,
            lambda_function_name,
            cloudfront_domain,
            cloudfront_key_pair_id,
            cloudfront_private_key_path,
            signed_url_ttl,
            outbound_timeout,
        })
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, SystemError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| SystemError::config(format!("{key} has an invalid value '{raw}'"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn base_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DATABASE_URL", "mongodb://localhost:27017/blog"),
            ("LAMBDA_FUNCTION_NAME", "price-calculator"),
            ("CLOUDFRONT_DOMAIN", "d111111abcdef8.cloudfront.net"),
            ("CLOUDFRONT_KEY_PAIR_ID", "K2JCJMDEHXQW5F"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<Env, SystemError> {
        Env::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn defaults_are_applied() {
        let env = load(&base_vars()).unwrap();

        assert_eq!(env.port, 3000);
        assert_eq!(env.max_upload_bytes, 1_000_000);
        assert_eq!(env.signed_url_ttl, 3600);
        assert_eq!(env.outbound_timeout, Duration::from_secs(10));
        assert_eq!(env.storage, StorageBackend::Local { upload_dir: PathBuf::from("uploads") });
        assert!(env.aws_endpoint_url.is_none());
    }

    #[test]
    fn missing_required_variable_is_a_config_error() {
        let mut vars = base_vars();
        vars.remove("CLOUDFRONT_KEY_PAIR_ID");

        let err = load(&vars).err().unwrap();
        assert!(matches!(err, SystemError::ConfigError(msg) if msg.contains("CLOUDFRONT_KEY_PAIR_ID")));
    }

    #[test]
    fn s3_backend_requires_a_bucket() {
        let mut vars = base_vars();
        vars.insert("STORAGE_TYPE", "s3");
        assert!(matches!(load(&vars), Err(SystemError::ConfigError(_))));

        vars.insert("AWS_BUCKET_NAME", "media-uploads");
        let env = load(&vars).unwrap();
        assert_eq!(env.storage, StorageBackend::S3 { bucket: "media-uploads".to_string() });
    }

    #[test]
    fn rejects_unknown_storage_type_and_bad_numbers() {
        let mut vars = base_vars();
        vars.insert("STORAGE_TYPE", "ftp");
        assert!(matches!(load(&vars), Err(SystemError::ConfigError(_))));

        let mut vars = base_vars();
        vars.insert("PORT", "eighty");
        assert!(matches!(load(&vars), Err(SystemError::ConfigError(_))));

        let mut vars = base_vars();
        vars.insert("SIGNED_URL_TTL", "0");
        assert!(matches!(load(&vars), Err(SystemError::ConfigError(_))));
    }
}
