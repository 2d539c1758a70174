use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::{borrow::Cow, time::Duration};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(Cow<'static, str>),
    #[error("Gateway Timeout")]
    GatewayTimeout,
    #[error("Internal Server Error")]
    InternalServer,
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    pub message: Cow<'static, str>,
}

impl Error {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Error::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
            Error::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());

        match self {
            // Has Message
            Error::NotFound(msg) | Error::BadRequest(msg) | Error::PayloadTooLarge(msg) => {
                res.json(ErrorBody { message: msg.clone() })
            }
            // No Message
            Error::GatewayTimeout => {
                res.json(ErrorBody { message: "Upstream service timed out".into() })
            }
            Error::InternalServer => {
                res.json(ErrorBody { message: "Internal Server Error".into() })
            }
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    // mongodb errors
    #[error("Database Error: {0}")]
    DatabaseError(#[from] mongodb::error::Error),
    // filesystem errors
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    // serde errors
    #[error("JSON Serialization/Deserialization Error: {0}")]
    JsonError(#[from] serde_json::Error),
    // object store errors
    #[error("Storage Error: {0}")]
    StorageError(Cow<'static, str>),
    // serverless function errors
    #[error("Invocation Error: {0}")]
    InvocationError(Cow<'static, str>),
    #[error("Signing Error: {0}")]
    SigningError(Cow<'static, str>),
    #[error("Configuration Error: {0}")]
    ConfigError(Cow<'static, str>),
    #[error("Outbound call timed out after {0:?}")]
    Timeout(Duration),
    // Custom Errors
    #[error("Validation Error: {0}")]
    Validation(Cow<'static, str>),
    #[error("Invalid Id: {0}")]
    InvalidId(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("File exceeds maximum allowed size of {0} bytes")]
    PayloadTooLarge(usize),
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::Validation(msg) => Error::BadRequest(msg),
            SystemError::InvalidId(msg) => Error::BadRequest(msg),
            SystemError::NotFound(msg) => Error::NotFound(msg),
            SystemError::PayloadTooLarge(_) => Error::PayloadTooLarge(value.to_string().into()),
            SystemError::InvocationError(_) => {
                log::warn!("{}", value);
                Error::BadRequest("Function invocation failed".into())
            }
            SystemError::Timeout(_) => {
                log::error!("{}", value);
                Error::GatewayTimeout
            }
            _ => {
                log::error!("Internal Server Error: {:?}", value);
                Error::InternalServer
            }
        }
    }
}

impl From<validator::ValidationErrors> for SystemError {
    fn from(err: validator::ValidationErrors) -> Self {
        SystemError::Validation(err.to_string().into())
    }
}

impl SystemError {
    pub fn validation(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn storage(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::StorageError(msg.into())
    }

    pub fn invocation(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvocationError(msg.into())
    }

    pub fn config(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::ConfigError(msg.into())
    }
}
