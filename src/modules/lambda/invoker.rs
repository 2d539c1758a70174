use aws_config::SdkConfig;
use aws_sdk_lambda::{error::DisplayErrorContext, primitives::Blob, types::InvocationType};

use crate::api::error;

#[async_trait::async_trait]
pub trait FunctionInvoker {
    /// Synchronously runs `function_name` with a JSON payload and returns the
    /// function's JSON result untouched.
    async fn invoke(
        &self,
        function_name: &str,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, error::SystemError>;
}

#[derive(Clone)]
pub struct LambdaInvoker {
    client: aws_sdk_lambda::Client,
}

impl LambdaInvoker {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self { client: aws_sdk_lambda::Client::new(sdk_config) }
    }
}

fn decode_payload(bytes: &[u8]) -> Result<serde_json::Value, error::SystemError> {
    if bytes.is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| {
        error::SystemError::invocation(format!("function returned invalid JSON: {e}"))
    })
}

#[async_trait::async_trait]
impl FunctionInvoker for LambdaInvoker {
    async fn invoke(
        &self,
        function_name: &str,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, error::SystemError> {
        let body = serde_json::to_vec(payload)?;

        let output = self
            .client
            .invoke()
            .function_name(function_name)
            .invocation_type(InvocationType::RequestResponse)
            .payload(Blob::new(body))
            .send()
            .await
            .map_err(|e| error::SystemError::invocation(DisplayErrorContext(&e).to_string()))?;

        let response = output.payload().map(|b| b.as_ref()).unwrap_or_default();
        if let Some(function_error) = output.function_error() {
            return Err(error::SystemError::invocation(format!(
                "{function_name} failed ({function_error}): {}",
                String::from_utf8_lossy(response)
            )));
        }

        decode_payload(response)
    }
}
