use std::{sync::Arc, time::Duration};

use crate::{
    api::error,
    modules::lambda::{invoker::FunctionInvoker, model::InvokeLambdaModel},
    utils::with_timeout,
};

#[derive(Clone)]
pub struct LambdaService {
    invoker: Arc<dyn FunctionInvoker + Send + Sync>,
    function_name: String,
    timeout: Duration,
}

impl LambdaService {
    pub fn with_dependencies(
        invoker: Arc<dyn FunctionInvoker + Send + Sync>,
        function_name: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let function_name = function_name.into();
        log::info!("LambdaService initialized for function '{}'", function_name);
        Self { invoker, function_name, timeout }
    }

    pub async fn invoke(
        &self,
        payload: InvokeLambdaModel,
    ) -> Result<serde_json::Value, error::SystemError> {
        let payload = serde_json::to_value(&payload)?;

        // timeouts are reported like any other invocation failure
        with_timeout(self.timeout, self.invoker.invoke(&self.function_name, &payload))
            .await
            .map_err(|e| match e {
                error::SystemError::InvocationError(_) => e,
                other => error::SystemError::invocation(other.to_string()),
            })
    }
}
