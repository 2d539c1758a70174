use actix_web::{post, web};

use crate::modules::lambda::{model::InvokeLambdaModel, service::LambdaService};
use crate::{
    api::{error, success},
    utils::ValidatedJson,
};

#[post("/invoke-lambda")]
pub async fn invoke_lambda(
    lambda_service: web::Data<LambdaService>,
    payload: ValidatedJson<InvokeLambdaModel>,
) -> Result<success::Success<serde_json::Value>, error::Error> {
    let response = lambda_service.invoke(payload.0).await?;
    Ok(success::Success::ok(response))
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    use super::*;
    use crate::{modules::lambda::route, test::StubInvoker};

    fn service(invoker: StubInvoker) -> web::Data<LambdaService> {
        web::Data::new(LambdaService::with_dependencies(
            Arc::new(invoker),
            "pricing",
            Duration::from_secs(1),
        ))
    }

    #[actix_web::test]
    async fn relays_function_payload() {
        let app = test::init_service(
            App::new()
                .app_data(service(StubInvoker::responding(json!({ "total": 19.98 }))))
                .configure(route::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/invoke-lambda")
            .set_json(json!({ "name": "widget", "price": 9.99 }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!({ "total": 19.98 }));
    }

    #[actix_web::test]
    async fn invalid_payload_and_failures_are_bad_requests() {
        let app = test::init_service(
            App::new()
                .app_data(service(StubInvoker::failing("Unhandled")))
                .configure(route::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/invoke-lambda")
            .set_json(json!({ "name": "widget", "price": "cheap" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/invoke-lambda")
            .set_json(json!({ "name": "widget", "price": 1.0 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}
