#[cfg(feature = "lambda")]
use bmi_service::utils::logger;
#[cfg(feature = "lambda")]
use bmi_service::{ApiRequest, ApiResponse, BmiHandler, ConfigProvider, MySqlConnector, SecretsManagerSource};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // Built once per cold start; the provider caches the database secret for
    // the lifetime of the execution environment.
    let source = SecretsManagerSource::from_env().await;
    let handler = BmiHandler::new(ConfigProvider::from_env(source), MySqlConnector::new());
    let handler = &handler;

    tracing::info!("BMI Lambda ready");
    run(service_fn(move |event: LambdaEvent<ApiRequest>| async move {
        tracing::debug!(request_id = %event.context.request_id, "Invocation received");
        Ok::<ApiResponse, Error>(handler.handle(event.payload).await)
    }))
    .await
}
