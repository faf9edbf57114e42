use bmi_service::domain::ports::{BmiConnection, Connector};
use bmi_service::utils::logger;
use bmi_service::{ConfigProvider, MySqlConnector, SecretsManagerSource};

/// Creates the `bmi_history` table using the same secret as the Lambda.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_cli_logger(true);

    let source = SecretsManagerSource::from_env().await;
    let provider = ConfigProvider::from_env(source);
    let config = provider.get_config().await?;

    let mut connection = MySqlConnector::new().connect(config).await?;
    let result = connection.ensure_schema().await;
    if let Err(e) = connection.close().await {
        tracing::warn!("Failed to close store connection: {}", e);
    }
    result?;

    tracing::info!("bmi_history table is ready in {}", config.dbname);
    println!("✅ Schema ready");
    Ok(())
}
