use aws_config::{timeout::TimeoutConfig, BehaviorVersion, Region, SdkConfig};
use mongodb::{bson::doc, options::ClientOptions, Client, Database};

use crate::{api::error, constants::Env};

pub async fn connect_database(env: &Env) -> Result<Database, error::SystemError> {
    let mut options = ClientOptions::parse(&env.database_url).await?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options.max_pool_size = Some(10);
    options.min_pool_size = Some(1);
    options.connect_timeout = Some(env.outbound_timeout);
    options.server_selection_timeout = Some(env.outbound_timeout);

    let client = Client::with_options(options)?;
    let database = client.default_database().unwrap_or_else(|| client.database(&env.database_name));

    // fail fast when the server is unreachable
    database.run_command(doc! { "ping": 1 }).await?;
    log::info!("Connected to MongoDB database '{}'", database.name());

    Ok(database)
}

pub async fn load_aws_config(env: &Env) -> SdkConfig {
    let timeouts = TimeoutConfig::builder()
        .connect_timeout(env.outbound_timeout)
        .operation_timeout(env.outbound_timeout)
        .build();

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(env.aws_region.clone()))
        .timeout_config(timeouts);

    // For supporting localstack/minio
    if let Some(endpoint) = &env.aws_endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}
