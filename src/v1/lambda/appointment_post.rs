use formdrop::prelude::*;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();
    let settings = load_settings();
    let config = load_sdk_config().await;
    let store = DynamoStore::new(&config);
    let mailer = SesMailer::new(&config);

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        handler(&store, &mailer, &settings, event)
    }))
    .await
}

async fn handler(
    store: &DynamoStore,
    mailer: &SesMailer,
    settings: &Settings,
    event: LambdaEvent<Value>,
) -> Result<(), Error> {
    post_appointment(store, mailer, settings, event.payload).await?;
    Ok(())
}
