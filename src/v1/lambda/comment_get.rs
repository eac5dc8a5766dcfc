use formdrop::prelude::*;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();
    let settings = load_settings();
    let store = DynamoStore::new(&load_sdk_config().await);

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        handler(&store, &settings, event)
    }))
    .await
}

async fn handler(
    store: &DynamoStore,
    settings: &Settings,
    event: LambdaEvent<Value>,
) -> Result<CommentList, Error> {
    Ok(list_comments(store, settings, event.payload).await?)
}
