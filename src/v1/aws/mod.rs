pub mod dynamodb;
pub mod ses;

use aws_config::{BehaviorVersion, SdkConfig};

/// Shared SDK configuration; region and credentials come from the Lambda
/// environment.
pub async fn load_sdk_config() -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest()).load().await
}
