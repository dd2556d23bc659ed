use actix_web::web::Bytes;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig as AwsConfig};
use aws_sdk_s3::{
    config::Credentials, error::DisplayErrorContext, primitives::ByteStream, Client as S3Client,
};

use super::ObjectStore;
use crate::config::Config;
use crate::errors::StorageError;

/// Builds the shared AWS configuration. Static keys from the environment win;
/// without them the default provider chain is used.
pub async fn load_aws_config(config: &Config) -> AwsConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()));

    if config.has_static_credentials() {
        loader = loader.credentials_provider(Credentials::new(
            config.aws_access_key_id.clone(),
            config.aws_secret_access_key.clone(),
            None,
            None,
            "environment",
        ));
    } else {
        tracing::info!("no static AWS keys configured, using the default credential chain");
    }

    loader.load().await
}

#[derive(Debug, Clone)]
pub struct Client {
    s3: S3Client,
}

impl Client {
    pub fn new(config: &AwsConfig) -> Client {
        Client {
            s3: S3Client::new(config),
        }
    }
}

#[async_trait]
impl ObjectStore for Client {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        // No ACL is sent, the bucket's default policy applies.
        let result = self
            .s3
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(StorageError {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            }),
        }
    }
}
