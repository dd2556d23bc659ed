pub mod s3;

use actix_web::web::Bytes;
use async_trait::async_trait;

use crate::errors::StorageError;

/// Remote key-addressed storage. Only single-shot puts are needed.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError>;
}
