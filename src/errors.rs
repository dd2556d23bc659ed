use actix_multipart::MultipartError;
use actix_web::{error::PayloadError, http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable `{0}` must be set")]
    Missing(String),
    #[error("environment variable `{var}` has an invalid value `{value}`")]
    Invalid { var: String, value: String },
}

/// Failure reported by an object store. Retryable and permanent failures are
/// not told apart.
#[derive(Debug, thiserror::Error)]
#[error("failed to put `{key}` into bucket `{bucket}`: {message}")]
pub struct StorageError {
    pub bucket: String,
    pub key: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No valid file uploaded")]
    NoFileSupplied,
    #[error("Upload failed")]
    Storage(#[from] StorageError),
    #[error("{message}")]
    Malformed { status: StatusCode, message: String },
}

impl UploadError {
    /// Wraps a multipart extraction failure. The decoder's status is kept,
    /// except that exceeding a size limit is reported as 413.
    pub fn malformed(err: actix_web::Error) -> Self {
        let status = match err.as_error::<MultipartError>() {
            Some(multipart) if is_overflow(multipart) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => err.as_response_error().status_code(),
        };
        tracing::debug!(%status, error = %err, "rejected multipart body");

        UploadError::Malformed {
            status,
            message: err.to_string(),
        }
    }
}

fn is_overflow(err: &MultipartError) -> bool {
    match err {
        MultipartError::Payload(PayloadError::Overflow) => true,
        MultipartError::Field { source, .. } => {
            matches!(source.as_error::<PayloadError>(), Some(PayloadError::Overflow))
        }
        _ => false,
    }
}

impl ResponseError for UploadError {
    fn status_code(&self) -> StatusCode {
        match self {
            UploadError::NoFileSupplied => StatusCode::BAD_REQUEST,
            UploadError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            UploadError::Malformed { status, .. } => *status,
        }
    }

    // The display string of each variant is the client-facing message; the
    // storage cause stays in the logs.
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn no_file_maps_to_bad_request() {
        let err = UploadError::NoFileSupplied;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(err.error_response()).await,
            json!({ "error": "No valid file uploaded" })
        );
    }

    #[actix_web::test]
    async fn storage_failure_hides_its_cause() {
        let err = UploadError::from(StorageError {
            bucket: "bucket".to_string(),
            key: "uploads/images/1_a.png".to_string(),
            message: "AccessDenied".to_string(),
        });

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(err.error_response()).await,
            json!({ "error": "Upload failed" })
        );
    }

    #[actix_web::test]
    async fn decoder_overflow_is_payload_too_large() {
        let err = UploadError::malformed(MultipartError::Payload(PayloadError::Overflow).into());
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body_json(err.error_response()).await["error"].is_string());
    }

    #[actix_web::test]
    async fn other_decoder_errors_keep_their_status() {
        let err = UploadError::malformed(MultipartError::ContentTypeIncompatible.into());
        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let err = UploadError::malformed(MultipartError::DuplicateField("image".into()).into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
