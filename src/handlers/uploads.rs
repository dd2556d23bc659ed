use actix_multipart::form::{bytes::Bytes as FileBytes, MultipartForm};
use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::errors::UploadError;
use crate::models::{FileField, UploadResponse, UploadResult, UploadTarget, UploadedFilePart};
use crate::services::ObjectStore;

#[derive(MultipartForm)]
#[multipart(duplicate_field = "deny")]
pub struct UploadForm {
    image: Option<FileBytes>,
    cv: Option<FileBytes>,
}

impl UploadForm {
    /// Files in processing order, image before cv.
    fn into_parts(self) -> Vec<UploadedFilePart> {
        [(FileField::Image, self.image), (FileField::Cv, self.cv)]
            .into_iter()
            .filter_map(|(field, file)| file.and_then(|file| decode_part(field, file)))
            .collect()
    }
}

// A part without a filename is a plain form value, not a file.
fn decode_part(field: FileField, file: FileBytes) -> Option<UploadedFilePart> {
    let original_file_name = file.file_name.filter(|name| !name.is_empty())?;
    let mime_type = match file.content_type {
        Some(mime) => mime.to_string(),
        None => mime_guess::from_path(&original_file_name)
            .first_or_octet_stream()
            .to_string(),
    };

    Some(UploadedFilePart {
        field,
        original_file_name,
        mime_type,
        content: file.data,
    })
}

pub async fn upload_files(
    store: web::Data<dyn ObjectStore>,
    target: web::Data<UploadTarget>,
    form: Result<MultipartForm<UploadForm>, actix_web::Error>,
) -> Result<HttpResponse, UploadError> {
    let MultipartForm(form) = form.map_err(UploadError::malformed)?;
    let uploaded = store_parts(store.get_ref(), &target, form.into_parts()).await?;
    if uploaded.is_empty() {
        return Err(UploadError::NoFileSupplied);
    }

    Ok(HttpResponse::Ok().json(UploadResponse { uploaded }))
}

/// Puts each part one after the other and stops at the first failure.
///
/// Earlier successes of a failed request are neither reported nor removed
/// from the bucket; their keys are logged so they can be cleaned up.
async fn store_parts(
    store: &dyn ObjectStore,
    target: &UploadTarget,
    parts: Vec<UploadedFilePart>,
) -> Result<Vec<UploadResult>, UploadError> {
    let mut uploaded = Vec::with_capacity(parts.len());
    let mut stored_keys = Vec::with_capacity(parts.len());

    for part in parts {
        let key = part.storage_key(Utc::now().timestamp_millis());

        let result = store
            .put_object(&target.bucket, &key, part.content.clone(), &part.mime_type)
            .await;

        if let Err(err) = result {
            tracing::error!(field = part.field.as_str(), error = %err, "upload failed");
            if !stored_keys.is_empty() {
                tracing::warn!(
                    orphaned = ?stored_keys,
                    "request failed after earlier files were stored"
                );
            }
            return Err(err.into());
        }

        tracing::info!(
            field = part.field.as_str(),
            key = %key,
            size = part.size(),
            content_type = %part.mime_type,
            "stored upload"
        );

        uploaded.push(UploadResult {
            field: part.field,
            url: target.public_url(&key),
        });
        stored_keys.push(key);
    }

    Ok(uploaded)
}
