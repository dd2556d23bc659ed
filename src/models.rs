use actix_web::web::Bytes;
use serde::Serialize;

/// The multipart fields that carry files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileField {
    Image,
    Cv,
}

impl FileField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileField::Image => "image",
            FileField::Cv => "cv",
        }
    }

    /// Folder under `uploads/` that files of this field are stored in.
    pub fn category(&self) -> &'static str {
        match self {
            FileField::Image => "images",
            FileField::Cv => "cv",
        }
    }
}

/// A file decoded from the request body. Name and MIME type are whatever the
/// client sent.
#[derive(Debug, Clone)]
pub struct UploadedFilePart {
    pub field: FileField,
    pub original_file_name: String,
    pub mime_type: String,
    pub content: Bytes,
}

impl UploadedFilePart {
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// `uploads/<category>/<millis>_<original file name>`
    pub fn storage_key(&self, timestamp_millis: i64) -> String {
        format!(
            "uploads/{}/{}_{}",
            self.field.category(),
            timestamp_millis,
            self.original_file_name
        )
    }
}

/// Bucket every upload goes to, plus the region used to build its public
/// virtual-hosted-style URLs.
#[derive(Debug, Clone)]
pub struct UploadTarget {
    pub bucket: String,
    pub region: String,
}

impl UploadTarget {
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
        }
    }

    pub fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResult {
    #[serde(rename = "type")]
    pub field: FileField,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub uploaded: Vec<UploadResult>,
}
