//! Reading uploaded files out of multipart request bodies.

use super::error::ApiError;
use crate::domain::Upload;
use axum::extract::Multipart;
use axum::extract::multipart::Field;

/// Form field carrying the image for single predictions.
pub const SINGLE_FILE_FIELD: &str = "file";
/// Repeated form field carrying the images for batch predictions.
pub const BATCH_FILES_FIELD: &str = "files";

async fn read_field(field: Field<'_>) -> Result<Upload, ApiError> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    let data = field.bytes().await?;
    Ok(Upload::new(filename, content_type, data.to_vec()))
}

/// Collects every part named `field_name`, in request order.
///
/// Parts with other names are drained and ignored.
pub async fn collect_uploads(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<Vec<Upload>, ApiError> {
    let mut uploads = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(field_name) {
            uploads.push(read_field(field).await?);
        }
    }
    Ok(uploads)
}

/// Returns the first part named `field_name`.
///
/// # Errors
///
/// Responds with 400 `"No file uploaded"` when no such part exists.
pub async fn single_upload(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<Upload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(field_name) {
            return read_field(field).await;
        }
    }
    Err(ApiError::no_file())
}
