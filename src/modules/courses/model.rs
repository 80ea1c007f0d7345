//! Course DTOs and the cover image validator.

use dzskills_core::AppError;

pub use dzskills_models::courses::*;

/// Upload rules for course cover images.
pub struct CourseImageValidator;

impl CourseImageValidator {
    const ALLOWED_MIME_TYPES: &'static [&'static str] = &["image/png", "image/jpeg", "image/webp"];

    /// 5MB
    pub const MAX_SIZE_BYTES: usize = 5 * 1024 * 1024;

    /// # Errors
    /// Returns `AppError::bad_request` for empty, oversized or non-image files.
    pub fn validate(metadata: &FileMetadata) -> Result<(), AppError> {
        if metadata.size_bytes == 0 {
            return Err(AppError::bad_request(anyhow::anyhow!("Uploaded file is empty")));
        }

        if metadata.size_bytes > Self::MAX_SIZE_BYTES {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "File size {} bytes exceeds 5MB limit",
                metadata.size_bytes
            )));
        }

        if !Self::ALLOWED_MIME_TYPES.contains(&metadata.mime_type.as_str()) {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "MIME type '{}' not allowed. Allowed types: PNG, JPEG, WebP",
                metadata.mime_type
            )));
        }

        Ok(())
    }

    /// Extension without the dot for an allowed MIME type.
    pub fn get_extension(mime_type: &str) -> &'static str {
        match mime_type {
            "image/png" => "png",
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "bin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(mime_type: &str, size_bytes: usize) -> FileMetadata {
        FileMetadata {
            mime_type: mime_type.to_string(),
            size_bytes,
        }
    }

    #[test]
    fn test_accepts_supported_images() {
        for mime in ["image/png", "image/jpeg", "image/webp"] {
            assert!(CourseImageValidator::validate(&metadata(mime, 1024)).is_ok());
        }
    }

    #[test]
    fn test_rejects_oversized_file() {
        let err = CourseImageValidator::validate(&metadata(
            "image/png",
            CourseImageValidator::MAX_SIZE_BYTES + 1,
        ))
        .unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
        assert!(err.error.to_string().contains("exceeds 5MB"));
    }

    #[test]
    fn test_accepts_exactly_max_size() {
        let meta = metadata("image/webp", CourseImageValidator::MAX_SIZE_BYTES);
        assert!(CourseImageValidator::validate(&meta).is_ok());
    }

    #[test]
    fn test_rejects_empty_file() {
        assert!(CourseImageValidator::validate(&metadata("image/png", 0)).is_err());
    }

    #[test]
    fn test_rejects_other_mime_types() {
        let err = CourseImageValidator::validate(&metadata("application/pdf", 10)).unwrap_err();
        assert!(err.error.to_string().contains("application/pdf"));
        assert!(CourseImageValidator::validate(&metadata("image/gif", 10)).is_err());
    }

    #[test]
    fn test_extensions() {
        assert_eq!(CourseImageValidator::get_extension("image/png"), "png");
        assert_eq!(CourseImageValidator::get_extension("image/jpeg"), "jpg");
        assert_eq!(CourseImageValidator::get_extension("image/webp"), "webp");
        assert_eq!(CourseImageValidator::get_extension("text/plain"), "bin");
    }
}
