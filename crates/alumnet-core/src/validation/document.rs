use std::path::Path;

use crate::config::PortalConfig;

/// Validation errors for submitted documents
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Empty file")]
    EmptyFile,
}

/// Document file validator
///
/// Checks type and size of a submitted file before the upload workflow makes
/// any attempt against the document store.
#[derive(Debug, Clone)]
pub struct DocumentValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
}

impl DocumentValidator {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
            allowed_content_types,
        }
    }

    pub fn from_config(config: &PortalConfig) -> Self {
        Self::new(
            config.max_upload_size_bytes(),
            config.document_allowed_extensions().to_vec(),
            config.document_allowed_content_types().to_vec(),
        )
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate file extension
    pub fn validate_extension(&self, filename: &str) -> Result<(), ValidationError> {
        let extension = extension_of(filename)?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(())
    }

    /// Validate content type
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = content_type.to_lowercase();

        if !self
            .allowed_content_types
            .iter()
            .any(|ct| ct == &normalized)
        {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    /// Validate that the content type agrees with the file extension, so a
    /// renamed file cannot slip through with a legitimate content type.
    pub fn validate_extension_content_type_match(
        &self,
        filename: &str,
        content_type: &str,
    ) -> Result<(), ValidationError> {
        let extension = extension_of(filename)?;
        let normalized_content_type = content_type.to_lowercase();

        let expected_content_types: &[&str] = match extension.as_str() {
            "jpg" | "jpeg" => &["image/jpeg"],
            "pdf" => &["application/pdf"],
            _ => {
                tracing::debug!(
                    extension = %extension,
                    content_type = %content_type,
                    "Unknown extension, skipping content type/extension cross-validation"
                );
                return Ok(());
            }
        };

        if !expected_content_types.contains(&normalized_content_type.as_str()) {
            return Err(ValidationError::InvalidContentType {
                content_type: format!(
                    "{} (does not match extension '{}'. Expected one of: {})",
                    content_type,
                    extension,
                    expected_content_types.join(", ")
                ),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    /// Validate all aspects of a file, including content type/extension matching
    pub fn validate_all(
        &self,
        filename: &str,
        content_type: &str,
        file_size: usize,
    ) -> Result<(), ValidationError> {
        if filename.trim().is_empty() {
            return Err(ValidationError::MissingField("filename"));
        }
        self.validate_file_size(file_size)?;
        self.validate_extension(filename)?;
        self.validate_content_type(content_type)?;
        self.validate_extension_content_type_match(filename, content_type)?;
        Ok(())
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }
}

fn extension_of(filename: &str) -> Result<String, ValidationError> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| ValidationError::InvalidFilename(filename.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> DocumentValidator {
        DocumentValidator::from_config(&PortalConfig::default())
    }

    #[test]
    fn test_accepts_pdf_and_jpeg() {
        let v = validator();
        assert!(v.validate_all("transcript.pdf", "application/pdf", 2048).is_ok());
        assert!(v.validate_all("photo.JPG", "image/jpeg", 2048).is_ok());
        assert!(v.validate_all("photo.jpeg", "IMAGE/JPEG", 2048).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        let v = validator();
        assert!(matches!(
            v.validate_all("resume.docx", "application/msword", 10),
            Err(ValidationError::InvalidExtension { .. })
        ));
        assert!(matches!(
            v.validate_all("scan.png", "image/png", 10),
            Err(ValidationError::InvalidExtension { .. })
        ));
    }

    #[test]
    fn test_rejects_mismatched_content_type() {
        let v = validator();
        assert!(matches!(
            v.validate_all("transcript.pdf", "image/jpeg", 10),
            Err(ValidationError::InvalidContentType { .. })
        ));
    }

    #[test]
    fn test_size_limits() {
        let v = validator();
        let max = 10 * 1024 * 1024;
        assert!(v.validate_file_size(max).is_ok());
        assert!(matches!(
            v.validate_file_size(max + 1),
            Err(ValidationError::FileTooLarge { .. })
        ));
        assert!(matches!(v.validate_file_size(0), Err(ValidationError::EmptyFile)));
    }

    #[test]
    fn test_missing_extension_or_name() {
        let v = validator();
        assert!(matches!(
            v.validate_all("README", "application/pdf", 10),
            Err(ValidationError::InvalidFilename(_))
        ));
        assert!(matches!(
            v.validate_all("  ", "application/pdf", 10),
            Err(ValidationError::MissingField("filename"))
        ));
    }
}
