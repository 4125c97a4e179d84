//! Uploaded files as seen by the prediction pipeline.

/// One file received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Client-supplied file name; empty when the client sent none.
    pub filename: String,
    /// Declared MIME type, if any.
    pub content_type: Option<String>,
    /// Raw file content.
    pub data: Vec<u8>,
}

impl Upload {
    /// Creates an upload.
    pub fn new(
        filename: impl Into<String>,
        content_type: Option<impl Into<String>>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.map(Into::into),
            data: data.into(),
        }
    }

    /// Whether the declared content type is an image type.
    ///
    /// Only the declaration is checked; a missing content type counts as
    /// not an image.
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image() {
        assert!(Upload::new("a.png", Some("image/png"), vec![1u8]).is_image());
        assert!(Upload::new("a.jpg", Some("image/jpeg"), vec![1u8]).is_image());
        assert!(!Upload::new("a.txt", Some("text/plain"), vec![1u8]).is_image());
        assert!(!Upload::new("a", None::<String>, vec![1u8]).is_image());
        assert!(!Upload::new("a", Some("application/image"), vec![1u8]).is_image());
    }
}
