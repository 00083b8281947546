use std::fmt;

/// An uploaded image file, before it has been stored.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub filename: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(filename: Option<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename,
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Image bodies are large; keep them out of logs.
impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Which image backend is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStoreKind {
    /// Images are embedded in the record as `data:` URLs.
    Inline,
    /// Images are written under the upload directory and served at `/uploads/`.
    Disk,
    /// Images are delegated to the external image service.
    Remote,
}

impl ImageStoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Disk => "disk",
            Self::Remote => "remote",
        }
    }
}

impl fmt::Display for ImageStoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ImageStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" | "base64" => Ok(Self::Inline),
            "disk" | "local" => Ok(Self::Disk),
            "remote" | "service" => Ok(Self::Remote),
            other => Err(format!(
                "unknown image backend '{other}' (expected inline, disk or remote)"
            )),
        }
    }
}
