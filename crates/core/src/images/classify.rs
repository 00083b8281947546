/// Path prefix under which disk-stored images are served.
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// The encoding of a stored image reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef<'a> {
    /// A `data:` URL embedded in the record.
    Inline(&'a str),
    /// A file served by this server, as the path relative to the upload dir.
    Stored(&'a str),
    /// Anything else, typically an image-service or third-party URL.
    External(&'a str),
}

impl<'a> ImageRef<'a> {
    pub fn classify(reference: &'a str) -> Self {
        if reference.starts_with("data:") {
            Self::Inline(reference)
        } else if let Some(name) = reference.strip_prefix(UPLOADS_PREFIX) {
            Self::Stored(name)
        } else {
            Self::External(reference)
        }
    }

    /// True for references that cost nothing to keep around.
    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Inline(_))
    }
}

/// Image references present in `before` but not in `after`.
///
/// Used to find images orphaned by an update.
pub fn removed_refs<'a>(
    before: impl IntoIterator<Item = &'a str>,
    after: &[&str],
) -> Vec<&'a str> {
    before
        .into_iter()
        .filter(|r| !after.contains(r))
        .collect()
}
