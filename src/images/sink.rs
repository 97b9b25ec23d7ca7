// Image sink: the seam where referenced media bytes leave the converter
//
// The converter never writes files. For each referenced picture it builds an
// `ImageRequest` and asks an `ImageSink` to store it; the sink answers with
// the file name the Markdown link should use.

use crate::common::error::{Error, Result};
use std::collections::HashSet;

/// One picture the converter wants stored.
#[derive(Debug, Clone, Copy)]
pub struct ImageRequest<'data> {
    /// File name taken from the media part (`image1.png`)
    pub file_name: &'data str,
    /// MIME type derived from the extension
    pub content_type: &'static str,
    /// Raw picture bytes
    pub data: &'data [u8],
    /// Configured image folder
    pub folder: &'data str,
    /// Whether the sink may create `folder` when missing
    pub create_folder: bool,
}

impl ImageRequest<'_> {
    /// Split the file name into stem and extension (without the dot).
    pub fn stem_and_extension(&self) -> (&str, Option<&str>) {
        match self.file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (self.file_name, None),
        }
    }
}

/// Materializes image bytes on behalf of the converter.
pub trait ImageSink {
    /// Store one picture and return the file name to link to.
    ///
    /// An error makes the converter render the `[Image]` placeholder and
    /// record a warning.
    fn store(&mut self, request: &ImageRequest<'_>) -> Result<String>;
}

/// A picture kept by [`CollectingImageSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub file_name: String,
    pub folder: String,
    pub content_type: &'static str,
    pub data: Vec<u8>,
}

impl StoredImage {
    /// Folder-qualified path, `folder/name` (bare name when no folder is set).
    pub fn path(&self) -> String {
        if self.folder.is_empty() {
            self.file_name.clone()
        } else {
            format!("{}/{}", self.folder.trim_end_matches('/'), self.file_name)
        }
    }
}

/// In-memory sink that keeps every stored picture.
///
/// Names are made unique within one sink: a second `image1.png` is stored as
/// `image1_1.png`, a third as `image1_2.png`.
#[derive(Debug, Default)]
pub struct CollectingImageSink {
    images: Vec<StoredImage>,
    used_names: HashSet<String>,
}

impl CollectingImageSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pictures stored so far, in request order.
    pub fn images(&self) -> &[StoredImage] {
        &self.images
    }

    /// Consume the sink and take its pictures.
    pub fn into_images(self) -> Vec<StoredImage> {
        self.images
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn unique_name(&self, request: &ImageRequest<'_>) -> String {
        if !self.used_names.contains(request.file_name) {
            return request.file_name.to_string();
        }
        let (stem, extension) = request.stem_and_extension();
        (1..)
            .map(|n| match extension {
                Some(ext) => format!("{}_{}.{}", stem, n, ext),
                None => format!("{}_{}", stem, n),
            })
            .find(|candidate| !self.used_names.contains(candidate))
            .unwrap_or_else(|| request.file_name.to_string())
    }
}

impl ImageSink for CollectingImageSink {
    fn store(&mut self, request: &ImageRequest<'_>) -> Result<String> {
        if request.file_name.is_empty() {
            return Err(Error::Image("image has no file name".to_string()));
        }
        let file_name = self.unique_name(request);
        self.used_names.insert(file_name.clone());
        self.images.push(StoredImage {
            file_name: file_name.clone(),
            folder: request.folder.to_string(),
            content_type: request.content_type,
            data: request.data.to_vec(),
        });
        Ok(file_name)
    }
}
