/// Index of the media parts stored under `word/media/`.
use phf::phf_map;
use std::collections::HashMap;

/// Prefix of every media part name.
pub const MEDIA_PREFIX: &str = "word/media/";

static CONTENT_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
    "png" => "image/png",
    "jpg" => "image/jpeg",
    "jpeg" => "image/jpeg",
    "gif" => "image/gif",
    "bmp" => "image/bmp",
    "svg" => "image/svg+xml",
    "webp" => "image/webp",
    "emf" => "image/x-emf",
    "wmf" => "image/x-wmf",
};

/// MIME type for a file extension; unknown extensions are opaque bytes.
pub fn content_type_for(extension: &str) -> &'static str {
    CONTENT_TYPES
        .get(extension.to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or("application/octet-stream")
}

/// A media part of the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// Full part name, e.g. `word/media/image1.png`
    pub part_name: String,
    /// Last path segment, e.g. `image1.png`
    pub file_name: String,
    /// Lowercased extension without the dot
    pub extension: String,
    pub content_type: &'static str,
}

impl MediaItem {
    pub fn from_part_name(part_name: &str) -> Self {
        let file_name = part_name.rsplit('/').next().unwrap_or(part_name).to_string();
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        Self {
            part_name: part_name.to_string(),
            content_type: content_type_for(&extension),
            file_name,
            extension,
        }
    }
}

/// Media items keyed by part name.
#[derive(Debug, Clone, Default)]
pub struct MediaIndex {
    items: HashMap<String, MediaItem>,
}

impl MediaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every part name under the media prefix.
    pub fn from_part_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items = names
            .into_iter()
            .filter(|name| {
                let name = name.as_ref();
                name.starts_with(MEDIA_PREFIX) && name.len() > MEDIA_PREFIX.len()
            })
            .map(|name| {
                let item = MediaItem::from_part_name(name.as_ref());
                (item.part_name.clone(), item)
            })
            .collect();
        Self { items }
    }

    /// Look up the media item a relationship target points at.
    pub fn resolve(&self, target: &str) -> Option<&MediaItem> {
        self.items.get(&resolve_target(target))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Turn a document-relative relationship target into a part name.
///
/// `media/a.png`, `../media/a.png`, `/word/media/a.png` and `word/media/a.png`
/// all name `word/media/a.png`.
pub fn resolve_target(target: &str) -> String {
    let mut trimmed = target;
    while let Some(rest) = trimmed.strip_prefix("../") {
        trimmed = rest;
    }
    let trimmed = trimmed.trim_start_matches('/');
    if trimmed.starts_with("word/") {
        trimmed.to_string()
    } else {
        format!("word/{}", trimmed)
    }
}
