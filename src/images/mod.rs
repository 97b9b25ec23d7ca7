// Image hand-off
//
// Pictures referenced by the document are resolved to media parts by the
// `docx` module; this module defines where their bytes go.
//
// - `sink`: the `ImageSink` collaborator trait and an in-memory implementation

pub mod sink;

pub use sink::{CollectingImageSink, ImageRequest, ImageSink, StoredImage};
