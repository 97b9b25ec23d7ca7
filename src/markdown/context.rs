/// Per-pass conversion state.
///
/// A [`ConversionContext`] is created for one document, threaded through every
/// synthesizer, and dropped when the pass ends. Nothing in it is shared
/// between passes.
use super::config::ConversionOptions;
use crate::docx::element::{ElementProperties, ListRef, MAX_LIST_LEVEL};
use crate::docx::numbering::NumberingLevel;
use crate::docx::package::{DocumentPackage, PartSource};
use crate::images::{ImageRequest, ImageSink};
use log::{debug, warn};
use std::collections::HashMap;

/// Multi-level ordered-list counters keyed by numbering id.
///
/// Counters are 1-based once advanced. Advancing a level resets every deeper
/// level of the same numbering id to zero.
#[derive(Debug, Clone, Default)]
pub struct ListCounterState {
    counters: HashMap<u32, Vec<u32>>,
}

impl ListCounterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment `level` of `num_id` and return its new value.
    ///
    /// Levels past [`MAX_LIST_LEVEL`] count on the deepest level.
    pub fn advance(&mut self, num_id: u32, level: u32) -> u32 {
        let level = level.min(MAX_LIST_LEVEL) as usize;
        let counters = self.counters.entry(num_id).or_default();
        if counters.len() <= level {
            counters.resize(level + 1, 0);
        }
        counters[level] = counters[level].saturating_add(1);
        for deeper in counters.iter_mut().skip(level + 1) {
            *deeper = 0;
        }
        counters[level]
    }

    /// Current counters of a numbering id, shallowest level first.
    pub fn counters(&self, num_id: u32) -> Option<&[u32]> {
        self.counters.get(&num_id).map(Vec::as_slice)
    }

    pub fn clear(&mut self) {
        self.counters.clear();
    }
}

/// Everything a synthesizer needs while converting one document.
pub struct ConversionContext<'a> {
    pub options: &'a ConversionOptions,
    pub package: &'a DocumentPackage,
    pub counters: ListCounterState,
    source: &'a dyn PartSource,
    sink: &'a mut dyn ImageSink,
    warnings: Vec<String>,
    // relationship id -> stored file name, so repeated references reuse one file
    stored_images: HashMap<String, Option<String>>,
}

impl<'a> ConversionContext<'a> {
    pub fn new(
        options: &'a ConversionOptions,
        package: &'a DocumentPackage,
        source: &'a dyn PartSource,
        sink: &'a mut dyn ImageSink,
    ) -> Self {
        Self {
            options,
            package,
            counters: ListCounterState::new(),
            source,
            sink,
            warnings: Vec::new(),
            stored_images: HashMap::new(),
        }
    }

    /// Record a recoverable problem.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.warnings.push(message);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }

    /// Numbering level a list item points at, if the whole chain resolves.
    pub fn numbering_level(&self, list: ListRef) -> Option<&'a NumberingLevel> {
        let package: &'a DocumentPackage = self.package;
        package.numbering.resolve(list.num_id, list.level)
    }

    /// Link target of a hyperlink: relationship target, then `#anchor`, then `#`.
    pub fn hyperlink_target(&self, props: &ElementProperties) -> String {
        if let Some(target) = props
            .link_id
            .as_deref()
            .and_then(|id| self.package.relationships.target(id))
        {
            return target.to_string();
        }
        match props.anchor.as_deref() {
            Some(anchor) if !anchor.is_empty() => format!("#{}", anchor),
            _ => "#".to_string(),
        }
    }

    /// Hand a referenced image to the sink and return the stored file name.
    ///
    /// Unresolvable references return `None` silently; a sink failure also
    /// returns `None` and records a warning. Each relationship id is stored
    /// at most once per pass.
    pub fn store_image(&mut self, image_id: &str) -> Option<String> {
        if let Some(stored) = self.stored_images.get(image_id) {
            return stored.clone();
        }
        let stored = self.materialize_image(image_id);
        self.stored_images.insert(image_id.to_string(), stored.clone());
        stored
    }

    fn materialize_image(&mut self, image_id: &str) -> Option<String> {
        let package: &'a DocumentPackage = self.package;
        let options: &'a ConversionOptions = self.options;
        let source: &'a dyn PartSource = self.source;
        let Some(target) = package.relationships.target(image_id) else {
            debug!("no relationship for image {}", image_id);
            return None;
        };
        let Some(item) = package.media.resolve(target) else {
            debug!("no media part for image target {}", target);
            return None;
        };
        let data = source.read_part(&item.part_name)?;

        let request = ImageRequest {
            file_name: &item.file_name,
            content_type: item.content_type,
            data,
            folder: &options.image_folder,
            create_folder: options.create_image_folder,
        };
        match self.sink.store(&request) {
            Ok(name) => Some(name),
            Err(err) => {
                self.warn(format!("Failed to store image {}: {}", item.file_name, err));
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::CollectingImageSink;

    #[test]
    fn test_counter_resets_deeper_levels() {
        let mut state = ListCounterState::new();
        let visible: Vec<u32> = [0, 0, 1, 1, 0, 1]
            .into_iter()
            .map(|level| state.advance(7, level))
            .collect();
        assert_eq!(visible, vec![1, 2, 1, 2, 3, 1]);
        assert_eq!(state.counters(7), Some(&[3, 1][..]));
    }

    #[test]
    fn test_levels_past_the_deepest_share_it() {
        let mut state = ListCounterState::new();
        assert_eq!(state.advance(1, u32::MAX), 1);
        assert_eq!(state.advance(1, 8), 2);
        assert_eq!(state.counters(1).map(<[u32]>::len), Some(9));
    }

    #[test]
    fn test_counters_are_per_numbering_id() {
        let mut state = ListCounterState::new();
        assert_eq!(state.advance(1, 0), 1);
        assert_eq!(state.advance(2, 0), 1);
        assert_eq!(state.advance(1, 0), 2);
        assert_eq!(state.advance(2, 2), 1);
        assert_eq!(state.counters(2), Some(&[1, 0, 1][..]));
        state.clear();
        assert_eq!(state.counters(1), None);
    }

    #[test]
    fn test_hyperlink_target_fallbacks() {
        let options = ConversionOptions::default();
        let package = DocumentPackage::default();
        let source: HashMap<String, Vec<u8>> = HashMap::new();
        let mut sink = CollectingImageSink::new();
        let ctx = ConversionContext::new(&options, &package, &source, &mut sink);

        let mut props = ElementProperties {
            link_id: Some("rId404".to_string()),
            ..Default::default()
        };
        assert_eq!(ctx.hyperlink_target(&props), "#");
        props.anchor = Some("intro".to_string());
        assert_eq!(ctx.hyperlink_target(&props), "#intro");
    }

    #[test]
    fn test_unresolved_image_is_silent() {
        let options = ConversionOptions::default();
        let package = DocumentPackage::default();
        let source: HashMap<String, Vec<u8>> = HashMap::new();
        let mut sink = CollectingImageSink::new();
        let mut ctx = ConversionContext::new(&options, &package, &source, &mut sink);
        assert_eq!(ctx.store_image("rId1"), None);
        assert!(ctx.warnings().is_empty());
    }
}
