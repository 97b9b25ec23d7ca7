/// Style table read from `word/styles.xml`.
///
/// Only the fields needed to classify paragraphs are kept: id, display name,
/// type and the `basedOn` link.
use crate::common::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;

/// A single style definition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleDefinition {
    pub style_id: String,
    /// Display name (`w:name`), e.g. `heading 1`
    pub name: Option<String>,
    /// `paragraph`, `character`, `table` or `numbering`
    pub style_type: Option<String>,
    pub based_on: Option<String>,
}

/// All styles of a document, keyed by style id.
#[derive(Debug, Clone, Default)]
pub struct StyleTable {
    styles: HashMap<String, StyleDefinition>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a styles part.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut styles = HashMap::new();
        let mut current: Option<StyleDefinition> = None;
        let mut buf = Vec::with_capacity(1024);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"style" => {
                    let mut style = StyleDefinition::default();
                    for attr in e.attributes().flatten() {
                        let Ok(value) = attr.decode_and_unescape_value(reader.decoder()) else {
                            continue;
                        };
                        match attr.key.local_name().as_ref() {
                            b"styleId" => style.style_id = value.into_owned(),
                            b"type" => style.style_type = Some(value.into_owned()),
                            _ => {},
                        }
                    }
                    current = Some(style);
                },
                Ok(Event::Empty(e)) => {
                    if let Some(style) = current.as_mut() {
                        let slot = match e.local_name().as_ref() {
                            b"name" => Some(&mut style.name),
                            b"basedOn" => Some(&mut style.based_on),
                            _ => None,
                        };
                        if let Some(slot) = slot {
                            for attr in e.attributes().flatten() {
                                if attr.key.local_name().as_ref() == b"val"
                                    && let Ok(value) =
                                        attr.decode_and_unescape_value(reader.decoder())
                                {
                                    *slot = Some(value.into_owned());
                                }
                            }
                        }
                    }
                },
                Ok(Event::End(e)) if e.local_name().as_ref() == b"style" => {
                    if let Some(style) = current.take()
                        && !style.style_id.is_empty()
                    {
                        styles.insert(style.style_id.clone(), style);
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(Self { styles })
    }

    #[inline]
    pub fn get(&self, style_id: &str) -> Option<&StyleDefinition> {
        self.styles.get(style_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Heading level for a style id.
    ///
    /// The id itself is tried first (`Heading2`), then the display name
    /// (`heading 2`). An unknown id only gets the id check.
    pub fn heading_level(&self, style_id: &str) -> Option<u8> {
        heading_level(style_id).or_else(|| {
            self.get(style_id)
                .and_then(|style| style.name.as_deref())
                .and_then(heading_level)
        })
    }
}

/// Extract the level from a heading style name.
///
/// Matches `heading` case-insensitively followed by optional spaces and a
/// digit run. Level zero is not a heading.
pub fn heading_level(name: &str) -> Option<u8> {
    let lower = name.to_ascii_lowercase();
    let start = lower.find("heading")? + "heading".len();
    let rest = lower[start..].trim_start_matches(' ');
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    match atoi_simd::parse::<u32, false, false>(&rest.as_bytes()[..digits]) {
        Ok(level) if level > 0 => Some(level.min(u8::MAX as u32) as u8),
        _ => None,
    }
}
