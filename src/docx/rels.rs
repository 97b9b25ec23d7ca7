/// Relationships of the main document part (`word/_rels/document.xml.rels`).
///
/// Hyperlinks and images reference their targets through relationship ids
/// (`rId7`). An id that does not resolve is not an error.
use crate::common::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;

/// A single relationship from the document part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Part reference relative to `word/`, or an absolute URL
    pub target: String,
    /// `TargetMode="External"`
    pub external: bool,
}

impl Relationship {
    /// Short type name, the last path segment of the type URI (`image`, `hyperlink`).
    pub fn kind(&self) -> &str {
        self.rel_type.rsplit('/').next().unwrap_or(&self.rel_type)
    }
}

/// Relationship lookup keyed by id.
#[derive(Debug, Clone, Default)]
pub struct RelationshipTable {
    rels: HashMap<String, Relationship>,
}

impl RelationshipTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a relationships part.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut rels = HashMap::new();
        let mut buf = Vec::with_capacity(512);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut rel_type = String::new();
                    let mut target = String::new();
                    let mut external = false;

                    for attr in e.attributes().flatten() {
                        let Ok(value) = attr.decode_and_unescape_value(reader.decoder()) else {
                            continue;
                        };
                        match attr.key.local_name().as_ref() {
                            b"Id" => id = Some(value.into_owned()),
                            b"Type" => rel_type = value.into_owned(),
                            b"Target" => target = value.into_owned(),
                            b"TargetMode" => external = value == "External",
                            _ => {},
                        }
                    }

                    if let Some(id) = id {
                        rels.insert(
                            id.clone(),
                            Relationship {
                                id,
                                rel_type,
                                target,
                                external,
                            },
                        );
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(Self { rels })
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.rels.get(id)
    }

    /// Target of a relationship id, if it resolves.
    #[inline]
    pub fn target(&self, id: &str) -> Option<&str> {
        self.rels.get(id).map(|rel| rel.target.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELS_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
  <Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_parse_relationships() {
        let rels = RelationshipTable::parse(RELS_XML).unwrap();
        assert_eq!(rels.len(), 3);
        assert_eq!(rels.target("rId5"), Some("media/image1.png"));
        assert_eq!(rels.get("rId5").unwrap().kind(), "image");

        let link = rels.get("rId9").unwrap();
        assert!(link.external);
        assert_eq!(link.target, "https://example.com/?a=1&b=2");
    }

    #[test]
    fn test_unknown_id() {
        let rels = RelationshipTable::parse(RELS_XML).unwrap();
        assert!(rels.target("rId404").is_none());
    }
}
