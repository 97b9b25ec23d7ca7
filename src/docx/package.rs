/// Package loading: the document body plus its side tables.
///
/// The container itself is not opened here. Callers hand in a [`PartSource`]
/// that already holds the unpacked parts.
use crate::common::error::{Error, Result};
use crate::docx::media::MediaIndex;
use crate::docx::numbering::NumberingTable;
use crate::docx::parser::{ParsedBody, StructuralParser, resolve_heading_styles};
use crate::docx::rels::RelationshipTable;
use crate::docx::styles::StyleTable;
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const STYLES_PART: &str = "word/styles.xml";
pub const NUMBERING_PART: &str = "word/numbering.xml";
pub const RELATIONSHIPS_PART: &str = "word/_rels/document.xml.rels";

/// Read access to unpacked package parts.
///
/// Implementations must be shareable across threads: side tables are parsed
/// in parallel.
pub trait PartSource: Sync {
    /// Raw bytes of a part, `None` when absent.
    fn read_part(&self, name: &str) -> Option<&[u8]>;

    /// Names of every part in the package.
    fn part_names(&self) -> Vec<String>;
}

impl<S: BuildHasher + Sync> PartSource for HashMap<String, Vec<u8>, S> {
    fn read_part(&self, name: &str) -> Option<&[u8]> {
        self.get(name).map(Vec::as_slice)
    }

    fn part_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

impl PartSource for BTreeMap<String, Vec<u8>> {
    fn read_part(&self, name: &str) -> Option<&[u8]> {
        self.get(name).map(Vec::as_slice)
    }

    fn part_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

/// A loaded document: typed body and resolved side tables.
#[derive(Debug, Clone, Default)]
pub struct DocumentPackage {
    pub body: ParsedBody,
    pub styles: StyleTable,
    pub numbering: NumberingTable,
    pub relationships: RelationshipTable,
    pub media: MediaIndex,
}

impl DocumentPackage {
    /// Load the body and every side table.
    ///
    /// The body parse and the four side tables run concurrently and are all
    /// joined before this returns. A missing or unparsable body is fatal; a
    /// broken side table becomes empty and adds a warning.
    pub fn load<P: PartSource + ?Sized>(source: &P) -> Result<Self> {
        let raw = source
            .read_part(DOCUMENT_PART)
            .ok_or_else(|| Error::MissingPart(DOCUMENT_PART.to_string()))?;
        let xml = std::str::from_utf8(raw)?;
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);

        let (body, ((styles, numbering), (relationships, media))) = rayon::join(
            || StructuralParser::new().parse_document(xml),
            || {
                rayon::join(
                    || {
                        rayon::join(
                            || load_side_table(source, STYLES_PART, StyleTable::parse),
                            || load_side_table(source, NUMBERING_PART, NumberingTable::parse),
                        )
                    },
                    || {
                        rayon::join(
                            || {
                                load_side_table(
                                    source,
                                    RELATIONSHIPS_PART,
                                    RelationshipTable::parse,
                                )
                            },
                            || MediaIndex::from_part_names(source.part_names()),
                        )
                    },
                )
            },
        );

        let mut body = body?;
        let (styles, styles_warning) = styles;
        let (numbering, numbering_warning) = numbering;
        let (relationships, rels_warning) = relationships;
        body.warnings.extend(
            [styles_warning, numbering_warning, rels_warning]
                .into_iter()
                .flatten(),
        );

        resolve_heading_styles(&mut body.elements, &styles);
        debug!(
            "loaded package: {} styles, {} numbering instances, {} relationships, {} media items",
            styles.len(),
            numbering.instance_count(),
            relationships.len(),
            media.len()
        );

        Ok(Self {
            body,
            styles,
            numbering,
            relationships,
            media,
        })
    }
}

/// Parse an optional side-table part. Absence is silent, failure is a warning.
fn load_side_table<P, T>(
    source: &P,
    part: &str,
    parse: fn(&[u8]) -> Result<T>,
) -> (T, Option<String>)
where
    P: PartSource + ?Sized,
    T: Default,
{
    let Some(raw) = source.read_part(part) else {
        return (T::default(), None);
    };
    match parse(raw) {
        Ok(table) => (table, None),
        Err(err) => {
            let message = format!("Failed to parse {}: {}", part, err);
            warn!("{}", message);
            (T::default(), Some(message))
        },
    }
}
