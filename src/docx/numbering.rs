/// Numbering definitions read from `word/numbering.xml`.
///
/// A list paragraph references a numbering instance (`w:num`), which points
/// at an abstract definition (`w:abstractNum`) holding per-level formats.
/// Resolution never fails: any break in the chain yields `None` and the
/// caller falls back to a bullet.
use crate::common::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use std::collections::{BTreeMap, HashMap};

/// Format of a single list level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingLevel {
    /// `w:numFmt` value (`decimal`, `bullet`, `lowerLetter`, ...)
    pub format: String,
    /// `w:lvlText` pattern, e.g. `%1.`
    pub level_text: String,
    /// `w:start`
    pub start: u32,
}

impl Default for NumberingLevel {
    fn default() -> Self {
        Self {
            format: "decimal".to_string(),
            level_text: "%1.".to_string(),
            start: 1,
        }
    }
}

impl NumberingLevel {
    /// Levels without a visible number render as unordered items.
    #[inline]
    pub fn is_bullet(&self) -> bool {
        matches!(self.format.as_str(), "bullet" | "none")
    }
}

/// An abstract numbering definition (template).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbstractNumbering {
    pub id: u32,
    /// Levels keyed by `w:ilvl`
    pub levels: BTreeMap<u32, NumberingLevel>,
}

/// Numbering instances and their abstract definitions.
#[derive(Debug, Clone, Default)]
pub struct NumberingTable {
    abstracts: HashMap<u32, AbstractNumbering>,
    /// numId -> abstractNumId
    instances: HashMap<u32, u32>,
}

fn u32_attr(e: &BytesStart<'_>, name: &[u8]) -> Option<u32> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .and_then(|attr| atoi_simd::parse::<u32, false, false>(attr.value.as_ref()).ok())
}

fn string_attr(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .map(|attr| {
            let raw = String::from_utf8_lossy(&attr.value);
            match unescape(&raw) {
                Ok(value) => value.into_owned(),
                Err(_) => raw.into_owned(),
            }
        })
}

impl NumberingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a numbering part.
    ///
    /// Elements with missing or non-numeric ids are skipped.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut table = Self::new();
        let mut current_abstract: Option<AbstractNumbering> = None;
        let mut current_level: Option<(u32, NumberingLevel)> = None;
        let mut current_num: Option<u32> = None;
        let mut buf = Vec::with_capacity(1024);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                    b"abstractNum" => {
                        current_abstract = u32_attr(&e, b"abstractNumId").map(|id| {
                            AbstractNumbering {
                                id,
                                levels: BTreeMap::new(),
                            }
                        });
                    },
                    b"lvl" if current_abstract.is_some() && current_num.is_none() => {
                        current_level =
                            u32_attr(&e, b"ilvl").map(|ilvl| (ilvl, NumberingLevel::default()));
                    },
                    b"start" => {
                        if let Some((_, level)) = current_level.as_mut()
                            && let Some(start) = u32_attr(&e, b"val")
                        {
                            level.start = start;
                        }
                    },
                    b"numFmt" => {
                        if let Some((_, level)) = current_level.as_mut()
                            && let Some(format) = string_attr(&e, b"val")
                        {
                            level.format = format;
                        }
                    },
                    b"lvlText" => {
                        if let Some((_, level)) = current_level.as_mut()
                            && let Some(text) = string_attr(&e, b"val")
                        {
                            level.level_text = text;
                        }
                    },
                    b"num" if current_abstract.is_none() => {
                        current_num = u32_attr(&e, b"numId");
                    },
                    b"abstractNumId" => {
                        if let Some(num_id) = current_num
                            && let Some(abstract_id) = u32_attr(&e, b"val")
                        {
                            table.instances.insert(num_id, abstract_id);
                        }
                    },
                    _ => {},
                },
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"lvl" => {
                        if let Some((ilvl, level)) = current_level.take()
                            && let Some(abstract_num) = current_abstract.as_mut()
                        {
                            abstract_num.levels.insert(ilvl, level);
                        }
                    },
                    b"abstractNum" => {
                        if let Some(abstract_num) = current_abstract.take() {
                            table.abstracts.insert(abstract_num.id, abstract_num);
                        }
                    },
                    b"num" => current_num = None,
                    _ => {},
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(table)
    }

    /// Resolve numId -> instance -> abstract definition -> level.
    pub fn resolve(&self, num_id: u32, level: u32) -> Option<&NumberingLevel> {
        let abstract_id = self.instances.get(&num_id)?;
        self.abstracts.get(abstract_id)?.levels.get(&level)
    }

    pub fn abstract_numbering(&self, id: u32) -> Option<&AbstractNumbering> {
        self.abstracts.get(&id)
    }

    #[inline]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn abstract_count(&self) -> usize {
        self.abstracts.len()
    }
}
