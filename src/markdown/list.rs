//! List synthesis.
//!
//! A group of contiguous list items renders as one Markdown list. Ordered
//! markers come from the per-pass [`ListCounterState`](super::context::ListCounterState),
//! so numbering continues across groups of the same numbering id.
use super::context::ConversionContext;
use super::inline::render_inlines;
use crate::docx::element::DocxElement;
use log::debug;

/// Two spaces per nesting level.
const INDENT: &str = "  ";

/// Marker kind resolved for one list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// `-`
    Bullet,
    /// `<n>.`
    Ordered(u32),
}

impl ListMarker {
    fn write(self, out: &mut String) {
        match self {
            ListMarker::Bullet => out.push('-'),
            ListMarker::Ordered(n) => {
                out.push_str(&n.to_string());
                out.push('.');
            },
        }
    }
}

/// Renders list-item groups and owns the marker decision.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListStateMachine;

impl ListStateMachine {
    pub fn new() -> Self {
        Self
    }

    /// Render a group of list items, one line per item.
    pub fn render_group(&self, ctx: &mut ConversionContext<'_>, items: &[DocxElement]) -> String {
        debug!("rendering list group of {} items", items.len());
        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let line = self.render_item(ctx, item);
            if !line.is_empty() {
                lines.push(line);
            }
        }
        lines.join("\n")
    }

    /// Render one item: indentation, marker, then the trimmed inline content.
    pub fn render_item(&self, ctx: &mut ConversionContext<'_>, item: &DocxElement) -> String {
        let level = item.props.list.map(|list| list.depth()).unwrap_or(0);
        let marker = self.marker(ctx, item);
        let content = render_inlines(ctx, &item.children);

        let mut line = INDENT.repeat(level as usize);
        marker.write(&mut line);
        line.push(' ');
        line.push_str(content.trim());
        line
    }

    /// Decide the marker and advance counters for ordered items.
    ///
    /// Any break in the numbering chain yields a bullet without a warning.
    pub fn marker(&self, ctx: &mut ConversionContext<'_>, item: &DocxElement) -> ListMarker {
        let Some(list) = item.props.list else {
            return ListMarker::Bullet;
        };
        if !ctx.options.handle_numbering {
            return ListMarker::Bullet;
        }
        let Some(level) = ctx.numbering_level(list) else {
            return ListMarker::Bullet;
        };
        if level.is_bullet() {
            return ListMarker::Bullet;
        }
        let counter = ctx.counters.advance(list.num_id, list.depth());
        ListMarker::Ordered(level.start.saturating_sub(1).saturating_add(counter))
    }
}
