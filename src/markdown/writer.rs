/// Low-level writer for Markdown generation.
///
/// This module provides the `MarkdownWriter` struct which assembles converted
/// blocks into the final document text.

/// Block-level output buffer.
///
/// Blocks are separated by one blank line. Blocks that are empty or contain
/// only whitespace are dropped, so a skipped element never leaves a gap.
#[derive(Debug)]
pub(crate) struct MarkdownWriter {
    /// The output buffer
    buffer: String,
    /// Number of blocks written
    blocks: usize,
}

impl MarkdownWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self {
            buffer: String::with_capacity(4096), // Pre-allocate reasonable size
            blocks: 0,
        }
    }

    /// Append one block. Returns `false` when the block was blank and dropped.
    pub fn push_block(&mut self, block: &str) -> bool {
        if block.trim().is_empty() {
            return false;
        }
        if self.blocks > 0 {
            self.buffer.push_str("\n\n");
        }
        self.buffer.push_str(block);
        self.blocks += 1;
        true
    }

    /// Number of blocks written so far.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks
    }

    /// Get the final markdown output.
    pub fn finish(self) -> String {
        self.buffer
    }
}

impl Default for MarkdownWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_join_with_blank_line() {
        let mut writer = MarkdownWriter::new();
        assert!(writer.push_block("# Title"));
        assert!(!writer.push_block("  \n "));
        assert!(writer.push_block("Body"));
        assert_eq!(writer.block_count(), 2);
        assert_eq!(writer.finish(), "# Title\n\nBody");
    }

    #[test]
    fn test_empty_writer() {
        let writer = MarkdownWriter::new();
        assert_eq!(writer.finish(), "");
    }
}
