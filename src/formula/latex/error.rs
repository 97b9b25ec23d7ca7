// Error definitions for LaTeX synthesis

/// Errors that can occur during LaTeX synthesis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatexError {
    /// Math tree nested deeper than the synthesizer allows
    DepthExceeded(usize),
}

impl std::fmt::Display for LatexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LatexError::DepthExceeded(depth) => {
                write!(f, "Math nesting exceeds depth limit ({} levels)", depth)
            },
        }
    }
}

impl std::error::Error for LatexError {}
