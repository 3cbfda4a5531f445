use crate::TemplateTier;
use thiserror::Error;

/// Reasons a crossword could not be generated. Both are recoverable: the
/// caller can add words or try shorter ones and ask again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("need at least {required} words to build a puzzle, got {found}")]
    InsufficientWords { found: usize, required: usize },

    #[error("only {matched} of the words fit the {tier} template (need {required}); try adding more or shorter words")]
    UnderMatched {
        matched: usize,
        required: usize,
        tier: TemplateTier,
    },
}

impl GenerateError {
    /// Whether a different word list could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerateError::InsufficientWords { .. } | GenerateError::UnderMatched { .. } => true,
        }
    }
}
