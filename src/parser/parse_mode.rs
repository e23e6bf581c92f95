//! Strict / lenient handling of fragments the parser cannot recognize

use anyhow::Result;

use crate::error::Pg2DbmlError;
use crate::model::{SkipReason, SkippedFragment};

/// How the parser treats statements and fragments it cannot recognize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Skip the fragment, record it, and keep going
    #[default]
    Lenient,
    /// Stop with `StructuralParseError` on the first structural miss
    Strict,
}

impl std::str::FromStr for ParseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(ParseMode::Lenient),
            "strict" => Ok(ParseMode::Strict),
            _ => Err(format!("Unknown parse mode: {}", s)),
        }
    }
}

/// Collects skipped fragments, or turns them into errors in strict mode
#[derive(Debug)]
pub(crate) struct SkipLog {
    mode: ParseMode,
    skipped: Vec<SkippedFragment>,
}

impl SkipLog {
    pub(crate) fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            skipped: Vec::new(),
        }
    }

    /// Record a fragment left out of the model.
    ///
    /// Referential misses are always recorded; structural misses fail in
    /// strict mode.
    pub(crate) fn skip(
        &mut self,
        context: impl Into<String>,
        fragment: &str,
        reason: SkipReason,
    ) -> Result<()> {
        let context = context.into();
        if self.mode == ParseMode::Strict && reason.is_structural() {
            return Err(Pg2DbmlError::StructuralParseError {
                context,
                fragment: fragment.to_string(),
                reason: reason.as_str().to_string(),
            }
            .into());
        }

        self.skipped.push(SkippedFragment {
            context,
            fragment: fragment.to_string(),
            reason,
        });
        Ok(())
    }

    pub(crate) fn into_skipped(self) -> Vec<SkippedFragment> {
        self.skipped
    }
}
