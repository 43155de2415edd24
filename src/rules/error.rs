//! Errors raised while evaluating or validating rules

use thiserror::Error;

/// Authoring mistakes detected in a rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// A predicate uses a kind the engine does not recognize
    #[error("rule '{rule}': unknown predicate kind '{kind}'")]
    UnknownPredicateKind { rule: String, kind: String },

    /// An enabled settings group carries an out-of-range value
    #[error("rule '{rule}': {message}")]
    InvalidSetting { rule: String, message: String },
}
