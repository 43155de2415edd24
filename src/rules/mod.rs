//! Rule engine - predicates, matching and settings resolution

mod error;
mod merger;
mod predicate;
mod resolver;

pub use error::RuleError;
pub use merger::{EffectiveConfiguration, SettingsMerger};
pub use predicate::{Predicate, PredicateKind, directory, extension, file_name};
pub use resolver::{Resolution, Resolver};

use crate::settings::ImportSettings;
use serde::{Deserialize, Serialize};

/// A named conjunction of predicates plus the settings it overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Human-readable name, used in diagnostics only
    pub name: String,

    /// Predicates to match (all must hold, none means every path)
    #[serde(default, rename = "predicate")]
    pub predicates: Vec<Predicate>,

    /// Settings applied to matched assets
    #[serde(default)]
    pub settings: ImportSettings,
}

impl Rule {
    /// Create a new rule
    pub fn new(
        name: impl Into<String>,
        predicates: Vec<Predicate>,
        settings: ImportSettings,
    ) -> Self {
        Self {
            name: name.into(),
            predicates,
            settings,
        }
    }

    /// Check whether every predicate holds for `path`.
    ///
    /// Fails on the first predicate with an unrecognized kind, so the rule is
    /// never half-applied.
    pub fn matches(&self, path: &str) -> Result<bool, RuleError> {
        let mut passed = true;
        for predicate in &self.predicates {
            match predicate.contribution(path) {
                Some(contribution) => passed = passed && contribution,
                None => return Err(self.unknown_kind(predicate)),
            }
        }
        Ok(passed)
    }

    /// Check the rule for authoring mistakes without evaluating it
    pub fn validate(&self) -> Result<(), RuleError> {
        if let Some(predicate) = self
            .predicates
            .iter()
            .find(|p| matches!(p.kind, PredicateKind::Unknown(_)))
        {
            return Err(self.unknown_kind(predicate));
        }

        self.settings
            .validate()
            .map_err(|message| RuleError::InvalidSetting {
                rule: self.name.clone(),
                message,
            })
    }

    fn unknown_kind(&self, predicate: &Predicate) -> RuleError {
        RuleError::UnknownPredicateKind {
            rule: self.name.clone(),
            kind: predicate.kind.to_string(),
        }
    }
}

/// Rules in declaration order.
///
/// The order decides both which rules are checked first and which one wins
/// when several override the same settings group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Validate every rule, collecting all problems
    pub fn validate(&self) -> Vec<RuleError> {
        self.rules
            .iter()
            .filter_map(|rule| rule.validate().err())
            .collect()
    }
}
