//! Resolver - finds which rules apply to an asset path

use tracing::{info, trace, warn};

use super::{RuleError, RuleSet};

/// Outcome of checking a rule set against one path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Indices of matching rules, in declaration order
    pub matched: Vec<usize>,

    /// Rules left out because they could not be evaluated
    pub rejected: Vec<(usize, RuleError)>,
}

/// Evaluates a rule set against candidate paths
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver;

impl Resolver {
    /// Indices of the rules matching `path`, in declaration order
    pub fn resolve(rules: &RuleSet, path: &str) -> Vec<usize> {
        Self::resolve_report(rules, path).matched
    }

    /// Like [`Resolver::resolve`], also reporting rules that were rejected
    pub fn resolve_report(rules: &RuleSet, path: &str) -> Resolution {
        let mut resolution = Resolution::default();
        if rules.is_empty() {
            return resolution;
        }

        for (index, rule) in rules.rules().iter().enumerate() {
            match rule.matches(path) {
                Ok(true) => {
                    trace!("Rule '{}' matched {}", rule.name, path);
                    resolution.matched.push(index);
                }
                Ok(false) => trace!("Rule '{}' did not match {}", rule.name, path),
                Err(e) => {
                    warn!("Skipping rule #{}: {}", index, e);
                    resolution.rejected.push((index, e));
                }
            }
        }

        let names: Vec<&str> = resolution
            .matched
            .iter()
            .filter_map(|&i| rules.get(i))
            .map(|rule| rule.name.as_str())
            .collect();
        info!("Rules to apply for {}: {}", path, names.join(", "));

        resolution
    }
}
