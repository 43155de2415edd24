//! Assetrules - rule-based asset import configuration
//!
//! Ordered rules match asset paths with simple predicates; the settings of
//! every matching rule are merged per asset category, later rules winning.

pub mod backend;
pub mod config;
pub mod rules;
pub mod settings;
pub mod watcher;

pub use backend::{AssetCategory, ImportBackend, Preprocessor, ProcessOutcome, SidecarBackend};
pub use config::Config;
pub use rules::{
    EffectiveConfiguration, Predicate, PredicateKind, Resolution, Resolver, Rule, RuleError,
    RuleSet, SettingsMerger,
};
pub use settings::ImportSettings;
pub use watcher::Watcher;

/// Current version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Expand ~ and environment variables ($VAR, ${VAR}) in a path
pub fn expand_path(path: &std::path::Path) -> std::path::PathBuf {
    let path_str = path.to_string_lossy();

    let expanded = if let Some(stripped) = path_str.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(stripped).to_string_lossy().to_string(),
            None => path_str.to_string(),
        }
    } else if path_str == "~" {
        match dirs::home_dir() {
            Some(home) => home.to_string_lossy().to_string(),
            None => path_str.to_string(),
        }
    } else {
        path_str.to_string()
    };

    use std::sync::LazyLock;
    static ENV_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(r"\$\{([^}]+)\}|\$([A-Za-z_][A-Za-z0-9_]*)").expect("invalid env regex")
    });

    let result = ENV_RE.replace_all(&expanded, |caps: &regex::Captures| {
        let var_name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or("");
        std::env::var(var_name).unwrap_or_else(|_| caps[0].to_string())
    });

    std::path::PathBuf::from(result.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_expand_path_leaves_plain_paths() {
        assert_eq!(
            expand_path(Path::new("/work/Assets")),
            PathBuf::from("/work/Assets")
        );
    }

    #[test]
    fn test_expand_path_unknown_var_is_kept() {
        assert_eq!(
            expand_path(Path::new("/work/$ASSETRULES_SURELY_UNSET_VAR/x")),
            PathBuf::from("/work/$ASSETRULES_SURELY_UNSET_VAR/x")
        );
    }
}
