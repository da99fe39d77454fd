//! Target filter deciding which merge-request targets the engine handles.

use super::SyncDomainError;
use regex::Regex;

/// One configured target: repository and branch patterns.
///
/// Patterns must match the whole value. A missing pattern matches any value.
#[derive(Debug, Clone)]
pub struct TargetRule {
    repo: Option<Regex>,
    branch: Option<Regex>,
}

impl TargetRule {
    /// Compiles a rule from optional repository and branch patterns.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::InvalidTargetPattern`] when either pattern
    /// is not a valid regular expression.
    pub fn new(repo: Option<&str>, branch: Option<&str>) -> Result<Self, SyncDomainError> {
        Ok(Self {
            repo: repo.map(compile_full_match).transpose()?,
            branch: branch.map(compile_full_match).transpose()?,
        })
    }

    /// Returns `true` when both patterns match their values.
    #[must_use]
    pub fn matches(&self, target_repo: &str, target_branch: &str) -> bool {
        pattern_matches(self.repo.as_ref(), target_repo)
            && pattern_matches(self.branch.as_ref(), target_branch)
    }
}

/// Tells whether a target repository and branch pair is handled.
///
/// With no rules configured every target is handled.
///
/// # Examples
///
///     use hardly::sync::domain::{TargetRule, is_handled};
///
///     let rules = vec![
///         TargetRule::new(Some("redhat/centos-stream/src/.+"), Some("c9s"))
///             .expect("valid rule"),
///     ];
///     assert!(is_handled("redhat/centos-stream/src/make", "c9s", &rules));
///     assert!(!is_handled("redhat/centos-stream/src/make", "c8", &rules));
#[must_use]
pub fn is_handled(target_repo: &str, target_branch: &str, rules: &[TargetRule]) -> bool {
    rules.is_empty()
        || rules
            .iter()
            .any(|rule| rule.matches(target_repo, target_branch))
}

fn compile_full_match(pattern: &str) -> Result<Regex, SyncDomainError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|err| SyncDomainError::InvalidTargetPattern {
        pattern: pattern.to_owned(),
        reason: err.to_string(),
    })
}

fn pattern_matches(pattern: Option<&Regex>, value: &str) -> bool {
    pattern.is_none_or(|regex| regex.is_match(value))
}
