//! Rewriting of bug-tracker references in request descriptions.

use regex::Regex;
use std::sync::LazyLock;

#[expect(
    clippy::expect_used,
    reason = "the pattern is a compile-time constant"
)]
static BUGZILLA_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Bugzilla: +(?:https://.+id=)?(\d+)").expect("valid Bugzilla pattern")
});

/// Converts `Bugzilla: <id or link>` lines into `Resolves: bz#<id>`.
///
/// Only lines that start exactly with `Bugzilla:` followed by at least one
/// space are rewritten; the rest of the line after the number is kept.
/// Applying the function twice gives the same result as applying it once.
///
/// # Examples
///
///     use hardly::sync::domain::fix_bugzilla_refs;
///
///     let text = "Fix crash\n\nBugzilla: https://bugzilla.redhat.com/show_bug.cgi?id=1234";
///     assert_eq!(fix_bugzilla_refs(text), "Fix crash\n\nResolves: bz#1234");
#[must_use]
pub fn fix_bugzilla_refs(text: &str) -> String {
    BUGZILLA_REF
        .replace_all(text, "Resolves: bz#${1}")
        .into_owned()
}
