//! Comment and description templates posted by the sync engine.

use minijinja::{Environment, Value, context};
use thiserror::Error;

const MAINTAINER_FOOTER: &str = "{{ description }}

---
###### Info for package maintainer
This MR has been automatically created from
[this source-git MR]({{ source_url }}).
{%- if stream %}
Please review the contribution and once you are comfortable with the content,
you should trigger a CI pipeline run via `Pipelines → Run pipeline`.
{%- endif %}";

const CONFIRMATION: &str = "[Dist-git MR #{{ number }}]({{ url }})
has been created for sake of triggering the downstream checks.
It ensures that your contribution is valid and can be incorporated in
dist-git as it is still the authoritative source for the distribution.
We want to run checks there only so they don't need to be reimplemented in source-git as well.";

const MISSING_BRANCH: &str = "Can't create a dist-git pull/merge request out of this contribution \
because matching {{ branch }} branch does not exist in dist-git {{ target_repo }} repo.";

const SOURCE_CHANGED: &str = "[Source-git MR]({{ source_url }}) has been {{ change }}.";

const ALREADY_LINKED: &str = "[Source-git MR]({{ source_url }}) has been opened again, \
but it is already tracked by this dist-git MR. \
Remove the existing link first if a new dist-git MR is wanted.";

/// Error returned when a notice template fails to render.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render {notice} notice: {reason}")]
pub struct NoticeRenderError {
    notice: &'static str,
    reason: String,
}

/// Change on the source request mirrored to the downstream request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceChange {
    /// The source request was closed.
    Closed,
    /// The source request was reopened.
    Reopened,
    /// The source request was updated.
    Updated,
}

impl SourceChange {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Reopened => "reopened",
            Self::Updated => "updated",
        }
    }
}

/// Builds the downstream request body: rewritten description plus footer.
pub fn downstream_description(
    description: &str,
    source_url: &str,
    stream_deployment: bool,
) -> Result<String, NoticeRenderError> {
    render(
        "maintainer footer",
        MAINTAINER_FOOTER,
        context! { description, source_url, stream => stream_deployment },
    )
}

/// Confirmation posted on the source request once the link exists.
pub fn confirmation(number: u64, url: &str) -> Result<String, NoticeRenderError> {
    render("confirmation", CONFIRMATION, context! { number, url })
}

/// Explanation posted on the source request when dist-git lacks the branch.
pub fn missing_branch(branch: &str, target_repo: &str) -> Result<String, NoticeRenderError> {
    render("missing branch", MISSING_BRANCH, context! { branch, target_repo })
}

/// Notice posted on the downstream request about a source change.
pub fn source_changed(
    source_url: &str,
    change: SourceChange,
) -> Result<String, NoticeRenderError> {
    render(
        "source change",
        SOURCE_CHANGED,
        context! { source_url, change => change.as_str() },
    )
}

/// Notice posted on the downstream request when its source is opened again.
pub fn already_linked(source_url: &str) -> Result<String, NoticeRenderError> {
    render("already linked", ALREADY_LINKED, context! { source_url })
}

fn render(notice: &'static str, template: &str, ctx: Value) -> Result<String, NoticeRenderError> {
    Environment::new()
        .render_str(template, ctx)
        .map_err(|err| NoticeRenderError {
            notice,
            reason: err.to_string(),
        })
}
