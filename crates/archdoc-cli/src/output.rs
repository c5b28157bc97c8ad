//! User-facing summaries printed to stdout.

use std::path::Path;

use archdoc_core::{ContentChange, LocalOutcome, PullChange, RemoteOutcome};

pub(crate) fn local_summary(path: &Path, outcome: LocalOutcome) -> String {
    match outcome {
        LocalOutcome::Updated => format!("{} updated with architecture diagram.", path.display()),
        LocalOutcome::Unchanged => format!("{} already up to date.", path.display()),
    }
}

pub(crate) fn remote_summary(outcome: &RemoteOutcome, head_branch: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);
    match &outcome.content {
        ContentChange::Unchanged => lines.push("No changes required.".to_string()),
        ContentChange::Committed { .. } => {
            lines.push(format!("README updated on branch: {head_branch}"));
        }
    }
    match &outcome.pull {
        PullChange::Created(pull) => lines.push(format!("PR created: {}", pull.html_url)),
        PullChange::Updated(pull) => lines.push(format!("PR updated: {}", pull.html_url)),
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use archdoc_core::PullRequest;

    #[test]
    fn remote_summary_reports_commit_and_pull() {
        let outcome = RemoteOutcome {
            branch_created: true,
            content: ContentChange::Committed {
                commit_sha: "c1".into(),
            },
            pull: PullChange::Created(PullRequest {
                number: 1,
                html_url: "https://example.test/1".into(),
            }),
        };
        assert_eq!(
            remote_summary(&outcome, "arch-agent/architecture"),
            vec![
                "README updated on branch: arch-agent/architecture".to_string(),
                "PR created: https://example.test/1".to_string(),
            ]
        );
    }

    #[test]
    fn remote_summary_reports_no_op() {
        let outcome = RemoteOutcome {
            branch_created: false,
            content: ContentChange::Unchanged,
            pull: PullChange::Updated(PullRequest {
                number: 2,
                html_url: "https://example.test/2".into(),
            }),
        };
        assert_eq!(
            remote_summary(&outcome, "h"),
            vec![
                "No changes required.".to_string(),
                "PR updated: https://example.test/2".to_string(),
            ]
        );
    }

    #[test]
    fn local_summary_names_the_file() {
        assert_eq!(
            local_summary(Path::new("README.md"), LocalOutcome::Updated),
            "README.md updated with architecture diagram."
        );
        assert_eq!(
            local_summary(Path::new("README.md"), LocalOutcome::Unchanged),
            "README.md already up to date."
        );
    }
}
