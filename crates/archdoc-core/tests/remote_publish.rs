use anyhow::{Result, anyhow};
use archdoc_core::{
    ArchitectureGraph, COMMIT_MESSAGE, ContentChange, PublishError, PullChange, RemotePublisher,
    RemoteTarget, render_mermaid, upsert_architecture_section,
};
use archdoc_test_support::mocks::{HostCall, RecordingHost};

const HEAD: &str = "arch-agent/architecture";

fn target() -> RemoteTarget {
    RemoteTarget {
        base_branch: "main".to_string(),
        head_branch: HEAD.to_string(),
        readme_path: "README.md".to_string(),
        pull_title: "docs: update Architecture diagram".to_string(),
        pull_body: "Automated update of Architecture section (Mermaid).".to_string(),
    }
}

fn current_readme(original: &str) -> Result<String> {
    Ok(upsert_architecture_section(
        original,
        &render_mermaid(&ArchitectureGraph::default()),
    )?)
}

#[tokio::test]
async fn fresh_repository_gets_branch_commit_and_pull() -> Result<()> {
    let host = RecordingHost::with_file("main", "README.md", "# Title\n");
    let base_sha = host.branch_sha("main").ok_or_else(|| anyhow!("main exists"))?;

    let outcome = RemotePublisher::new(&host, target())
        .publish(&ArchitectureGraph::default())
        .await?;

    assert!(outcome.branch_created);
    assert!(matches!(outcome.content, ContentChange::Committed { .. }));
    assert!(matches!(outcome.pull, PullChange::Created(_)));
    assert_eq!(
        host.operations(),
        vec![
            "get-ref",
            "get-ref",
            "create-ref",
            "get-content",
            "put-content",
            "list-pulls",
            "create-pull"
        ]
    );

    let calls = host.calls();
    assert_eq!(calls[0], HostCall::GetRef("main".to_string()));
    assert_eq!(calls[1], HostCall::GetRef(HEAD.to_string()));
    assert_eq!(
        calls[2],
        HostCall::CreateRef {
            branch: HEAD.to_string(),
            sha: base_sha,
        }
    );
    let HostCall::PutContent(update) = &calls[4] else {
        return Err(anyhow!("expected put-content call"));
    };
    assert_eq!(update.message, COMMIT_MESSAGE);
    assert_eq!(update.branch, HEAD);
    assert_eq!(update.prior_sha, "blob-1");

    assert_eq!(
        host.file_text(HEAD, "README.md"),
        Some(current_readme("# Title\n")?)
    );
    assert_eq!(host.file_text("main", "README.md").as_deref(), Some("# Title\n"));

    let pulls = host.pulls();
    assert_eq!(pulls.len(), 1);
    assert_eq!(pulls[0].head, HEAD);
    assert_eq!(pulls[0].base, "main");
    assert_eq!(pulls[0].title, "docs: update Architecture diagram");
    Ok(())
}

#[tokio::test]
async fn up_to_date_readme_skips_only_the_file_update() -> Result<()> {
    let host = RecordingHost::with_file("main", "README.md", &current_readme("# Title\n")?);

    let outcome = RemotePublisher::new(&host, target())
        .publish(&ArchitectureGraph::default())
        .await?;

    assert_eq!(outcome.content, ContentChange::Unchanged);
    assert_eq!(
        host.operations(),
        vec![
            "get-ref",
            "get-ref",
            "create-ref",
            "get-content",
            "list-pulls",
            "create-pull"
        ]
    );
    assert_eq!(host.branch_sha(HEAD), host.branch_sha("main"));
    Ok(())
}

#[tokio::test]
async fn existing_branch_is_force_reset_and_pull_refreshed() -> Result<()> {
    let host = RecordingHost::with_file("main", "README.md", "# Title\n")
        .with_branch_from(HEAD, "main")
        .with_open_pull(7, HEAD, "main");
    host.overwrite_file(HEAD, "README.md", "diverged work\n");
    let base_sha = host.branch_sha("main").ok_or_else(|| anyhow!("main exists"))?;

    let outcome = RemotePublisher::new(&host, target())
        .publish(&ArchitectureGraph::default())
        .await?;

    assert!(!outcome.branch_created);
    assert!(host.calls().contains(&HostCall::UpdateRef {
        branch: HEAD.to_string(),
        sha: base_sha,
        force: true,
    }));
    assert!(!host.operations().contains(&"create-ref"));

    let PullChange::Updated(pull) = &outcome.pull else {
        return Err(anyhow!("expected an updated pull request"));
    };
    assert_eq!(pull.number, 7);
    assert_eq!(outcome.pull.pull_request().number, 7);

    let pulls = host.pulls();
    assert_eq!(pulls.len(), 1);
    assert_eq!(pulls[0].title, "docs: update Architecture diagram");
    assert_eq!(
        pulls[0].body,
        "Automated update of Architecture section (Mermaid)."
    );
    assert_eq!(
        host.file_text(HEAD, "README.md"),
        Some(current_readme("# Title\n")?)
    );
    Ok(())
}

#[tokio::test]
async fn missing_base_branch_stops_before_any_write() -> Result<()> {
    let host = RecordingHost::with_file("trunk", "README.md", "# Title\n");

    let err = RemotePublisher::new(&host, target())
        .publish(&ArchitectureGraph::default())
        .await
        .err()
        .ok_or_else(|| anyhow!("expected failure"))?;

    assert!(matches!(err, PublishError::BaseBranchMissing { ref branch } if branch == "main"));
    assert_eq!(host.operations(), vec!["get-ref"]);
    Ok(())
}

#[tokio::test]
async fn failed_commit_aborts_without_touching_pulls() -> Result<()> {
    let host = RecordingHost::with_file("main", "README.md", "# Title\n").fail_on("put-content");

    let err = RemotePublisher::new(&host, target())
        .publish(&ArchitectureGraph::default())
        .await
        .err()
        .ok_or_else(|| anyhow!("expected failure"))?;

    assert!(matches!(err, PublishError::Host { step: "put-content", .. }));
    assert!(!host.operations().contains(&"list-pulls"));
    assert!(host.branch_sha(HEAD).is_some());
    Ok(())
}

#[tokio::test]
async fn only_first_marked_section_is_rewritten() -> Result<()> {
    let readme = "<!--ARCH-START-->a<!--ARCH-END-->\n<!--ARCH-START-->b<!--ARCH-END-->\n";
    let host = RecordingHost::with_file("main", "README.md", readme);

    RemotePublisher::new(&host, target())
        .publish(&ArchitectureGraph::default())
        .await?;

    let text = host
        .file_text(HEAD, "README.md")
        .ok_or_else(|| anyhow!("head README"))?;
    assert!(text.ends_with("<!--ARCH-END-->\n<!--ARCH-START-->b<!--ARCH-END-->\n"));
    assert!(!text.contains("## Architecture"));
    Ok(())
}
