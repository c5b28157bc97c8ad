use archdoc_config::RemoteConfig;
use archdoc_core::{ArchitectureGraph, RemotePublisher, RemoteTarget};
use tracing::info;

use crate::client::{CliError, CliResult, github_host};
use crate::output::remote_summary;

pub(crate) async fn handle_publish(config: &RemoteConfig) -> CliResult<()> {
    let host = github_host(config)?;
    let target = RemoteTarget {
        base_branch: config.base_branch.clone(),
        head_branch: config.head_branch.clone(),
        readme_path: config.readme_path.clone(),
        pull_title: config.pull_title.clone(),
        pull_body: config.pull_body.clone(),
    };
    info!(
        repository = %host.repository(),
        base = %target.base_branch,
        head = %target.head_branch,
        "publishing architecture section"
    );

    let outcome = RemotePublisher::new(&host, target)
        .publish(&ArchitectureGraph::default())
        .await
        .map_err(CliError::failure)?;

    for line in remote_summary(&outcome, &config.head_branch) {
        println!("{line}");
    }
    Ok(())
}
