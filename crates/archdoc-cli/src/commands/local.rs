use archdoc_config::LocalConfig;
use archdoc_core::{ArchitectureGraph, check_local, publish_local};

use crate::client::{CliError, CliResult};
use crate::output::local_summary;

pub(crate) fn handle_local(config: &LocalConfig) -> CliResult<()> {
    let outcome = publish_local(&config.readme_path, &ArchitectureGraph::default())
        .map_err(CliError::failure)?;
    println!("{}", local_summary(&config.readme_path, outcome));
    Ok(())
}

pub(crate) fn handle_check(config: &LocalConfig) -> CliResult<()> {
    let current = check_local(&config.readme_path, &ArchitectureGraph::default())
        .map_err(CliError::failure)?;
    if current {
        println!("{} is up to date.", config.readme_path.display());
        Ok(())
    } else {
        Err(CliError::validation(format!(
            "{} architecture section is out of date; run `archdoc local`",
            config.readme_path.display()
        )))
    }
}
