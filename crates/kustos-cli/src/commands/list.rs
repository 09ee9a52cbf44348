//! Implementation of the `kustos app list` command.

use tracing::instrument;

use kustos_adapters::LocalRepoFs;
use kustos_core::application::{InstalledApp, list_apps};

use crate::{
    cli::{ListArgs, ListFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `kustos app list` command.
#[instrument(skip_all)]
pub fn execute(
    args: ListArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let repo_path = config.repo_path(&global);
    if !repo_path.is_dir() {
        return Err(CliError::RepoNotFound { path: repo_path });
    }

    let repofs = LocalRepoFs::new(&repo_path);
    let apps = list_apps(&repofs, args.project.as_deref())?;

    match args.format {
        ListFormat::Table => print_table(&apps, &output)?,
        ListFormat::List => {
            for app in &apps {
                println!("{}", app.name);
            }
        }
        ListFormat::Json => {
            // JSON goes straight to stdout so the output stays pipeable
            // even in quiet mode.
            let json = serde_json::to_string_pretty(&apps).map_err(|e| CliError::Serialize {
                message: e.to_string(),
            })?;
            println!("{json}");
        }
    }

    Ok(())
}

fn print_table(apps: &[InstalledApp], output: &OutputManager) -> CliResult<()> {
    if apps.is_empty() {
        output.info("No applications installed")?;
        return Ok(());
    }

    output.header("Installed applications:")?;
    for app in apps {
        output.print(&format!("  {} ({})", app.name, app.projects.join(", ")))?;
    }
    Ok(())
}
