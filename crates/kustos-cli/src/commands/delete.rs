//! Implementation of the `kustos app delete` command.

use tracing::{info, instrument};

use kustos_adapters::LocalRepoFs;
use kustos_core::application::delete_from_project;

use crate::{
    cli::{DeleteArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `kustos app delete` command.
///
/// Asks for confirmation unless `--yes` or `--quiet` is set; the prompt
/// defaults to proceeding (`[Y/n]`).  Removal is idempotent: deleting an
/// application that is not installed on the project succeeds without
/// touching the tree.
#[instrument(skip_all, fields(app = %args.name, project = %args.project))]
pub fn execute(
    args: DeleteArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let repo_path = config.repo_path(&global);
    if !repo_path.is_dir() {
        return Err(CliError::RepoNotFound { path: repo_path });
    }

    if !global.quiet && !args.yes {
        output.warning(&format!(
            "This removes '{}' from project '{}' in {}",
            args.name,
            args.project,
            repo_path.display()
        ))?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    let repofs = LocalRepoFs::new(&repo_path);
    delete_from_project(&repofs, &args.name, &args.project)?;

    info!("application removed");

    output.success(&format!(
        "Application '{}' removed from project '{}'",
        args.name, args.project
    ))?;

    if !global.quiet {
        output.print("")?;
        output.print("Commit and push the change to make it effective:")?;
        output.print(&format!(
            "  git commit -am \"uninstalled app '{}' from project '{}'\"",
            args.name, args.project
        ))?;
        output.print("  git push")?;
    }

    Ok(())
}

fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}
