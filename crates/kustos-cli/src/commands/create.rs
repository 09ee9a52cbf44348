//! Implementation of the `kustos app create` command.
//!
//! Responsibility: translate CLI arguments into `CreateOptions`, call the
//! core install service, and display results. No tree-layout logic lives
//! here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use kustos_adapters::{FlattenRenderer, LocalRepoFs};
use kustos_core::{
    application::{InstallService, infer_app_type},
    domain::{BaseMatching, CreateOptions, DomainError},
};

use crate::{
    cli::{CreateArgs, InstallMode, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `kustos app create` command.
///
/// Dispatch sequence:
/// 1. Resolve the repository checkout to write into
/// 2. Inspect local sources; a local directory is always installed flat
/// 3. Build `CreateOptions` from flags and config defaults
/// 4. Describe the application (validation + rendering happen here)
/// 5. Materialize the tree into the repository
/// 6. Print next-steps guidance
#[instrument(skip_all, fields(app = %args.name, project = %args.project))]
pub fn execute(
    args: CreateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve the repository checkout
    let repo_path = config.repo_path(&global);
    if !repo_path.is_dir() {
        return Err(CliError::RepoNotFound { path: repo_path });
    }

    // 2. A local directory cannot be referenced from a committed
    //    kustomization once the repository is pushed, so its manifests are
    //    embedded instead.  The inferred type is reported to the user.
    let mut mode = args.installation_mode;
    if let Some(source) = local_source(&args.specifier) {
        let source_fs = LocalRepoFs::new(&source);
        let app_type = infer_app_type(&source_fs);
        debug!(%app_type, source = %source.display(), "local source inspected");

        if !matches!(mode, InstallMode::Flat) {
            output.info(&format!(
                "'{}' is a local {} source, installing flat",
                args.specifier, app_type
            ))?;
            mode = InstallMode::Flat;
        }
    }

    // 3. Build create options, filling gaps from config defaults
    let opts = CreateOptions {
        app_specifier: args.specifier.clone(),
        app_name: args.name.clone(),
        dest_namespace: args.dest_namespace.clone(),
        dest_server: args
            .dest_server
            .clone()
            .or_else(|| config.defaults.dest_server.clone()),
        installation_mode: mode.to_string(),
    };

    let matching: BaseMatching = config
        .defaults
        .base_matching
        .parse()
        .map_err(|e: DomainError| CliError::Core(e.into()))?;

    let service =
        InstallService::new(Box::new(FlattenRenderer::new())).with_base_matching(matching);

    // 4. Describe (validation happens here; flat mode renders the source)
    let repo_url = config.repository.url.clone().unwrap_or_default();
    let app = service.describe(&opts, &args.project, &repo_url, &config.repository.revision)?;

    debug!("application described");

    // 5. Materialize the tree into the checkout
    output.header(&format!(
        "Installing '{}' on project '{}'...",
        args.name, args.project
    ))?;

    let repofs = LocalRepoFs::new(&repo_path);
    service.materialize(&repofs, &app, &args.project)?;

    info!(repo = %repo_path.display(), "application installed");

    // 6. Success + next steps
    output.success(&format!(
        "Application '{}' installed on project '{}'",
        args.name, args.project
    ))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", repo_path.display()))?;
        output.print(&format!("  git add apps/{}", args.name))?;
        output.print(&format!(
            "  git commit -m \"installed app '{}' on project '{}'\"",
            args.name, args.project
        ))?;
        output.print("  git push")?;
    }

    Ok(())
}

// ── Source inspection ─────────────────────────────────────────────────────────

/// A specifier names a local source when it points at an existing
/// directory; anything else is treated as a remote kustomize locator.
fn local_source(specifier: &str) -> Option<PathBuf> {
    let path = Path::new(specifier);
    path.is_dir().then(|| path.to_path_buf())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
