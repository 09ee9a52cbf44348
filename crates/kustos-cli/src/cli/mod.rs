//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kustos",
    bin_name = "kustos",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{2638} GitOps application tree management",
    long_about = "Kustos manages the application tree of a GitOps repository: \
                  one kustomize base per application, one overlay per project.",
    after_help = "EXAMPLES:\n\
        \x20 kustos app create billing github.com/owner/repo/manifests?ref=v1.2.3 --project prod\n\
        \x20 kustos app create billing ./manifests --project dev\n\
        \x20 kustos app delete billing --project prod\n\
        \x20 kustos app list\n\
        \x20 kustos completions bash > /usr/share/bash-completion/completions/kustos",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage applications in the repository tree.
    #[command(
        visible_alias = "a",
        about = "Application management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kustos app create billing github.com/owner/repo/manifests?ref=v1.2.3 --project prod\n\
            \x20 kustos app delete billing --project prod\n\
            \x20 kustos app list --project prod"
    )]
    App(AppCommands),

    /// Manage the Kustos configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kustos config show\n\
            \x20 kustos config path\n\
            \x20 kustos config init"
    )]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kustos completions bash > ~/.local/share/bash-completion/completions/kustos\n\
            \x20 kustos completions zsh  > ~/.zfunc/_kustos\n\
            \x20 kustos completions fish > ~/.config/fish/completions/kustos.fish"
    )]
    Completions(CompletionsArgs),
}

// ── app ───────────────────────────────────────────────────────────────────────

/// Subcommands for `kustos app`.
#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Install an application on a project.
    #[command(
        visible_alias = "add",
        about = "Install an application on a project",
        after_help = "EXAMPLES:\n\
            \x20 kustos app create billing github.com/owner/repo/manifests?ref=v1.2.3 --project prod\n\
            \x20 kustos app create billing ./manifests --project dev --dest-namespace billing\n\
            \x20 kustos app create billing github.com/owner/repo/manifests --project prod --installation-mode flat"
    )]
    Create(CreateArgs),

    /// Remove an application from a project.
    #[command(visible_alias = "rm", about = "Remove an application from a project")]
    Delete(DeleteArgs),

    /// List installed applications.
    #[command(visible_alias = "ls", about = "List installed applications")]
    List(ListArgs),
}

/// Arguments for `kustos app create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Application name, used as the directory name under `apps/`.
    #[arg(value_name = "NAME", help = "Application name")]
    pub name: String,

    /// Where the application manifests live.  Either a remote path like
    /// `github.com/owner/repo/path?ref=v1.2.3` or a local directory.
    #[arg(
        value_name = "SPECIFIER",
        help = "Application source (remote path or local directory)"
    )]
    pub specifier: String,

    /// Project to install the application on.
    #[arg(
        short = 'p',
        long = "project",
        value_name = "PROJECT",
        help = "Project to install the application on"
    )]
    pub project: String,

    /// How the source is referenced from the base kustomization.
    #[arg(
        long = "installation-mode",
        value_enum,
        default_value = "normal",
        help = "How the application source is referenced"
    )]
    pub installation_mode: InstallMode,

    /// Kubernetes namespace the application deploys into.
    #[arg(
        long = "dest-namespace",
        value_name = "NAMESPACE",
        help = "Destination namespace"
    )]
    pub dest_namespace: Option<String>,

    /// Kubernetes API server the application deploys to.
    #[arg(long = "dest-server", value_name = "URL", help = "Destination cluster URL")]
    pub dest_server: Option<String>,
}

/// Arguments for `kustos app delete`.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Application name.
    #[arg(value_name = "NAME", help = "Application name")]
    pub name: String,

    /// Project to remove the application from.
    #[arg(
        short = 'p',
        long = "project",
        value_name = "PROJECT",
        help = "Project to remove the application from"
    )]
    pub project: String,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation and delete immediately")]
    pub yes: bool,
}

/// Arguments for `kustos app list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show applications installed on this project.
    #[arg(
        short = 'p',
        long = "project",
        value_name = "PROJECT",
        help = "Filter by project"
    )]
    pub project: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kustos completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `kustos config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved configuration as TOML.
    Show,
    /// Print the path to the active configuration file.
    Path,
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
}

// ── value enums ───────────────────────────────────────────────────────────────

/// How the application source is referenced from the base kustomization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum InstallMode {
    /// The base references the remote source directly.
    Normal,
    /// The source is resolved into a static `install.yaml` at install time.
    Flat,
}

impl std::fmt::Display for InstallMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Flat => write!(f, "flat"),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn install_mode_display_matches_wire_values() {
        assert_eq!(InstallMode::Normal.to_string(), "normal");
        assert_eq!(InstallMode::Flat.to_string(), "flat");
    }

    #[test]
    fn parse_create_command() {
        let cli = Cli::parse_from([
            "kustos",
            "app",
            "create",
            "billing",
            "github.com/owner/repo/manifests?ref=v1",
            "--project",
            "prod",
        ]);
        match cli.command {
            Commands::App(AppCommands::Create(args)) => {
                assert_eq!(args.name, "billing");
                assert_eq!(args.specifier, "github.com/owner/repo/manifests?ref=v1");
                assert_eq!(args.project, "prod");
                assert_eq!(args.installation_mode, InstallMode::Normal);
            }
            other => panic!("expected app create, got {other:?}"),
        }
    }

    #[test]
    fn create_requires_a_project() {
        let result = Cli::try_parse_from(["kustos", "app", "create", "billing", "./src"]);
        assert!(result.is_err());
    }

    #[test]
    fn flat_mode_parses() {
        let cli = Cli::parse_from([
            "kustos",
            "app",
            "create",
            "billing",
            "./manifests",
            "--project",
            "dev",
            "--installation-mode",
            "flat",
        ]);
        if let Commands::App(AppCommands::Create(args)) = cli.command {
            assert_eq!(args.installation_mode, InstallMode::Flat);
        } else {
            panic!("expected app create");
        }
    }

    #[test]
    fn unknown_installation_mode_is_rejected() {
        let result = Cli::try_parse_from([
            "kustos",
            "app",
            "create",
            "billing",
            "./manifests",
            "--project",
            "dev",
            "--installation-mode",
            "foo",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn delete_alias_rm_parses() {
        let cli = Cli::parse_from(["kustos", "app", "rm", "billing", "--project", "prod"]);
        assert!(matches!(
            cli.command,
            Commands::App(AppCommands::Delete(_))
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["kustos", "--quiet", "--verbose", "app", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn repo_flag_is_global() {
        let cli = Cli::parse_from(["kustos", "app", "list", "--repo", "/tmp/gitops"]);
        assert_eq!(
            cli.global.repo.as_deref(),
            Some(std::path::Path::new("/tmp/gitops"))
        );
    }
}
